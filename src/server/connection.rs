//! Per-connection broker loop
//!
//! One `Connection` runs per accepted producer socket. It is the only
//! writer into the registry for that producer, so registry updates for a
//! single id are strictly ordered; across producers the loops interleave
//! freely.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::Result;
use crate::protocol::{TransportError, WireMessage, WireTransport};
use crate::registry::{ClientRegistry, Frame};
use crate::stats::SessionStats;

/// Events emitted by broker loops, consumed by the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestEvent {
    /// A producer delivered its first frame
    NewClient(crate::registry::ClientId),
}

/// Broker receive loop over one producer connection
pub struct Connection<T> {
    session_id: u64,
    transport: T,
    registry: Arc<ClientRegistry>,
    events: mpsc::Sender<IngestEvent>,
    stats: SessionStats,
}

impl<T: WireTransport + Send> Connection<T> {
    /// Create a broker loop for an accepted connection
    pub fn new(
        session_id: u64,
        transport: T,
        registry: Arc<ClientRegistry>,
        events: mpsc::Sender<IngestEvent>,
    ) -> Self {
        Self {
            session_id,
            transport,
            registry,
            events,
            stats: SessionStats::new(),
        }
    }

    /// Current session statistics
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Run the receive loop until the producer disconnects
    ///
    /// - timeout: nothing arrived, loop again;
    /// - message: upsert, announce first-time producers, acknowledge;
    /// - malformed: drop the message, loop again;
    /// - short read: producer went away, finish normally;
    /// - anything else: fatal for this connection, surfaced to the caller.
    pub async fn run(&mut self) -> Result<()> {
        let outcome = loop {
            match self.transport.read_message().await {
                Ok(message) => self.on_message(message).await?,
                Err(TransportError::Timeout) => continue,
                Err(TransportError::Malformed(reason)) => {
                    self.stats.on_malformed();
                    tracing::warn!(
                        session_id = self.session_id,
                        reason = reason,
                        "Dropping malformed message"
                    );
                }
                Err(TransportError::ShortRead) => {
                    tracing::debug!(session_id = self.session_id, "Producer disconnected");
                    break Ok(());
                }
                Err(e) => break Err(e),
            }
        };

        tracing::info!(
            session_id = self.session_id,
            frames = self.stats.frames_received,
            bytes = self.stats.bytes_received,
            malformed = self.stats.malformed_messages,
            "Ingest session ended"
        );

        outcome.map_err(Into::into)
    }

    async fn on_message(&mut self, message: WireMessage) -> Result<()> {
        let WireMessage { client_id, image } = message;

        self.stats.on_frame(image.len());

        let frame = Frame::from_encoded(image);
        let is_new = self.registry.upsert(&client_id, frame).await;

        if is_new {
            let _ = self.events.send(IngestEvent::NewClient(client_id)).await;
        }

        // The producer is blocked on this ack; it must go out even when no
        // one is watching the stream.
        self.transport.write_ack().await?;
        self.stats.on_ack();

        Ok(())
    }
}
