//! Frame publisher
//!
//! Producer-side API for pushing encoded frames to the broker. The
//! protocol is synchronous request/reply: `send_frame` does not return
//! until the broker's 2-byte acknowledgment arrives, so a producer can
//! never have more than one frame in flight. A slow broker therefore
//! throttles the producer directly instead of letting frames queue.

use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::error::{Error, Result};
use crate::protocol::framing::{encode_message, ACK};
use crate::protocol::TransportError;

use super::config::ClientConfig;

/// Events from the frame publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishEvent {
    /// Connected to the broker
    Connected,

    /// A frame was sent and acknowledged
    FrameSent {
        /// Count of frames acknowledged so far on this connection
        sequence: u64,
    },

    /// Disconnected from the broker
    Disconnected,
}

/// Frame publisher
///
/// # Example
/// ```no_run
/// use framehub::client::{ClientConfig, FramePublisher};
/// use bytes::Bytes;
///
/// # async fn example() -> framehub::error::Result<()> {
/// let config = ClientConfig::new("127.0.0.1:5555".parse().unwrap(), "cam-1");
/// let (mut publisher, mut events) = FramePublisher::new(config);
///
/// tokio::spawn(async move {
///     while let Some(event) = events.recv().await {
///         println!("Event: {:?}", event);
///     }
/// });
///
/// publisher.connect().await?;
/// publisher.send_frame(Bytes::from_static(b"...jpeg...")).await?;
/// # Ok(())
/// # }
/// ```
pub struct FramePublisher {
    config: ClientConfig,
    stream: Option<TcpStream>,
    event_tx: mpsc::Sender<PublishEvent>,
    frames_sent: u64,
}

impl FramePublisher {
    /// Create a new publisher.
    ///
    /// Returns the publisher and a receiver for events.
    pub fn new(config: ClientConfig) -> (Self, mpsc::Receiver<PublishEvent>) {
        let (tx, rx) = mpsc::channel(256);

        let publisher = Self {
            config,
            stream: None,
            event_tx: tx,
            frames_sent: 0,
        };

        (publisher, rx)
    }

    /// Connect to the broker.
    pub async fn connect(&mut self) -> Result<()> {
        let connect = TcpStream::connect(self.config.server_addr);
        let stream = match timeout(self.config.connect_timeout, connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(Error::Transport(TransportError::Timeout)),
        };

        if self.config.tcp_nodelay {
            stream.set_nodelay(true)?;
        }

        self.stream = Some(stream);
        self.frames_sent = 0;
        let _ = self.event_tx.send(PublishEvent::Connected).await;

        tracing::debug!(
            server = %self.config.server_addr,
            producer = %self.config.client_id,
            "Connected to broker"
        );

        Ok(())
    }

    /// Send one encoded frame and wait for the acknowledgment.
    ///
    /// Blocks until the broker acknowledges; the next frame may only be
    /// sent after this returns. An ack that does not arrive within
    /// `ack_timeout`, or that is not the expected bytes, is an error and
    /// the caller should reconnect.
    pub async fn send_frame(&mut self, image: Bytes) -> Result<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or(Error::Transport(TransportError::ShortRead))?;

        let message = encode_message(&self.config.client_id, &image);
        stream.write_all(&message).await?;
        stream.flush().await?;

        let mut ack = [0u8; 2];
        match timeout(self.config.ack_timeout, stream.read_exact(&mut ack)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(Error::Transport(e.into())),
            Err(_) => return Err(Error::Transport(TransportError::Timeout)),
        }

        if ack != ACK {
            return Err(Error::Transport(TransportError::Malformed(
                "unexpected acknowledgment bytes",
            )));
        }

        self.frames_sent += 1;
        let _ = self
            .event_tx
            .send(PublishEvent::FrameSent {
                sequence: self.frames_sent,
            })
            .await;

        Ok(())
    }

    /// Disconnect from the broker.
    pub async fn disconnect(&mut self) {
        self.stream.take();
        let _ = self.event_tx.send(PublishEvent::Disconnected).await;
    }

    /// Check if currently connected.
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Frames acknowledged on the current connection.
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::net::TcpListener;

    use crate::protocol::framing::decode_payload;

    use super::*;

    /// Accept one connection and ack `n` messages, reading each fully.
    async fn acking_server(listener: TcpListener, n: usize) {
        let (mut socket, _) = listener.accept().await.unwrap();
        for _ in 0..n {
            let len = socket.read_u32().await.unwrap() as usize;
            let mut payload = vec![0u8; len];
            socket.read_exact(&mut payload).await.unwrap();
            let message = decode_payload(payload.into()).unwrap();
            assert_eq!(message.client_id.as_str(), "cam-1");
            socket.write_all(&ACK).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_send_waits_for_ack() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(acking_server(listener, 2));

        let config = ClientConfig::new(addr, "cam-1");
        let (mut publisher, mut events) = FramePublisher::new(config);

        publisher.connect().await.unwrap();
        assert_eq!(events.recv().await, Some(PublishEvent::Connected));

        publisher
            .send_frame(Bytes::from_static(b"frame-1"))
            .await
            .unwrap();
        publisher
            .send_frame(Bytes::from_static(b"frame-2"))
            .await
            .unwrap();

        assert_eq!(publisher.frames_sent(), 2);
        assert_eq!(
            events.recv().await,
            Some(PublishEvent::FrameSent { sequence: 1 })
        );
        assert_eq!(
            events.recv().await,
            Some(PublishEvent::FrameSent { sequence: 2 })
        );
    }

    #[tokio::test]
    async fn test_send_times_out_without_ack() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Server accepts but never acks
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let config =
            ClientConfig::new(addr, "cam-1").ack_timeout(Duration::from_millis(50));
        let (mut publisher, _events) = FramePublisher::new(config);

        publisher.connect().await.unwrap();
        let err = publisher.send_frame(Bytes::from_static(b"frame")).await;
        assert!(matches!(
            err,
            Err(Error::Transport(TransportError::Timeout))
        ));
    }

    #[tokio::test]
    async fn test_send_without_connect_fails() {
        let config = ClientConfig::new("127.0.0.1:1".parse().unwrap(), "cam-1");
        let (mut publisher, _events) = FramePublisher::new(config);

        assert!(!publisher.is_connected());
        assert!(publisher.send_frame(Bytes::from_static(b"f")).await.is_err());
    }
}
