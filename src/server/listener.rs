//! Ingest server listener
//!
//! Handles the TCP accept loop and spawns one broker loop per producer
//! connection. There is no automatic reconnect: a producer that drops its
//! connection dials again and is accepted as a fresh session.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Semaphore};

use crate::error::Result;
use crate::protocol::TcpTransport;
use crate::registry::{ClientRegistry, RegistryConfig};
use crate::server::config::ServerConfig;
use crate::server::connection::{Connection, IngestEvent};

/// Frame ingest server
pub struct IngestServer {
    config: ServerConfig,
    registry: Arc<ClientRegistry>,
    events: mpsc::Sender<IngestEvent>,
    next_session_id: AtomicU64,
    connection_semaphore: Option<Arc<Semaphore>>,
}

impl IngestServer {
    /// Create a new server with the given configuration
    ///
    /// Returns the server and the receiver side of the ingest event
    /// channel (new-producer announcements for the view layer).
    pub fn new(config: ServerConfig) -> (Self, mpsc::Receiver<IngestEvent>) {
        Self::with_registry_config(config, RegistryConfig::default())
    }

    /// Create a new server with custom registry configuration
    pub fn with_registry_config(
        config: ServerConfig,
        registry_config: RegistryConfig,
    ) -> (Self, mpsc::Receiver<IngestEvent>) {
        let connection_semaphore = if config.max_connections > 0 {
            Some(Arc::new(Semaphore::new(config.max_connections)))
        } else {
            None
        };

        let (event_tx, event_rx) = mpsc::channel(256);

        let server = Self {
            config,
            registry: Arc::new(ClientRegistry::with_config(registry_config)),
            events: event_tx,
            next_session_id: AtomicU64::new(1),
            connection_semaphore,
        };

        (server, event_rx)
    }

    /// Get a reference to the client registry
    pub fn registry(&self) -> &Arc<ClientRegistry> {
        &self.registry
    }

    /// Get the bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }

    /// Run the server
    ///
    /// This method blocks until the process exits; only the initial bind
    /// can fail.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Ingest server listening");

        if self.registry.config().stale_after.is_some() {
            let _cleanup_handle = self.registry.spawn_cleanup_task();
        }

        self.accept_loop(&listener).await
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Ingest server listening");

        let cleanup_handle = if self.registry.config().stale_after.is_some() {
            Some(self.registry.spawn_cleanup_task())
        } else {
            None
        };

        let result = tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received");
                Ok(())
            }
            result = self.accept_loop(&listener) => result,
        };

        if let Some(handle) = cleanup_handle {
            handle.abort();
        }

        result
    }

    async fn accept_loop(&self, listener: &TcpListener) -> Result<()> {
        loop {
            match listener.accept().await {
                Ok((socket, peer_addr)) => {
                    self.handle_connection(socket, peer_addr);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }

    fn handle_connection(&self, socket: TcpStream, peer_addr: SocketAddr) {
        // Check connection limit
        let _permit = if let Some(ref sem) = self.connection_semaphore {
            match sem.clone().try_acquire_owned() {
                Ok(permit) => Some(permit),
                Err(_) => {
                    tracing::warn!(peer = %peer_addr, "Connection rejected: limit reached");
                    return;
                }
            }
        } else {
            None
        };

        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            session_id = session_id,
            peer = %peer_addr,
            "New producer connection"
        );

        if self.config.tcp_nodelay {
            if let Err(e) = socket.set_nodelay(true) {
                tracing::warn!(error = %e, "Failed to set TCP_NODELAY");
            }
        }

        let transport = TcpTransport::new(
            socket,
            self.config.recv_timeout,
            self.config.max_frame_size,
        );
        let registry = Arc::clone(&self.registry);
        let events = self.events.clone();

        tokio::spawn(async move {
            let _permit = _permit;
            let mut connection = Connection::new(session_id, transport, registry, events);

            if let Err(e) = connection.run().await {
                tracing::debug!(
                    session_id = session_id,
                    error = %e,
                    "Connection error"
                );
            }

            tracing::debug!(session_id = session_id, "Connection closed");
        });
    }
}
