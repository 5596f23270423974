//! Producer client configuration

use std::net::SocketAddr;
use std::time::Duration;

use crate::registry::ClientId;

/// Client configuration options
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Broker address to connect to
    pub server_addr: SocketAddr,

    /// Producer id announced with every frame (e.g. the hostname)
    pub client_id: ClientId,

    /// Connect timeout
    pub connect_timeout: Duration,

    /// How long to wait for the server's acknowledgment of a frame
    pub ack_timeout: Duration,

    /// Enable TCP_NODELAY
    pub tcp_nodelay: bool,
}

impl ClientConfig {
    /// Create a config for the given broker address and producer id
    pub fn new(server_addr: SocketAddr, client_id: impl Into<ClientId>) -> Self {
        Self {
            server_addr,
            client_id: client_id.into(),
            connect_timeout: Duration::from_secs(5),
            ack_timeout: Duration::from_secs(5),
            tcp_nodelay: true,
        }
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the acknowledgment timeout
    pub fn ack_timeout(mut self, timeout: Duration) -> Self {
        self.ack_timeout = timeout;
        self
    }
}
