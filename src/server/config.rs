//! Ingest server configuration

use std::net::SocketAddr;
use std::time::Duration;

/// Default receive deadline for the broker loop
pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_millis(1000);

/// Default cap on a single message's declared payload size
pub const DEFAULT_MAX_FRAME_SIZE: usize = 16 * 1024 * 1024; // 16MB

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Maximum concurrent producer connections (0 = unlimited)
    pub max_connections: usize,

    /// Receive deadline per broker-loop iteration
    ///
    /// Expiry is a retry signal, not an error: a silent producer keeps its
    /// connection.
    pub recv_timeout: Duration,

    /// Cap on a single message's declared payload size
    pub max_frame_size: usize,

    /// Enable TCP_NODELAY (acks must not sit in Nagle's buffer, or the
    /// one-frame-in-flight throttle stalls every producer)
    pub tcp_nodelay: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5555".parse().unwrap(),
            max_connections: 0, // Unlimited
            recv_timeout: DEFAULT_RECV_TIMEOUT,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            tcp_nodelay: true,
        }
    }
}

impl ServerConfig {
    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set maximum connections
    pub fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the receive deadline
    pub fn recv_timeout(mut self, timeout: Duration) -> Self {
        self.recv_timeout = timeout;
        self
    }

    /// Set the frame size cap
    pub fn max_frame_size(mut self, size: usize) -> Self {
        self.max_frame_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr.port(), 5555);
        assert_eq!(config.max_connections, 0);
        assert_eq!(config.recv_timeout, DEFAULT_RECV_TIMEOUT);
        assert_eq!(config.max_frame_size, DEFAULT_MAX_FRAME_SIZE);
        assert!(config.tcp_nodelay);
    }

    #[test]
    fn test_with_addr() {
        let addr: SocketAddr = "127.0.0.1:6000".parse().unwrap();
        let config = ServerConfig::with_addr(addr);

        assert_eq!(config.bind_addr.port(), 6000);
    }

    #[test]
    fn test_builder_chaining() {
        let addr: SocketAddr = "127.0.0.1:5556".parse().unwrap();
        let config = ServerConfig::default()
            .bind(addr)
            .max_connections(50)
            .recv_timeout(Duration::from_millis(250))
            .max_frame_size(1024);

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.max_connections, 50);
        assert_eq!(config.recv_timeout, Duration::from_millis(250));
        assert_eq!(config.max_frame_size, 1024);
    }
}
