//! Registry configuration

use std::time::Duration;

/// Configuration for the client registry
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Evict producers that have been silent for this long
    ///
    /// `None` (the default) keeps every producer that ever connected, so
    /// operator views retain the full history of who was seen.
    pub stale_after: Option<Duration>,

    /// How often the background cleanup task runs
    pub cleanup_interval: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            stale_after: None,
            cleanup_interval: Duration::from_secs(30),
        }
    }
}

impl RegistryConfig {
    /// Set the staleness TTL (None disables eviction)
    pub fn stale_after(mut self, ttl: Option<Duration>) -> Self {
        self.stale_after = ttl;
        self
    }

    /// Set the cleanup task interval
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }
}
