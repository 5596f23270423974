//! Client registry implementation
//!
//! The central registry that tracks the latest frame per producer and
//! serves consistent views to the renderer.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::config::RegistryConfig;
use super::entry::{ClientEntry, ClientInfo};
use super::frame::{ClientId, Frame};

/// Central registry of producers and their latest frames
///
/// Thread-safe via `RwLock`: all mutations serialize through the write
/// lock, reads run concurrently and never observe a half-written entry.
/// The broker loops are the only writers; the view loop only reads.
pub struct ClientRegistry {
    /// Map of producer id to per-producer state
    clients: RwLock<HashMap<ClientId, ClientEntry>>,

    /// Configuration
    config: RegistryConfig,
}

impl ClientRegistry {
    /// Create a new registry with default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a new registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Store the latest frame for a producer (last-write-wins)
    ///
    /// Any previously stored frame for the id is replaced wholesale. The
    /// registry stamps the frame's per-producer sequence number. Returns
    /// `true` exactly once per distinct id, on first registration, so
    /// callers can emit one-time "new client" events.
    pub async fn upsert(&self, id: &ClientId, frame: Frame) -> bool {
        let mut clients = self.clients.write().await;

        match clients.entry(id.clone()) {
            Entry::Occupied(mut occupied) => {
                occupied.get_mut().store(frame);
                false
            }
            Entry::Vacant(vacant) => {
                vacant.insert(ClientEntry::first(frame));
                tracing::info!(producer = %id, "New producer registered");
                true
            }
        }
    }

    /// Get the latest frame for a producer
    pub async fn get(&self, id: &ClientId) -> Option<Frame> {
        let clients = self.clients.read().await;
        clients.get(id).map(|entry| entry.latest().clone())
    }

    /// Get a consistent point-in-time view of all producers
    ///
    /// Sorted lexicographically by id so grid tile positions are
    /// deterministic and stable across ticks regardless of arrival order.
    pub async fn snapshot(&self) -> Vec<(ClientId, Frame)> {
        let clients = self.clients.read().await;

        let mut entries: Vec<(ClientId, Frame)> = clients
            .iter()
            .map(|(id, entry)| (id.clone(), entry.latest().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        entries
    }

    /// Get observability counters for a producer
    pub async fn client_info(&self, id: &ClientId) -> Option<ClientInfo> {
        let clients = self.clients.read().await;
        clients.get(id).map(ClientInfo::of)
    }

    /// Number of known producers
    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Whether any producer has registered
    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }

    /// Run stale-producer eviction once
    ///
    /// No-op unless `stale_after` is configured. Producers whose last frame
    /// is older than the TTL are removed.
    pub async fn cleanup(&self) {
        let Some(ttl) = self.config.stale_after else {
            return;
        };

        let mut clients = self.clients.write().await;
        clients.retain(|id, entry| {
            let stale = entry.idle_for() > ttl;
            if stale {
                tracing::info!(
                    producer = %id,
                    idle_secs = entry.idle_for().as_secs(),
                    "Stale producer evicted"
                );
            }
            !stale
        });
    }

    /// Spawn the background cleanup task
    ///
    /// Returns a handle that can be used to abort the task.
    pub fn spawn_cleanup_task(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let registry = Arc::clone(self);
        let interval = registry.config.cleanup_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                registry.cleanup().await;
            }
        })
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bytes::Bytes;

    use super::*;

    fn frame(data: &'static [u8]) -> Frame {
        Frame::from_encoded(Bytes::from_static(data))
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let registry = ClientRegistry::new();
        let id = ClientId::new("cam-1");

        registry.upsert(&id, frame(b"f1")).await;
        registry.upsert(&id, frame(b"f2")).await;
        registry.upsert(&id, frame(b"f3")).await;

        let latest = registry.get(&id).await.unwrap();
        assert_eq!(latest.data.as_ref(), b"f3");
        assert_eq!(latest.sequence, 3);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_new_client_flag_exactly_once() {
        let registry = ClientRegistry::new();
        let a = ClientId::new("a");
        let b = ClientId::new("b");

        assert!(registry.upsert(&a, frame(b"1")).await);
        assert!(registry.upsert(&b, frame(b"1")).await);
        assert!(!registry.upsert(&a, frame(b"2")).await);
        assert!(!registry.upsert(&b, frame(b"2")).await);
        assert!(!registry.upsert(&a, frame(b"3")).await);
    }

    #[tokio::test]
    async fn test_snapshot_order_independent_of_arrival() {
        let registry = ClientRegistry::new();

        // Reverse-alphabetical arrival
        registry.upsert(&ClientId::new("c"), frame(b"c")).await;
        registry.upsert(&ClientId::new("a"), frame(b"a")).await;
        registry.upsert(&ClientId::new("b"), frame(b"b")).await;

        let snapshot = registry.snapshot().await;
        let ids: Vec<&str> = snapshot.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        // Another update must not disturb the ordering
        registry.upsert(&ClientId::new("a"), frame(b"a2")).await;
        let snapshot = registry.snapshot().await;
        let ids: Vec<&str> = snapshot.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_get_unknown_producer() {
        let registry = ClientRegistry::new();
        assert!(registry.get(&ClientId::new("ghost")).await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_cleanup_disabled_by_default() {
        let registry = ClientRegistry::new();
        registry.upsert(&ClientId::new("cam-1"), frame(b"f")).await;

        registry.cleanup().await;

        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_cleanup_evicts_stale_producers() {
        let config = RegistryConfig::default().stale_after(Some(Duration::from_millis(20)));
        let registry = ClientRegistry::with_config(config);
        let id = ClientId::new("cam-1");

        registry.upsert(&id, frame(b"f")).await;
        tokio::time::sleep(Duration::from_millis(60)).await;

        registry.cleanup().await;

        assert!(registry.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_client_info() {
        let registry = ClientRegistry::new();
        let id = ClientId::new("cam-1");

        registry.upsert(&id, frame(b"abc")).await;
        registry.upsert(&id, frame(b"defgh")).await;

        let info = registry.client_info(&id).await.unwrap();
        assert_eq!(info.frames_received, 2);
        assert_eq!(info.latest_sequence, 2);
        assert_eq!(info.latest_len, 5);
    }
}
