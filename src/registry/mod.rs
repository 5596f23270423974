//! Latest-frame-per-producer registry
//!
//! The registry is the single shared resource between the broker receive
//! loops (writers) and the view renderer (reader). It holds exactly one
//! frame per producer: the latest. There is no buffering and no history;
//! a slow reader silently misses intermediate frames.
//!
//! # Architecture
//!
//! ```text
//!                        Arc<ClientRegistry>
//!                   ┌──────────────────────────┐
//!                   │ clients: HashMap<        │
//!                   │   ClientId,              │
//!                   │   ClientEntry {          │
//!                   │     latest: Frame,       │
//!                   │     last_seen, counters  │
//!                   │   }                      │
//!                   │ >                        │
//!                   └────────────┬─────────────┘
//!                                │
//!          ┌─────────────────────┼─────────────────────┐
//!          │                     │                     │
//!          ▼                     ▼                     ▼
//!    [Connection]          [Connection]           [view loop]
//!    upsert(id, frame)     upsert(id, frame)      get()/snapshot()
//! ```
//!
//! Frame payloads are `bytes::Bytes`, so snapshots hand out reference-counted
//! clones rather than copies of the image data.

pub mod config;
pub mod entry;
pub mod frame;
pub mod store;

pub use config::RegistryConfig;
pub use entry::{ClientEntry, ClientInfo};
pub use frame::{ClientId, Frame};
pub use store::ClientRegistry;
