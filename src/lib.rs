//! # framehub
//!
//! Live camera frame ingestion and distribution: producers push encoded
//! frames over a persistent, acknowledged TCP connection; the broker keeps
//! the latest frame per producer in a concurrent registry; a view layer
//! renders one producer or a grid of all of them; and an independent
//! recorder writes rotating, retention-bounded clip files from a local
//! capture source.
//!
//! # Architecture
//!
//! ```text
//!  producers                 broker                        display
//!  ┌────────┐   framed    ┌───────────────┐  get()/     ┌───────────┐
//!  │ cam-1  ├────────────►│ Connection ───┼─ snapshot() │ view loop │
//!  └────────┘   + ack     │   │ upsert()  │────────────►│ Selector  │
//!  ┌────────┐             │   ▼           │  NewClient  │ RenderPlan│
//!  │ cam-2  ├────────────►│ ClientRegistry│────────────►│ ──► Sink  │
//!  └────────┘             └───────────────┘             └───────────┘
//!
//!  local capture                              disk
//!  ┌────────┐  publish   ┌───────────┐  write ┌──────────────────┐
//!  │ camera ├───────────►│ FrameSlot ├───────►│ SegmentRecorder  │
//!  └────────┘            └───────────┘        │ rotate + retain  │
//!                                             └──────────────────┘
//! ```
//!
//! Every producer is throttled to one frame in flight by the synchronous
//! acknowledgment, so a slow broker slows producers instead of queueing
//! frames. The registry holds only the latest frame per producer; nothing
//! in the system buffers frame history.
//!
//! # Quick start (server side)
//!
//! ```no_run
//! use framehub::{IngestServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> framehub::error::Result<()> {
//!     let config = ServerConfig::default();
//!     let (server, _events) = IngestServer::new(config);
//!     server.run().await
//! }
//! ```

pub mod capture;
pub mod client;
pub mod error;
pub mod media;
pub mod protocol;
pub mod recorder;
pub mod registry;
pub mod server;
pub mod stats;
pub mod view;

pub use capture::{FrameSlot, FrameSource};
pub use client::{ClientConfig, FramePublisher};
pub use error::{Error, Result};
pub use media::{DisplayCodec, PassthroughCodec};
pub use recorder::{MjpegFlv, RecorderConfig, SegmentRecorder};
pub use registry::{ClientId, ClientRegistry, Frame, RegistryConfig};
pub use server::{IngestEvent, IngestServer, ServerConfig};
pub use view::{ViewConfig, ViewMode, ViewSelector};
