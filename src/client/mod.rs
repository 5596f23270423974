//! Producer-side client
//!
//! Connects to a broker and pushes encoded frames, one in flight at a
//! time, each gated on the broker's acknowledgment.

pub mod config;
pub mod publisher;

pub use config::ClientConfig;
pub use publisher::{FramePublisher, PublishEvent};
