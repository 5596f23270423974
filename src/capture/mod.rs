//! Local frame capture
//!
//! The local-capture path is independent of the network ingestion path: a
//! camera source overwrites a single shared [`FrameSlot`], and the segment
//! recorder samples it. Single writer, any number of readers, no queueing.

pub mod slot;
pub mod source;

pub use slot::FrameSlot;
pub use source::{spawn_capture_loop, CaptureError, FrameSource};
