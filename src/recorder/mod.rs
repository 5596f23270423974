//! Rotating segment recorder
//!
//! Writes retention-bounded clip files from the shared latest-frame slot.
//! Runs as its own loop, fully independent of the network ingestion path;
//! the slot is the only thing it shares with the capture side.
//!
//! ```text
//! camera ──► FrameSlot ──► SegmentRecorder ──► clip-....flv
//!            (latest         │ rotate every segment_duration
//!             frame only)    │ sample at write_fps
//!                            └─► retention: keep newest max_clips
//! ```

pub mod config;
pub mod retention;
pub mod rotation;
pub mod segment;

pub use config::RecorderConfig;
pub use retention::enforce_retention;
pub use rotation::SegmentRecorder;
pub use segment::{ClipSegment, MjpegFlv, SegmentFormat, SegmentWriter};
