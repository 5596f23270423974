//! Shared latest-frame slot
//!
//! The capture loop continuously overwrites a single shared value; the
//! segment recorder (and any other reader) samples it at its own cadence.
//! Built on a `tokio::sync::watch` channel: the writer never blocks on
//! readers, readers always see the most recently written value, and
//! intermediate values are silently missed rather than queued.

use tokio::sync::watch;

use crate::registry::Frame;

/// Single-slot cell holding the latest captured frame
///
/// `None` until the first frame is published.
pub struct FrameSlot {
    tx: watch::Sender<Option<Frame>>,
}

impl FrameSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Overwrite the slot with a new frame
    ///
    /// Never blocks; the previous value is dropped.
    pub fn publish(&self, frame: Frame) {
        self.tx.send_replace(Some(frame));
    }

    /// Sample the most recently published frame
    pub fn latest(&self) -> Option<Frame> {
        self.tx.borrow().clone()
    }

    /// Whether any frame has been published yet
    pub fn is_primed(&self) -> bool {
        self.tx.borrow().is_some()
    }
}

impl Default for FrameSlot {
    fn default() -> Self {
        Self::new()
    }
}
