//! Per-producer registry state
//!
//! This module defines the state stored for each producer in the registry.

use std::time::Instant;

use super::frame::Frame;

/// Entry for a single producer in the registry
///
/// Holds exactly one frame: the latest. Updates replace the frame wholesale
/// (the previous value is dropped), so no history accumulates.
#[derive(Debug)]
pub struct ClientEntry {
    /// Latest frame received from this producer
    latest: Frame,

    /// When the producer was first seen
    pub first_seen: Instant,

    /// When the producer was last seen
    pub last_seen: Instant,

    /// Total frames received from this producer
    pub frames_received: u64,

    /// Next sequence number to stamp
    next_sequence: u64,
}

impl ClientEntry {
    /// Create an entry from a producer's first frame
    pub(super) fn first(frame: Frame) -> Self {
        let now = Instant::now();
        Self {
            latest: frame.with_sequence(1),
            first_seen: now,
            last_seen: now,
            frames_received: 1,
            next_sequence: 2,
        }
    }

    /// Replace the stored frame (last-write-wins)
    pub(super) fn store(&mut self, frame: Frame) {
        self.latest = frame.with_sequence(self.next_sequence);
        self.next_sequence += 1;
        self.last_seen = Instant::now();
        self.frames_received += 1;
    }

    /// The latest stored frame
    pub fn latest(&self) -> &Frame {
        &self.latest
    }

    /// Time since the producer last delivered a frame
    pub fn idle_for(&self) -> std::time::Duration {
        self.last_seen.elapsed()
    }
}

/// Point-in-time observability snapshot of a producer
#[derive(Debug, Clone)]
pub struct ClientInfo {
    /// Frames received so far
    pub frames_received: u64,
    /// Sequence number of the latest frame
    pub latest_sequence: u64,
    /// Size of the latest frame in bytes
    pub latest_len: usize,
    /// Time since the last frame arrived
    pub idle_for: std::time::Duration,
}

impl ClientInfo {
    pub(super) fn of(entry: &ClientEntry) -> Self {
        Self {
            frames_received: entry.frames_received,
            latest_sequence: entry.latest.sequence,
            latest_len: entry.latest.len(),
            idle_for: entry.idle_for(),
        }
    }
}
