//! Statistics for ingestion sessions

use std::time::{Duration, Instant};

/// Per-connection ingestion statistics
///
/// Maintained by the broker loop and logged when the connection ends.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// When the connection was accepted
    pub started_at: Instant,
    /// Frames accepted and stored
    pub frames_received: u64,
    /// Image payload bytes accepted
    pub bytes_received: u64,
    /// Messages dropped as malformed
    pub malformed_messages: u64,
    /// Acknowledgments written
    pub acks_sent: u64,
}

impl SessionStats {
    /// Create a stats tracker starting now
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            frames_received: 0,
            bytes_received: 0,
            malformed_messages: 0,
            acks_sent: 0,
        }
    }

    /// Record one accepted frame of the given payload size
    pub fn on_frame(&mut self, payload_len: usize) {
        self.frames_received += 1;
        self.bytes_received += payload_len as u64;
    }

    /// Record one malformed message
    pub fn on_malformed(&mut self) {
        self.malformed_messages += 1;
    }

    /// Record one acknowledgment written
    pub fn on_ack(&mut self) {
        self.acks_sent += 1;
    }

    /// Session duration so far
    pub fn duration(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Average ingest rate in frames per second
    pub fn frame_rate(&self) -> f64 {
        let secs = self.duration().as_secs_f64();
        if secs > 0.0 {
            self.frames_received as f64 / secs
        } else {
            0.0
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
