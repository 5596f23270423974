//! Segment recorder configuration

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the segment recorder
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Directory clip files are written to (and evicted from)
    pub clip_dir: PathBuf,

    /// Wall-clock length of each segment
    pub segment_duration: Duration,

    /// Write cadence in frames per second, normally the capture rate
    ///
    /// The writer samples the shared slot at this rate regardless of how
    /// fast the capture side runs: frames are duplicated or dropped to
    /// match the target duration, never buffered.
    pub write_fps: f64,

    /// Maximum clip files kept after each rotation
    pub max_clips: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            clip_dir: PathBuf::from("clips"),
            segment_duration: Duration::from_secs(30),
            write_fps: 25.0,
            max_clips: 10,
        }
    }
}

impl RecorderConfig {
    /// Create a config writing into the given directory
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            clip_dir: dir.into(),
            ..Default::default()
        }
    }

    /// Set the segment duration
    pub fn segment_duration(mut self, duration: Duration) -> Self {
        self.segment_duration = duration;
        self
    }

    /// Set the write cadence (clamped to a sane minimum)
    pub fn write_fps(mut self, fps: f64) -> Self {
        self.write_fps = fps.max(1.0);
        self
    }

    /// Set the retention cap
    pub fn max_clips(mut self, max: usize) -> Self {
        self.max_clips = max;
        self
    }
}
