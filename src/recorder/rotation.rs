//! Segment rotation loop
//!
//! Independent of the network path: the recorder samples the shared
//! latest-frame slot on a fixed cadence and rotates through clip files of
//! a fixed wall-clock length, evicting the oldest after each rotation.

use std::io;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::time::Instant;

use crate::capture::FrameSlot;
use crate::error::Result;

use super::config::RecorderConfig;
use super::retention::enforce_retention;
use super::segment::{ClipSegment, SegmentFormat};

/// How long the loop backs off after a failed segment before rotating on
const SEGMENT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Rotating clip recorder
pub struct SegmentRecorder<F> {
    config: RecorderConfig,
    slot: Arc<FrameSlot>,
    format: F,
    rotation: u64,
}

impl<F: SegmentFormat> SegmentRecorder<F> {
    /// Create a recorder sampling the given slot
    pub fn new(config: RecorderConfig, slot: Arc<FrameSlot>, format: F) -> Self {
        Self {
            config,
            slot,
            format,
            rotation: 0,
        }
    }

    /// Run the rotation loop forever
    ///
    /// Only the initial clip-directory creation can fail; a failed
    /// segment is logged and the loop rotates on after a short backoff.
    pub async fn run(mut self) -> Result<()> {
        std::fs::create_dir_all(&self.config.clip_dir)?;

        tracing::info!(
            dir = %self.config.clip_dir.display(),
            segment_secs = self.config.segment_duration.as_secs(),
            max_clips = self.config.max_clips,
            "Segment recorder started"
        );

        loop {
            let segment = self.next_segment();

            match self.record_segment(&segment).await {
                Ok(frames) => {
                    tracing::info!(
                        clip = %segment.path.display(),
                        frames = frames,
                        "Segment finalized"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        clip = %segment.path.display(),
                        error = %e,
                        "Segment aborted"
                    );
                    tokio::time::sleep(SEGMENT_RETRY_DELAY).await;
                }
            }

            let deleted =
                enforce_retention(&self.config.clip_dir, self.config.max_clips, self.format.extension());
            if deleted > 0 {
                tracing::debug!(deleted = deleted, "Retention pass complete");
            }
        }
    }

    /// Describe the next clip file
    ///
    /// The name carries the wall-clock second plus the rotation counter,
    /// so two rotations within the same second cannot collide.
    fn next_segment(&mut self) -> ClipSegment {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let name = format!(
            "clip-{}-{:04}.{}",
            stamp,
            self.rotation,
            self.format.extension()
        );
        self.rotation += 1;

        ClipSegment {
            path: self.config.clip_dir.join(name),
            created_at: SystemTime::now(),
            duration_target: self.config.segment_duration,
        }
    }

    /// Record one segment: sample the slot on the write cadence until the
    /// segment deadline, then finalize
    ///
    /// Ticks with no frame available yet are skipped; nothing blocks on
    /// the capture side.
    async fn record_segment(&self, segment: &ClipSegment) -> io::Result<u64> {
        let mut writer = self.format.create(&segment.path)?;

        let frame_interval = Duration::from_secs_f64(1.0 / self.config.write_fps);
        let started = Instant::now();
        let deadline = started + segment.duration_target;
        let mut ticker = tokio::time::interval(frame_interval);

        while Instant::now() < deadline {
            ticker.tick().await;

            if let Some(frame) = self.slot.latest() {
                if frame.is_blank() {
                    continue;
                }
                let timestamp_ms = started.elapsed().as_millis() as u32;
                writer.write_frame(&frame, timestamp_ms)?;
            }
        }

        let frames = writer.frames_written();
        writer.finalize()?;
        Ok(frames)
    }
}
