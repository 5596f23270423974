//! Capture source seam and capture loop
//!
//! Camera acquisition lives outside the core behind [`FrameSource`]. The
//! capture loop reads frames as fast as the source yields them and
//! overwrites the shared slot; everything downstream samples the slot at
//! its own pace.

use std::sync::Arc;
use std::time::Duration;

use super::slot::FrameSlot;
use crate::registry::Frame;

/// Capture source failure
#[derive(Debug)]
pub enum CaptureError {
    /// No capture device is available; fatal at startup
    NoSource(String),
    /// A single read failed; the loop logs, backs off, and retries
    ReadFailed(String),
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureError::NoSource(reason) => write!(f, "no capture source: {}", reason),
            CaptureError::ReadFailed(reason) => write!(f, "frame read failed: {}", reason),
        }
    }
}

impl std::error::Error for CaptureError {}

/// A blocking source of captured frames (a camera, in production)
pub trait FrameSource: Send {
    /// Read the next frame, blocking until one is available
    fn next_frame(&mut self) -> Result<Frame, CaptureError>;
}

/// How long the capture loop backs off after a failed read
const READ_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Spawn the capture loop on the blocking pool
///
/// Reads frames from the source forever, publishing each into the slot.
/// Transient read failures log and back off; a source reporting
/// `NoSource` ends the loop (the device is gone, not merely slow).
pub fn spawn_capture_loop<S>(mut source: S, slot: Arc<FrameSlot>) -> tokio::task::JoinHandle<()>
where
    S: FrameSource + 'static,
{
    tokio::task::spawn_blocking(move || loop {
        match source.next_frame() {
            Ok(frame) => slot.publish(frame),
            Err(CaptureError::ReadFailed(reason)) => {
                tracing::warn!(reason = %reason, "Frame read failed");
                std::thread::sleep(READ_RETRY_DELAY);
            }
            Err(e @ CaptureError::NoSource(_)) => {
                tracing::error!(error = %e, "Capture source lost, stopping capture loop");
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    /// Source that yields a fixed number of frames, then reports loss
    struct CountingSource {
        remaining: u32,
    }

    impl FrameSource for CountingSource {
        fn next_frame(&mut self) -> Result<Frame, CaptureError> {
            if self.remaining == 0 {
                return Err(CaptureError::NoSource("device unplugged".into()));
            }
            self.remaining -= 1;
            Ok(Frame::from_encoded(Bytes::from(vec![self.remaining as u8])))
        }
    }

    #[tokio::test]
    async fn test_capture_loop_publishes_until_source_lost() {
        let slot = Arc::new(FrameSlot::new());
        let handle = spawn_capture_loop(CountingSource { remaining: 5 }, Arc::clone(&slot));

        // Loop terminates once the source reports NoSource
        handle.await.unwrap();

        // Slot holds the last frame read before the source died
        let latest = slot.latest().unwrap();
        assert_eq!(latest.data.as_ref(), &[0u8]);
    }

    #[tokio::test]
    async fn test_read_failures_do_not_stop_the_loop() {
        struct FlakySource {
            calls: u32,
        }

        impl FrameSource for FlakySource {
            fn next_frame(&mut self) -> Result<Frame, CaptureError> {
                self.calls += 1;
                match self.calls {
                    1 | 3 => Err(CaptureError::ReadFailed("transient".into())),
                    2 | 4 => Ok(Frame::from_encoded(Bytes::from(vec![self.calls as u8]))),
                    _ => Err(CaptureError::NoSource("done".into())),
                }
            }
        }

        let slot = Arc::new(FrameSlot::new());
        let handle = spawn_capture_loop(FlakySource { calls: 0 }, Arc::clone(&slot));
        handle.await.unwrap();

        // The frame published after the second transient failure survived
        assert_eq!(slot.latest().unwrap().data.as_ref(), &[4u8]);
    }
}
