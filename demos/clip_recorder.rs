//! Clip recorder demo - rotating segment files from a synthetic camera
//!
//! Run with: cargo run --example clip_recorder -- [output_dir]
//!
//! Records 10-second FLV segments into the output directory (default
//! `./clips`), keeping the newest 5. The "camera" is synthetic: it emits
//! a counter pattern at ~25fps, standing in for a real capture source
//! behind the `FrameSource` trait.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use framehub::capture::{spawn_capture_loop, CaptureError, FrameSlot, FrameSource};
use framehub::{Frame, MjpegFlv, RecorderConfig, SegmentRecorder};

/// Synthetic capture source pacing itself at roughly 25fps
struct SyntheticCamera {
    counter: u64,
}

impl FrameSource for SyntheticCamera {
    fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        std::thread::sleep(Duration::from_millis(40));
        self.counter += 1;

        // Not real JPEG, but the pipeline never inspects the bytes
        let data = format!("synthetic-frame-{:08}", self.counter);
        Ok(Frame::new(Bytes::from(data), 640, 480, 3))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("framehub=info".parse()?),
        )
        .init();

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("clips"));

    let config = RecorderConfig::with_dir(&output_dir)
        .segment_duration(Duration::from_secs(10))
        .write_fps(25.0)
        .max_clips(5);

    println!("Clip Recorder");
    println!("=============");
    println!("Output dir:   {}", output_dir.display());
    println!("Segment:      10s, keeping newest 5");
    println!();
    println!("Press Ctrl+C to stop...");
    println!();

    let slot = Arc::new(FrameSlot::new());
    let capture = spawn_capture_loop(SyntheticCamera { counter: 0 }, Arc::clone(&slot));

    let recorder = SegmentRecorder::new(config, slot, MjpegFlv);

    tokio::select! {
        result = recorder.run() => {
            if let Err(e) = result {
                eprintln!("Recorder error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
        }
    }

    capture.abort();
    Ok(())
}
