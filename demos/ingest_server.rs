//! Ingest server demo - receives frames and logs a grid view
//!
//! Run with: cargo run --example ingest_server -- [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example ingest_server                  # binds to 0.0.0.0:5555
//!   cargo run --example ingest_server 127.0.0.1:5556   # custom address
//!
//! Point any producer at the bind address; each frame is a 4-byte
//! big-endian length prefix, then a 2-byte id length + UTF-8 id + JPEG
//! bytes. The server replies "OK" after every frame. The companion
//! `FramePublisher` in this crate speaks the protocol out of the box.
//!
//! The demo stands in for a real UI: it runs the view loop in grid mode
//! with a sink that logs tile positions once a second.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use framehub::view::{run_view_loop, DisplaySink, RenderPlan, ViewCommand, ViewMode, ViewSelector};
use framehub::{IngestServer, PassthroughCodec, ServerConfig, ViewConfig};
use tokio::sync::mpsc;

/// Sink that logs the plan layout at most once a second
struct LoggingSink {
    last_logged: Instant,
}

impl DisplaySink for LoggingSink {
    fn present(&mut self, plan: RenderPlan) {
        if self.last_logged.elapsed() < Duration::from_secs(1) {
            return;
        }
        self.last_logged = Instant::now();

        if plan.tiles.is_empty() {
            println!("[view] no frames yet");
            return;
        }
        for tile in &plan.tiles {
            println!(
                "[view] ({}, {}) {} ({} bytes)",
                tile.row,
                tile.col,
                tile.client_id,
                tile.image.len()
            );
        }
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

    let bind_addr: SocketAddr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "0.0.0.0:5555".into())
        .parse()?;

    let config = ServerConfig::with_addr(bind_addr);

    println!("Frame Ingest Server");
    println!("===================");
    println!("Listening on: {}", config.bind_addr);
    println!();
    println!("Press Ctrl+C to stop the server...");
    println!();

    let (server, events) = IngestServer::new(config);
    let server = Arc::new(server);

    // Drive the view loop in grid mode with a logging sink
    let (command_tx, command_rx) = mpsc::channel(8);
    command_tx.send(ViewCommand::SetMode(ViewMode::Grid)).await?;

    tokio::spawn(run_view_loop(
        ViewSelector::new(),
        Arc::clone(server.registry()),
        PassthroughCodec,
        LoggingSink {
            last_logged: Instant::now(),
        },
        command_rx,
        events,
        ViewConfig::default(),
    ));

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                eprintln!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
        }
    }

    Ok(())
}
