//! Frame ingest server
//!
//! The broker side of the system: accept producer connections, run one
//! receive loop per connection, keep the registry current, and announce
//! first-time producers to the view layer.

pub mod config;
pub mod connection;
pub mod listener;

pub use config::ServerConfig;
pub use connection::{Connection, IngestEvent};
pub use listener::IngestServer;
