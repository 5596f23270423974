//! Wire protocol: framing, transport, and stream encodings
//!
//! Producers push frames over a persistent connection as length-prefixed
//! messages; the server acknowledges each one with a fixed 2-byte reply
//! before the producer may send the next. See [`framing`] for the byte
//! layout and [`transport`] for the connection-level read/ack contract.

pub mod framing;
pub mod mjpeg;
pub mod transport;

pub use framing::{WireMessage, ACK};
pub use transport::{TcpTransport, TransportError, WireTransport};
