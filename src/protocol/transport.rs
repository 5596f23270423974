//! Transport abstraction over a byte-stream connection
//!
//! The broker loop is written against the `WireTransport` trait so the
//! framing and acknowledgment logic exists once, independent of what
//! carries the bytes. `TcpTransport` is the production implementation;
//! tests substitute scripted stubs.

use std::time::Duration;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use super::framing::{self, WireMessage, ACK};

/// Errors produced by the wire transport
///
/// The distinction matters to the broker loop: `Timeout` means "nothing
/// arrived, try again", `Malformed` means "drop this message, keep the
/// connection", everything else ends the connection.
#[derive(Debug)]
pub enum TransportError {
    /// No message arrived within the configured deadline; the caller
    /// should retry, not abort
    Timeout,
    /// The connection closed (or stalled) before a full message arrived
    ShortRead,
    /// The payload could not be parsed into id + image
    Malformed(&'static str),
    /// The declared payload length exceeds the configured cap; the stream
    /// cannot be resynchronized past it
    FrameTooLarge(usize),
    /// Underlying I/O failure
    Io(std::io::Error),
}

impl TransportError {
    /// Whether this error ends the connection loop
    pub fn is_fatal(&self) -> bool {
        match self {
            TransportError::Timeout | TransportError::Malformed(_) => false,
            TransportError::ShortRead
            | TransportError::FrameTooLarge(_)
            | TransportError::Io(_) => true,
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Timeout => write!(f, "no message within deadline"),
            TransportError::ShortRead => write!(f, "connection closed mid-message"),
            TransportError::Malformed(reason) => write!(f, "malformed message: {}", reason),
            TransportError::FrameTooLarge(len) => {
                write!(f, "declared payload of {} bytes exceeds limit", len)
            }
            TransportError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            TransportError::ShortRead
        } else {
            TransportError::Io(e)
        }
    }
}

/// A connection that can receive framed messages and acknowledge them
///
/// Implementations must uphold the synchronous request/reply contract:
/// after `read_message` succeeds, the peer is waiting on `write_ack` and
/// will not send another frame until it lands. That one-frame-in-flight
/// cap is the system's only backpressure mechanism.
pub trait WireTransport {
    /// Read one complete message, blocking up to the transport's deadline
    fn read_message(
        &mut self,
    ) -> impl std::future::Future<Output = Result<WireMessage, TransportError>> + Send;

    /// Write and flush the fixed 2-byte acknowledgment
    fn write_ack(&mut self)
        -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}

/// `WireTransport` over any async byte stream (TCP in production)
pub struct TcpTransport<S> {
    stream: S,
    read_timeout: Duration,
    max_frame_size: usize,
}

impl<S> TcpTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wrap a stream with the given receive deadline and frame-size cap
    pub fn new(stream: S, read_timeout: Duration, max_frame_size: usize) -> Self {
        Self {
            stream,
            read_timeout,
            max_frame_size,
        }
    }

    /// Consume the transport, returning the inner stream
    pub fn into_inner(self) -> S {
        self.stream
    }

    async fn read_payload(&mut self, len: usize) -> Result<Bytes, TransportError> {
        let mut payload = vec![0u8; len];

        // The header already arrived, so the body should be close behind.
        // A deadline expiring here means the peer stalled mid-message: the
        // stream is desynchronized and retrying cannot help.
        match timeout(self.read_timeout, self.stream.read_exact(&mut payload)).await {
            Ok(Ok(_)) => Ok(Bytes::from(payload)),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(TransportError::ShortRead),
        }
    }
}

impl<S> WireTransport for TcpTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read_message(&mut self) -> Result<WireMessage, TransportError> {
        let declared = match timeout(self.read_timeout, self.stream.read_u32()).await {
            Ok(Ok(len)) => len as usize,
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(TransportError::Timeout),
        };

        if declared == 0 {
            return Err(TransportError::Malformed("zero-length payload"));
        }
        if declared > self.max_frame_size {
            return Err(TransportError::FrameTooLarge(declared));
        }

        let payload = self.read_payload(declared).await?;
        framing::decode_payload(payload)
    }

    async fn write_ack(&mut self) -> Result<(), TransportError> {
        self.stream.write_all(&ACK).await?;
        self.stream.flush().await?;
        Ok(())
    }
}
