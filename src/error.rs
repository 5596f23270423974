//! Crate-level error types
//!
//! Each subsystem defines its own error enum (`TransportError`, `CodecError`,
//! `CaptureError`); this module aggregates them into a single `Error` for
//! APIs that cross subsystem boundaries.

use crate::capture::CaptureError;
use crate::media::CodecError;
use crate::protocol::TransportError;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug)]
pub enum Error {
    /// I/O error outside the wire protocol (file creation, bind, etc.)
    Io(std::io::Error),
    /// Wire transport error
    Transport(TransportError),
    /// Codec collaborator failure
    Codec(CodecError),
    /// Capture source failure
    Capture(CaptureError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Transport(e) => write!(f, "Transport error: {}", e),
            Error::Codec(e) => write!(f, "Codec error: {}", e),
            Error::Capture(e) => write!(f, "Capture error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Transport(e) => Some(e),
            Error::Codec(e) => Some(e),
            Error::Capture(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Error::Codec(e)
    }
}

impl From<CaptureError> for Error {
    fn from(e: CaptureError) -> Self {
        Error::Capture(e)
    }
}
