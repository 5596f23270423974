//! Codec collaborator seam
//!
//! Image encoding, decoding, and scaling live outside the core. The render
//! loop talks to whatever codec is plugged in through [`DisplayCodec`]; a
//! failing transform skips the affected frame and never stops the loop.

use bytes::Bytes;

use crate::registry::Frame;

/// Codec collaborator failure
#[derive(Debug, Clone)]
pub enum CodecError {
    /// Could not produce display bytes for a frame
    Encode(String),
    /// Could not scale a frame to thumbnail size
    Resize(String),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Encode(reason) => write!(f, "encode failed: {}", reason),
            CodecError::Resize(reason) => write!(f, "resize failed: {}", reason),
        }
    }
}

impl std::error::Error for CodecError {}

/// Transforms frames into displayable bytes
///
/// Implementations decide the display format and how scaling happens; the
/// core only routes bytes.
pub trait DisplayCodec: Send + Sync {
    /// Encode a frame at full size for single-view display
    fn encode_display(&self, frame: &Frame) -> Result<Bytes, CodecError>;

    /// Scale a frame to the given thumbnail size for grid display
    fn thumbnail(&self, frame: &Frame, width: u32, height: u32) -> Result<Bytes, CodecError>;
}

/// Codec that forwards already-encoded bytes unchanged
///
/// Frames arrive on the wire as JPEG, which is also the display format, so
/// the common path needs no transcoding. Thumbnails pass through at full
/// size; deployments that want real scaling plug a decoding codec in
/// instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughCodec;

impl DisplayCodec for PassthroughCodec {
    fn encode_display(&self, frame: &Frame) -> Result<Bytes, CodecError> {
        if frame.is_blank() {
            return Err(CodecError::Encode("frame has no image data".into()));
        }
        Ok(frame.data.clone())
    }

    fn thumbnail(&self, frame: &Frame, _width: u32, _height: u32) -> Result<Bytes, CodecError> {
        if frame.is_blank() {
            return Err(CodecError::Resize("frame has no image data".into()));
        }
        Ok(frame.data.clone())
    }
}
