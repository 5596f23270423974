//! Producer identifiers and frame values
//!
//! This module defines the key type identifying a producer and the frame
//! value stored in the registry.

use std::time::SystemTime;

use bytes::Bytes;

/// Unique identifier for a frame producer (e.g. a hostname)
///
/// Opaque to the core: no structure beyond string equality and ordering is
/// assumed. Ordering gives grid tiles stable positions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(String);

impl ClientId {
    /// Create a new client id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClientId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One encoded image plus metadata
///
/// The image bytes are opaque to the core (already JPEG-encoded by the
/// producer) and cheap to clone via `Bytes` reference counting. Width,
/// height and channel count are producer-reported metadata the core never
/// reinterprets; frames arriving over the wire carry no dimensions and
/// report 0.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Encoded image bytes (zero-copy via reference counting)
    pub data: Bytes,
    /// Image width in pixels (0 = unreported)
    pub width: u32,
    /// Image height in pixels (0 = unreported)
    pub height: u32,
    /// Channel count (0 = unreported)
    pub channels: u8,
    /// Capture (or receipt) wall-clock time
    pub captured_at: SystemTime,
    /// Per-producer sequence number, stamped by the registry at upsert
    pub sequence: u64,
}

impl Frame {
    /// Create a frame with producer-reported dimensions
    pub fn new(data: Bytes, width: u32, height: u32, channels: u8) -> Self {
        Self {
            data,
            width,
            height,
            channels,
            captured_at: SystemTime::now(),
            sequence: 0,
        }
    }

    /// Create a frame from wire payload bytes (dimensions unreported)
    pub fn from_encoded(data: Bytes) -> Self {
        Self::new(data, 0, 0, 0)
    }

    /// Whether the frame has no image content
    ///
    /// Blank frames are skipped by grid rendering (their slot is still
    /// consumed) and by the segment recorder.
    pub fn is_blank(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of the encoded image in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the encoded image is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_ordering() {
        let mut ids = vec![
            ClientId::new("cam-2"),
            ClientId::new("cam-10"),
            ClientId::new("cam-1"),
        ];
        ids.sort();

        // Lexicographic, not numeric
        assert_eq!(ids[0].as_str(), "cam-1");
        assert_eq!(ids[1].as_str(), "cam-10");
        assert_eq!(ids[2].as_str(), "cam-2");
    }

    #[test]
    fn test_blank_frame() {
        let frame = Frame::from_encoded(Bytes::new());
        assert!(frame.is_blank());

        let frame = Frame::from_encoded(Bytes::from_static(b"\xff\xd8jpeg"));
        assert!(!frame.is_blank());
        assert_eq!(frame.width, 0);
        assert_eq!(frame.sequence, 0);
    }
}
