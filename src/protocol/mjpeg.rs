//! MJPEG multipart stream encoding
//!
//! The live HTTP endpoint serves `multipart/x-mixed-replace` with boundary
//! `frame`: each part is one JPEG image, and browsers replace the previous
//! part as the next arrives. The web layer owns routing and response
//! headers; this module owns the byte layout of the parts it streams.

use bytes::{BufMut, Bytes, BytesMut};

/// Multipart boundary token used by the live stream
pub const BOUNDARY: &str = "frame";

/// Value for the response `Content-Type` header
pub fn content_type() -> String {
    format!("multipart/x-mixed-replace; boundary={}", BOUNDARY)
}

/// Encode one stream part for a JPEG frame
///
/// ```text
/// --frame\r\n
/// Content-Type: image/jpeg\r\n
/// \r\n
/// <jpeg bytes>\r\n
/// ```
pub fn encode_part(jpeg: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(jpeg.len() + 64);
    buf.put_slice(b"--");
    buf.put_slice(BOUNDARY.as_bytes());
    buf.put_slice(b"\r\nContent-Type: image/jpeg\r\n\r\n");
    buf.put_slice(jpeg);
    buf.put_slice(b"\r\n");
    buf.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type(), "multipart/x-mixed-replace; boundary=frame");
    }

    #[test]
    fn test_part_layout() {
        let part = encode_part(b"JPEG");

        assert_eq!(
            part.as_ref(),
            b"--frame\r\nContent-Type: image/jpeg\r\n\r\nJPEG\r\n"
        );
    }

    #[test]
    fn test_part_preserves_binary_payload() {
        let payload = [0xFFu8, 0xD8, 0x00, 0x0D, 0x0A, 0xFF, 0xD9];
        let part = encode_part(&payload);

        let body_start = part.len() - payload.len() - 2;
        assert_eq!(&part[body_start..part.len() - 2], &payload);
        assert_eq!(&part[part.len() - 2..], b"\r\n");
    }
}
