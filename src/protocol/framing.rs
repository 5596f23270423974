//! Wire message framing
//!
//! Every message on a producer connection is a length-prefixed blob:
//!
//! ```text
//! +----------------+---------------------------------------------+
//! | Length L (4B,  | Payload (L bytes)                           |
//! | big-endian)    |                                             |
//! +----------------+---------------------------------------------+
//!
//! payload:
//! +----------------+----------------------+----------------------+
//! | Id length N    | Producer id          | Encoded image bytes  |
//! | (2B, BE)       | (N bytes, UTF-8)     | (remaining bytes)    |
//! +----------------+----------------------+----------------------+
//! ```
//!
//! The server replies to each message with a fixed 2-byte acknowledgment.
//! The explicit byte layout makes the protocol language-agnostic: any
//! producer that can write these bytes can publish, with no agreement on
//! in-memory object layout required.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::registry::ClientId;

use super::TransportError;

/// Fixed acknowledgment bytes sent after each accepted message
pub const ACK: [u8; 2] = *b"OK";

/// Size of the message length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Size of the producer-id length prefix inside the payload
pub const ID_PREFIX_SIZE: usize = 2;

/// A decoded wire message: who sent it and the image bytes
#[derive(Debug, Clone)]
pub struct WireMessage {
    /// Producer that sent the frame
    pub client_id: ClientId,
    /// Encoded image bytes
    pub image: Bytes,
}

/// Encode a full wire message (length prefix included)
pub fn encode_message(client_id: &ClientId, image: &[u8]) -> Bytes {
    let id = client_id.as_str().as_bytes();
    let payload_len = ID_PREFIX_SIZE + id.len() + image.len();

    let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + payload_len);
    buf.put_u32(payload_len as u32);
    buf.put_u16(id.len() as u16);
    buf.put_slice(id);
    buf.put_slice(image);
    buf.freeze()
}

/// Parse a message payload (the bytes after the length prefix)
///
/// Fails with `Malformed` on: empty payload, truncated id prefix, declared
/// id length running past the payload, invalid UTF-8, or an empty id.
pub fn decode_payload(mut payload: Bytes) -> Result<WireMessage, TransportError> {
    if payload.is_empty() {
        return Err(TransportError::Malformed("zero-length payload"));
    }
    if payload.remaining() < ID_PREFIX_SIZE {
        return Err(TransportError::Malformed("truncated id prefix"));
    }

    let id_len = payload.get_u16() as usize;
    if id_len == 0 {
        return Err(TransportError::Malformed("empty producer id"));
    }
    if payload.remaining() < id_len {
        return Err(TransportError::Malformed("id length exceeds payload"));
    }

    let id_bytes = payload.split_to(id_len);
    let id = std::str::from_utf8(&id_bytes)
        .map_err(|_| TransportError::Malformed("producer id is not UTF-8"))?;

    Ok(WireMessage {
        client_id: ClientId::new(id),
        image: payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let id = ClientId::new("cam-1");
        let message = encode_message(&id, b"jpeg bytes");

        // 4B length + 2B id length + 5B id + 10B image
        assert_eq!(message.len(), 4 + 2 + 5 + 10);
        assert_eq!(&message[0..4], &17u32.to_be_bytes());

        let payload = message.slice(4..);
        let decoded = decode_payload(payload).unwrap();
        assert_eq!(decoded.client_id, id);
        assert_eq!(decoded.image.as_ref(), b"jpeg bytes");
    }

    #[test]
    fn test_empty_image_is_valid() {
        let id = ClientId::new("cam-1");
        let message = encode_message(&id, b"");
        let decoded = decode_payload(message.slice(4..)).unwrap();

        assert_eq!(decoded.client_id, id);
        assert!(decoded.image.is_empty());
    }

    #[test]
    fn test_zero_length_payload_is_malformed() {
        let err = decode_payload(Bytes::new()).unwrap_err();
        assert!(matches!(err, TransportError::Malformed(_)));
    }

    #[test]
    fn test_truncated_id_prefix() {
        let err = decode_payload(Bytes::from_static(&[0x00])).unwrap_err();
        assert!(matches!(err, TransportError::Malformed(_)));
    }

    #[test]
    fn test_id_length_past_payload() {
        // Declares a 10-byte id but only 3 bytes follow
        let err = decode_payload(Bytes::from_static(&[0x00, 0x0A, b'a', b'b', b'c'])).unwrap_err();
        assert!(matches!(err, TransportError::Malformed(_)));
    }

    #[test]
    fn test_empty_id_is_malformed() {
        let err = decode_payload(Bytes::from_static(&[0x00, 0x00, 0xFF])).unwrap_err();
        assert!(matches!(err, TransportError::Malformed(_)));
    }

    #[test]
    fn test_non_utf8_id_is_malformed() {
        let err = decode_payload(Bytes::from_static(&[0x00, 0x02, 0xFF, 0xFE])).unwrap_err();
        assert!(matches!(err, TransportError::Malformed(_)));
    }
}
