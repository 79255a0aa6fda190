//! Codec trait and implementations for serializing/deserializing wire objects.
//!
//! The façades don't care HOW request bodies are serialized; they just
//! need something that implements [`Codec`]. The pod speaks JSON, so
//! [`JsonCodec`] is the only implementation today.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// - `Send + Sync` → the codec is shared by every in-flight call.
/// - `'static` → it owns everything it needs.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the decoded value
/// doesn't borrow from the response body, so the body can be dropped
/// as soon as decoding finishes.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;

    /// The `Content-Type` header value for bodies produced by this codec.
    fn content_type(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use parley_protocol::{Codec, JsonCodec, wire};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&vec![101u64, 102]).unwrap();
/// assert_eq!(bytes, b"[101,102]");
///
/// let stream: wire::StreamIdResponse =
///     codec.decode(br#"{"id":"abc"}"#).unwrap();
/// assert_eq!(stream.id.as_deref(), Some("abc"));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::wire;

    #[test]
    fn test_json_codec_decode_garbage_returns_decode_error() {
        let result: Result<wire::RoomDetail, _> =
            JsonCodec.decode(b"<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_content_type() {
        assert_eq!(JsonCodec.content_type(), "application/json");
    }

    #[test]
    fn test_json_codec_encodes_user_id_list_as_plain_array() {
        // The create-conversation body is a bare JSON array of user ids.
        let ids = vec![crate::UserId(101), crate::UserId(102)];
        let bytes = JsonCodec.encode(&ids).unwrap();
        assert_eq!(bytes, b"[101,102]");
    }
}
