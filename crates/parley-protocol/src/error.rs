//! Error types for the protocol layer.
//!
//! Each crate in Parley defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in serialization, not in
//! networking or credentials.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: the pod answered with an HTML error page, a field
    /// changed type, or the body was truncated.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The value is invalid at the protocol level even though it parsed.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
