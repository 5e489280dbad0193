//! Error types for the protocol layer.
//!
//! Each crate in Parlor defines its own error enum. A `ProtocolError`
//! always means the bytes did not match the expected shape, never that
//! the network or the store misbehaved.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, a missing required field such as
    /// `csrfToken`, or a push notification with an unknown `type` tag.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message decoded but violates a protocol rule, e.g. an identity
    /// response carrying an empty CSRF token.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
