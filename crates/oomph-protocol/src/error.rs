//! Error types for the protocol layer.
//!
//! Protocol errors never leave the bridge as user-visible failures: the
//! router turns every one of them into a silently dropped message. They
//! exist so the drop can be logged with a precise reason.

/// Errors that can occur while reading or building script messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (payload struct → JSON string).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The message value is not a JSON document at all.
    ///
    /// Common causes: truncated strings, a plain-text value, or an
    /// external process speaking an older protocol.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The value is valid JSON but does not have the shape the message
    /// type requires: missing fields, wrong field types, or not an
    /// object at all.
    #[error("invalid payload for {kind}: {reason}")]
    InvalidPayload {
        /// The wire identifier of the message that failed.
        kind: &'static str,
        /// Human-readable explanation for logs.
        reason: String,
    },
}
