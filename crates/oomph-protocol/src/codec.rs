//! Two-stage decoding of script messages.
//!
//! A script message can fail in two very different ways, and the host
//! must treat them differently:
//!
//! 1. The identifier isn't ours, or the value isn't JSON at all. The
//!    message is left for the rest of the server ([`Decoded::Unrecognized`],
//!    [`Decoded::Unparseable`]).
//! 2. The identifier is ours and the value is JSON, but the shape is
//!    wrong. The message is still ours: it gets swallowed, but nothing
//!    acts on it ([`Decoded::Malformed`]).
//!
//! Stage one parses into a [`serde_json::Value`]; stage two converts the
//! value into the typed payload for the kind.

use serde::de::DeserializeOwned;

use crate::{InboundPayload, MessageKind, ProtocolError, ScriptMessage};

/// Result of decoding one script message.
#[derive(Debug)]
pub enum Decoded {
    /// The identifier is not one of the bridge's.
    Unrecognized,

    /// The identifier is ours but the value is not a JSON document
    /// (or is JSON `null`).
    Unparseable(MessageKind, ProtocolError),

    /// Valid JSON, wrong shape.
    Malformed(MessageKind, ProtocolError),

    /// A fully typed payload.
    Payload(InboundPayload),
}

impl ScriptMessage {
    /// Decodes this message into a typed payload.
    pub fn decode(&self) -> Decoded {
        let Some(kind) = self.kind() else {
            return Decoded::Unrecognized;
        };

        let value: serde_json::Value = match serde_json::from_str(&self.value) {
            Ok(serde_json::Value::Null) => {
                return Decoded::Unparseable(
                    kind,
                    ProtocolError::InvalidPayload {
                        kind: kind.id(),
                        reason: "payload is null".into(),
                    },
                );
            }
            Ok(value) => value,
            Err(e) => return Decoded::Unparseable(kind, ProtocolError::Decode(e)),
        };

        let result = match kind {
            MessageKind::Authentication => {
                typed(kind, value).map(InboundPayload::Authentication)
            }
            MessageKind::LatencyReport => {
                typed(kind, value).map(InboundPayload::LatencyReport)
            }
            MessageKind::Flagged => typed(kind, value).map(InboundPayload::Flagged),
        };

        match result {
            Ok(payload) => Decoded::Payload(payload),
            Err(e) => Decoded::Malformed(kind, e),
        }
    }
}

/// Converts a parsed JSON value into the payload struct for `kind`.
///
/// Serde would happily read a struct from a JSON array (fields by
/// position), so non-objects are rejected up front.
fn typed<T: DeserializeOwned>(
    kind: MessageKind,
    value: serde_json::Value,
) -> Result<T, ProtocolError> {
    if !value.is_object() {
        return Err(ProtocolError::InvalidPayload {
            kind: kind.id(),
            reason: "payload is not an object".into(),
        });
    }
    serde_json::from_value(value).map_err(|e| ProtocolError::InvalidPayload {
        kind: kind.id(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlaggedPayload, Xuid};

    fn msg(id: &str, value: &str) -> ScriptMessage {
        ScriptMessage::new(id, value)
    }

    #[test]
    fn test_decode_unknown_id_is_unrecognized() {
        let decoded = msg("someone:else", r#"{"xuid":"1"}"#).decode();
        assert!(matches!(decoded, Decoded::Unrecognized));
    }

    #[test]
    fn test_decode_garbage_value_is_unparseable() {
        let decoded = msg("oomph:authentication", "not json at all").decode();
        assert!(matches!(
            decoded,
            Decoded::Unparseable(MessageKind::Authentication, ProtocolError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_null_value_is_unparseable() {
        let decoded = msg("oomph:flagged", "null").decode();
        assert!(matches!(decoded, Decoded::Unparseable(MessageKind::Flagged, _)));
    }

    #[test]
    fn test_decode_missing_field_is_malformed() {
        let decoded = msg("oomph:authentication", r#"{"name":"steve"}"#).decode();
        assert!(matches!(
            decoded,
            Decoded::Malformed(MessageKind::Authentication, _)
        ));
    }

    #[test]
    fn test_decode_wrong_field_type_is_malformed() {
        let decoded = msg("oomph:authentication", r#"{"xuid":12345}"#).decode();
        assert!(matches!(decoded, Decoded::Malformed(..)));

        let decoded = msg("oomph:latency_report", r#"{"raknet":"fast"}"#).decode();
        assert!(matches!(decoded, Decoded::Malformed(..)));
    }

    #[test]
    fn test_decode_array_is_malformed_not_positional() {
        let decoded = msg("oomph:authentication", r#"["X1"]"#).decode();
        assert!(matches!(decoded, Decoded::Malformed(..)));
    }

    #[test]
    fn test_decode_authentication_payload() {
        let decoded = msg("oomph:authentication", r#"{"xuid":"X1"}"#).decode();
        match decoded {
            Decoded::Payload(InboundPayload::Authentication(p)) => {
                assert_eq!(p.xuid, Xuid::new("X1"));
            }
            other => panic!("expected authentication payload, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_latency_accepts_integer_and_float() {
        for raw in [r#"{"raknet":35}"#, r#"{"raknet":35.7}"#] {
            match msg("oomph:latency_report", raw).decode() {
                Decoded::Payload(InboundPayload::LatencyReport(p)) => {
                    assert_eq!(p.ping_ms(), 35);
                }
                other => panic!("expected latency payload, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_flagged_ignores_extra_fields() {
        let raw = r#"{
            "player": "steve",
            "check_main": "Reach",
            "check_sub": "A",
            "violations": 3.456,
            "extra": true
        }"#;
        match msg("oomph:flagged", raw).decode() {
            Decoded::Payload(InboundPayload::Flagged(p)) => assert_eq!(
                p,
                FlaggedPayload {
                    player: "steve".into(),
                    check_main: "Reach".into(),
                    check_sub: "A".into(),
                    violations: 3.456,
                }
            ),
            other => panic!("expected flagged payload, got {other:?}"),
        }
    }
}
