//! Core protocol types for the Oomph bridge.
//!
//! Two groups of types live here:
//!
//! - identity types the rest of the workspace uses as map keys
//!   ([`PlayerId`], [`Xuid`], [`Endpoint`]);
//! - the inbound script message and its three typed payloads.

use std::fmt;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The host server's handle for a connected player.
///
/// This is a "newtype wrapper" around the host's numeric id. The bridge
/// never owns player objects; it only refers to them by this id, so a
/// session can never keep a disconnected player alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// An Xbox Live user id, as vouched for by the external process.
///
/// Opaque to the bridge: it is stored, compared and handed to the host,
/// never parsed. `#[serde(transparent)]` keeps it a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Xuid(pub String);

impl Xuid {
    /// Creates a `Xuid` from anything string-like.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for Xuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The network address + port of a connection that has not finished
/// logging in yet.
///
/// The external process sits in front of the server as a proxy, so the
/// only thing that links its authentication message to the later login
/// is the address the connection arrived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint(pub SocketAddr);

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self(addr)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0.ip(), self.0.port())
    }
}

// ---------------------------------------------------------------------------
// MessageKind — the three identifiers the bridge understands
// ---------------------------------------------------------------------------

/// Classifies a script message by its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// `oomph:authentication` — the proxy vouches for a connection's XUID.
    Authentication,
    /// `oomph:latency_report` — the proxy measured a player's RakNet RTT.
    LatencyReport,
    /// `oomph:flagged` — a player broke a check.
    Flagged,
}

impl MessageKind {
    pub const AUTHENTICATION_ID: &'static str = "oomph:authentication";
    pub const LATENCY_REPORT_ID: &'static str = "oomph:latency_report";
    pub const FLAGGED_ID: &'static str = "oomph:flagged";

    /// Looks up the kind for a wire identifier.
    ///
    /// Returns `None` for anything the bridge does not own, which tells
    /// the router to leave the message alone.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            Self::AUTHENTICATION_ID => Some(Self::Authentication),
            Self::LATENCY_REPORT_ID => Some(Self::LatencyReport),
            Self::FLAGGED_ID => Some(Self::Flagged),
            _ => None,
        }
    }

    /// The wire identifier for this kind.
    pub fn id(self) -> &'static str {
        match self {
            Self::Authentication => Self::AUTHENTICATION_ID,
            Self::LatencyReport => Self::LATENCY_REPORT_ID,
            Self::Flagged => Self::FLAGGED_ID,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Body of `oomph:authentication`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationPayload {
    pub xuid: Xuid,
}

/// Body of `oomph:latency_report`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyReportPayload {
    /// Round-trip time in milliseconds. The proxy may send a float.
    pub raknet: f64,
}

impl LatencyReportPayload {
    /// The RTT as the integer the host's ping tracker expects.
    ///
    /// Truncates toward zero; out-of-range values saturate.
    pub fn ping_ms(&self) -> i64 {
        self.raknet as i64
    }
}

/// Body of `oomph:flagged`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedPayload {
    /// Display name of the player who was flagged.
    pub player: String,
    pub check_main: String,
    pub check_sub: String,
    pub violations: f64,
}

/// A successfully decoded payload, one variant per message kind.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundPayload {
    Authentication(AuthenticationPayload),
    LatencyReport(LatencyReportPayload),
    Flagged(FlaggedPayload),
}

// ---------------------------------------------------------------------------
// ScriptMessage — the raw inbound message
// ---------------------------------------------------------------------------

/// A script message as the host received it: an identifier and a string.
///
/// The value is kept as an unparsed string because the host hands it over
/// that way, and because most script messages on a busy server belong to
/// someone else, and the bridge should not pay for parsing those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptMessage {
    pub message_id: String,
    pub value: String,
}

impl ScriptMessage {
    /// Creates a raw message.
    pub fn new(message_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            value: value.into(),
        }
    }

    /// Builds a well-formed message of the given kind from a payload.
    ///
    /// Used by tests and by tools that impersonate the external process.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if the payload can't be serialized.
    pub fn encode<T: Serialize>(
        kind: MessageKind,
        payload: &T,
    ) -> Result<Self, ProtocolError> {
        let value = serde_json::to_string(payload).map_err(ProtocolError::Encode)?;
        Ok(Self::new(kind.id(), value))
    }

    /// The kind of this message, if the bridge owns its identifier.
    pub fn kind(&self) -> Option<MessageKind> {
        MessageKind::from_id(&self.message_id)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(7).to_string(), "P-7");
    }

    #[test]
    fn test_xuid_serializes_as_plain_string() {
        let json = serde_json::to_string(&Xuid::new("2535400000")).unwrap();
        assert_eq!(json, "\"2535400000\"");
    }

    #[test]
    fn test_endpoint_display_is_ip_colon_port() {
        let ep = Endpoint("1.2.3.4:19132".parse().unwrap());
        assert_eq!(ep.to_string(), "1.2.3.4:19132");
    }

    #[test]
    fn test_endpoints_differ_by_port() {
        let a = Endpoint("1.2.3.4:19132".parse().unwrap());
        let b = Endpoint("1.2.3.4:19133".parse().unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn test_message_kind_from_id_recognizes_all_three() {
        assert_eq!(
            MessageKind::from_id("oomph:authentication"),
            Some(MessageKind::Authentication)
        );
        assert_eq!(
            MessageKind::from_id("oomph:latency_report"),
            Some(MessageKind::LatencyReport)
        );
        assert_eq!(
            MessageKind::from_id("oomph:flagged"),
            Some(MessageKind::Flagged)
        );
    }

    #[test]
    fn test_message_kind_from_id_rejects_unknown_and_unprefixed() {
        assert_eq!(MessageKind::from_id("oomph:unknown"), None);
        assert_eq!(MessageKind::from_id("flagged"), None);
        assert_eq!(MessageKind::from_id(""), None);
    }

    #[test]
    fn test_message_kind_id_matches_from_id() {
        for kind in [
            MessageKind::Authentication,
            MessageKind::LatencyReport,
            MessageKind::Flagged,
        ] {
            assert_eq!(MessageKind::from_id(kind.id()), Some(kind));
        }
    }

    #[test]
    fn test_ping_ms_truncates_toward_zero() {
        assert_eq!(LatencyReportPayload { raknet: 42.9 }.ping_ms(), 42);
        assert_eq!(LatencyReportPayload { raknet: 0.2 }.ping_ms(), 0);
    }

    #[test]
    fn test_script_message_encode_uses_wire_id() {
        let msg = ScriptMessage::encode(
            MessageKind::Authentication,
            &AuthenticationPayload {
                xuid: Xuid::new("X1"),
            },
        )
        .unwrap();

        assert_eq!(msg.message_id, "oomph:authentication");
        assert_eq!(msg.kind(), Some(MessageKind::Authentication));
        let json: serde_json::Value = serde_json::from_str(&msg.value).unwrap();
        assert_eq!(json["xuid"], "X1");
    }
}
