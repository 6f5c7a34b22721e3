//! Wire protocol for the Oomph bridge.
//!
//! The external anti-cheat process talks to the game server through
//! script messages: a message identifier plus a JSON string. This crate
//! defines what those messages look like and how to read them:
//!
//! - **Types** ([`PlayerId`], [`Xuid`], [`Endpoint`]) — who and where.
//! - **Messages** ([`ScriptMessage`], [`MessageKind`], the payload structs) —
//!   the three message types the bridge understands.
//! - **Decoding** ([`Decoded`]) — the two-stage parse that separates
//!   "not for us" from "for us, but broken".
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! Host packet (id + string) → Protocol (Decoded) → Router (oomph crate)
//! ```
//!
//! The protocol layer knows nothing about sessions, permissions or alerts.

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use codec::Decoded;
pub use error::ProtocolError;
pub use types::{
    AuthenticationPayload, Endpoint, FlaggedPayload, InboundPayload,
    LatencyReportPayload, MessageKind, PlayerId, ScriptMessage, Xuid,
};
