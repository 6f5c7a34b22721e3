//! Unified error type for the Oomph bridge.

use oomph_protocol::{Endpoint, ProtocolError};
use oomph_session::SessionError;

use crate::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each wrapped variant generates a `From`
/// impl, so `?` converts layer errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum OomphError {
    /// A protocol-level error (encode, decode, invalid payload).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (not found, already registered, bad delay).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Loading or saving the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The connection reached pre-login without an authentication message
    /// from the proxy, and the identity policy rejects such logins.
    #[error("no authentication received from the proxy for {0}")]
    UnverifiedIdentity(Endpoint),

    /// The bridge task has shut down.
    #[error("bridge is no longer running")]
    Unavailable,
}
