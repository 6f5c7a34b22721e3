//! Error types for the session layer.

use oomph_protocol::{Endpoint, PlayerId};

/// Errors that can occur in the pending-auth and session registries.
///
/// None of these are fatal. The bridge logs them, and command handlers
/// turn [`NotFound`](Self::NotFound) into a chat message for the player.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session exists for the given player.
    /// Happens for commands sent before login completed, or after quit.
    #[error("session not found for player {0}")]
    NotFound(PlayerId),

    /// The player already has a session.
    /// The host guarantees one login per connection, so this indicates a
    /// host bug or a replayed login event.
    #[error("player {0} already has a session")]
    AlreadyRegistered(PlayerId),

    /// No authentication message was received for this endpoint, or its
    /// token was already consumed by an earlier login.
    #[error("no pending authentication for {0}")]
    PendingAuthNotFound(Endpoint),

    /// The requested alert delay is not a finite number of seconds.
    #[error("invalid alert delay: {0}")]
    InvalidDelay(f64),
}
