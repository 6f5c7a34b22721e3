//! The host server surface the bridge drives.

use oomph_alerts::AlertAudience;
use oomph_protocol::{Endpoint, PlayerId, Xuid};

/// Everything the bridge needs from the game server.
///
/// On top of the alert surface ([`AlertAudience`]: online players,
/// permissions, chat), the bridge pushes latency reports and vouched
/// identities back into the host.
pub trait Host: AlertAudience {
    /// Reports a player's RakNet round-trip time, in milliseconds, to the
    /// host's latency tracker.
    fn update_ping(&mut self, player: PlayerId, ping_ms: i64);

    /// Overwrites the XUID the host recorded for a player with the one the
    /// proxy vouched for.
    fn assign_xuid(&mut self, player: PlayerId, xuid: &Xuid);
}

/// Where an inbound script message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    /// The connection's remote address.
    pub endpoint: Endpoint,
    /// The player bound to the connection, once login has completed.
    pub player: Option<PlayerId>,
}

impl Origin {
    /// A connection that has not logged in yet.
    pub fn connecting(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            player: None,
        }
    }

    /// A connection with a logged-in player.
    pub fn player(endpoint: Endpoint, player: PlayerId) -> Self {
        Self {
            endpoint,
            player: Some(player),
        }
    }
}

/// The identity a connection presents at pre-login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginIdentity {
    pub username: String,
    /// `None` for offline-mode clients, which is every client behind the
    /// proxy until the bridge substitutes the vouched XUID.
    pub xuid: Option<Xuid>,
}
