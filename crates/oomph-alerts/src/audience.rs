//! The host-side surface alerts are delivered through.

use oomph_protocol::PlayerId;

/// Permission a player needs to receive alerts and use the alert commands.
pub const ALERT_PERMISSION: &str = "Oomph.Alerts";

/// What the broadcaster needs from the host server.
///
/// The host owns player objects, permissions, and the chat pipeline; the
/// broadcaster only ever refers to players by [`PlayerId`]. Implement this
/// on whatever wraps your server's player list, and on a recording mock
/// in tests.
pub trait AlertAudience {
    /// Every player currently online.
    fn online_players(&self) -> Vec<PlayerId>;

    /// Whether `player` holds `permission`.
    fn has_permission(&self, player: PlayerId, permission: &str) -> bool;

    /// Sends a chat message to one player.
    fn send_message(&mut self, player: PlayerId, message: &str);
}
