//! Session types: the per-player alert state.
//!
//! A "session" is the bridge's record of a logged-in player. It tracks:
//! - WHO the player is (`PlayerId`, and the XUID the proxy vouched for)
//! - WHETHER they want alerts (`alerts_enabled`)
//! - HOW OFTEN they want them (`alert_delay`)
//! - WHEN they last got one (`last_alert`)

use std::time::{Duration, Instant};

use oomph_protocol::{PlayerId, Xuid};

// ---------------------------------------------------------------------------
// SessionDefaults
// ---------------------------------------------------------------------------

/// Default and minimum alert delays for new sessions.
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    /// Delay a fresh session starts with. Default: 3 seconds.
    pub alert_delay: Duration,

    /// Floor for player-chosen delays. Default: 50 ms (one host tick).
    pub min_alert_delay: Duration,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            alert_delay: Duration::from_secs(3),
            min_alert_delay: Duration::from_millis(50),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A single player's alert session.
///
/// Created when login completes, dropped on quit. There is no grace
/// period: a player who reconnects gets a fresh session with defaults.
#[derive(Debug, Clone)]
pub struct Session {
    /// Which player this session belongs to. The player object itself is
    /// owned by the host.
    pub player_id: PlayerId,

    /// The XUID consumed from the pending-auth registry at login, if the
    /// external process authenticated this connection.
    pub xuid: Option<Xuid>,

    /// Whether the player wants to receive alerts at all.
    pub alerts_enabled: bool,

    /// Minimum time between two alerts to this player.
    pub alert_delay: Duration,

    /// When the player last received an alert. `None` means never, which
    /// is always old enough.
    pub last_alert: Option<Instant>,
}

impl Session {
    /// Creates a session with default preferences.
    pub fn new(player_id: PlayerId, xuid: Option<Xuid>, defaults: &SessionDefaults) -> Self {
        Self {
            player_id,
            xuid,
            alerts_enabled: true,
            alert_delay: defaults.alert_delay,
            last_alert: None,
        }
    }

    /// Returns `true` if at least `alert_delay` has passed since the last
    /// alert (or there never was one).
    ///
    /// `now` is passed in rather than read from the clock so that a whole
    /// tick is evaluated against a single instant.
    pub fn cooldown_elapsed(&self, now: Instant) -> bool {
        match self.last_alert {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.alert_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Session {
        Session::new(PlayerId(1), None, &SessionDefaults::default())
    }

    #[test]
    fn test_new_session_has_defaults() {
        let s = fresh();
        assert!(s.alerts_enabled);
        assert_eq!(s.alert_delay, Duration::from_secs(3));
        assert!(s.last_alert.is_none());
        assert!(s.xuid.is_none());
    }

    #[test]
    fn test_cooldown_elapsed_when_never_alerted() {
        assert!(fresh().cooldown_elapsed(Instant::now()));
    }

    #[test]
    fn test_cooldown_elapsed_at_exact_boundary() {
        let t0 = Instant::now();
        let mut s = fresh();
        s.last_alert = Some(t0);

        assert!(!s.cooldown_elapsed(t0 + Duration::from_millis(2999)));
        assert!(s.cooldown_elapsed(t0 + Duration::from_secs(3)));
    }

    #[test]
    fn test_cooldown_elapsed_with_clock_before_last_alert() {
        // A `now` older than `last_alert` saturates to zero elapsed.
        let t0 = Instant::now() + Duration::from_secs(10);
        let mut s = fresh();
        s.last_alert = Some(t0);

        assert!(!s.cooldown_elapsed(t0 - Duration::from_secs(5)));
    }
}
