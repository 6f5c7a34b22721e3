//! The session registry: one alert session per logged-in player.
//!
//! Responsibilities:
//! - Creating a session when login completes
//! - Dropping it on quit
//! - Mutating alert preferences for command handlers
//! - Stamping `last_alert` when the broadcaster delivers
//!
//! # Concurrency note
//!
//! `SessionRegistry` uses a plain `HashMap` and `&mut self` methods. It is
//! owned by the bridge, which processes every host event on one task, so
//! there is nothing to lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use oomph_protocol::{PlayerId, Xuid};

use crate::{Session, SessionDefaults, SessionError};

/// Tracks the alert session of every logged-in player.
///
/// ## Lifecycle
///
/// ```text
/// login ──→ register() ──→ [Session] ──→ unregister() ←── quit
///                              │
///              toggle_alerts() / set_alert_delay() / mark_alerted()
/// ```
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<PlayerId, Session>,
    defaults: SessionDefaults,
}

impl SessionRegistry {
    /// Creates an empty registry whose sessions start with `defaults`.
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            sessions: HashMap::new(),
            defaults,
        }
    }

    /// Creates a session for a player whose login just completed.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyRegistered`] if the player already
    /// has one. The existing session is left untouched.
    pub fn register(
        &mut self,
        player_id: PlayerId,
        xuid: Option<Xuid>,
    ) -> Result<&Session, SessionError> {
        if self.sessions.contains_key(&player_id) {
            return Err(SessionError::AlreadyRegistered(player_id));
        }

        tracing::info!(
            %player_id,
            xuid = xuid.as_ref().map(|x| x.0.as_str()),
            "session registered"
        );

        let session = self
            .sessions
            .entry(player_id)
            .or_insert_with(|| Session::new(player_id, xuid, &self.defaults));
        Ok(session)
    }

    /// Drops a player's session. Absent sessions are a no-op.
    ///
    /// Quit can arrive for a connection that never finished logging in,
    /// so a missing session is expected, not an error.
    pub fn unregister(&mut self, player_id: PlayerId) -> Option<Session> {
        let removed = self.sessions.remove(&player_id);
        if removed.is_some() {
            tracing::info!(%player_id, "session unregistered");
        }
        removed
    }

    /// Looks up a session by player ID.
    pub fn get(&self, player_id: &PlayerId) -> Option<&Session> {
        self.sessions.get(player_id)
    }

    /// Flips the alerts preference and returns the new value.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if the player has no session.
    pub fn toggle_alerts(&mut self, player_id: PlayerId) -> Result<bool, SessionError> {
        let session = self.get_mut(player_id)?;
        session.alerts_enabled = !session.alerts_enabled;
        let enabled = session.alerts_enabled;
        tracing::debug!(%player_id, enabled, "alerts preference toggled");
        Ok(enabled)
    }

    /// Sets a player's alert delay in seconds, clamped to the minimum.
    ///
    /// Returns the delay actually stored.
    ///
    /// # Errors
    /// - [`SessionError::InvalidDelay`] — `secs` is NaN, infinite, or too
    ///   large to represent
    /// - [`SessionError::NotFound`] — the player has no session
    pub fn set_alert_delay(
        &mut self,
        player_id: PlayerId,
        secs: f64,
    ) -> Result<Duration, SessionError> {
        if !secs.is_finite() {
            return Err(SessionError::InvalidDelay(secs));
        }
        let min = self.defaults.min_alert_delay;
        let delay = if secs <= min.as_secs_f64() {
            min
        } else {
            Duration::try_from_secs_f64(secs).map_err(|_| SessionError::InvalidDelay(secs))?
        };

        self.get_mut(player_id)?.alert_delay = delay;
        tracing::debug!(%player_id, delay_secs = delay.as_secs_f64(), "alert delay changed");
        Ok(delay)
    }

    /// Stamps the player's last alert time. Returns `false` if the player
    /// has no session (e.g. they quit between tick and dispatch).
    pub fn mark_alerted(&mut self, player_id: PlayerId, now: Instant) -> bool {
        match self.sessions.get_mut(&player_id) {
            Some(session) => {
                session.last_alert = Some(now);
                true
            }
            None => false,
        }
    }

    /// Drops every session.
    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    /// Returns the number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if there are no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn get_mut(&mut self, player_id: PlayerId) -> Result<&mut Session, SessionError> {
        self.sessions
            .get_mut(&player_id)
            .ok_or(SessionError::NotFound(player_id))
    }
}

// =========================================================================
// Tests
// =========================================================================
