//! Rate-limited alert fan-out.
//!
//! Eligibility is decided once per host tick, not once per violation:
//!
//! ```text
//! tick(now) ──→ eligible = { online ∧ permitted ∧ enabled ∧ cooled down }
//!                   │
//! flagged ──→ dispatch() ──→ send to every eligible player, stamp last_alert
//! flagged ──→ dispatch() ──→ same set again (same tick)
//!                   │
//! tick(now') ──→ eligible recomputed from scratch
//! ```
//!
//! A burst of violations inside one tick reuses one eligibility pass, so
//! the cost of permission checks is bounded by online players per tick
//! regardless of how noisy the external process is.

use std::time::Instant;

use oomph_protocol::PlayerId;
use oomph_session::SessionRegistry;

use crate::{ALERT_PERMISSION, AlertAudience, ViolationReport};

/// Holds the eligible set for the current tick.
///
/// The set stores player ids, not sessions: sessions stay owned by the
/// [`SessionRegistry`], and a session dropped between tick and dispatch
/// is simply skipped.
#[derive(Debug)]
pub struct AlertBroadcaster {
    eligible: Vec<PlayerId>,
    permission: String,
}

impl Default for AlertBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertBroadcaster {
    /// Creates a broadcaster gated on [`ALERT_PERMISSION`].
    pub fn new() -> Self {
        Self::with_permission(ALERT_PERMISSION)
    }

    /// Creates a broadcaster gated on a custom permission node.
    pub fn with_permission(permission: impl Into<String>) -> Self {
        Self {
            eligible: Vec::new(),
            permission: permission.into(),
        }
    }

    /// Recomputes the eligible set. Returns its size.
    ///
    /// The previous set is discarded wholesale.
    pub fn tick<A: AlertAudience + ?Sized>(
        &mut self,
        now: Instant,
        audience: &A,
        sessions: &SessionRegistry,
    ) -> usize {
        self.eligible.clear();

        for player in audience.online_players() {
            if !audience.has_permission(player, &self.permission) {
                continue;
            }
            let Some(session) = sessions.get(&player) else {
                continue;
            };
            if !session.alerts_enabled || !session.cooldown_elapsed(now) {
                continue;
            }
            self.eligible.push(player);
        }

        tracing::trace!(eligible = self.eligible.len(), "alert eligibility recomputed");
        self.eligible.len()
    }

    /// Sends `message` to every eligible player and stamps their
    /// `last_alert` with `now`. Returns how many players received it.
    ///
    /// Sessions outside the eligible set are never touched.
    pub fn dispatch<A: AlertAudience + ?Sized>(
        &mut self,
        report: &ViolationReport,
        message: &str,
        now: Instant,
        audience: &mut A,
        sessions: &mut SessionRegistry,
    ) -> usize {
        let mut delivered = 0;
        for &player in &self.eligible {
            if !sessions.mark_alerted(player, now) {
                continue;
            }
            audience.send_message(player, message);
            delivered += 1;
        }

        tracing::debug!(
            flagged = %report.player,
            check_main = %report.check_main,
            check_sub = %report.check_sub,
            violations = report.violations,
            delivered,
            "alert dispatched"
        );
        delivered
    }

    /// Players eligible as of the last tick.
    pub fn eligible(&self) -> &[PlayerId] {
        &self.eligible
    }

    /// Empties the eligible set.
    pub fn clear(&mut self) {
        self.eligible.clear();
    }

    /// The permission node recipients must hold.
    pub fn permission(&self) -> &str {
        &self.permission
    }
}
