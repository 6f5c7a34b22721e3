//! Inbound message routing.
//!
//! Every script message the host receives goes through
//! [`Oomph::on_script_message`]. The returned [`RouteOutcome`] tells the
//! host whether to cancel the packet:
//!
//! | message | outcome | consumed |
//! |---|---|---|
//! | unknown id | `Ignored` | no |
//! | our id, value not JSON | `Ignored` | no |
//! | our id, JSON of the wrong shape | `Dropped` | yes |
//! | latency/flag with no player yet | `Dropped` | yes |
//! | authentication | `Authentication` | yes |
//! | latency report | `LatencyReport` | yes |
//! | flag, cancelled by a listener | `Suppressed` | yes |
//! | flag | `Flagged` | yes |
//!
//! Nothing here returns an error: a message the bridge can't use is
//! dropped and logged at debug level.

use std::time::Instant;

use oomph_alerts::ViolationReport;
use oomph_protocol::{
    AuthenticationPayload, Decoded, Endpoint, FlaggedPayload, InboundPayload,
    LatencyReportPayload, MessageKind, PlayerId, ScriptMessage,
};

use crate::{Host, Oomph, Origin, ViolationEvent};

/// What happened to one script message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Not ours, or not JSON. Leave it for the rest of the server.
    Ignored,
    /// Ours, but unusable (bad shape, or no player bound yet).
    Dropped(MessageKind),
    /// A pending XUID was recorded for this endpoint.
    Authentication(Endpoint),
    /// The host's ping tracker was updated.
    LatencyReport { player: PlayerId, ping_ms: i64 },
    /// A listener cancelled the violation event.
    Suppressed,
    /// The alert went out to `delivered` players.
    Flagged { delivered: usize },
}

impl RouteOutcome {
    /// Whether the host should mark the packet as handled.
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

impl<H: Host> Oomph<H> {
    /// Routes one inbound script message.
    ///
    /// `now` stamps `last_alert` for recipients of a flag alert.
    pub fn on_script_message(
        &mut self,
        origin: &Origin,
        message: &ScriptMessage,
        now: Instant,
    ) -> RouteOutcome {
        let payload = match message.decode() {
            Decoded::Unrecognized => return RouteOutcome::Ignored,
            Decoded::Unparseable(kind, e) => {
                tracing::debug!(
                    endpoint = %origin.endpoint,
                    %kind,
                    error = %e,
                    "unparseable message ignored"
                );
                return RouteOutcome::Ignored;
            }
            Decoded::Malformed(kind, e) => {
                tracing::debug!(
                    endpoint = %origin.endpoint,
                    %kind,
                    error = %e,
                    "malformed message dropped"
                );
                return RouteOutcome::Dropped(kind);
            }
            Decoded::Payload(payload) => payload,
        };

        match payload {
            InboundPayload::Authentication(p) => self.route_authentication(origin, p),
            InboundPayload::LatencyReport(p) => self.route_latency(origin, p),
            InboundPayload::Flagged(p) => self.route_flagged(origin, p, now),
        }
    }

    fn route_authentication(
        &mut self,
        origin: &Origin,
        payload: AuthenticationPayload,
    ) -> RouteOutcome {
        self.pending.record(origin.endpoint, payload.xuid);
        RouteOutcome::Authentication(origin.endpoint)
    }

    fn route_latency(&mut self, origin: &Origin, payload: LatencyReportPayload) -> RouteOutcome {
        let Some(player) = origin.player else {
            tracing::debug!(endpoint = %origin.endpoint, "latency report before login dropped");
            return RouteOutcome::Dropped(MessageKind::LatencyReport);
        };

        let ping_ms = payload.ping_ms();
        self.host.update_ping(player, ping_ms);
        tracing::trace!(%player, ping_ms, "latency updated");
        RouteOutcome::LatencyReport { player, ping_ms }
    }

    fn route_flagged(
        &mut self,
        origin: &Origin,
        payload: FlaggedPayload,
        now: Instant,
    ) -> RouteOutcome {
        let Some(player) = origin.player else {
            tracing::debug!(endpoint = %origin.endpoint, "flag before login dropped");
            return RouteOutcome::Dropped(MessageKind::Flagged);
        };

        let mut event = ViolationEvent::new(ViolationReport::from_payload(player, payload));
        for listener in &mut self.listeners {
            listener.on_violation(&mut event);
        }
        if event.is_cancelled() {
            tracing::debug!(
                %player,
                check_main = %event.report().check_main,
                "violation suppressed by listener"
            );
            return RouteOutcome::Suppressed;
        }

        let report = event.into_report();
        let message = self.template.render(&report);
        let delivered = self.broadcaster.dispatch(
            &report,
            &message,
            now,
            &mut self.host,
            &mut self.sessions,
        );
        RouteOutcome::Flagged { delivered }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ignored_is_not_consumed() {
        assert!(!RouteOutcome::Ignored.is_consumed());
        assert!(RouteOutcome::Dropped(MessageKind::Flagged).is_consumed());
        assert!(RouteOutcome::Suppressed.is_consumed());
        assert!(RouteOutcome::Flagged { delivered: 0 }.is_consumed());
    }
}
