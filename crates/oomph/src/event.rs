//! The cancellable violation event.
//!
//! Before an alert goes out, every registered [`ViolationListener`] sees
//! the report and may cancel the broadcast, e.g. to mute a noisy check.

use oomph_alerts::ViolationReport;

/// A violation about to be broadcast.
#[derive(Debug, Clone)]
pub struct ViolationEvent {
    report: ViolationReport,
    cancelled: bool,
}

impl ViolationEvent {
    pub fn new(report: ViolationReport) -> Self {
        Self {
            report,
            cancelled: false,
        }
    }

    pub fn report(&self) -> &ViolationReport {
        &self.report
    }

    /// Suppresses the broadcast.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn into_report(self) -> ViolationReport {
        self.report
    }
}

/// Observes violations before they are broadcast.
///
/// Listeners run in registration order and all of them see every event,
/// cancelled or not.
pub trait ViolationListener {
    fn on_violation(&mut self, event: &mut ViolationEvent);
}

impl<F> ViolationListener for F
where
    F: FnMut(&mut ViolationEvent),
{
    fn on_violation(&mut self, event: &mut ViolationEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oomph_protocol::PlayerId;

    fn event() -> ViolationEvent {
        ViolationEvent::new(ViolationReport {
            player: PlayerId(1),
            player_name: "steve".into(),
            check_main: "Reach".into(),
            check_sub: "A".into(),
            violations: 1.5,
        })
    }

    #[test]
    fn test_new_event_is_not_cancelled() {
        assert!(!event().is_cancelled());
    }

    #[test]
    fn test_cancel_marks_event() {
        let mut e = event();
        e.cancel();
        e.cancel();
        assert!(e.is_cancelled());
    }

    #[test]
    fn test_closure_is_a_listener() {
        let mut listener = |e: &mut ViolationEvent| {
            if e.report().check_main == "Reach" {
                e.cancel();
            }
        };
        let mut e = event();
        listener.on_violation(&mut e);
        assert!(e.is_cancelled());
    }
}
