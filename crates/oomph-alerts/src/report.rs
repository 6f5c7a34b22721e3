//! The violation report carried by a flagged message.

use oomph_protocol::{FlaggedPayload, PlayerId};

/// A single flag raised by the external process.
///
/// Built once per `oomph:flagged` message, handed to violation listeners,
/// rendered into an alert, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolationReport {
    /// The connection the message arrived on.
    pub player: PlayerId,
    /// Display name as sent by the external process.
    pub player_name: String,
    pub check_main: String,
    pub check_sub: String,
    /// Violation count, rounded to two decimal places.
    pub violations: f64,
}

impl ViolationReport {
    /// Builds a report from a decoded payload.
    pub fn from_payload(player: PlayerId, payload: FlaggedPayload) -> Self {
        Self {
            player,
            player_name: payload.player,
            check_main: payload.check_main,
            check_sub: payload.check_sub,
            violations: round_violations(payload.violations),
        }
    }
}

/// Rounds half away from zero to two decimal places.
fn round_violations(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(violations: f64) -> FlaggedPayload {
        FlaggedPayload {
            player: "steve".into(),
            check_main: "Reach".into(),
            check_sub: "A".into(),
            violations,
        }
    }

    #[test]
    fn test_from_payload_rounds_to_two_places() {
        let report = ViolationReport::from_payload(PlayerId(1), payload(3.456));
        assert_eq!(report.violations, 3.46);
        assert_eq!(report.violations.to_string(), "3.46");
    }

    #[test]
    fn test_from_payload_keeps_whole_numbers() {
        let report = ViolationReport::from_payload(PlayerId(1), payload(2.0));
        assert_eq!(report.violations.to_string(), "2");
    }

    #[test]
    fn test_from_payload_copies_names() {
        let report = ViolationReport::from_payload(PlayerId(4), payload(1.0));
        assert_eq!(report.player, PlayerId(4));
        assert_eq!(report.player_name, "steve");
        assert_eq!(report.check_main, "Reach");
        assert_eq!(report.check_sub, "A");
    }

    #[test]
    fn test_round_violations_half_rounds_up() {
        assert_eq!(round_violations(0.125), 0.13);
        assert_eq!(round_violations(7.0049), 7.0);
    }
}
