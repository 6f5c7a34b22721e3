//! Alert message templating.
//!
//! A template is a string with placeholders:
//!
//! | placeholder | replaced with |
//! |---|---|
//! | `{prefix}` | the configured prefix |
//! | `{player}` | the flagged player's display name |
//! | `{check_main}` | primary check name |
//! | `{check_sub}` | sub-check name |
//! | `{violations}` | rounded violation count |
//!
//! Substitution is a single left-to-right pass: text coming from the
//! external process is never scanned for placeholders again.

use crate::ViolationReport;

/// Default chat prefix (`§` introduces a Minecraft formatting code).
pub const DEFAULT_PREFIX: &str = "§l§7[§eoomph§7]";

/// Default alert line.
pub const DEFAULT_MESSAGE: &str =
    "{prefix} §d{player} §7flagged §4{check_main} §7(§c{check_sub}§7) §7[§5x{violations}§7]";

/// A prefix plus a message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertTemplate {
    prefix: String,
    message: String,
}

impl Default for AlertTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_MESSAGE)
    }
}

impl AlertTemplate {
    pub fn new(prefix: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            message: message.into(),
        }
    }

    /// Renders the alert line for a report.
    pub fn render(&self, report: &ViolationReport) -> String {
        let violations = report.violations.to_string();
        let mut out = String::with_capacity(self.message.len() + 32);
        let mut rest = self.message.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];

            let replacement = tail.find('}').and_then(|close| {
                let value = match &tail[1..close] {
                    "prefix" => self.prefix.as_str(),
                    "player" => report.player_name.as_str(),
                    "check_main" => report.check_main.as_str(),
                    "check_sub" => report.check_sub.as_str(),
                    "violations" => violations.as_str(),
                    _ => return None,
                };
                Some((value, close + 1))
            });

            match replacement {
                Some((value, consumed)) => {
                    out.push_str(value);
                    rest = &tail[consumed..];
                }
                None => {
                    // Not a placeholder: keep the brace.
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oomph_protocol::PlayerId;

    fn report() -> ViolationReport {
        ViolationReport {
            player: PlayerId(1),
            player_name: "steve".into(),
            check_main: "Reach".into(),
            check_sub: "A".into(),
            violations: 3.46,
        }
    }

    #[test]
    fn test_render_replaces_every_placeholder() {
        let t = AlertTemplate::new(
            "[oomph]",
            "{prefix} {player} {check_main}/{check_sub} x{violations}",
        );
        assert_eq!(t.render(&report()), "[oomph] steve Reach/A x3.46");
    }

    #[test]
    fn test_render_default_template() {
        let rendered = AlertTemplate::default().render(&report());
        assert_eq!(
            rendered,
            "§l§7[§eoomph§7] §dsteve §7flagged §4Reach §7(§cA§7) §7[§5x3.46§7]"
        );
    }

    #[test]
    fn test_render_keeps_unknown_braces() {
        let t = AlertTemplate::new("p", "{unknown} {player} {");
        assert_eq!(t.render(&report()), "{unknown} steve {");
    }

    #[test]
    fn test_render_does_not_expand_placeholders_in_values() {
        let mut r = report();
        r.player_name = "{check_main}".into();
        let t = AlertTemplate::new("p", "{player} {check_main}");
        assert_eq!(t.render(&r), "{check_main} Reach");
    }

    #[test]
    fn test_render_repeated_placeholder() {
        let t = AlertTemplate::new("p", "{player}{player}");
        assert_eq!(t.render(&report()), "stevesteve");
    }
}
