//! Staff commands: `/oalerts` and `/odelay`.
//!
//! Both act on the caller's own session and need the alert permission.
//! Replies use `§` colour codes, as the host's chat expects.

use oomph_protocol::PlayerId;
use oomph_session::SessionError;

use crate::{Host, Oomph};

const RED: &str = "§c";
const GREEN: &str = "§a";

/// Delay used when `/odelay` gets no argument, in seconds.
const DEFAULT_DELAY_ARG: f64 = 3.0;

/// A parsed bridge command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `/oalerts` — toggle the caller's alerts.
    ToggleAlerts,
    /// `/odelay [seconds]` — set the caller's alert delay.
    /// `None` means the argument was not a number.
    SetDelay(Option<f64>),
}

impl Command {
    /// Parses a command by name. Returns `None` for names the bridge
    /// doesn't own.
    pub fn parse<S: AsRef<str>>(name: &str, args: &[S]) -> Option<Self> {
        match name {
            "oalerts" => Some(Self::ToggleAlerts),
            "odelay" => {
                let secs = match args.first() {
                    None => Some(DEFAULT_DELAY_ARG),
                    Some(raw) => raw.as_ref().trim().parse::<f64>().ok(),
                };
                Some(Self::SetDelay(secs))
            }
            _ => None,
        }
    }
}

impl<H: Host> Oomph<H> {
    /// Runs a command for `sender` and returns the chat reply.
    ///
    /// Returns `None` if the command isn't one of the bridge's.
    pub fn on_command<S: AsRef<str>>(
        &mut self,
        sender: PlayerId,
        name: &str,
        args: &[S],
    ) -> Option<String> {
        let command = Command::parse(name, args)?;
        Some(self.execute(sender, command))
    }

    fn execute(&mut self, sender: PlayerId, command: Command) -> String {
        if !self.host.has_permission(sender, self.broadcaster.permission()) {
            return format!("{RED}Insufficient permissions");
        }

        let result = match command {
            Command::ToggleAlerts => self.sessions.toggle_alerts(sender).map(|enabled| {
                if enabled {
                    format!("{GREEN}Alerts enabled.")
                } else {
                    format!("{RED}Alerts disabled.")
                }
            }),
            Command::SetDelay(None) => {
                return format!("{RED}Delay must be a number of seconds.");
            }
            Command::SetDelay(Some(secs)) => self
                .sessions
                .set_alert_delay(sender, secs)
                .map(|delay| format!("{GREEN}Alert delay set to {} seconds", delay.as_secs_f64())),
        };

        result.unwrap_or_else(|e| match e {
            SessionError::NotFound(_) => format!("{RED}Unexpected null session."),
            SessionError::InvalidDelay(_) => format!("{RED}Delay must be a number of seconds."),
            other => {
                tracing::warn!(%sender, error = %other, "command failed");
                format!("{RED}{other}")
            }
        })
    }
}
