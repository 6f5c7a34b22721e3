//! Bridge configuration, loaded from TOML.
//!
//! ```toml
//! version = "1.0.0"
//! prefix = "§l§7[§eoomph§7]"
//! message = "{prefix} §d{player} §7flagged §4{check_main} §7(§c{check_sub}§7) §7[§5x{violations}§7]"
//! identity_policy = "keep_reported"
//!
//! [alerts]
//! default_delay_secs = 3.0
//! min_delay_secs = 0.05
//! permission = "Oomph.Alerts"
//!
//! [tick]
//! rate_hz = 20
//! policy = "skip"
//! initial_jitter_us = 0
//! ```
//!
//! Missing keys take their defaults. A file whose `version` isn't
//! [`CONFIG_VERSION`] is replaced with the defaults on load: the layout
//! changed, and old templates may reference placeholders that no longer
//! exist.

use std::path::{Path, PathBuf};
use std::time::Duration;

use oomph_alerts::{ALERT_PERMISSION, AlertTemplate, DEFAULT_MESSAGE, DEFAULT_PREFIX};
use oomph_session::SessionDefaults;
use oomph_tick::TickConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// The configuration layout this build understands.
pub const CONFIG_VERSION: &str = "1.0.0";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading, validating or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// IdentityPolicy
// ---------------------------------------------------------------------------

/// What pre-login does when the proxy never authenticated the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityPolicy {
    /// Let the login through with the identity the client reported.
    #[default]
    KeepReported,
    /// Refuse the login.
    Reject,
}

// ---------------------------------------------------------------------------
// OomphConfig
// ---------------------------------------------------------------------------

/// Alert delivery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    /// Delay a new session starts with, in seconds.
    pub default_delay_secs: f64,
    /// Lowest delay a player may choose, in seconds.
    pub min_delay_secs: f64,
    /// Permission node required to receive alerts and use the commands.
    pub permission: String,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            default_delay_secs: 3.0,
            min_delay_secs: 0.05,
            permission: ALERT_PERMISSION.to_string(),
        }
    }
}

/// Full bridge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OomphConfig {
    pub version: String,
    /// Substituted for `{prefix}` in the alert message.
    pub prefix: String,
    /// Alert message template.
    pub message: String,
    pub identity_policy: IdentityPolicy,
    pub alerts: AlertSettings,
    /// How often, and how strictly, alert eligibility is recomputed.
    pub tick: TickConfig,
}

impl Default for OomphConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            identity_policy: IdentityPolicy::default(),
            alerts: AlertSettings::default(),
            tick: TickConfig::default(),
        }
    }
}

/// Only the version key, read before the full parse.
#[derive(Deserialize)]
struct VersionProbe {
    version: Option<String>,
}

impl OomphConfig {
    /// Loads the config at `path`.
    ///
    /// - Missing file → defaults are written there and returned.
    /// - Version mismatch (or no version) → same, the old file is replaced.
    ///
    /// # Errors
    /// [`ConfigError::Io`] on filesystem failures, [`ConfigError::Parse`]
    /// if the file is not valid TOML or has wrongly typed keys.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "config not found — writing defaults");
                return Self::reset(path);
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let probe: VersionProbe = toml::from_str(&raw)?;
        if probe.version.as_deref() != Some(CONFIG_VERSION) {
            warn!(
                path = %path.display(),
                found = probe.version.as_deref().unwrap_or("n/a"),
                expected = CONFIG_VERSION,
                "config version mismatch — resetting to defaults"
            );
            return Self::reset(path);
        }

        let config = Self::from_toml_str(&raw)?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parses a config from TOML text. No version gate.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Writes this config to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(io_err)
    }

    fn reset(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// The alert template built from `prefix` and `message`.
    pub fn template(&self) -> AlertTemplate {
        AlertTemplate::new(&self.prefix, &self.message)
    }

    /// Session defaults from the `[alerts]` table.
    ///
    /// A default delay below the minimum is raised to the minimum.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] if either delay is not a positive, finite
    /// number of seconds.
    pub fn session_defaults(&self) -> Result<SessionDefaults, ConfigError> {
        let min_alert_delay = positive_secs("alerts.min_delay_secs", self.alerts.min_delay_secs)?;
        let alert_delay =
            positive_secs("alerts.default_delay_secs", self.alerts.default_delay_secs)?;
        Ok(SessionDefaults {
            alert_delay: alert_delay.max(min_alert_delay),
            min_alert_delay,
        })
    }

    /// Scheduler settings for the bridge task.
    pub fn tick_config(&self) -> TickConfig {
        self.tick.clone()
    }
}

fn positive_secs(key: &str, secs: f64) -> Result<Duration, ConfigError> {
    if !(secs.is_finite() && secs > 0.0) {
        return Err(ConfigError::Invalid(format!(
            "{key} must be a positive number of seconds, got {secs}"
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| ConfigError::Invalid(format!("{key}: {e}")))
}
