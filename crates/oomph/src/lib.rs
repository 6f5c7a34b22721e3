//! # Oomph bridge
//!
//! Connects a game server's connection lifecycle to the Oomph anti-cheat
//! proxy. The proxy talks to the server through script messages; the
//! bridge:
//!
//! - substitutes the XUID the proxy vouched for before the server trusts a
//!   login (address-keyed [`PendingAuthRegistry`] → login),
//! - forwards RakNet latency reports to the host's ping tracker,
//! - fans violation alerts out to opted-in staff, rate-limited per player.
//!
//! The host server plugs in by implementing [`Host`] and feeding lifecycle
//! events into an [`Oomph`] bridge, directly or through [`spawn`] when its
//! networking runs on other threads.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use oomph::prelude::*;
//!
//! let config = OomphConfig::load_or_default("plugin_data/Oomph/config.toml")?;
//! let bridge = Oomph::new(&config, MyServer::new())?;
//! let (handle, task) = oomph::spawn(bridge, config.tick_config());
//!
//! // From the network thread:
//! let consumed = handle.script_message(origin, message).await?.is_consumed();
//! ```
//!
//! [`PendingAuthRegistry`]: oomph_session::PendingAuthRegistry

mod actor;
mod bridge;
mod commands;
mod config;
mod error;
mod event;
mod host;
pub mod logging;
mod router;

pub use actor::{BridgeHandle, HostEvent, spawn};
pub use bridge::Oomph;
pub use commands::Command;
pub use config::{AlertSettings, CONFIG_VERSION, ConfigError, IdentityPolicy, OomphConfig};
pub use error::OomphError;
pub use event::{ViolationEvent, ViolationListener};
pub use host::{Host, LoginIdentity, Origin};
pub use router::RouteOutcome;

/// Everything a host integration usually needs.
pub mod prelude {
    pub use crate::{
        BridgeHandle, Command, Host, IdentityPolicy, LoginIdentity, Oomph,
        OomphConfig, OomphError, Origin, RouteOutcome, ViolationEvent,
        ViolationListener,
    };
    pub use oomph_alerts::{ALERT_PERMISSION, AlertAudience, ViolationReport};
    pub use oomph_protocol::{Endpoint, MessageKind, PlayerId, ScriptMessage, Xuid};
}
