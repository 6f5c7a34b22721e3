//! The bridge: owns every store and reacts to host lifecycle events.
//!
//! The host calls into [`Oomph`] from one logical thread:
//!
//! ```text
//!   script message ──→ on_script_message()   (router.rs)
//!        pre-login ──→ on_pre_login()  ── peek pending XUID, substitute
//!            login ──→ on_login()      ── consume pending XUID, register session
//!             quit ──→ on_quit()       ── unregister session
//!        host tick ──→ tick()          ── recompute alert eligibility
//!          command ──→ on_command()    (commands.rs)
//! ```

use std::time::Instant;

use oomph_alerts::{AlertBroadcaster, AlertTemplate};
use oomph_protocol::{Endpoint, PlayerId};
use oomph_session::{PendingAuthRegistry, Session, SessionError, SessionRegistry};

use crate::{Host, IdentityPolicy, LoginIdentity, OomphConfig, OomphError, ViolationListener};

/// The Oomph bridge for one server.
///
/// Created when the plugin is enabled, dropped (or [`shutdown`](Self::shutdown))
/// when it is disabled. Not thread-safe by itself: see [`crate::spawn`]
/// for hosts that receive packets off the main thread.
pub struct Oomph<H: Host> {
    pub(crate) host: H,
    pub(crate) pending: PendingAuthRegistry,
    pub(crate) sessions: SessionRegistry,
    pub(crate) broadcaster: AlertBroadcaster,
    pub(crate) listeners: Vec<Box<dyn ViolationListener + Send>>,
    pub(crate) template: AlertTemplate,
    identity_policy: IdentityPolicy,
}

impl<H: Host> Oomph<H> {
    /// Builds a bridge with empty registries.
    ///
    /// # Errors
    /// Returns [`OomphError::Config`] if the alert delays in `config` are
    /// invalid.
    pub fn new(config: &OomphConfig, host: H) -> Result<Self, OomphError> {
        let defaults = config.session_defaults()?;

        tracing::info!(
            identity_policy = ?config.identity_policy,
            permission = %config.alerts.permission,
            "oomph bridge enabled"
        );

        Ok(Self {
            host,
            pending: PendingAuthRegistry::new(),
            sessions: SessionRegistry::new(defaults),
            broadcaster: AlertBroadcaster::with_permission(&config.alerts.permission),
            listeners: Vec::new(),
            template: config.template(),
            identity_policy: config.identity_policy,
        })
    }

    /// Registers a listener that sees every violation before broadcast.
    pub fn add_listener(&mut self, listener: impl ViolationListener + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // -- Lifecycle --------------------------------------------------------

    /// Pre-login: substitutes the XUID the proxy vouched for.
    ///
    /// The pending entry is only read here; [`on_login`](Self::on_login)
    /// consumes it.
    ///
    /// # Errors
    /// Returns [`OomphError::UnverifiedIdentity`] when nothing is pending for
    /// `endpoint` and the policy is [`IdentityPolicy::Reject`].
    pub fn on_pre_login(
        &self,
        endpoint: Endpoint,
        reported: LoginIdentity,
    ) -> Result<LoginIdentity, OomphError> {
        if let Some(xuid) = self.pending.peek(&endpoint) {
            tracing::info!(
                %endpoint,
                username = %reported.username,
                %xuid,
                "substituting proxy-authenticated identity"
            );
            return Ok(LoginIdentity {
                xuid: Some(xuid.clone()),
                ..reported
            });
        }

        match self.identity_policy {
            IdentityPolicy::KeepReported => {
                tracing::warn!(
                    %endpoint,
                    username = %reported.username,
                    "no proxy authentication for connection — keeping reported identity"
                );
                Ok(reported)
            }
            IdentityPolicy::Reject => {
                tracing::warn!(
                    %endpoint,
                    username = %reported.username,
                    "no proxy authentication for connection — rejecting login"
                );
                Err(OomphError::UnverifiedIdentity(endpoint))
            }
        }
    }

    /// Login completed: consumes the pending XUID and creates the session.
    ///
    /// # Errors
    /// Returns [`OomphError::Session`] if the player already has a session.
    /// That should never happen with a well-behaved host; it is logged and
    /// nothing changes: the pending XUID stays unclaimed and the host's
    /// record of the player is left alone.
    pub fn on_login(
        &mut self,
        player: PlayerId,
        endpoint: Endpoint,
    ) -> Result<&Session, OomphError> {
        if self.sessions.get(&player).is_some() {
            tracing::warn!(%player, %endpoint, "duplicate login ignored");
            return Err(SessionError::AlreadyRegistered(player).into());
        }

        let xuid = match self.pending.consume(&endpoint) {
            Ok(xuid) => {
                self.host.assign_xuid(player, &xuid);
                Some(xuid)
            }
            Err(e) => {
                tracing::debug!(%player, error = %e, "login without proxy authentication");
                None
            }
        };

        Ok(self.sessions.register(player, xuid)?)
    }

    /// Player quit: drops the session, if there was one.
    pub fn on_quit(&mut self, player: PlayerId) {
        self.sessions.unregister(player);
    }

    /// Host tick: recomputes who may receive the next alert.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.broadcaster.tick(now, &self.host, &self.sessions)
    }

    /// Plugin disabled: forgets every pending auth, session and recipient.
    pub fn shutdown(&mut self) {
        tracing::info!(
            sessions = self.sessions.len(),
            pending = self.pending.len(),
            "oomph bridge shutting down"
        );
        self.pending.clear();
        self.sessions.clear();
        self.broadcaster.clear();
    }

    // -- Accessors --------------------------------------------------------

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn pending(&self) -> &PendingAuthRegistry {
        &self.pending
    }

    pub fn broadcaster(&self) -> &AlertBroadcaster {
        &self.broadcaster
    }

    /// Consumes the bridge and hands the host back.
    pub fn into_host(self) -> H {
        self.host
    }
}
