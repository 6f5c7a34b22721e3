//! Bridge actor: runs an [`Oomph`] bridge on its own Tokio task.
//!
//! Hosts whose networking runs on several threads can't call the bridge
//! directly: its registries have no locks. Instead they send
//! [`HostEvent`]s through a [`BridgeHandle`]; the task applies them one at
//! a time, interleaved with eligibility ticks from the scheduler, so every
//! mutation happens on a single logical thread.
//!
//! ```text
//! network threads ──HostEvent──→ mpsc ──→ ┌────────────────────┐
//!                                          │ select! {          │
//!                 TickScheduler ─────────→ │   event => apply   │
//!                                          │   tick => recompute│
//!                                          │ }                  │
//!                                          └────────────────────┘
//! ```
//!
//! The task stops when every handle is dropped. It then shuts the bridge
//! down and returns the host from its `JoinHandle`.

use oomph_protocol::{Endpoint, PlayerId, ScriptMessage};
use oomph_tick::{TickConfig, TickScheduler};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::{Host, LoginIdentity, Oomph, OomphError, Origin, RouteOutcome};

/// Capacity of the event channel. Senders wait when it is full.
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// An event from the host, with a reply channel where the host needs an
/// answer.
#[derive(Debug)]
pub enum HostEvent {
    /// A connection is about to log in.
    PreLogin {
        endpoint: Endpoint,
        reported: LoginIdentity,
        reply: oneshot::Sender<Result<LoginIdentity, OomphError>>,
    },

    /// A connection finished logging in as `player`.
    Login {
        player: PlayerId,
        endpoint: Endpoint,
        reply: oneshot::Sender<Result<(), OomphError>>,
    },

    /// A player disconnected.
    Quit { player: PlayerId },

    /// A script message arrived. The reply carries the routing outcome.
    ScriptMessage {
        origin: Origin,
        message: ScriptMessage,
        reply: oneshot::Sender<RouteOutcome>,
    },

    /// A player ran a command.
    Command {
        sender: PlayerId,
        name: String,
        args: Vec<String>,
        reply: oneshot::Sender<Option<String>>,
    },
}

/// Handle for sending events to a running bridge task.
///
/// Cheap to clone: it wraps an `mpsc::Sender`.
#[derive(Clone)]
pub struct BridgeHandle {
    sender: mpsc::Sender<HostEvent>,
}

impl BridgeHandle {
    /// Pre-login identity substitution.
    pub async fn pre_login(
        &self,
        endpoint: Endpoint,
        reported: LoginIdentity,
    ) -> Result<LoginIdentity, OomphError> {
        let (reply, rx) = oneshot::channel();
        self.send(HostEvent::PreLogin {
            endpoint,
            reported,
            reply,
        })
        .await?;
        rx.await.map_err(|_| OomphError::Unavailable)?
    }

    /// Login completed.
    pub async fn login(&self, player: PlayerId, endpoint: Endpoint) -> Result<(), OomphError> {
        let (reply, rx) = oneshot::channel();
        self.send(HostEvent::Login {
            player,
            endpoint,
            reply,
        })
        .await?;
        rx.await.map_err(|_| OomphError::Unavailable)?
    }

    /// Player quit (fire-and-forget).
    pub async fn quit(&self, player: PlayerId) -> Result<(), OomphError> {
        self.send(HostEvent::Quit { player }).await
    }

    /// Routes a script message. Returns the outcome; cancel the packet if
    /// [`RouteOutcome::is_consumed`].
    pub async fn script_message(
        &self,
        origin: Origin,
        message: ScriptMessage,
    ) -> Result<RouteOutcome, OomphError> {
        let (reply, rx) = oneshot::channel();
        self.send(HostEvent::ScriptMessage {
            origin,
            message,
            reply,
        })
        .await?;
        rx.await.map_err(|_| OomphError::Unavailable)
    }

    /// Runs a command and returns the chat reply, if it was ours.
    pub async fn command(
        &self,
        sender: PlayerId,
        name: impl Into<String>,
        args: Vec<String>,
    ) -> Result<Option<String>, OomphError> {
        let (reply, rx) = oneshot::channel();
        self.send(HostEvent::Command {
            sender,
            name: name.into(),
            args,
            reply,
        })
        .await?;
        rx.await.map_err(|_| OomphError::Unavailable)
    }

    async fn send(&self, event: HostEvent) -> Result<(), OomphError> {
        self.sender
            .send(event)
            .await
            .map_err(|_| OomphError::Unavailable)
    }
}

/// Spawns the bridge onto its own task.
///
/// Must be called from within a Tokio runtime.
pub fn spawn<H>(bridge: Oomph<H>, tick: TickConfig) -> (BridgeHandle, JoinHandle<H>)
where
    H: Host + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let actor = BridgeActor {
        bridge,
        scheduler: TickScheduler::new(tick),
        receiver,
    };
    (BridgeHandle { sender }, tokio::spawn(actor.run()))
}

struct BridgeActor<H: Host> {
    bridge: Oomph<H>,
    scheduler: TickScheduler,
    receiver: mpsc::Receiver<HostEvent>,
}

impl<H: Host> BridgeActor<H> {
    async fn run(mut self) -> H {
        tracing::info!(rate_hz = self.scheduler.rate_hz(), "bridge task started");

        loop {
            tokio::select! {
                event = self.receiver.recv() => match event {
                    Some(event) => self.apply(event),
                    None => break,
                },
                at = self.scheduler.wait_for_tick() => {
                    self.bridge.tick(at);
                }
            }
        }

        self.bridge.shutdown();
        tracing::info!(ticks = self.scheduler.tick_count(), "bridge task stopped");
        self.bridge.into_host()
    }

    fn apply(&mut self, event: HostEvent) {
        match event {
            HostEvent::PreLogin {
                endpoint,
                reported,
                reply,
            } => {
                let _ = reply.send(self.bridge.on_pre_login(endpoint, reported));
            }
            HostEvent::Login {
                player,
                endpoint,
                reply,
            } => {
                let result = self.bridge.on_login(player, endpoint).map(|_| ());
                let _ = reply.send(result);
            }
            HostEvent::Quit { player } => self.bridge.on_quit(player),
            HostEvent::ScriptMessage {
                origin,
                message,
                reply,
            } => {
                let now = tokio::time::Instant::now().into_std();
                let _ = reply.send(self.bridge.on_script_message(&origin, &message, now));
            }
            HostEvent::Command {
                sender,
                name,
                args,
                reply,
            } => {
                let _ = reply.send(self.bridge.on_command(sender, &name, &args));
            }
        }
    }
}
