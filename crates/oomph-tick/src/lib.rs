//! Eligibility tick for the Oomph bridge.
//!
//! Alert eligibility is recomputed once per host tick. Bedrock servers tick
//! at 20 Hz, so that is the default cadence; the `[tick]` table of the
//! bridge config can change it, along with how a late wakeup is handled
//! and how much random delay spreads the first tick of several bridges
//! started together.
//!
//! The bridge task awaits [`TickScheduler::wait_for_tick`] in one arm of
//! its `tokio::select!`. The future only borrows the scheduler and holds
//! no state of its own, so losing the race to a host event is harmless:
//! the same deadline is awaited again on the next loop iteration.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

/// What to do when the task wakes up after a tick was already due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickPolicy {
    /// Recompute once and schedule the next tick a full period from now.
    #[default]
    Skip,
    /// Recompute once and stay on the original grid; the next tick may be
    /// due immediately.
    Drop,
}

/// Tick settings, read from the `[tick]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Recomputes per second. Clamped to `1..=MAX_RATE_HZ`.
    pub rate_hz: u32,
    pub policy: TickPolicy,
    /// Upper bound, in microseconds, of a random delay before the first
    /// tick. Zero disables it.
    pub initial_jitter_us: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            rate_hz: Self::DEFAULT_RATE_HZ,
            policy: TickPolicy::Skip,
            initial_jitter_us: 0,
        }
    }
}

impl TickConfig {
    pub const DEFAULT_RATE_HZ: u32 = 20;
    pub const MAX_RATE_HZ: u32 = 128;

    /// Default settings at `rate_hz`.
    pub fn with_rate(rate_hz: u32) -> Self {
        Self {
            rate_hz,
            ..Self::default()
        }
    }

    /// The rate the scheduler will actually run at.
    pub fn effective_rate_hz(&self) -> u32 {
        self.rate_hz.clamp(1, Self::MAX_RATE_HZ)
    }

    /// Length of one tick at the effective rate.
    pub fn period(&self) -> Duration {
        Duration::from_secs(1) / self.effective_rate_hz()
    }
}

/// Produces eligibility ticks at a fixed rate.
#[derive(Debug)]
pub struct TickScheduler {
    rate_hz: u32,
    period: Duration,
    policy: TickPolicy,
    deadline: Instant,
    ticks: u64,
}

impl TickScheduler {
    /// The first tick is due one period from now, plus jitter.
    pub fn new(config: TickConfig) -> Self {
        let rate_hz = config.effective_rate_hz();
        if rate_hz != config.rate_hz {
            warn!(requested = config.rate_hz, rate_hz, "tick rate out of range, clamped");
        }
        let period = config.period();

        let jitter = match config.initial_jitter_us {
            0 => Duration::ZERO,
            max => Duration::from_micros(rand::rng().random_range(0..max)),
        };

        debug!(rate_hz, policy = ?config.policy, ?jitter, "tick scheduler created");

        Self {
            rate_hz,
            period,
            policy: config.policy,
            deadline: Instant::now() + period + jitter,
            ticks: 0,
        }
    }

    /// Sleeps until the next tick and returns when it fired.
    ///
    /// The instant comes from Tokio's clock, so it follows virtual time
    /// when the runtime's clock is paused.
    pub async fn wait_for_tick(&mut self) -> std::time::Instant {
        let due = self.deadline;
        time::sleep_until(due).await;

        let now = Instant::now();
        self.ticks += 1;

        let late = now.saturating_duration_since(due);
        if late >= self.period {
            warn!(
                tick = self.ticks,
                late_ms = late.as_millis() as u64,
                "tick fired late"
            );
        }

        self.deadline = match self.policy {
            TickPolicy::Skip => now + self.period,
            TickPolicy::Drop => due + self.period,
        };

        trace!(tick = self.ticks, "tick");
        now.into_std()
    }

    /// Ticks fired so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn rate_hz(&self) -> u32 {
        self.rate_hz
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
