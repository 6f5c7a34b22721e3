//! Tracing subscriber setup for hosts that don't install their own.
//!
//! Every crate in the bridge logs through `tracing`. A host that already
//! has a subscriber needs nothing from this module.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs a global formatted subscriber.
///
/// `RUST_LOG` overrides `default_level` when set, e.g.
/// `RUST_LOG=oomph=debug,oomph_alerts=trace`.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init(default_level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_fails_second_time() {
        // The first call may lose to another test in this binary.
        let _first = init("info");
        assert!(init("info").is_err());
    }
}
