//! The pending-authentication registry.
//!
//! The external process authenticates a connection before the host has
//! even created a player for it. The only key both sides share at that
//! point is the connection's address, so the XUID is parked here under
//! its [`Endpoint`] until the login for that endpoint claims it.
//!
//! ```text
//! oomph:authentication ──→ record(E, X)
//!                               │
//!         pre-login ──→ peek(E) │   (substitute X, keep entry)
//!                               ▼
//!             login ──→ consume(E) ──→ X   (entry gone)
//! ```
//!
//! Entries for connections that authenticate but never finish logging in
//! are not expired. The key space is bounded by concurrent connection
//! attempts, and a stale entry is overwritten by the next authentication
//! from the same address and port.

use std::collections::HashMap;

use oomph_protocol::{Endpoint, Xuid};

use crate::SessionError;

/// Maps connection endpoints to XUIDs awaiting their login.
#[derive(Debug, Default)]
pub struct PendingAuthRegistry {
    pending: HashMap<Endpoint, Xuid>,
}

impl PendingAuthRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the XUID for an endpoint. Last write wins.
    ///
    /// Returns the XUID this replaced, if any.
    pub fn record(&mut self, endpoint: Endpoint, xuid: Xuid) -> Option<Xuid> {
        tracing::debug!(%endpoint, %xuid, "pending authentication recorded");
        let previous = self.pending.insert(endpoint, xuid);
        if let Some(previous) = &previous {
            tracing::debug!(%endpoint, %previous, "replaced earlier pending authentication");
        }
        previous
    }

    /// Reads the XUID for an endpoint without claiming it.
    pub fn peek(&self, endpoint: &Endpoint) -> Option<&Xuid> {
        self.pending.get(endpoint)
    }

    /// Removes and returns the XUID for an endpoint.
    ///
    /// A token can be consumed once: a second login from the same
    /// endpoint without a fresh authentication message gets an error, not
    /// the stale XUID.
    ///
    /// # Errors
    /// Returns [`SessionError::PendingAuthNotFound`] if nothing is pending.
    pub fn consume(&mut self, endpoint: &Endpoint) -> Result<Xuid, SessionError> {
        let xuid = self
            .pending
            .remove(endpoint)
            .ok_or(SessionError::PendingAuthNotFound(*endpoint))?;
        tracing::debug!(%endpoint, %xuid, "pending authentication consumed");
        Ok(xuid)
    }

    /// Drops every pending entry.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of endpoints with a pending XUID.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(s: &str) -> Endpoint {
        Endpoint(s.parse().unwrap())
    }

    fn xuid(s: &str) -> Xuid {
        Xuid::new(s)
    }

    #[test]
    fn test_record_then_consume_returns_xuid() {
        let mut reg = PendingAuthRegistry::new();
        reg.record(ep("1.2.3.4:19132"), xuid("X1"));

        assert_eq!(reg.consume(&ep("1.2.3.4:19132")).unwrap(), xuid("X1"));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_record_twice_last_write_wins() {
        let mut reg = PendingAuthRegistry::new();
        let e = ep("1.2.3.4:19132");

        assert!(reg.record(e, xuid("T1")).is_none());
        assert_eq!(reg.record(e, xuid("T2")), Some(xuid("T1")));

        assert_eq!(reg.consume(&e).unwrap(), xuid("T2"));
    }

    #[test]
    fn test_consume_twice_returns_not_found() {
        let mut reg = PendingAuthRegistry::new();
        let e = ep("1.2.3.4:19132");
        reg.record(e, xuid("X1"));
        reg.consume(&e).unwrap();

        let result = reg.consume(&e);

        assert!(
            matches!(result, Err(SessionError::PendingAuthNotFound(got)) if got == e),
            "stale token must not be reused"
        );
    }

    #[test]
    fn test_consume_unknown_endpoint_returns_not_found() {
        let mut reg = PendingAuthRegistry::new();
        assert!(reg.consume(&ep("9.9.9.9:1")).is_err());
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut reg = PendingAuthRegistry::new();
        let e = ep("1.2.3.4:19132");
        reg.record(e, xuid("X1"));

        assert_eq!(reg.peek(&e), Some(&xuid("X1")));
        assert_eq!(reg.peek(&e), Some(&xuid("X1")));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_endpoints_are_independent() {
        let mut reg = PendingAuthRegistry::new();
        let a = ep("1.2.3.4:19132");
        let b = ep("1.2.3.4:19133");
        reg.record(a, xuid("A"));
        reg.record(b, xuid("B"));

        assert_eq!(reg.consume(&b).unwrap(), xuid("B"));
        assert_eq!(reg.peek(&a), Some(&xuid("A")));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut reg = PendingAuthRegistry::new();
        reg.record(ep("1.1.1.1:1"), xuid("A"));
        reg.record(ep("2.2.2.2:2"), xuid("B"));

        reg.clear();

        assert!(reg.is_empty());
    }
}
