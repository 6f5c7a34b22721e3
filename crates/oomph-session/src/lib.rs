//! Player identity and session state for the Oomph bridge.
//!
//! This crate holds the two stores the bridge keeps between events:
//!
//! 1. **Pending authentication** — XUIDs the external process vouched for,
//!    keyed by the connection's address, waiting for the login that will
//!    claim them ([`PendingAuthRegistry`]).
//! 2. **Sessions** — per-player alert preferences and rate-limit state for
//!    everyone currently logged in ([`SessionRegistry`]).
//!
//! # How it fits in the stack
//!
//! ```text
//! Bridge (above)  ← routes messages and lifecycle events into these stores
//!     ↕
//! Session Layer (this crate)  ← identity correlation and alert preferences
//!     ↕
//! Protocol Layer (below)  ← provides PlayerId, Xuid, Endpoint
//! ```
//!
//! Neither store is thread-safe on its own. Both are owned by the bridge,
//! which runs every event on a single logical task.

mod error;
mod manager;
mod pending;
mod session;

pub use error::SessionError;
pub use manager::SessionRegistry;
pub use pending::PendingAuthRegistry;
pub use session::{Session, SessionDefaults};
