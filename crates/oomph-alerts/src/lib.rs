//! Alert fan-out for the Oomph bridge.
//!
//! When the external process flags a player, staff members who opted in
//! get a chat alert, but no more often than each of them asked for.
//!
//! # Key types
//!
//! - [`ViolationReport`] — what was flagged, with the count rounded for display
//! - [`AlertTemplate`] — turns a report into the chat line staff see
//! - [`AlertAudience`] — the host surface: who's online, who may see alerts,
//!   and how to message them
//! - [`AlertBroadcaster`] — recomputes the eligible set every tick and
//!   delivers to it on each violation

mod audience;
mod broadcaster;
mod report;
mod template;

pub use audience::{ALERT_PERMISSION, AlertAudience};
pub use broadcaster::AlertBroadcaster;
pub use report::ViolationReport;
pub use template::{AlertTemplate, DEFAULT_MESSAGE, DEFAULT_PREFIX};
