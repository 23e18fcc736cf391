#![no_std]

//! # Governance Core
//!
//! Primitives shared by the treasury ledger and the change-ticket registry.
//!
//! Both contracts gate their sensitive actions the same way: a fixed number of
//! distinct approvals (quorum), followed by a delay keyed by the action's risk
//! tier (timelock). [`ApprovalGate`] implements that shape once; each contract
//! embeds one gate per proposal or ticket and parameterizes it from its own
//! static threshold/duration table.
//!
//! The gate never reads the ledger clock. Callers read the timestamp once per
//! invocation and pass it in as `now`.

mod gate;
mod roles;

pub use gate::{ApprovalGate, GateBlock};
pub use roles::Role;

/// Reason strings reported by the `can_execute` / `is_executable` reads.
pub mod reason {
    pub const READY: &str = "Ready";
    pub const PAUSED: &str = "Paused";
    pub const EXECUTED: &str = "Already executed";
    pub const CANCELLED: &str = "Cancelled";
    pub const EXPIRED: &str = "Expired";
    pub const AWAITING_QUORUM: &str = "Not enough approvals";
    pub const TIMELOCK: &str = "Timelock not expired";
}
