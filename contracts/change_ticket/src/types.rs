//! Data types for the Change Ticket registry

use governance_core::ApprovalGate;
use soroban_sdk::{contracttype, Address, String};

/// Default validity window of a ticket (7 days)
pub const DEFAULT_TICKET_TTL: u64 = 7 * 24 * 60 * 60;

/// Impact of an operational change, fixed at mint
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Severity {
    Low = 0,
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl Severity {
    /// Longest timelock in the table; a ticket must outlive it
    pub const MAX_TIMELOCK: u64 = 90;

    pub fn required_approvals(&self) -> u32 {
        match self {
            Severity::Low | Severity::Medium => 1,
            Severity::High | Severity::Critical => 2,
        }
    }

    /// Seconds between reaching the required approvals and executability
    pub fn timelock(&self) -> u64 {
        match self {
            Severity::Low => 0,
            Severity::Medium => 30,
            Severity::High => 60,
            Severity::Critical => Self::MAX_TIMELOCK,
        }
    }
}

/// Ticket lifecycle. Advances forward only; `Expired` and `Cancelled` are
/// reachable from any state before `Executed`.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TicketStatus {
    Pending = 0,
    Approved = 1,
    Executable = 2,
    Executed = 3,
    Expired = 4,
    Cancelled = 5,
}

impl TicketStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TicketStatus::Executed | TicketStatus::Expired | TicketStatus::Cancelled
        )
    }
}

/// A change-authorization ticket
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ticket {
    pub id: u64,
    /// Current holder; `None` once burned
    pub holder: Option<Address>,
    pub change_scope: String,
    pub severity: Severity,
    pub gate: ApprovalGate,
    pub status: TicketStatus,
    pub minted_by: Address,
    pub minted_at: u64,
    /// Approving or executing after this timestamp is refused
    pub expires_at: u64,
    /// Outcome recorded at execution
    pub result: Option<String>,
    pub executed_at: Option<u64>,
}

impl Ticket {
    pub fn is_expired_at(&self, now: u64) -> bool {
        !self.status.is_terminal() && now > self.expires_at
    }

    /// Status as observed at `now`, without writing anything back.
    pub fn status_at(&self, now: u64) -> TicketStatus {
        if self.is_expired_at(now) {
            return TicketStatus::Expired;
        }
        if self.status == TicketStatus::Approved && self.gate.is_open(now) {
            return TicketStatus::Executable;
        }
        self.status
    }
}

/// Result of the `is_executable` read
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutionCheck {
    pub executable: bool,
    pub reason: String,
}
