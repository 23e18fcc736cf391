//! Error types for the Change Ticket registry

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TicketError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Caller lacks the admin capability (or is not the ticket holder)
    Unauthorized = 3,
    Paused = 4,
    AlreadyApproved = 5,
    /// Ticket is executed, cancelled or expired
    AlreadyFinalized = 6,
    /// Required approvals not reached
    NotReady = 7,
    /// Approved, but the severity timelock is still running
    TimelockNotExpired = 8,
    /// No ticket was ever minted with this ID
    NotFound = 9,
    /// Ticket was executed and its token burned
    Burned = 10,
    /// Validity window has passed
    TicketExpired = 11,
    /// Tickets cannot change hands
    NonTransferable = 12,
    InvalidConfig = 13,
}
