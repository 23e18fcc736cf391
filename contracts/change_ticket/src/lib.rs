#![no_std]

//! # Change Ticket Registry
//!
//! A Soroban smart contract issuing one non-transferable authorization token per
//! proposed operational change (firewall rule, server swap, access grant).
//!
//! ## Features
//! - Severity fixed at mint selects the required approvals and the timelock
//! - Approvals restricted to holders of the admin capability, one per admin
//! - Execution records the outcome and burns the token, exactly once
//! - Tickets left unexecuted past their validity window become inert
//! - Optional read-only back-reference to a treasury ledger
//!
//! ## Lifecycle
//! `Pending -> Approved -> Executable -> Executed`, with `Cancelled` and
//! `Expired` reachable from any state before `Executed`. Severities without a
//! timelock skip straight from `Pending` to `Executable`.

use governance_core::{reason, ApprovalGate, GateBlock};
use soroban_sdk::{contract, contractevent, contractimpl, Address, Env, String, Vec};

mod error;
mod storage;
mod types;

pub use error::TicketError;
pub use types::{ExecutionCheck, Severity, Ticket, TicketStatus, DEFAULT_TICKET_TTL};

// ============================================================================
// Events
// ============================================================================

#[contractevent(topics = ["ChangeTicket", "INIT"])]
pub struct RegistryInitialized {
    pub admins_count: u32,
    pub ticket_ttl: u64,
}

#[contractevent(topics = ["ChangeTicket", "MINTED"])]
pub struct TicketMinted {
    pub ticket_id: u64,
    pub holder: Address,
    pub severity: Severity,
    pub required_approvals: u32,
}

#[contractevent(topics = ["ChangeTicket", "APPROVED"])]
pub struct TicketApproved {
    pub ticket_id: u64,
    pub admin: Address,
    pub approvals: u32,
    pub status: TicketStatus,
    pub timelock_until: u64,
}

#[contractevent(topics = ["ChangeTicket", "EXECUTED"])]
pub struct TicketExecuted {
    pub ticket_id: u64,
    pub executor: Address,
    pub burned_from: Address,
    pub result: String,
}

#[contractevent(topics = ["ChangeTicket", "CANCELLED"])]
pub struct TicketCancelled {
    pub ticket_id: u64,
    pub cancelled_by: Address,
}

#[contractevent(topics = ["ChangeTicket", "EXPIRED"])]
pub struct TicketExpired {
    pub ticket_id: u64,
    pub expired_by: Address,
}

#[contractevent(topics = ["ChangeTicket", "ADMIN_ADD"])]
pub struct AdminGranted {
    pub account: Address,
    pub granted_by: Address,
}

#[contractevent(topics = ["ChangeTicket", "ADMIN_REM"])]
pub struct AdminRevoked {
    pub account: Address,
    pub revoked_by: Address,
}

#[contractevent(topics = ["ChangeTicket", "TREASURY"])]
pub struct TreasuryLinked {
    pub treasury: Address,
}

#[contractevent(topics = ["ChangeTicket", "PAUSED"])]
pub struct RegistryPaused {
    pub by: Address,
}

#[contractevent(topics = ["ChangeTicket", "UNPAUSED"])]
pub struct RegistryUnpaused {
    pub by: Address,
}

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct ChangeTicketRegistry;

#[contractimpl]
impl ChangeTicketRegistry {
    /// Initialize the registry with its admins and ticket validity window
    ///
    /// # Errors
    /// * `AlreadyInitialized` - Registry has already been initialized
    /// * `InvalidConfig` - No admins, duplicate admins, or a TTL not longer
    ///   than the longest severity timelock
    pub fn initialize(env: Env, admins: Vec<Address>, ticket_ttl: u64) -> Result<(), TicketError> {
        if storage::is_initialized(&env) {
            return Err(TicketError::AlreadyInitialized);
        }
        if admins.is_empty() || ticket_ttl <= Severity::MAX_TIMELOCK {
            return Err(TicketError::InvalidConfig);
        }

        for admin in admins.iter() {
            if storage::is_admin(&env, &admin) {
                return Err(TicketError::InvalidConfig);
            }
            admin.require_auth();
            storage::set_admin(&env, &admin);
        }

        storage::set_admin_count(&env, admins.len());
        storage::set_ticket_ttl(&env, ticket_ttl);
        storage::set_paused(&env, false);

        RegistryInitialized {
            admins_count: admins.len(),
            ticket_ttl,
        }
        .publish(&env);

        Ok(())
    }

    // ========================================================================
    // Admin Capability
    // ========================================================================

    /// Grant the admin capability. Granting to an existing admin is a no-op.
    pub fn grant_admin(env: Env, caller: Address, account: Address) -> Result<(), TicketError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if storage::is_admin(&env, &account) {
            return Ok(());
        }

        storage::set_admin(&env, &account);
        storage::set_admin_count(&env, storage::get_admin_count(&env) + 1);

        AdminGranted {
            account,
            granted_by: caller,
        }
        .publish(&env);

        Ok(())
    }

    /// Revoke the admin capability. The last admin cannot be revoked.
    pub fn revoke_admin(env: Env, caller: Address, account: Address) -> Result<(), TicketError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if !storage::is_admin(&env, &account) {
            return Ok(());
        }

        let count = storage::get_admin_count(&env);
        if count <= 1 {
            return Err(TicketError::InvalidConfig);
        }

        storage::remove_admin(&env, &account);
        storage::set_admin_count(&env, count - 1);

        AdminRevoked {
            account,
            revoked_by: caller,
        }
        .publish(&env);

        Ok(())
    }

    pub fn is_admin(env: Env, account: Address) -> bool {
        storage::is_admin(&env, &account)
    }

    /// Record the treasury this registry reports alongside
    pub fn set_treasury(env: Env, caller: Address, treasury: Address) -> Result<(), TicketError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        storage::set_treasury(&env, &treasury);

        TreasuryLinked { treasury }.publish(&env);
        Ok(())
    }

    pub fn get_treasury(env: Env) -> Option<Address> {
        storage::get_treasury(&env)
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), TicketError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        storage::set_paused(&env, true);
        RegistryPaused { by: caller }.publish(&env);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), TicketError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        storage::set_paused(&env, false);
        RegistryUnpaused { by: caller }.publish(&env);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    // ========================================================================
    // Ticket Lifecycle
    // ========================================================================

    /// Mint a ticket to `holder` and return its sequential ID
    ///
    /// # Errors
    /// * `NotInitialized` - Registry not initialized
    /// * `Unauthorized` - Caller is not an admin
    /// * `Paused` - Registry is paused
    pub fn mint_ticket(
        env: Env,
        caller: Address,
        holder: Address,
        change_scope: String,
        severity: Severity,
    ) -> Result<u64, TicketError> {
        let ttl = storage::get_ticket_ttl(&env).ok_or(TicketError::NotInitialized)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        Self::require_not_paused(&env)?;

        let now = env.ledger().timestamp();
        let id = storage::get_ticket_count(&env);

        let ticket = Ticket {
            id,
            holder: Some(holder.clone()),
            change_scope,
            severity,
            gate: ApprovalGate::new(severity.required_approvals(), severity.timelock()),
            status: TicketStatus::Pending,
            minted_by: caller,
            minted_at: now,
            expires_at: now.saturating_add(ttl),
            result: None,
            executed_at: None,
        };

        storage::set_ticket(&env, &ticket);
        storage::set_ticket_count(&env, id + 1);
        storage::set_supply(&env, storage::get_supply(&env) + 1);
        storage::set_balance(&env, &holder, storage::get_balance(&env, &holder) + 1);

        TicketMinted {
            ticket_id: id,
            holder,
            severity,
            required_approvals: ticket.gate.required,
        }
        .publish(&env);

        Ok(id)
    }

    /// Approve a ticket
    ///
    /// Reaching the required approvals moves the ticket to `Approved`, or
    /// directly to `Executable` when its severity carries no timelock.
    ///
    /// # Errors
    /// * `Unauthorized` - Caller is not an admin
    /// * `Paused` - Registry is paused
    /// * `NotFound` - Ticket does not exist
    /// * `AlreadyFinalized` - Ticket is executed, cancelled or expired
    /// * `TicketExpired` - Validity window has passed
    /// * `AlreadyApproved` - Caller already approved this ticket
    pub fn approve_ticket(env: Env, caller: Address, ticket_id: u64) -> Result<(), TicketError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        Self::require_not_paused(&env)?;

        let mut ticket = Self::load_ticket(&env, ticket_id)?;
        let now = env.ledger().timestamp();

        if ticket.status.is_terminal() {
            return Err(TicketError::AlreadyFinalized);
        }
        if ticket.is_expired_at(now) {
            return Err(TicketError::TicketExpired);
        }
        if storage::has_approved(&env, ticket_id, &caller) {
            return Err(TicketError::AlreadyApproved);
        }

        if ticket.gate.record_approval(now) {
            ticket.status = if ticket.gate.timelock == 0 {
                TicketStatus::Executable
            } else {
                TicketStatus::Approved
            };
        }

        storage::set_approved(&env, ticket_id, &caller);
        storage::set_ticket(&env, &ticket);

        TicketApproved {
            ticket_id,
            admin: caller,
            approvals: ticket.gate.approvals,
            status: ticket.status,
            timelock_until: ticket.gate.timelock_until,
        }
        .publish(&env);

        Ok(())
    }

    /// Whether a ticket can be executed now, and the first failing gate
    pub fn is_executable(env: Env, ticket_id: u64) -> Result<ExecutionCheck, TicketError> {
        let ticket = Self::load_ticket(&env, ticket_id)?;
        let now = env.ledger().timestamp();

        let check = match Self::readiness(&env, &ticket, now) {
            Ok(()) => ExecutionCheck {
                executable: true,
                reason: String::from_str(&env, reason::READY),
            },
            Err((_, why)) => ExecutionCheck {
                executable: false,
                reason: String::from_str(&env, why),
            },
        };
        Ok(check)
    }

    /// Record the outcome of the change and burn the ticket
    ///
    /// Callable by an admin or by the ticket's holder.
    ///
    /// # Errors
    /// * `Paused` - Registry is paused
    /// * `NotFound` - Ticket does not exist
    /// * `Unauthorized` - Caller is neither admin nor holder
    /// * `AlreadyFinalized` - Ticket is executed, cancelled or expired
    /// * `TicketExpired` - Validity window has passed
    /// * `NotReady` - Required approvals not reached
    /// * `TimelockNotExpired` - Severity timelock still running
    pub fn execute_ticket(
        env: Env,
        caller: Address,
        ticket_id: u64,
        result_message: String,
    ) -> Result<(), TicketError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_not_paused(&env)?;

        let mut ticket = Self::load_ticket(&env, ticket_id)?;

        // A burned ticket has no holder left to match against
        if ticket.status.is_terminal() {
            return Err(TicketError::AlreadyFinalized);
        }

        let is_holder = ticket.holder.as_ref() == Some(&caller);
        if !is_holder && !storage::is_admin(&env, &caller) {
            return Err(TicketError::Unauthorized);
        }

        let now = env.ledger().timestamp();
        Self::readiness(&env, &ticket, now).map_err(|(err, _)| err)?;

        let holder = ticket.holder.take().ok_or(TicketError::Burned)?;

        ticket.status = TicketStatus::Executed;
        ticket.result = Some(result_message.clone());
        ticket.executed_at = Some(now);
        storage::set_ticket(&env, &ticket);

        // Burn
        let balance = storage::get_balance(&env, &holder);
        storage::set_balance(&env, &holder, balance.saturating_sub(1));
        storage::set_supply(&env, storage::get_supply(&env).saturating_sub(1));

        TicketExecuted {
            ticket_id,
            executor: caller,
            burned_from: holder,
            result: result_message,
        }
        .publish(&env);

        Ok(())
    }

    /// Cancel a ticket that has not reached a terminal state (admin only)
    pub fn cancel_ticket(env: Env, caller: Address, ticket_id: u64) -> Result<(), TicketError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut ticket = Self::load_ticket(&env, ticket_id)?;
        if ticket.status.is_terminal() {
            return Err(TicketError::AlreadyFinalized);
        }

        ticket.status = TicketStatus::Cancelled;
        storage::set_ticket(&env, &ticket);

        TicketCancelled {
            ticket_id,
            cancelled_by: caller,
        }
        .publish(&env);

        Ok(())
    }

    /// Move a ticket to `Expired`
    ///
    /// Admins may expire any non-terminal ticket; anyone else only once the
    /// validity window has passed.
    pub fn expire_ticket(env: Env, caller: Address, ticket_id: u64) -> Result<(), TicketError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut ticket = Self::load_ticket(&env, ticket_id)?;
        if ticket.status.is_terminal() {
            return Err(TicketError::AlreadyFinalized);
        }

        let now = env.ledger().timestamp();
        if !ticket.is_expired_at(now) && !storage::is_admin(&env, &caller) {
            return Err(TicketError::Unauthorized);
        }

        ticket.status = TicketStatus::Expired;
        storage::set_ticket(&env, &ticket);

        TicketExpired {
            ticket_id,
            expired_by: caller,
        }
        .publish(&env);

        Ok(())
    }

    /// Tickets are soulbound; this always fails
    pub fn transfer(
        env: Env,
        from: Address,
        _to: Address,
        ticket_id: u64,
    ) -> Result<(), TicketError> {
        from.require_auth();

        let ticket = Self::load_ticket(&env, ticket_id)?;
        if ticket.holder.is_none() {
            return Err(TicketError::Burned);
        }
        Err(TicketError::NonTransferable)
    }

    // ========================================================================
    // Query Functions
    // ========================================================================

    /// Current holder of a ticket
    ///
    /// # Errors
    /// * `NotFound` - No ticket was ever minted with this ID
    /// * `Burned` - Ticket was executed
    pub fn owner_of(env: Env, ticket_id: u64) -> Result<Address, TicketError> {
        Self::load_ticket(&env, ticket_id)?
            .holder
            .ok_or(TicketError::Burned)
    }

    /// Ticket record, with `status` as observed at the current ledger time
    pub fn get_ticket(env: Env, ticket_id: u64) -> Result<Ticket, TicketError> {
        let mut ticket = Self::load_ticket(&env, ticket_id)?;
        ticket.status = ticket.status_at(env.ledger().timestamp());
        Ok(ticket)
    }

    pub fn timelock_remaining(env: Env, ticket_id: u64) -> Result<u64, TicketError> {
        let ticket = Self::load_ticket(&env, ticket_id)?;
        Ok(ticket.gate.remaining(env.ledger().timestamp()))
    }

    pub fn get_approval_status(env: Env, ticket_id: u64, account: Address) -> bool {
        storage::has_approved(&env, ticket_id, &account)
    }

    pub fn balance_of(env: Env, holder: Address) -> u32 {
        storage::get_balance(&env, &holder)
    }

    /// Live (unburned) tickets
    pub fn total_supply(env: Env) -> u64 {
        storage::get_supply(&env)
    }

    /// Tickets ever minted; also the next ticket ID
    pub fn ticket_count(env: Env) -> u64 {
        storage::get_ticket_count(&env)
    }

    pub fn get_ticket_ttl(env: Env) -> Result<u64, TicketError> {
        storage::get_ticket_ttl(&env).ok_or(TicketError::NotInitialized)
    }

    pub fn required_approvals(_env: Env, severity: Severity) -> u32 {
        severity.required_approvals()
    }

    pub fn severity_timelock(_env: Env, severity: Severity) -> u64 {
        severity.timelock()
    }

    // ========================================================================
    // Internal Helper Functions
    // ========================================================================

    fn require_initialized(env: &Env) -> Result<(), TicketError> {
        if !storage::is_initialized(env) {
            return Err(TicketError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), TicketError> {
        if !storage::is_admin(env, caller) {
            return Err(TicketError::Unauthorized);
        }
        Ok(())
    }

    fn require_not_paused(env: &Env) -> Result<(), TicketError> {
        if storage::is_paused(env) {
            return Err(TicketError::Paused);
        }
        Ok(())
    }

    fn load_ticket(env: &Env, ticket_id: u64) -> Result<Ticket, TicketError> {
        storage::get_ticket(env, ticket_id).ok_or(TicketError::NotFound)
    }

    fn readiness(
        env: &Env,
        ticket: &Ticket,
        now: u64,
    ) -> Result<(), (TicketError, &'static str)> {
        if storage::is_paused(env) {
            return Err((TicketError::Paused, reason::PAUSED));
        }
        match ticket.status {
            TicketStatus::Executed => {
                return Err((TicketError::AlreadyFinalized, reason::EXECUTED))
            }
            TicketStatus::Cancelled => {
                return Err((TicketError::AlreadyFinalized, reason::CANCELLED))
            }
            TicketStatus::Expired => return Err((TicketError::AlreadyFinalized, reason::EXPIRED)),
            _ => {}
        }
        if ticket.is_expired_at(now) {
            return Err((TicketError::TicketExpired, reason::EXPIRED));
        }
        ticket.gate.check(now).map_err(|block| match block {
            GateBlock::AwaitingQuorum => (TicketError::NotReady, block.reason()),
            GateBlock::TimelockActive => (TicketError::TimelockNotExpired, block.reason()),
        })
    }
}
