//! Quorum-then-timelock approval gate

use soroban_sdk::contracttype;

use crate::reason;

/// First unmet condition of an [`ApprovalGate`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GateBlock {
    /// Fewer distinct approvals than required
    AwaitingQuorum,
    /// Quorum reached but the timelock has not elapsed
    TimelockActive,
}

impl GateBlock {
    pub fn reason(&self) -> &'static str {
        match self {
            GateBlock::AwaitingQuorum => reason::AWAITING_QUORUM,
            GateBlock::TimelockActive => reason::TIMELOCK,
        }
    }
}

/// Approval counter plus timelock for one gated action.
///
/// `timelock_until` is 0 until quorum is reached for the first time. From then
/// on it holds `reached_at + timelock` and is never recomputed, even if more
/// approvals arrive afterwards. Membership (who approved) lives in the owning
/// contract's approval table; the gate only counts.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalGate {
    /// Number of distinct approvals recorded so far
    pub approvals: u32,
    /// Approvals needed before the timelock starts
    pub required: u32,
    /// Delay in seconds between quorum and executability
    pub timelock: u64,
    /// Earliest executable timestamp (0 until quorum)
    pub timelock_until: u64,
}

impl ApprovalGate {
    pub fn new(required: u32, timelock: u64) -> Self {
        Self {
            approvals: 0,
            required,
            timelock,
            timelock_until: 0,
        }
    }

    pub fn has_quorum(&self) -> bool {
        self.approvals >= self.required
    }

    /// Count one more distinct approval at `now`.
    ///
    /// Returns `true` exactly once: on the approval that first reaches quorum,
    /// which is also when `timelock_until` is fixed.
    pub fn record_approval(&mut self, now: u64) -> bool {
        let had_quorum = self.has_quorum();
        self.approvals = self.approvals.saturating_add(1);

        if !had_quorum && self.has_quorum() {
            self.timelock_until = now.saturating_add(self.timelock);
            return true;
        }
        false
    }

    /// Check quorum first, then the timelock.
    pub fn check(&self, now: u64) -> Result<(), GateBlock> {
        if !self.has_quorum() {
            return Err(GateBlock::AwaitingQuorum);
        }
        if now < self.timelock_until {
            return Err(GateBlock::TimelockActive);
        }
        Ok(())
    }

    pub fn is_open(&self, now: u64) -> bool {
        self.check(now).is_ok()
    }

    /// Seconds left on the timelock, 0 when elapsed or not yet started.
    pub fn remaining(&self, now: u64) -> u64 {
        if !self.has_quorum() {
            return 0;
        }
        self.timelock_until.saturating_sub(now)
    }
}
