//! Principal roles

use soroban_sdk::contracttype;

/// Role held by a principal. Every address has exactly one.
///
/// The discriminants are ordered by privilege, so `Role::Owner > Role::Auditor`.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Role {
    None = 0,
    Auditor = 1,
    Operator = 2,
    Owner = 3,
}

impl Role {
    /// Only owners may propose, approve, execute, cancel or pause.
    pub fn can_govern(&self) -> bool {
        self.at_least(Role::Owner)
    }

    pub fn at_least(&self, required: Role) -> bool {
        *self >= required
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::None
    }
}
