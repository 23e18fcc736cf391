//! Storage keys and helpers for the Change Ticket registry

use soroban_sdk::{contracttype, Address, Env};

use crate::types::Ticket;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Ticket validity window in seconds (instance storage)
    TicketTtl,
    /// Admin capability of an address (instance storage)
    Admin(Address),
    AdminCount,
    Paused,
    /// Read-only back-reference to a treasury (instance storage)
    Treasury,
    /// Next ticket ID, equal to the number ever minted
    TicketCount,
    /// Number of live (unburned) tickets
    Supply,
    /// Live tickets per holder (persistent storage)
    Balance(Address),
    /// Ticket record (persistent storage)
    Ticket(u64),
    /// Approval membership of (ticket, admin) (persistent storage)
    Approval(u64, Address),
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::TicketTtl)
}

pub fn get_ticket_ttl(env: &Env) -> Option<u64> {
    env.storage().instance().get(&DataKey::TicketTtl)
}

pub fn set_ticket_ttl(env: &Env, ttl: u64) {
    env.storage().instance().set(&DataKey::TicketTtl, &ttl);
}

// ============================================================================
// Admin Capability
// ============================================================================

pub fn is_admin(env: &Env, address: &Address) -> bool {
    env.storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Admin(address.clone()))
        .unwrap_or(false)
}

pub fn set_admin(env: &Env, address: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::Admin(address.clone()), &true);
}

pub fn remove_admin(env: &Env, address: &Address) {
    env.storage()
        .instance()
        .remove(&DataKey::Admin(address.clone()));
}

pub fn get_admin_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::AdminCount)
        .unwrap_or(0)
}

pub fn set_admin_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::AdminCount, &count);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn get_treasury(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Treasury)
}

pub fn set_treasury(env: &Env, treasury: &Address) {
    env.storage().instance().set(&DataKey::Treasury, treasury);
}

// ============================================================================
// Tickets
// ============================================================================

pub fn get_ticket_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TicketCount)
        .unwrap_or(0)
}

pub fn set_ticket_count(env: &Env, count: u64) {
    env.storage().instance().set(&DataKey::TicketCount, &count);
}

pub fn get_supply(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::Supply).unwrap_or(0)
}

pub fn set_supply(env: &Env, supply: u64) {
    env.storage().instance().set(&DataKey::Supply, &supply);
}

pub fn get_balance(env: &Env, holder: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(holder.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, holder: &Address, balance: u32) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(holder.clone()), &balance);
}

pub fn get_ticket(env: &Env, id: u64) -> Option<Ticket> {
    env.storage().persistent().get(&DataKey::Ticket(id))
}

pub fn set_ticket(env: &Env, ticket: &Ticket) {
    env.storage()
        .persistent()
        .set(&DataKey::Ticket(ticket.id), ticket);
}

pub fn has_approved(env: &Env, id: u64, admin: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Approval(id, admin.clone()))
}

pub fn set_approved(env: &Env, id: u64, admin: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Approval(id, admin.clone()), &true);
}
