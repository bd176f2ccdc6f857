//! # Admin Module
//!
//! Manages the contract's admin address. The admin is the only identity that
//! may change governance configuration, rotate authorized signers through the
//! normal path, and toggle the emergency system on or off.

use soroban_sdk::{contracterror, contracttype, Address, Env};

use crate::events::emit_admin_changed;

/// Errors that can occur during admin operations
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AdminError {
    /// Unauthorized access - caller is not the admin
    Unauthorized = 1,
    /// The contract has already been initialized
    AlreadyInitialized = 2,
}

/// Storage keys for admin data
#[contracttype]
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum AdminDataKey {
    /// The admin address
    Admin,
}

/// Check if the admin has been set
pub fn has_admin(env: &Env) -> bool {
    env.storage().persistent().has(&AdminDataKey::Admin)
}

/// Get the admin address
pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&AdminDataKey::Admin)
}

/// Initialize the admin. Can only be called once.
pub fn initialize(env: &Env, admin: Address) -> Result<(), AdminError> {
    if has_admin(env) {
        return Err(AdminError::AlreadyInitialized);
    }
    env.storage()
        .persistent()
        .set(&AdminDataKey::Admin, &admin);
    emit_admin_changed(env, None, &admin);
    Ok(())
}

/// Hand the admin role over to a new address. Current-admin-only.
pub fn set_admin(env: &Env, caller: Address, new_admin: Address) -> Result<(), AdminError> {
    require_admin(env, &caller)?;
    env.storage()
        .persistent()
        .set(&AdminDataKey::Admin, &new_admin);
    emit_admin_changed(env, Some(caller), &new_admin);
    Ok(())
}

/// Require that the caller is the admin
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), AdminError> {
    let admin = get_admin(env).ok_or(AdminError::Unauthorized)?;
    if admin != *caller {
        return Err(AdminError::Unauthorized);
    }
    Ok(())
}
