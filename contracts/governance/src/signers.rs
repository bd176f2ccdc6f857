//! # Signer Registry Module
//!
//! Tracks which addresses are authorized to propose and sign governance
//! operations and to invoke emergency actions. Membership is a flat set with
//! no ordering semantics.
//!
//! Authorization is mutated through two paths only: the admin-gated
//! [`set_authorized_signer`] and the emergency bypass in the emergency module,
//! which writes through [`write_authorization`] while an emergency is active.

use soroban_sdk::{contracttype, Address, Env};

use crate::admin;
use crate::errors::GovernanceError;
use crate::events::emit_signer_authorization;

/// Storage keys for the signer registry
#[contracttype]
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum SignerDataKey {
    /// Authorization flag for a signer address
    Authorized(Address),
}

/// Authorize or deauthorize a signer. Admin-only.
///
/// Setting a signer to its current authorization state is a no-op success.
pub fn set_authorized_signer(
    env: &Env,
    caller: Address,
    signer: Address,
    is_authorized: bool,
) -> Result<(), GovernanceError> {
    admin::require_admin(env, &caller).map_err(|_| GovernanceError::Unauthorized)?;

    if is_authorized_signer(env, &signer) == is_authorized {
        return Ok(());
    }
    write_authorization(env, &signer, is_authorized);
    emit_signer_authorization(env, &signer, is_authorized, &caller);
    Ok(())
}

/// Check whether an address is an authorized signer.
pub fn is_authorized_signer(env: &Env, signer: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&SignerDataKey::Authorized(signer.clone()))
        .unwrap_or(false)
}

/// Require that the caller is an authorized signer
pub fn require_authorized_signer(env: &Env, caller: &Address) -> Result<(), GovernanceError> {
    if !is_authorized_signer(env, caller) {
        return Err(GovernanceError::NotAuthorizedSigner);
    }
    Ok(())
}

/// Write an authorization flag without an admin check.
///
/// Only the admin-gated path above and the emergency signer rotation may call
/// this.
pub(crate) fn write_authorization(env: &Env, signer: &Address, is_authorized: bool) {
    env.storage()
        .persistent()
        .set(&SignerDataKey::Authorized(signer.clone()), &is_authorized);
}
