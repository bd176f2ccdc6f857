//! # Governance Operations Module
//!
//! Implements the propose → sign → execute lifecycle for privileged
//! operations. An operation is a named invocation of a target contract with an
//! opaque payload, gated by a signature threshold and a timelock.
//!
//! ## Lifecycle
//! 1. An authorized signer proposes an operation with [`propose_operation`].
//!    The function's multisig config is snapshotted onto the operation at this
//!    point; later config changes never alter an in-flight operation.
//! 2. Authorized signers accumulate signatures with [`sign_operation`]. The
//!    proposer is not counted automatically and must sign explicitly.
//! 3. Once the threshold is met and the timelock has expired, any authorized
//!    signer executes it with [`execute_operation`]. Execution happens at most
//!    once; the executed flag is set before the target is invoked.
//!
//! Operations are never deleted. One that never gathers enough signatures
//! simply stays pending.

use soroban_sdk::{contracttype, Address, Bytes, Env, IntoVal, String, Symbol, Val, Vec};

use crate::config;
use crate::errors::GovernanceError;
use crate::events::{emit_operation_executed, emit_operation_proposed, emit_operation_signed};
use crate::signers;

/// Maximum payload length, in bytes.
pub const MAX_PAYLOAD_LENGTH: u32 = 1024;

/// Storage keys for governance operations
#[contracttype]
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum OperationDataKey {
    /// Last assigned operation id
    Counter,
    /// Operation by id
    Operation(u64),
    /// Addresses that have signed an operation
    Signers(u64),
}

/// A proposed privileged invocation of a target contract.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    /// Operation id, strictly increasing from 1
    pub id: u64,
    /// Function name the multisig config was read from
    pub function_name: String,
    /// Contract to invoke on execution
    pub target: Address,
    /// Opaque payload handed to the target
    pub payload: Bytes,
    /// Address that proposed the operation
    pub proposer: Address,
    /// Signature threshold snapshotted at proposal time
    pub required_signatures: u32,
    /// Earliest timestamp at which the operation may execute
    pub timelock_expiry: u64,
    /// Whether the operation has been executed
    pub executed: bool,
    /// Proposal timestamp
    pub created_at: u64,
}

/// Signature progress for one operation.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct SignatureStatus {
    /// Signatures collected so far
    pub current: u32,
    /// Signatures required
    pub required: u32,
    /// Whether the threshold has been met
    pub is_complete: bool,
}

/// Propose a new operation. Authorized-signer-only.
///
/// Snapshots the function's multisig config onto the operation: an enabled
/// config contributes its threshold and timelock, an absent or disabled one
/// means a single signature and no timelock. Returns the new operation id.
pub fn propose_operation(
    env: &Env,
    caller: Address,
    function_name: String,
    target: Address,
    payload: Bytes,
) -> Result<u64, GovernanceError> {
    signers::require_authorized_signer(env, &caller)?;
    config::validate_function_name(&function_name)?;
    if target == env.current_contract_address() {
        return Err(GovernanceError::SelfTargetingForbidden);
    }
    if payload.is_empty() || payload.len() > MAX_PAYLOAD_LENGTH {
        return Err(GovernanceError::InvalidPayload);
    }

    let (required_signatures, timelock_duration) = match config::read_config(env, &function_name) {
        Some(c) if c.enabled => (c.required_signatures, c.timelock_duration),
        _ => (1, 0),
    };

    let id: u64 = env
        .storage()
        .persistent()
        .get(&OperationDataKey::Counter)
        .unwrap_or(0u64)
        .checked_add(1)
        .ok_or(GovernanceError::InvalidOperationId)?;
    env.storage()
        .persistent()
        .set(&OperationDataKey::Counter, &id);

    let now = env.ledger().timestamp();
    let operation = Operation {
        id,
        function_name: function_name.clone(),
        target: target.clone(),
        payload,
        proposer: caller.clone(),
        required_signatures,
        timelock_expiry: now + timelock_duration,
        executed: false,
        created_at: now,
    };
    env.storage()
        .persistent()
        .set(&OperationDataKey::Operation(id), &operation);

    let op_signers: Vec<Address> = Vec::new(env);
    env.storage()
        .persistent()
        .set(&OperationDataKey::Signers(id), &op_signers);

    emit_operation_proposed(env, id, &function_name, &target, &caller, required_signatures);
    Ok(id)
}

/// Add the caller's signature to an operation. Authorized-signer-only.
///
/// Signing twice is a hard failure rather than a no-op, to surface caller
/// bugs.
pub fn sign_operation(env: &Env, caller: Address, operation_id: u64) -> Result<(), GovernanceError> {
    signers::require_authorized_signer(env, &caller)?;
    let operation = load_operation(env, operation_id)?;
    if operation.executed {
        return Err(GovernanceError::OperationAlreadyExecuted);
    }

    let mut op_signers = load_signers(env, operation_id);
    if op_signers.contains(&caller) {
        return Err(GovernanceError::AlreadySigned);
    }
    op_signers.push_back(caller.clone());
    env.storage()
        .persistent()
        .set(&OperationDataKey::Signers(operation_id), &op_signers);

    emit_operation_signed(
        env,
        operation_id,
        &caller,
        op_signers.len(),
        operation.required_signatures,
    );
    Ok(())
}

/// Whether an operation could execute right now.
pub fn can_execute_operation(env: &Env, operation_id: u64) -> Result<bool, GovernanceError> {
    let operation = load_operation(env, operation_id)?;
    let signature_count = load_signers(env, operation_id).len();
    Ok(!operation.executed
        && signature_count >= operation.required_signatures
        && env.ledger().timestamp() >= operation.timelock_expiry)
}

/// Execute a fully signed, timelock-expired operation. Authorized-signer-only.
///
/// The executed flag is persisted before the target is invoked, so a
/// re-entrant call cannot execute the same operation twice. If the target
/// invocation fails the flag is cleared again and the operation stays
/// retryable.
pub fn execute_operation(
    env: &Env,
    caller: Address,
    operation_id: u64,
) -> Result<(), GovernanceError> {
    signers::require_authorized_signer(env, &caller)?;
    let mut operation = load_operation(env, operation_id)?;
    if operation.executed {
        return Err(GovernanceError::OperationAlreadyExecuted);
    }
    if load_signers(env, operation_id).len() < operation.required_signatures {
        return Err(GovernanceError::InsufficientSignatures);
    }
    if env.ledger().timestamp() < operation.timelock_expiry {
        return Err(GovernanceError::TimelockNotExpired);
    }

    let key = OperationDataKey::Operation(operation_id);
    operation.executed = true;
    env.storage().persistent().set(&key, &operation);

    if !invoke_target(env, &operation.target, &operation.payload) {
        operation.executed = false;
        env.storage().persistent().set(&key, &operation);
        return Err(GovernanceError::ExecutionFailed);
    }

    emit_operation_executed(env, operation_id, &caller);
    Ok(())
}

/// Get an operation by id.
pub fn get_operation_details(env: &Env, operation_id: u64) -> Result<Operation, GovernanceError> {
    load_operation(env, operation_id)
}

/// Get the signature progress for an operation.
pub fn get_signature_status(
    env: &Env,
    operation_id: u64,
) -> Result<SignatureStatus, GovernanceError> {
    let operation = load_operation(env, operation_id)?;
    let current = load_signers(env, operation_id).len();
    Ok(SignatureStatus {
        current,
        required: operation.required_signatures,
        is_complete: current >= operation.required_signatures,
    })
}

/// Whether an address has signed an operation.
pub fn has_signed_operation(
    env: &Env,
    operation_id: u64,
    signer: &Address,
) -> Result<bool, GovernanceError> {
    load_operation(env, operation_id)?;
    Ok(load_signers(env, operation_id).contains(signer))
}

/// The addresses that have signed an operation.
pub fn get_operation_signers(
    env: &Env,
    operation_id: u64,
) -> Result<Vec<Address>, GovernanceError> {
    load_operation(env, operation_id)?;
    Ok(load_signers(env, operation_id))
}

/// Total number of operations ever proposed.
pub fn get_operation_count(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&OperationDataKey::Counter)
        .unwrap_or(0u64)
}

/// Invoke a governed target with an opaque payload.
///
/// Targets expose `execute(payload: Bytes)`; this is the single invocation
/// primitive shared by governed execution and the emergency override. Returns
/// whether the invocation succeeded.
pub(crate) fn invoke_target(env: &Env, target: &Address, payload: &Bytes) -> bool {
    let args: Vec<Val> = (payload.clone(),).into_val(env);
    env.try_invoke_contract::<Val, soroban_sdk::Error>(target, &Symbol::new(env, "execute"), args)
        .is_ok()
}

fn load_operation(env: &Env, operation_id: u64) -> Result<Operation, GovernanceError> {
    if operation_id == 0 {
        return Err(GovernanceError::InvalidOperationId);
    }
    env.storage()
        .persistent()
        .get(&OperationDataKey::Operation(operation_id))
        .ok_or(GovernanceError::OperationNotFound)
}

fn load_signers(env: &Env, operation_id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&OperationDataKey::Signers(operation_id))
        .unwrap_or_else(|| Vec::new(env))
}
