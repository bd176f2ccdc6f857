//! # Emergency Controller Module
//!
//! Privileged bypass controller that can suspend normal governance during a
//! declared crisis. While the emergency system is enabled and no emergency is
//! active the controller is inert; once an authorized signer declares an
//! emergency it may rotate signers directly, force-execute operations past
//! thresholds and timelocks, and disable multisig across the board.
//!
//! ## State machine
//! Normal (enabled, inactive) → EmergencyDeclared (enabled, active) → Normal.
//! SystemDisabled (disabled, inactive) is reachable only from Normal: the
//! system cannot be switched off while an emergency is active.
//!
//! Every emergency action appends exactly one entry to the append-only action
//! log. The log is forensic state; it is never consulted for authorization and
//! never mutated or pruned.

use soroban_sdk::{contracterror, contracttype, Address, Bytes, Env, String, Symbol};

use crate::admin;
use crate::config;
use crate::events::{
    emit_emergency_declared, emit_emergency_override, emit_emergency_resolved,
    emit_emergency_signer, emit_emergency_system_toggled, emit_multisig_batch_disabled,
};
use crate::operations::{self, MAX_PAYLOAD_LENGTH};
use crate::signers;

/// Maximum length of an action reason, in bytes.
pub const MAX_REASON_LENGTH: u32 = 256;

/// Errors that can occur during emergency operations
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum EmergencyError {
    /// Unauthorized access - caller is not the admin
    Unauthorized = 1,
    /// Caller is not an authorized signer
    NotAuthorizedSigner = 2,
    /// The emergency system is disabled
    SystemDisabled = 3,
    /// An emergency is already active
    EmergencyAlreadyActive = 4,
    /// No emergency is active
    NoActiveEmergency = 5,
    /// The system cannot be disabled during an active emergency
    ActiveEmergency = 6,
    /// Reason is empty or exceeds the maximum length
    InvalidReason = 7,
    /// Function name is empty or exceeds the maximum length
    InvalidFunctionName = 8,
    /// An override may not target the governance contract itself
    SelfTargetingForbidden = 9,
    /// Payload is empty or exceeds the maximum length
    InvalidPayload = 10,
    /// No action log entry exists at the index
    ActionNotFound = 11,
}

/// Storage keys for emergency state
#[contracttype]
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum EmergencyDataKey {
    /// Singleton emergency system state
    State,
    /// Number of action log entries
    ActionCount,
    /// Action log entry by 1-based index
    Action(u64),
}

/// The emergency system's singleton state.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct EmergencyState {
    /// Whether the emergency system is switched on at all
    pub enabled: bool,
    /// Whether an emergency is currently active
    pub active: bool,
    /// Reason given for the most recent declaration
    pub reason: String,
    /// Signer who declared the most recent emergency
    pub declared_by: Option<Address>,
    /// Timestamp of the most recent declaration
    pub declared_at: u64,
}

/// One entry of the append-only emergency action log.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct EmergencyAction {
    /// 1-based log index
    pub index: u64,
    /// Action kind: declared, resolved, signer_added, signer_removed,
    /// override, multisig_disabled
    pub action: Symbol,
    /// Signer who performed the action
    pub executor: Address,
    /// Reason given by the executor
    pub reason: String,
    /// Ledger timestamp when the action was recorded
    pub timestamp: u64,
    /// Whether the action's effect was applied (overrides record failed
    /// target invocations with `false`)
    pub executed: bool,
}

/// Whether the emergency system is enabled.
pub fn is_emergency_system_enabled(env: &Env) -> bool {
    read_state(env).enabled
}

/// The full emergency system state. Absent storage reads as the default:
/// enabled, no active emergency.
pub fn get_emergency_system_status(env: &Env) -> EmergencyState {
    read_state(env)
}

/// Switch the emergency system on. Admin-only, idempotent.
pub fn enable_emergency_system(env: &Env, caller: Address) -> Result<(), EmergencyError> {
    admin::require_admin(env, &caller).map_err(|_| EmergencyError::Unauthorized)?;
    let mut state = read_state(env);
    if state.enabled {
        return Ok(());
    }
    state.enabled = true;
    write_state(env, &state);
    emit_emergency_system_toggled(env, true, &caller);
    Ok(())
}

/// Switch the emergency system off. Admin-only, idempotent.
///
/// Fails while an emergency is active: the response machinery cannot be
/// neutralized mid-incident.
pub fn disable_emergency_system(env: &Env, caller: Address) -> Result<(), EmergencyError> {
    admin::require_admin(env, &caller).map_err(|_| EmergencyError::Unauthorized)?;
    let mut state = read_state(env);
    if state.active {
        return Err(EmergencyError::ActiveEmergency);
    }
    if !state.enabled {
        return Ok(());
    }
    state.enabled = false;
    write_state(env, &state);
    emit_emergency_system_toggled(env, false, &caller);
    Ok(())
}

/// Declare an emergency. Authorized-signer-only.
///
/// Only one emergency can be active at a time; nested declarations fail.
pub fn declare_emergency(env: &Env, caller: Address, reason: String) -> Result<(), EmergencyError> {
    require_emergency_signer(env, &caller)?;
    validate_reason(&reason)?;
    let mut state = read_state(env);
    if !state.enabled {
        return Err(EmergencyError::SystemDisabled);
    }
    if state.active {
        return Err(EmergencyError::EmergencyAlreadyActive);
    }

    state.active = true;
    state.reason = reason.clone();
    state.declared_by = Some(caller.clone());
    state.declared_at = env.ledger().timestamp();
    write_state(env, &state);

    append_action(env, Symbol::new(env, "declared"), &caller, &reason, true);
    emit_emergency_declared(env, &reason, &caller);
    Ok(())
}

/// Resolve the active emergency. Authorized-signer-only.
///
/// Clears the active flag only; whether the system is enabled is untouched,
/// and the last declaration's metadata stays readable in the status view.
pub fn resolve_emergency(env: &Env, caller: Address) -> Result<(), EmergencyError> {
    require_emergency_signer(env, &caller)?;
    let mut state = read_state(env);
    if !state.active {
        return Err(EmergencyError::NoActiveEmergency);
    }

    state.active = false;
    write_state(env, &state);

    append_action(env, Symbol::new(env, "resolved"), &caller, &state.reason, true);
    emit_emergency_resolved(env, &caller);
    Ok(())
}

/// Authorize a signer during an active emergency, bypassing the admin gate.
pub fn add_emergency_signer(
    env: &Env,
    caller: Address,
    signer: Address,
    reason: String,
) -> Result<(), EmergencyError> {
    require_emergency_signer(env, &caller)?;
    validate_reason(&reason)?;
    require_active(env)?;

    signers::write_authorization(env, &signer, true);
    let action = Symbol::new(env, "signer_added");
    append_action(env, action.clone(), &caller, &reason, true);
    emit_emergency_signer(env, action, &signer, &caller);
    Ok(())
}

/// Deauthorize a signer during an active emergency, bypassing the admin gate.
pub fn remove_emergency_signer(
    env: &Env,
    caller: Address,
    signer: Address,
    reason: String,
) -> Result<(), EmergencyError> {
    require_emergency_signer(env, &caller)?;
    validate_reason(&reason)?;
    require_active(env)?;

    signers::write_authorization(env, &signer, false);
    let action = Symbol::new(env, "signer_removed");
    append_action(env, action.clone(), &caller, &reason, true);
    emit_emergency_signer(env, action, &signer, &caller);
    Ok(())
}

/// Force-execute an invocation during an active emergency, bypassing all
/// configured thresholds and timelocks.
///
/// Returns whether the target invocation succeeded. The attempt is appended
/// to the action log either way; a failed invocation is recorded with
/// `executed = false` rather than surfaced as an error, so the forensic entry
/// cannot be rolled back with the failure.
pub fn emergency_override(
    env: &Env,
    caller: Address,
    function_name: String,
    target: Address,
    payload: Bytes,
    reason: String,
) -> Result<bool, EmergencyError> {
    require_emergency_signer(env, &caller)?;
    config::validate_function_name(&function_name)
        .map_err(|_| EmergencyError::InvalidFunctionName)?;
    if target == env.current_contract_address() {
        return Err(EmergencyError::SelfTargetingForbidden);
    }
    if payload.is_empty() || payload.len() > MAX_PAYLOAD_LENGTH {
        return Err(EmergencyError::InvalidPayload);
    }
    validate_reason(&reason)?;
    require_active(env)?;

    let executed = operations::invoke_target(env, &target, &payload);
    append_action(env, Symbol::new(env, "override"), &caller, &reason, executed);
    emit_emergency_override(env, &function_name, &target, &caller, executed);
    Ok(executed)
}

/// Disable multisig on every configured function in one batch.
///
/// Used when everything must run single-signature during an outage. Logs once
/// for the whole batch.
pub fn emergency_disable_all_multisig(
    env: &Env,
    caller: Address,
    reason: String,
) -> Result<(), EmergencyError> {
    require_emergency_signer(env, &caller)?;
    validate_reason(&reason)?;
    require_active(env)?;

    let disabled = config::disable_all(env);
    append_action(env, Symbol::new(env, "multisig_disabled"), &caller, &reason, true);
    emit_multisig_batch_disabled(env, disabled, &caller);
    Ok(())
}

/// Number of entries in the action log.
pub fn get_emergency_action_count(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&EmergencyDataKey::ActionCount)
        .unwrap_or(0u64)
}

/// Get an action log entry by its 1-based index.
pub fn get_emergency_action(env: &Env, index: u64) -> Result<EmergencyAction, EmergencyError> {
    if index == 0 || index > get_emergency_action_count(env) {
        return Err(EmergencyError::ActionNotFound);
    }
    env.storage()
        .persistent()
        .get(&EmergencyDataKey::Action(index))
        .ok_or(EmergencyError::ActionNotFound)
}

fn require_emergency_signer(env: &Env, caller: &Address) -> Result<(), EmergencyError> {
    signers::require_authorized_signer(env, caller)
        .map_err(|_| EmergencyError::NotAuthorizedSigner)
}

fn require_active(env: &Env) -> Result<(), EmergencyError> {
    let state = read_state(env);
    if !state.enabled {
        return Err(EmergencyError::SystemDisabled);
    }
    if !state.active {
        return Err(EmergencyError::NoActiveEmergency);
    }
    Ok(())
}

fn validate_reason(reason: &String) -> Result<(), EmergencyError> {
    if reason.is_empty() || reason.len() > MAX_REASON_LENGTH {
        return Err(EmergencyError::InvalidReason);
    }
    Ok(())
}

fn read_state(env: &Env) -> EmergencyState {
    env.storage()
        .persistent()
        .get(&EmergencyDataKey::State)
        .unwrap_or_else(|| EmergencyState {
            enabled: true,
            active: false,
            reason: String::from_str(env, ""),
            declared_by: None,
            declared_at: 0,
        })
}

fn write_state(env: &Env, state: &EmergencyState) {
    env.storage()
        .persistent()
        .set(&EmergencyDataKey::State, state);
}

fn append_action(env: &Env, action: Symbol, executor: &Address, reason: &String, executed: bool) {
    let index = get_emergency_action_count(env) + 1;
    let entry = EmergencyAction {
        index,
        action,
        executor: executor.clone(),
        reason: reason.clone(),
        timestamp: env.ledger().timestamp(),
        executed,
    };
    env.storage()
        .persistent()
        .set(&EmergencyDataKey::Action(index), &entry);
    env.storage()
        .persistent()
        .set(&EmergencyDataKey::ActionCount, &index);
}
