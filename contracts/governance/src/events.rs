//! # Governance Event Logging
//!
//! Structured event schema for every state-changing action in the governance
//! and emergency subsystem.
//!
//! ## Design principles
//! - Each event is its own `#[contractevent]` struct; the macro derives the
//!   snake_case struct name as the leading topic and exposes `.publish(&env)`.
//! - `emit_*` helpers wrap struct construction so each action has a single
//!   call-site.
//! - No sensitive data: all fields are publicly observable state only.
//!
//! Events are the observability surface for off-chain indexers. The
//! [`crate::emergency`] action log is separate, queryable on-chain state; the
//! two records are written together but serve different consumers.

use soroban_sdk::{contractevent, Address, Env, String, Symbol};

use crate::config::MultisigConfig;

/// Emitted when the admin role is initialized or handed over.
#[contractevent]
#[derive(Clone, Debug)]
pub struct AdminChangedEvent {
    pub previous: Option<Address>,
    pub new_admin: Address,
}

/// Emitted when a signer is authorized or deauthorized through the admin path.
#[contractevent]
#[derive(Clone, Debug)]
pub struct SignerAuthorizationEvent {
    pub signer: Address,
    pub is_authorized: bool,
    pub changed_by: Address,
}

/// Emitted when a function's multisig config is created or replaced.
///
/// # Fields
/// * `function_name` – The configured function name.
/// * `enabled` – Whether multisig is required.
/// * `required_signatures` – Signature threshold while enabled.
/// * `timelock_duration` – Timelock in seconds.
/// * `admin` – The admin who made the change.
#[contractevent]
#[derive(Clone, Debug)]
pub struct MultisigConfigEvent {
    pub function_name: String,
    pub enabled: bool,
    pub required_signatures: u32,
    pub timelock_duration: u64,
    pub admin: Address,
}

/// Emitted when an operation is proposed.
///
/// # Fields
/// * `operation_id` – The new operation's id.
/// * `function_name` – Function name the config snapshot was read from.
/// * `target` – Contract the operation will invoke.
/// * `proposer` – The proposing signer.
/// * `required_signatures` – Threshold snapshotted onto the operation.
#[contractevent]
#[derive(Clone, Debug)]
pub struct OperationProposedEvent {
    pub operation_id: u64,
    pub function_name: String,
    pub target: Address,
    pub proposer: Address,
    pub required_signatures: u32,
}

/// Emitted when a signer signs an operation.
#[contractevent]
#[derive(Clone, Debug)]
pub struct OperationSignedEvent {
    pub operation_id: u64,
    pub signer: Address,
    pub current_signatures: u32,
    pub required_signatures: u32,
}

/// Emitted when an operation executes successfully.
#[contractevent]
#[derive(Clone, Debug)]
pub struct OperationExecutedEvent {
    pub operation_id: u64,
    pub executor: Address,
}

/// Emitted when the emergency system is enabled or disabled by the admin.
#[contractevent]
#[derive(Clone, Debug)]
pub struct EmergencySystemEvent {
    pub enabled: bool,
    pub admin: Address,
}

/// Emitted when an emergency is declared.
#[contractevent]
#[derive(Clone, Debug)]
pub struct EmergencyDeclaredEvent {
    pub reason: String,
    pub declared_by: Address,
    pub timestamp: u64,
}

/// Emitted when an emergency is resolved.
#[contractevent]
#[derive(Clone, Debug)]
pub struct EmergencyResolvedEvent {
    pub resolved_by: Address,
    pub timestamp: u64,
}

/// Emitted when the emergency path rotates a signer, bypassing the admin gate.
#[contractevent]
#[derive(Clone, Debug)]
pub struct EmergencySignerEvent {
    pub action: Symbol,
    pub signer: Address,
    pub executor: Address,
}

/// Emitted for every emergency override attempt, successful or not.
///
/// # Fields
/// * `function_name` – Function name the override was keyed to.
/// * `target` – Contract that was invoked.
/// * `executor` – The signer who triggered the override.
/// * `executed` – Whether the target invocation succeeded.
#[contractevent]
#[derive(Clone, Debug)]
pub struct EmergencyOverrideEvent {
    pub function_name: String,
    pub target: Address,
    pub executor: Address,
    pub executed: bool,
}

/// Emitted when the emergency path disables multisig on every configured
/// function.
#[contractevent]
#[derive(Clone, Debug)]
pub struct MultisigBatchDisabledEvent {
    pub disabled_count: u32,
    pub executor: Address,
}

// ─────────────────────────────────────────────────────────────────────────────
// Emit helpers
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) fn emit_admin_changed(env: &Env, previous: Option<Address>, new_admin: &Address) {
    AdminChangedEvent {
        previous,
        new_admin: new_admin.clone(),
    }
    .publish(env);
}

pub(crate) fn emit_signer_authorization(
    env: &Env,
    signer: &Address,
    is_authorized: bool,
    changed_by: &Address,
) {
    SignerAuthorizationEvent {
        signer: signer.clone(),
        is_authorized,
        changed_by: changed_by.clone(),
    }
    .publish(env);
}

pub(crate) fn emit_multisig_config_updated(
    env: &Env,
    function_name: &String,
    config: &MultisigConfig,
    admin: &Address,
) {
    MultisigConfigEvent {
        function_name: function_name.clone(),
        enabled: config.enabled,
        required_signatures: config.required_signatures,
        timelock_duration: config.timelock_duration,
        admin: admin.clone(),
    }
    .publish(env);
}

pub(crate) fn emit_operation_proposed(
    env: &Env,
    operation_id: u64,
    function_name: &String,
    target: &Address,
    proposer: &Address,
    required_signatures: u32,
) {
    OperationProposedEvent {
        operation_id,
        function_name: function_name.clone(),
        target: target.clone(),
        proposer: proposer.clone(),
        required_signatures,
    }
    .publish(env);
}

pub(crate) fn emit_operation_signed(
    env: &Env,
    operation_id: u64,
    signer: &Address,
    current_signatures: u32,
    required_signatures: u32,
) {
    OperationSignedEvent {
        operation_id,
        signer: signer.clone(),
        current_signatures,
        required_signatures,
    }
    .publish(env);
}

pub(crate) fn emit_operation_executed(env: &Env, operation_id: u64, executor: &Address) {
    OperationExecutedEvent {
        operation_id,
        executor: executor.clone(),
    }
    .publish(env);
}

pub(crate) fn emit_emergency_system_toggled(env: &Env, enabled: bool, admin: &Address) {
    EmergencySystemEvent {
        enabled,
        admin: admin.clone(),
    }
    .publish(env);
}

pub(crate) fn emit_emergency_declared(env: &Env, reason: &String, declared_by: &Address) {
    EmergencyDeclaredEvent {
        reason: reason.clone(),
        declared_by: declared_by.clone(),
        timestamp: env.ledger().timestamp(),
    }
    .publish(env);
}

pub(crate) fn emit_emergency_resolved(env: &Env, resolved_by: &Address) {
    EmergencyResolvedEvent {
        resolved_by: resolved_by.clone(),
        timestamp: env.ledger().timestamp(),
    }
    .publish(env);
}

pub(crate) fn emit_emergency_signer(env: &Env, action: Symbol, signer: &Address, executor: &Address) {
    EmergencySignerEvent {
        action,
        signer: signer.clone(),
        executor: executor.clone(),
    }
    .publish(env);
}

pub(crate) fn emit_emergency_override(
    env: &Env,
    function_name: &String,
    target: &Address,
    executor: &Address,
    executed: bool,
) {
    EmergencyOverrideEvent {
        function_name: function_name.clone(),
        target: target.clone(),
        executor: executor.clone(),
        executed,
    }
    .publish(env);
}

pub(crate) fn emit_multisig_batch_disabled(env: &Env, disabled_count: u32, executor: &Address) {
    MultisigBatchDisabledEvent {
        disabled_count,
        executor: executor.clone(),
    }
    .publish(env);
}
