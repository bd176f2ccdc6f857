//! # KYC Platform Governance Contract
//!
//! The governance and emergency-override control plane for the KYC onboarding
//! platform on Soroban.
//!
//! This contract gates who may trigger which privileged operation on the
//! platform's other components, and under what conditions:
//! - **Signer registry**: the set of addresses allowed to propose and sign
//!   governance operations
//! - **Multisig configuration**: per-function signature thresholds and
//!   timelock durations
//! - **Operation lifecycle**: propose → sign → execute with threshold and
//!   timelock enforcement
//! - **Emergency control**: declared emergencies unlock signer rotation and
//!   direct overrides that bypass normal governance, every action recorded in
//!   an append-only audit log
//!
//! A privileged operation on another component can only ever run through one
//! of two paths: enough independent signatures plus an elapsed timelock, or an
//! explicitly declared emergency.

#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, String, Vec};

mod admin;
mod config;
mod emergency;
mod errors;
mod events;
mod operations;
mod signers;

#[cfg(test)]
mod operations_test;
#[cfg(test)]
mod test_helpers;

pub use admin::AdminError;
pub use config::MultisigConfig;
pub use emergency::{EmergencyAction, EmergencyError, EmergencyState};
pub use errors::GovernanceError;
pub use operations::{Operation, SignatureStatus};

/// The KYC platform governance contract.
///
/// Provides the public API for governance and emergency operations. Each
/// method authenticates the caller, then delegates to the corresponding module
/// implementation.
#[contract]
pub struct GovernanceContract;

#[contractimpl]
impl GovernanceContract {
    /// Initialize the contract with an admin address.
    ///
    /// Must be called before any other operation.
    ///
    /// # Errors
    /// - `AlreadyInitialized` - The contract has already been initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), AdminError> {
        admin::initialize(&env, admin)
    }

    /// Get the admin address, if initialized.
    pub fn get_admin(env: Env) -> Option<Address> {
        admin::get_admin(&env)
    }

    /// Hand the admin role over to a new address.
    ///
    /// # Arguments
    /// * `caller` - The current admin (must authorize)
    /// * `new_admin` - The new admin address
    ///
    /// # Errors
    /// - `Unauthorized` - Caller is not the current admin
    pub fn set_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), AdminError> {
        caller.require_auth();
        admin::set_admin(&env, caller, new_admin)
    }

    // ========================================================================
    // Signer registry
    // ========================================================================

    /// Authorize or deauthorize a signer. Admin-only.
    ///
    /// Re-setting a signer's current state is a no-op success.
    ///
    /// # Arguments
    /// * `caller` - The admin (must authorize)
    /// * `signer` - The signer address
    /// * `is_authorized` - True to authorize, false to deauthorize
    ///
    /// # Errors
    /// - `Unauthorized` - Caller is not the admin
    pub fn set_authorized_signer(
        env: Env,
        caller: Address,
        signer: Address,
        is_authorized: bool,
    ) -> Result<(), GovernanceError> {
        caller.require_auth();
        signers::set_authorized_signer(&env, caller, signer, is_authorized)
    }

    /// Check whether an address is an authorized signer.
    pub fn is_authorized_signer(env: Env, signer: Address) -> bool {
        signers::is_authorized_signer(&env, &signer)
    }

    // ========================================================================
    // Multisig configuration
    // ========================================================================

    /// Create or replace the multisig config for a function name. Admin-only.
    ///
    /// # Arguments
    /// * `caller` - The admin (must authorize)
    /// * `function_name` - Function name, non-empty and at most 256 bytes
    /// * `enabled` - Whether multisig is required for this function
    /// * `required_signatures` - Signature threshold, 1 to 50 while enabled
    /// * `timelock_duration` - Timelock in seconds, at most one year
    ///
    /// # Errors
    /// - `Unauthorized` - Caller is not the admin
    /// - `InvalidFunctionName` - Name is empty or too long
    /// - `InvalidRequiredSignatures` - Threshold out of range for an enabled
    ///   config
    /// - `InvalidTimelockDuration` - Timelock exceeds one year
    pub fn set_multisig_config(
        env: Env,
        caller: Address,
        function_name: String,
        enabled: bool,
        required_signatures: u32,
        timelock_duration: u64,
    ) -> Result<(), GovernanceError> {
        caller.require_auth();
        config::set_multisig_config(
            &env,
            caller,
            function_name,
            enabled,
            required_signatures,
            timelock_duration,
        )
    }

    /// Whether a function name currently requires multisig.
    ///
    /// Unconfigured names return false.
    pub fn requires_multisig(env: Env, function_name: String) -> bool {
        config::requires_multisig(&env, &function_name)
    }

    /// Get the multisig config for a function name.
    ///
    /// # Errors
    /// - `InvalidFunctionName` - Name is empty or too long
    /// - `ConfigNotFound` - No config exists for the name
    pub fn get_multisig_config(
        env: Env,
        function_name: String,
    ) -> Result<MultisigConfig, GovernanceError> {
        config::get_multisig_config(&env, &function_name)
    }

    // ========================================================================
    // Operation lifecycle
    // ========================================================================

    /// Propose a privileged operation.
    ///
    /// The function's multisig config is snapshotted onto the operation at
    /// proposal time; later config changes never affect it. The proposer is
    /// not counted as having signed.
    ///
    /// # Arguments
    /// * `caller` - An authorized signer (must authorize)
    /// * `function_name` - Function name the config is read from
    /// * `target` - Contract to invoke on execution; not this contract
    /// * `payload` - Opaque payload, non-empty and at most 1024 bytes
    ///
    /// # Returns
    /// The new operation id; ids are strictly increasing from 1.
    ///
    /// # Errors
    /// - `NotAuthorizedSigner` - Caller is not an authorized signer
    /// - `InvalidFunctionName` - Name is empty or too long
    /// - `SelfTargetingForbidden` - Target is this contract
    /// - `InvalidPayload` - Payload is empty or too long
    pub fn propose_operation(
        env: Env,
        caller: Address,
        function_name: String,
        target: Address,
        payload: Bytes,
    ) -> Result<u64, GovernanceError> {
        caller.require_auth();
        operations::propose_operation(&env, caller, function_name, target, payload)
    }

    /// Add the caller's signature to an operation.
    ///
    /// # Arguments
    /// * `caller` - An authorized signer (must authorize)
    /// * `operation_id` - The operation to sign
    ///
    /// # Errors
    /// - `NotAuthorizedSigner` - Caller is not an authorized signer
    /// - `InvalidOperationId` - Operation id is zero
    /// - `OperationNotFound` - No operation exists with this id
    /// - `OperationAlreadyExecuted` - Operation has already executed
    /// - `AlreadySigned` - Caller has already signed it
    pub fn sign_operation(
        env: Env,
        caller: Address,
        operation_id: u64,
    ) -> Result<(), GovernanceError> {
        caller.require_auth();
        operations::sign_operation(&env, caller, operation_id)
    }

    /// Whether an operation could execute right now: unexecuted, fully
    /// signed, timelock expired.
    pub fn can_execute_operation(env: Env, operation_id: u64) -> Result<bool, GovernanceError> {
        operations::can_execute_operation(&env, operation_id)
    }

    /// Execute a fully signed, timelock-expired operation.
    ///
    /// Invokes the target with the operation's payload. The operation is
    /// marked executed before the invocation; a failed invocation leaves it
    /// unexecuted and retryable.
    ///
    /// # Arguments
    /// * `caller` - An authorized signer (must authorize)
    /// * `operation_id` - The operation to execute
    ///
    /// # Errors
    /// - `NotAuthorizedSigner` - Caller is not an authorized signer
    /// - `OperationAlreadyExecuted` - Operation has already executed
    /// - `InsufficientSignatures` - Threshold not met
    /// - `TimelockNotExpired` - Timelock still running
    /// - `ExecutionFailed` - The target invocation failed
    pub fn execute_operation(
        env: Env,
        caller: Address,
        operation_id: u64,
    ) -> Result<(), GovernanceError> {
        caller.require_auth();
        operations::execute_operation(&env, caller, operation_id)
    }

    /// Get an operation by id.
    pub fn get_operation_details(
        env: Env,
        operation_id: u64,
    ) -> Result<Operation, GovernanceError> {
        operations::get_operation_details(&env, operation_id)
    }

    /// Get the signature progress for an operation.
    pub fn get_signature_status(
        env: Env,
        operation_id: u64,
    ) -> Result<SignatureStatus, GovernanceError> {
        operations::get_signature_status(&env, operation_id)
    }

    /// Whether an address has signed an operation.
    pub fn has_signed_operation(
        env: Env,
        operation_id: u64,
        signer: Address,
    ) -> Result<bool, GovernanceError> {
        operations::has_signed_operation(&env, operation_id, &signer)
    }

    /// The addresses that have signed an operation.
    pub fn get_operation_signers(
        env: Env,
        operation_id: u64,
    ) -> Result<Vec<Address>, GovernanceError> {
        operations::get_operation_signers(&env, operation_id)
    }

    /// Total number of operations ever proposed.
    pub fn get_operation_count(env: Env) -> u64 {
        operations::get_operation_count(&env)
    }

    // ========================================================================
    // Emergency control
    // ========================================================================

    /// Whether the emergency system is enabled.
    pub fn is_emergency_system_enabled(env: Env) -> bool {
        emergency::is_emergency_system_enabled(&env)
    }

    /// The full emergency system state.
    pub fn get_emergency_system_status(env: Env) -> EmergencyState {
        emergency::get_emergency_system_status(&env)
    }

    /// Switch the emergency system on. Admin-only, idempotent.
    ///
    /// # Errors
    /// - `Unauthorized` - Caller is not the admin
    pub fn enable_emergency_system(env: Env, caller: Address) -> Result<(), EmergencyError> {
        caller.require_auth();
        emergency::enable_emergency_system(&env, caller)
    }

    /// Switch the emergency system off. Admin-only, idempotent.
    ///
    /// # Errors
    /// - `Unauthorized` - Caller is not the admin
    /// - `ActiveEmergency` - An emergency is active; the system cannot be
    ///   disabled mid-incident
    pub fn disable_emergency_system(env: Env, caller: Address) -> Result<(), EmergencyError> {
        caller.require_auth();
        emergency::disable_emergency_system(&env, caller)
    }

    /// Declare an emergency.
    ///
    /// # Arguments
    /// * `caller` - An authorized signer (must authorize)
    /// * `reason` - Why the emergency is being declared
    ///
    /// # Errors
    /// - `NotAuthorizedSigner` - Caller is not an authorized signer
    /// - `InvalidReason` - Reason is empty or too long
    /// - `SystemDisabled` - The emergency system is switched off
    /// - `EmergencyAlreadyActive` - An emergency is already active
    pub fn declare_emergency(
        env: Env,
        caller: Address,
        reason: String,
    ) -> Result<(), EmergencyError> {
        caller.require_auth();
        emergency::declare_emergency(&env, caller, reason)
    }

    /// Resolve the active emergency.
    ///
    /// # Errors
    /// - `NotAuthorizedSigner` - Caller is not an authorized signer
    /// - `NoActiveEmergency` - No emergency is active
    pub fn resolve_emergency(env: Env, caller: Address) -> Result<(), EmergencyError> {
        caller.require_auth();
        emergency::resolve_emergency(&env, caller)
    }

    /// Authorize a signer during an active emergency, bypassing the admin
    /// gate.
    ///
    /// # Errors
    /// - `NotAuthorizedSigner` - Caller is not an authorized signer
    /// - `InvalidReason` - Reason is empty or too long
    /// - `SystemDisabled` - The emergency system is switched off
    /// - `NoActiveEmergency` - No emergency is active
    pub fn add_emergency_signer(
        env: Env,
        caller: Address,
        signer: Address,
        reason: String,
    ) -> Result<(), EmergencyError> {
        caller.require_auth();
        emergency::add_emergency_signer(&env, caller, signer, reason)
    }

    /// Deauthorize a signer during an active emergency, bypassing the admin
    /// gate.
    ///
    /// # Errors
    /// - `NotAuthorizedSigner` - Caller is not an authorized signer
    /// - `InvalidReason` - Reason is empty or too long
    /// - `SystemDisabled` - The emergency system is switched off
    /// - `NoActiveEmergency` - No emergency is active
    pub fn remove_emergency_signer(
        env: Env,
        caller: Address,
        signer: Address,
        reason: String,
    ) -> Result<(), EmergencyError> {
        caller.require_auth();
        emergency::remove_emergency_signer(&env, caller, signer, reason)
    }

    /// Force-execute an invocation during an active emergency, bypassing all
    /// configured thresholds and timelocks.
    ///
    /// # Arguments
    /// * `caller` - An authorized signer (must authorize)
    /// * `function_name` - Function name, recorded for the audit trail
    /// * `target` - Contract to invoke; not this contract
    /// * `payload` - Opaque payload, non-empty and at most 1024 bytes
    /// * `reason` - Why the override is being used
    ///
    /// # Returns
    /// Whether the target invocation succeeded. The attempt is logged either
    /// way.
    ///
    /// # Errors
    /// - `NotAuthorizedSigner` - Caller is not an authorized signer
    /// - `InvalidFunctionName` / `SelfTargetingForbidden` / `InvalidPayload` /
    ///   `InvalidReason` - Input validation failed
    /// - `SystemDisabled` - The emergency system is switched off
    /// - `NoActiveEmergency` - No emergency is active
    pub fn emergency_override(
        env: Env,
        caller: Address,
        function_name: String,
        target: Address,
        payload: Bytes,
        reason: String,
    ) -> Result<bool, EmergencyError> {
        caller.require_auth();
        emergency::emergency_override(&env, caller, function_name, target, payload, reason)
    }

    /// Disable multisig on every configured function in one batch.
    ///
    /// # Errors
    /// - `NotAuthorizedSigner` - Caller is not an authorized signer
    /// - `InvalidReason` - Reason is empty or too long
    /// - `SystemDisabled` - The emergency system is switched off
    /// - `NoActiveEmergency` - No emergency is active
    pub fn emergency_disable_all_multisig(
        env: Env,
        caller: Address,
        reason: String,
    ) -> Result<(), EmergencyError> {
        caller.require_auth();
        emergency::emergency_disable_all_multisig(&env, caller, reason)
    }

    /// Number of entries in the emergency action log.
    pub fn get_emergency_action_count(env: Env) -> u64 {
        emergency::get_emergency_action_count(&env)
    }

    /// Get an emergency action log entry by its 1-based index.
    ///
    /// # Errors
    /// - `ActionNotFound` - Index is zero or past the end of the log
    pub fn get_emergency_action(env: Env, index: u64) -> Result<EmergencyAction, EmergencyError> {
        emergency::get_emergency_action(&env, index)
    }
}
