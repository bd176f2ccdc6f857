//! # Multisig Configuration Module
//!
//! Per-function multisig configuration: whether a named privileged function
//! requires multisig at all, how many signatures it needs, and how long its
//! timelock runs. Pure data plus invariant checks; the operation lifecycle
//! lives in the operations module.
//!
//! Unknown function names are a legitimate state and read as "multisig not
//! required" rather than an error.

use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::admin;
use crate::errors::GovernanceError;
use crate::events::emit_multisig_config_updated;

/// Maximum number of signatures an enabled config may require.
pub const MAX_SIGNATURES: u32 = 50;
/// Maximum length of a function name, in bytes.
pub const MAX_FUNCTION_NAME_LENGTH: u32 = 256;
/// Maximum timelock duration: one year, in seconds.
pub const MAX_TIMELOCK_DURATION: u64 = 365 * 24 * 60 * 60;

/// Storage keys for multisig configuration
#[contracttype]
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum ConfigDataKey {
    /// Config for a function name
    Config(String),
    /// All function names that have ever been configured
    Registry,
}

/// Multisig requirements for one named function.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct MultisigConfig {
    /// Whether multisig is required for this function
    pub enabled: bool,
    /// Number of signatures required while enabled
    pub required_signatures: u32,
    /// Timelock duration in seconds
    pub timelock_duration: u64,
}

/// Validate a function name against the emptiness and length bounds.
pub fn validate_function_name(name: &String) -> Result<(), GovernanceError> {
    if name.is_empty() || name.len() > MAX_FUNCTION_NAME_LENGTH {
        return Err(GovernanceError::InvalidFunctionName);
    }
    Ok(())
}

/// Create or replace the multisig config for a function name. Admin-only.
///
/// Validation order: function name, then required signatures (only while
/// `enabled`), then timelock duration. Nothing is written unless every check
/// passes.
pub fn set_multisig_config(
    env: &Env,
    caller: Address,
    function_name: String,
    enabled: bool,
    required_signatures: u32,
    timelock_duration: u64,
) -> Result<(), GovernanceError> {
    admin::require_admin(env, &caller).map_err(|_| GovernanceError::Unauthorized)?;
    validate_function_name(&function_name)?;
    if enabled && !(1..=MAX_SIGNATURES).contains(&required_signatures) {
        return Err(GovernanceError::InvalidRequiredSignatures);
    }
    if timelock_duration > MAX_TIMELOCK_DURATION {
        return Err(GovernanceError::InvalidTimelockDuration);
    }

    let config = MultisigConfig {
        enabled,
        required_signatures,
        timelock_duration,
    };
    let key = ConfigDataKey::Config(function_name.clone());
    if !env.storage().persistent().has(&key) {
        register_function_name(env, &function_name);
    }
    env.storage().persistent().set(&key, &config);

    emit_multisig_config_updated(env, &function_name, &config, &caller);
    Ok(())
}

/// Whether a function name currently requires multisig.
///
/// True iff a config exists and is enabled.
pub fn requires_multisig(env: &Env, function_name: &String) -> bool {
    match read_config(env, function_name) {
        Some(config) => config.enabled,
        None => false,
    }
}

/// Get the multisig config for a function name.
pub fn get_multisig_config(
    env: &Env,
    function_name: &String,
) -> Result<MultisigConfig, GovernanceError> {
    validate_function_name(function_name)?;
    read_config(env, function_name).ok_or(GovernanceError::ConfigNotFound)
}

/// Read a config without validation, absent configs as `None`.
pub(crate) fn read_config(env: &Env, function_name: &String) -> Option<MultisigConfig> {
    env.storage()
        .persistent()
        .get(&ConfigDataKey::Config(function_name.clone()))
}

/// All function names that have ever been configured.
pub fn configured_function_names(env: &Env) -> Vec<String> {
    env.storage()
        .persistent()
        .get(&ConfigDataKey::Registry)
        .unwrap_or_else(|| Vec::new(env))
}

/// Disable multisig on every configured function. Returns how many configs
/// were flipped from enabled to disabled.
///
/// Emergency-path only; the caller is responsible for authorization and for
/// recording the batch in the action log.
pub(crate) fn disable_all(env: &Env) -> u32 {
    let mut disabled = 0u32;
    for name in configured_function_names(env).iter() {
        let key = ConfigDataKey::Config(name.clone());
        if let Some(mut config) = env
            .storage()
            .persistent()
            .get::<ConfigDataKey, MultisigConfig>(&key)
        {
            if config.enabled {
                config.enabled = false;
                env.storage().persistent().set(&key, &config);
                disabled += 1;
            }
        }
    }
    disabled
}

fn register_function_name(env: &Env, function_name: &String) {
    let mut names = configured_function_names(env);
    if !names.contains(function_name) {
        names.push_back(function_name.clone());
        env.storage()
            .persistent()
            .set(&ConfigDataKey::Registry, &names);
    }
}
