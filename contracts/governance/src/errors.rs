//! Error codes for the multisig governance engine.

use soroban_sdk::contracterror;

/// Errors that can occur during governance operations
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum GovernanceError {
    /// Unauthorized access - caller is not the admin
    Unauthorized = 1,
    /// Caller is not an authorized signer
    NotAuthorizedSigner = 2,
    /// Function name is empty or exceeds the maximum length
    InvalidFunctionName = 3,
    /// Required signature count is out of range for an enabled config
    InvalidRequiredSignatures = 4,
    /// Timelock duration exceeds the maximum
    InvalidTimelockDuration = 5,
    /// An operation may not target the governance contract itself
    SelfTargetingForbidden = 6,
    /// Payload is empty or exceeds the maximum length
    InvalidPayload = 7,
    /// Operation id is zero
    InvalidOperationId = 8,
    /// No multisig config exists for the function name
    ConfigNotFound = 9,
    /// Operation not found
    OperationNotFound = 10,
    /// Caller has already signed this operation
    AlreadySigned = 11,
    /// Operation has already been executed
    OperationAlreadyExecuted = 12,
    /// Not enough signatures collected
    InsufficientSignatures = 13,
    /// Timelock has not expired yet
    TimelockNotExpired = 14,
    /// The target invocation failed
    ExecutionFailed = 15,
}
