#![cfg(test)]

use soroban_sdk::{testutils::Address as _, Address, Bytes, String};

use crate::test_helpers::{
    advance_time, name, payload, recording_target_calls, register_recording_target,
    register_rejecting_target, setup, START_TIMESTAMP,
};
use crate::GovernanceError;

#[test]
fn test_operation_ids_are_monotonic_from_one() {
    let (env, client, _, signer_a, _) = setup();
    let target = register_recording_target(&env);
    let first = client.propose_operation(&signer_a, &name(&env, "a"), &target, &payload(&env));
    let second = client.propose_operation(&signer_a, &name(&env, "b"), &target, &payload(&env));
    let third = client.propose_operation(&signer_a, &name(&env, "c"), &target, &payload(&env));
    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(third, 3);
    assert_eq!(client.get_operation_count(), 3);
}

#[test]
fn test_propose_requires_authorized_signer() {
    let (env, client, _, _, _) = setup();
    let target = register_recording_target(&env);
    let stranger = Address::generate(&env);
    assert_eq!(
        client.try_propose_operation(&stranger, &name(&env, "payout"), &target, &payload(&env)),
        Err(Ok(GovernanceError::NotAuthorizedSigner))
    );
}

#[test]
fn test_propose_rejects_invalid_function_name() {
    let (env, client, _, signer_a, _) = setup();
    let target = register_recording_target(&env);
    assert_eq!(
        client.try_propose_operation(&signer_a, &name(&env, ""), &target, &payload(&env)),
        Err(Ok(GovernanceError::InvalidFunctionName))
    );
    let too_long = String::from_bytes(&env, &[b'a'; 257]);
    assert_eq!(
        client.try_propose_operation(&signer_a, &too_long, &target, &payload(&env)),
        Err(Ok(GovernanceError::InvalidFunctionName))
    );
}

#[test]
fn test_propose_rejects_self_target() {
    let (env, client, _, signer_a, _) = setup();
    assert_eq!(
        client.try_propose_operation(
            &signer_a,
            &name(&env, "payout"),
            &client.address,
            &payload(&env)
        ),
        Err(Ok(GovernanceError::SelfTargetingForbidden))
    );
}

#[test]
fn test_propose_rejects_invalid_payload() {
    let (env, client, _, signer_a, _) = setup();
    let target = register_recording_target(&env);
    assert_eq!(
        client.try_propose_operation(&signer_a, &name(&env, "payout"), &target, &Bytes::new(&env)),
        Err(Ok(GovernanceError::InvalidPayload))
    );
    let oversized = Bytes::from_slice(&env, &[0u8; 1025]);
    assert_eq!(
        client.try_propose_operation(&signer_a, &name(&env, "payout"), &target, &oversized),
        Err(Ok(GovernanceError::InvalidPayload))
    );
}

#[test]
fn test_proposal_snapshots_config() {
    let (env, client, admin, signer_a, _) = setup();
    let target = register_recording_target(&env);
    client.set_multisig_config(&admin, &name(&env, "payout"), &true, &3, &120);

    let id = client.propose_operation(&signer_a, &name(&env, "payout"), &target, &payload(&env));
    let operation = client.get_operation_details(&id);
    assert_eq!(operation.required_signatures, 3);
    assert_eq!(operation.timelock_expiry, START_TIMESTAMP + 120);
    assert_eq!(operation.created_at, START_TIMESTAMP);
    assert_eq!(operation.proposer, signer_a);
    assert!(!operation.executed);
}

#[test]
fn test_snapshot_survives_config_change() {
    let (env, client, admin, signer_a, _) = setup();
    let target = register_recording_target(&env);
    client.set_multisig_config(&admin, &name(&env, "payout"), &true, &3, &0);
    let id = client.propose_operation(&signer_a, &name(&env, "payout"), &target, &payload(&env));

    // Raising the threshold afterwards must not affect the in-flight operation
    client.set_multisig_config(&admin, &name(&env, "payout"), &true, &5, &0);
    assert_eq!(client.get_operation_details(&id).required_signatures, 3);
    assert_eq!(client.get_signature_status(&id).required, 3);
}

#[test]
fn test_unconfigured_function_defaults_to_single_signature() {
    let (env, client, _, signer_a, _) = setup();
    let target = register_recording_target(&env);
    let id = client.propose_operation(
        &signer_a,
        &name(&env, "unconfigured"),
        &target,
        &payload(&env),
    );
    let operation = client.get_operation_details(&id);
    assert_eq!(operation.required_signatures, 1);
    assert_eq!(operation.timelock_expiry, START_TIMESTAMP);

    client.sign_operation(&signer_a, &id);
    assert!(client.can_execute_operation(&id));
    client.execute_operation(&signer_a, &id);
    assert_eq!(recording_target_calls(&env, &target), 1);
}

#[test]
fn test_disabled_config_treated_as_single_signature() {
    let (env, client, admin, signer_a, _) = setup();
    let target = register_recording_target(&env);
    client.set_multisig_config(&admin, &name(&env, "payout"), &false, &5, &600);
    let id = client.propose_operation(&signer_a, &name(&env, "payout"), &target, &payload(&env));
    assert_eq!(client.get_operation_details(&id).required_signatures, 1);
    assert_eq!(client.get_operation_details(&id).timelock_expiry, START_TIMESTAMP);
}

#[test]
fn test_sign_requires_authorized_signer() {
    let (env, client, _, signer_a, _) = setup();
    let target = register_recording_target(&env);
    let id = client.propose_operation(&signer_a, &name(&env, "a"), &target, &payload(&env));
    let stranger = Address::generate(&env);
    assert_eq!(
        client.try_sign_operation(&stranger, &id),
        Err(Ok(GovernanceError::NotAuthorizedSigner))
    );
}

#[test]
fn test_sign_rejects_zero_and_unknown_ids() {
    let (_env, client, _, signer_a, _) = setup();
    assert_eq!(
        client.try_sign_operation(&signer_a, &0),
        Err(Ok(GovernanceError::InvalidOperationId))
    );
    assert_eq!(
        client.try_sign_operation(&signer_a, &42),
        Err(Ok(GovernanceError::OperationNotFound))
    );
}

#[test]
fn test_double_signing_is_a_hard_failure() {
    let (env, client, admin, signer_a, signer_b) = setup();
    let target = register_recording_target(&env);
    client.set_multisig_config(&admin, &name(&env, "payout"), &true, &2, &0);
    let id = client.propose_operation(&signer_a, &name(&env, "payout"), &target, &payload(&env));

    client.sign_operation(&signer_a, &id);
    assert_eq!(
        client.try_sign_operation(&signer_a, &id),
        Err(Ok(GovernanceError::AlreadySigned))
    );

    // The other signer is unaffected
    client.sign_operation(&signer_b, &id);
    assert_eq!(client.get_signature_status(&id).current, 2);
}

#[test]
fn test_proposer_is_not_counted_as_signer() {
    let (env, client, _, signer_a, _) = setup();
    let target = register_recording_target(&env);
    let id = client.propose_operation(&signer_a, &name(&env, "a"), &target, &payload(&env));
    assert!(!client.has_signed_operation(&id, &signer_a));
    assert_eq!(client.get_signature_status(&id).current, 0);
}

#[test]
fn test_deauthorized_signer_cannot_sign() {
    let (env, client, admin, signer_a, signer_b) = setup();
    let target = register_recording_target(&env);
    let id = client.propose_operation(&signer_a, &name(&env, "a"), &target, &payload(&env));
    client.set_authorized_signer(&admin, &signer_b, &false);
    assert_eq!(
        client.try_sign_operation(&signer_b, &id),
        Err(Ok(GovernanceError::NotAuthorizedSigner))
    );
}

#[test]
fn test_execute_fails_without_enough_signatures() {
    let (env, client, admin, signer_a, _) = setup();
    let target = register_recording_target(&env);
    client.set_multisig_config(&admin, &name(&env, "payout"), &true, &2, &0);
    let id = client.propose_operation(&signer_a, &name(&env, "payout"), &target, &payload(&env));
    client.sign_operation(&signer_a, &id);

    assert!(!client.can_execute_operation(&id));
    assert_eq!(
        client.try_execute_operation(&signer_a, &id),
        Err(Ok(GovernanceError::InsufficientSignatures))
    );
    assert_eq!(recording_target_calls(&env, &target), 0);
}

#[test]
fn test_execute_fails_before_timelock_expiry() {
    let (env, client, admin, signer_a, signer_b) = setup();
    let target = register_recording_target(&env);
    client.set_multisig_config(&admin, &name(&env, "payout"), &true, &2, &60);
    let id = client.propose_operation(&signer_a, &name(&env, "payout"), &target, &payload(&env));
    client.sign_operation(&signer_a, &id);
    client.sign_operation(&signer_b, &id);

    assert!(!client.can_execute_operation(&id));
    assert_eq!(
        client.try_execute_operation(&signer_a, &id),
        Err(Ok(GovernanceError::TimelockNotExpired))
    );

    advance_time(&env, 59);
    assert_eq!(
        client.try_execute_operation(&signer_a, &id),
        Err(Ok(GovernanceError::TimelockNotExpired))
    );

    advance_time(&env, 1);
    assert!(client.can_execute_operation(&id));
    client.execute_operation(&signer_a, &id);
    assert_eq!(recording_target_calls(&env, &target), 1);
}

#[test]
fn test_execute_requires_authorized_signer() {
    let (env, client, _, signer_a, _) = setup();
    let target = register_recording_target(&env);
    let id = client.propose_operation(&signer_a, &name(&env, "a"), &target, &payload(&env));
    client.sign_operation(&signer_a, &id);
    let stranger = Address::generate(&env);
    assert_eq!(
        client.try_execute_operation(&stranger, &id),
        Err(Ok(GovernanceError::NotAuthorizedSigner))
    );
}

#[test]
fn test_no_double_execution() {
    let (env, client, admin, signer_a, signer_b) = setup();
    let target = register_recording_target(&env);
    client.set_multisig_config(&admin, &name(&env, "payout"), &true, &2, &60);
    let id = client.propose_operation(&signer_a, &name(&env, "payout"), &target, &payload(&env));
    client.sign_operation(&signer_a, &id);
    client.sign_operation(&signer_b, &id);
    advance_time(&env, 60);

    client.execute_operation(&signer_a, &id);
    assert!(client.get_operation_details(&id).executed);
    assert!(!client.can_execute_operation(&id));

    assert_eq!(
        client.try_execute_operation(&signer_b, &id),
        Err(Ok(GovernanceError::OperationAlreadyExecuted))
    );
    assert_eq!(recording_target_calls(&env, &target), 1);
}

#[test]
fn test_sign_after_execution_fails() {
    let (env, client, _, signer_a, signer_b) = setup();
    let target = register_recording_target(&env);
    let id = client.propose_operation(&signer_a, &name(&env, "a"), &target, &payload(&env));
    client.sign_operation(&signer_a, &id);
    client.execute_operation(&signer_a, &id);
    assert_eq!(
        client.try_sign_operation(&signer_b, &id),
        Err(Ok(GovernanceError::OperationAlreadyExecuted))
    );
}

#[test]
fn test_failed_target_invocation_leaves_operation_retryable() {
    let (env, client, _, signer_a, _) = setup();
    let target = register_rejecting_target(&env);
    let id = client.propose_operation(&signer_a, &name(&env, "a"), &target, &payload(&env));
    client.sign_operation(&signer_a, &id);

    assert_eq!(
        client.try_execute_operation(&signer_a, &id),
        Err(Ok(GovernanceError::ExecutionFailed))
    );
    // Not marked executed; still eligible for a retry
    assert!(!client.get_operation_details(&id).executed);
    assert!(client.can_execute_operation(&id));
}

#[test]
fn test_read_helpers_reject_unknown_operation() {
    let (_env, client, _, signer_a, _) = setup();
    assert_eq!(
        client.try_get_operation_details(&7),
        Err(Ok(GovernanceError::OperationNotFound))
    );
    assert_eq!(
        client.try_get_signature_status(&7),
        Err(Ok(GovernanceError::OperationNotFound))
    );
    assert_eq!(
        client.try_has_signed_operation(&7, &signer_a),
        Err(Ok(GovernanceError::OperationNotFound))
    );
    assert_eq!(
        client.try_get_operation_signers(&7),
        Err(Ok(GovernanceError::OperationNotFound))
    );
    assert_eq!(
        client.try_can_execute_operation(&7),
        Err(Ok(GovernanceError::OperationNotFound))
    );
}

#[test]
fn test_signature_bookkeeping() {
    let (env, client, admin, signer_a, signer_b) = setup();
    let target = register_recording_target(&env);
    client.set_multisig_config(&admin, &name(&env, "payout"), &true, &2, &0);
    let id = client.propose_operation(&signer_a, &name(&env, "payout"), &target, &payload(&env));

    client.sign_operation(&signer_b, &id);
    let status = client.get_signature_status(&id);
    assert_eq!(status.current, 1);
    assert_eq!(status.required, 2);
    assert!(!status.is_complete);
    assert!(client.has_signed_operation(&id, &signer_b));
    assert!(!client.has_signed_operation(&id, &signer_a));

    client.sign_operation(&signer_a, &id);
    let status = client.get_signature_status(&id);
    assert_eq!(status.current, 2);
    assert!(status.is_complete);

    let op_signers = client.get_operation_signers(&id);
    assert_eq!(op_signers.len(), 2);
    assert!(op_signers.contains(&signer_a));
    assert!(op_signers.contains(&signer_b));
}

/// End-to-end: a 2-of-N payout behind a 60 second timelock.
#[test]
fn test_two_signer_payout_flow() {
    let (env, client, admin, signer_a, signer_b) = setup();
    let vault = register_recording_target(&env);
    client.set_multisig_config(&admin, &name(&env, "payout"), &true, &2, &60);

    let id = client.propose_operation(
        &signer_a,
        &name(&env, "payout"),
        &vault,
        &Bytes::from_slice(&env, &[0xAB]),
    );
    client.sign_operation(&signer_a, &id);
    client.sign_operation(&signer_b, &id);

    // Fully signed but timelocked
    assert!(!client.can_execute_operation(&id));
    advance_time(&env, 60);
    assert!(client.can_execute_operation(&id));

    client.execute_operation(&signer_b, &id);
    assert_eq!(recording_target_calls(&env, &vault), 1);
    assert_eq!(
        client.try_execute_operation(&signer_a, &id),
        Err(Ok(GovernanceError::OperationAlreadyExecuted))
    );
}
