//! Shared test helpers for contract tests, plus two governed-target test
//! doubles: one that records every invocation and one that always rejects.

#![cfg(test)]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, testutils::Address as _,
    testutils::Ledger, Address, Bytes, Env, String,
};

use crate::{GovernanceContract, GovernanceContractClient};

/// Ledger timestamp every test environment starts at.
pub const START_TIMESTAMP: u64 = 1_700_000_000;

/// Full setup: env, client, admin, and two authorized signers.
pub fn setup() -> (
    Env,
    GovernanceContractClient<'static>,
    Address,
    Address,
    Address,
) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| {
        li.timestamp = START_TIMESTAMP;
    });
    let contract_id = env.register(GovernanceContract, ());
    let client = GovernanceContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin);
    let signer_a = Address::generate(&env);
    let signer_b = Address::generate(&env);
    client.set_authorized_signer(&admin, &signer_a, &true);
    client.set_authorized_signer(&admin, &signer_b, &true);
    (env, client, admin, signer_a, signer_b)
}

pub fn name(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

pub fn payload(env: &Env) -> Bytes {
    Bytes::from_slice(env, &[0xAB])
}

pub fn advance_time(env: &Env, seconds: u64) {
    env.ledger().with_mut(|li| {
        li.timestamp += seconds;
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Governed target doubles
// ─────────────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum TargetDataKey {
    Calls,
}

/// A governed target that counts how often it was invoked.
#[contract]
pub struct RecordingTarget;

#[contractimpl]
impl RecordingTarget {
    pub fn execute(env: Env, _payload: Bytes) {
        let calls: u32 = env
            .storage()
            .persistent()
            .get(&TargetDataKey::Calls)
            .unwrap_or(0);
        env.storage()
            .persistent()
            .set(&TargetDataKey::Calls, &(calls + 1));
    }

    pub fn call_count(env: Env) -> u32 {
        env.storage()
            .persistent()
            .get(&TargetDataKey::Calls)
            .unwrap_or(0)
    }
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TargetError {
    Rejected = 1,
}

/// A governed target whose invocation always fails.
#[contract]
pub struct RejectingTarget;

#[contractimpl]
impl RejectingTarget {
    pub fn execute(_env: Env, _payload: Bytes) -> Result<(), TargetError> {
        Err(TargetError::Rejected)
    }
}

pub fn register_recording_target(env: &Env) -> Address {
    env.register(RecordingTarget, ())
}

pub fn recording_target_calls(env: &Env, target: &Address) -> u32 {
    RecordingTargetClient::new(env, target).call_count()
}

pub fn register_rejecting_target(env: &Env) -> Address {
    env.register(RejectingTarget, ())
}
