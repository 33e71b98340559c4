//! Signer registry: who may create and vote on requests.
//!
//! Signers are keyed by address in persistent storage; the instance-level
//! index keeps registration order so snapshots are deterministic.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::BrokerError;
use crate::storage::{self, DataKey};
use crate::types::{Role, Signer};

pub fn get(env: &Env, id: &Address) -> Option<Signer> {
    storage::get_persistent(env, &DataKey::Signer(id.clone()))
}

pub fn require(env: &Env, id: &Address) -> Result<Signer, BrokerError> {
    get(env, id).ok_or(BrokerError::SignerNotFound)
}

pub fn contains(env: &Env, id: &Address) -> bool {
    storage::has_persistent(env, &DataKey::Signer(id.clone()))
}

/// Inserts a new signer or updates an existing one in place. The original
/// `added_at` of an existing signer is kept.
pub fn put(env: &Env, mut signer: Signer) -> Signer {
    let key = DataKey::Signer(signer.id.clone());
    match storage::get_persistent::<Signer>(env, &key) {
        Some(existing) => signer.added_at = existing.added_at,
        None => {
            let mut ids = storage::signer_ids(env);
            ids.push_back(signer.id.clone());
            storage::set_signer_ids(env, &ids);
        }
    }
    storage::set_persistent(env, &key, &signer);
    signer
}

pub fn remove(env: &Env, id: &Address) -> Result<Signer, BrokerError> {
    let signer = require(env, id)?;
    storage::remove_persistent(env, &DataKey::Signer(id.clone()));

    let mut ids = storage::signer_ids(env);
    if let Some(index) = ids.first_index_of(id) {
        ids.remove(index);
    }
    storage::set_signer_ids(env, &ids);
    Ok(signer)
}

pub fn all(env: &Env) -> Vec<Signer> {
    let mut signers = Vec::new(env);
    for id in storage::signer_ids(env) {
        if let Some(signer) = get(env, &id) {
            signers.push_back(signer);
        }
    }
    signers
}

/// Active signers whose role satisfies `role`, in registration order.
pub fn eligible(env: &Env, role: Role, now: u64) -> Vec<Address> {
    let mut eligible = Vec::new(env);
    for signer in all(env) {
        if signer.is_active(now) && signer.role.satisfies(role) {
            eligible.push_back(signer.id);
        }
    }
    eligible
}

pub fn admin_count(env: &Env) -> u32 {
    let mut count = 0;
    for signer in all(env) {
        if signer.role == Role::Admin {
            count += 1;
        }
    }
    count
}
