//! Mirrored pairing index: provider -> subscribers and subscriber -> providers,
//! plus the per-pairing accrual clock.
//!
//! Both directions are kept consistent by construction: every mutation goes
//! through [`add_pairing`] / [`remove_pairing`], which update the two
//! [`crate::indexed_set`] sides and the `last_settled` entry together. A
//! failed insert on either side aborts the whole invocation, so a pairing can
//! never be visible in only one direction.

use crate::indexed_set;
use crate::types::{DataKey, Error, IndexSide};
use soroban_sdk::{Env, Vec};

/// Creates the (provider, subscriber) pairing with its accrual clock at `now`.
///
/// Fails with `Error::AlreadyPaired` if the pairing already exists.
pub fn add_pairing(
    env: &Env,
    provider_id: u64,
    subscriber_id: u64,
    now: u64,
) -> Result<(), Error> {
    indexed_set::insert(env, IndexSide::Providers, provider_id, subscriber_id)?;
    indexed_set::insert(env, IndexSide::Subscribers, subscriber_id, provider_id)?;
    env.storage()
        .instance()
        .set(&DataKey::LastSettled(provider_id, subscriber_id), &now);
    Ok(())
}

/// Cancels the pairing on both sides and discards its accrual clock.
///
/// Idempotent: returns `false` if the pairing was not live (already removed),
/// `true` if this call removed it.
pub fn remove_pairing(env: &Env, provider_id: u64, subscriber_id: u64) -> bool {
    let was_live = indexed_set::remove_by_key(env, IndexSide::Providers, provider_id, subscriber_id);
    indexed_set::remove_by_key(env, IndexSide::Subscribers, subscriber_id, provider_id);
    if was_live {
        env.storage()
            .instance()
            .remove(&DataKey::LastSettled(provider_id, subscriber_id));
    }
    was_live
}

pub fn is_paired(env: &Env, provider_id: u64, subscriber_id: u64) -> bool {
    indexed_set::contains(env, IndexSide::Providers, provider_id, subscriber_id)
}

/// Subscriber ids currently paired with a provider (snapshot, order not meaningful).
pub fn subscribers_of(env: &Env, provider_id: u64) -> Vec<u64> {
    indexed_set::members(env, IndexSide::Providers, provider_id)
}

/// Provider ids currently paired with a subscriber (snapshot, order not meaningful).
pub fn providers_of(env: &Env, subscriber_id: u64) -> Vec<u64> {
    indexed_set::members(env, IndexSide::Subscribers, subscriber_id)
}

/// Accrual clock for a live pairing.
pub fn last_settled(env: &Env, provider_id: u64, subscriber_id: u64) -> Result<u64, Error> {
    env.storage()
        .instance()
        .get(&DataKey::LastSettled(provider_id, subscriber_id))
        .ok_or(Error::NotRegistered)
}

pub fn set_last_settled(env: &Env, provider_id: u64, subscriber_id: u64, at: u64) {
    env.storage()
        .instance()
        .set(&DataKey::LastSettled(provider_id, subscriber_id), &at);
}
