//! Read-only entrypoints and helpers.
//!
//! **PRs that only add or change read-only/query behavior should edit this file only.**

use crate::accrual;
use crate::pairing;
use crate::safe_math::safe_add;
use crate::types::{DataKey, Error, Provider, Subscriber};
use soroban_sdk::{Env, Vec};

pub fn get_provider(env: &Env, provider_id: u64) -> Result<Provider, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Provider(provider_id))
        .ok_or(Error::NotRegistered)
}

pub fn get_subscriber(env: &Env, subscriber_id: u64) -> Result<Subscriber, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Subscriber(subscriber_id))
        .ok_or(Error::NotRegistered)
}

/// Subscriber ids currently paired with a provider. Order is not meaningful.
pub fn get_provider_subscribers(env: &Env, provider_id: u64) -> Vec<u64> {
    pairing::subscribers_of(env, provider_id)
}

/// Provider ids currently paired with a subscriber. Order is not meaningful.
pub fn get_subscriber_providers(env: &Env, subscriber_id: u64) -> Vec<u64> {
    pairing::providers_of(env, subscriber_id)
}

/// Everything the provider would hold after a settlement sweep right now:
/// unwithdrawn balance plus the accrued-but-unsettled fee of every live
/// pairing (each capped at that subscriber's remaining balance). Read-only.
pub fn get_provider_earning(env: &Env, provider_id: u64) -> Result<i128, Error> {
    let provider = get_provider(env, provider_id)?;

    let mut total = provider.balance;
    for subscriber_id in pairing::subscribers_of(env, provider_id).iter() {
        let pending = accrual::peek(env, provider_id, subscriber_id)?;
        total = safe_add(total, pending)?;
    }
    Ok(total)
}

/// Signed remaining value of a subscriber's deposit: prepaid balance minus
/// the accrued-but-unsettled fees of all live pairings.
///
/// Each pairing's pending fee is capped at the current balance, but the sum
/// across pairings is not, so the result goes negative once the subscriber is
/// in deficit and due for exhaustion at the next settlement. Read-only.
pub fn get_subscriber_remaining(env: &Env, subscriber_id: u64) -> Result<i128, Error> {
    let subscriber = get_subscriber(env, subscriber_id)?;

    let mut remaining = subscriber.balance;
    for provider_id in pairing::providers_of(env, subscriber_id).iter() {
        let pending = accrual::peek(env, provider_id, subscriber_id)?;
        remaining = remaining.checked_sub(pending).ok_or(Error::Underflow)?;
    }
    Ok(remaining)
}
