//! Time-based fee accrual: converts elapsed whole periods into owed fee and
//! applies it against a subscriber's prepaid balance.
//!
//! **PRs that only change how fees accrue should edit this file only.**
//!
//! Settlement is lazy: nothing runs on a schedule, the entrypoint touching a
//! pairing settles it. Only whole elapsed periods are billed; the sub-period
//! remainder stays on the clock, so no rounding loss accumulates across calls.

use crate::pairing;
use crate::queries::{get_provider, get_subscriber};
use crate::safe_math::{safe_mul, safe_sub_balance};
use crate::types::{DataKey, Error, ProviderStatus};
use soroban_sdk::Env;

/// Billing period length: 7 days.
pub const PERIOD_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Outcome of settling one pairing.
pub struct Settlement {
    /// Amount actually earned by the provider (clamped to the subscriber's balance).
    pub earned: i128,
    /// True if the subscriber's balance could not cover the owed fee. The
    /// caller must cancel the pairing: an exhausted subscription cannot
    /// continue accruing.
    pub exhausted: bool,
}

/// Settles the (provider, subscriber) pairing up to the current ledger time.
///
/// Debits the subscriber and advances the pairing's clock by the number of
/// whole periods billed. The earned amount is returned to the caller, which
/// is responsible for crediting it to the provider and for cancelling the
/// pairing when `exhausted` is reported.
///
/// Accrual against a removed provider is an error; sweeps over a subscriber's
/// pairings cancel such leftovers without settlement instead of calling this.
pub fn settle(env: &Env, provider_id: u64, subscriber_id: u64) -> Result<Settlement, Error> {
    let provider = get_provider(env, provider_id)?;
    if provider.status == ProviderStatus::Removed {
        return Err(Error::ProviderRemoved);
    }

    let last = pairing::last_settled(env, provider_id, subscriber_id)?;
    let now = env.ledger().timestamp();
    let periods = now.saturating_sub(last) / PERIOD_SECONDS;
    if periods == 0 {
        return Ok(Settlement {
            earned: 0,
            exhausted: false,
        });
    }

    let owed = safe_mul(provider.fee, periods as i128)?;
    let settled_to = periods
        .checked_mul(PERIOD_SECONDS)
        .and_then(|span| last.checked_add(span))
        .ok_or(Error::Overflow)?;

    let mut subscriber = get_subscriber(env, subscriber_id)?;
    let (earned, exhausted) = if subscriber.balance < owed {
        let earned = subscriber.balance;
        subscriber.balance = 0;
        (earned, true)
    } else {
        subscriber.balance = safe_sub_balance(subscriber.balance, owed)?;
        (owed, false)
    };

    env.storage()
        .instance()
        .set(&DataKey::Subscriber(subscriber_id), &subscriber);
    pairing::set_last_settled(env, provider_id, subscriber_id, settled_to);

    Ok(Settlement { earned, exhausted })
}

/// Read-only variant of [`settle`]: the fee owed for the pairing right now,
/// capped at the subscriber's current balance. Mutates nothing.
pub fn peek(env: &Env, provider_id: u64, subscriber_id: u64) -> Result<i128, Error> {
    let provider = get_provider(env, provider_id)?;
    if provider.status == ProviderStatus::Removed {
        return Ok(0);
    }

    let last = pairing::last_settled(env, provider_id, subscriber_id)?;
    let now = env.ledger().timestamp();
    let periods = now.saturating_sub(last) / PERIOD_SECONDS;
    if periods == 0 {
        return Ok(0);
    }

    let owed = safe_mul(provider.fee, periods as i128)?;
    let subscriber = get_subscriber(env, subscriber_id)?;
    Ok(owed.min(subscriber.balance))
}
