//! Provider lifecycle: register, remove, fee update, earnings withdrawal.
//!
//! **PRs that only change provider behavior should edit this file only.**

use crate::accrual;
use crate::admin::{get_min_fee, get_token};
use crate::pairing;
use crate::queries::get_provider;
use crate::safe_math::safe_add;
use crate::state_machine::validate_provider_transition;
use crate::types::{
    DataKey, EarningsWithdrawnEvent, Error, PairingCancelledEvent, Provider,
    ProviderFeeUpdatedEvent, ProviderRegisteredEvent, ProviderRemovedEvent, ProviderStatus,
};
use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol, Vec};

pub fn next_provider_id(env: &Env) -> u64 {
    let key = Symbol::new(env, "next_prov");
    let id: u64 = env.storage().instance().get(&key).unwrap_or(0);
    env.storage().instance().set(&key, &(id + 1));
    id
}

pub fn do_register_provider(
    env: &Env,
    owner: Address,
    register_key: BytesN<32>,
    fee: i128,
) -> Result<u64, Error> {
    owner.require_auth();

    let min_fee = get_min_fee(env)?;
    if fee < min_fee {
        return Err(Error::FeeTooSmall);
    }

    let key = DataKey::UsedKey(register_key);
    if env.storage().instance().has(&key) {
        return Err(Error::KeyAlreadyUsed);
    }
    env.storage().instance().set(&key, &true);

    let provider = Provider {
        owner: owner.clone(),
        fee,
        balance: 0,
        subscriber_count: 0,
        status: ProviderStatus::Active,
    };
    let provider_id = next_provider_id(env);
    env.storage()
        .instance()
        .set(&DataKey::Provider(provider_id), &provider);

    env.events().publish(
        (symbol_short!("p_reg"), provider_id),
        ProviderRegisteredEvent {
            provider_id,
            owner,
            fee,
        },
    );

    Ok(provider_id)
}

/// Removes a provider: refunds its unwithdrawn earnings to the owner, zeroes
/// balance and fee, and marks the record Removed (terminal, id never reused).
///
/// Existing pairings are not unlinked here and `subscriber_count` keeps its
/// value; leftovers are cleaned up lazily the next time each subscriber's
/// pairings are swept.
pub fn do_remove_provider(env: &Env, provider_id: u64, caller: Address) -> Result<(), Error> {
    caller.require_auth();

    let mut provider = get_provider(env, provider_id)?;
    if caller != provider.owner {
        return Err(Error::PermissionDenied);
    }
    if provider.status == ProviderStatus::Removed {
        return Err(Error::AlreadyRemoved);
    }
    if provider.status != ProviderStatus::Active {
        return Err(Error::ProviderInactive);
    }
    validate_provider_transition(&provider.status, &ProviderStatus::Removed)?;

    let refund = provider.balance;
    provider.balance = 0;
    provider.fee = 0;
    provider.status = ProviderStatus::Removed;
    env.storage()
        .instance()
        .set(&DataKey::Provider(provider_id), &provider);

    if refund > 0 {
        let token_addr = get_token(env)?;
        let token_client = soroban_sdk::token::Client::new(env, &token_addr);
        token_client.transfer(&env.current_contract_address(), &provider.owner, &refund);
    }

    env.events().publish(
        (symbol_short!("p_removed"), provider_id),
        ProviderRemovedEvent {
            provider_id,
            owner: provider.owner.clone(),
            refund_amount: refund,
        },
    );

    Ok(())
}

/// Settles every live pairing of a provider into its balance, cancelling the
/// pairings that became exhausted.
///
/// Iterates a snapshot of the subscriber list and removes only after the loop
/// completes: swap-delete relocates a third party's index entry on every
/// removal, so removing mid-iteration would skip members.
fn settle_provider_pairings(
    env: &Env,
    provider_id: u64,
    provider: &mut Provider,
) -> Result<(), Error> {
    let subscribers = pairing::subscribers_of(env, provider_id);

    let mut exhausted: Vec<(u64, i128)> = Vec::new(env);
    for subscriber_id in subscribers.iter() {
        let settlement = accrual::settle(env, provider_id, subscriber_id)?;
        provider.balance = safe_add(provider.balance, settlement.earned)?;
        if settlement.exhausted {
            exhausted.push_back((subscriber_id, settlement.earned));
        }
    }

    for (subscriber_id, earned) in exhausted.iter() {
        pairing::remove_pairing(env, provider_id, subscriber_id);
        provider.subscriber_count = provider.subscriber_count.saturating_sub(1);
        env.events().publish(
            (symbol_short!("p_cancel"), provider_id, subscriber_id),
            PairingCancelledEvent {
                provider_id,
                subscriber_id,
                earned,
            },
        );
    }

    Ok(())
}

/// Changes a provider's per-period fee.
///
/// All current subscribers are settled at the old fee first, so nobody is
/// retroactively billed at the new rate for time already elapsed.
pub fn do_update_provider_fee(
    env: &Env,
    provider_id: u64,
    caller: Address,
    new_fee: i128,
) -> Result<(), Error> {
    caller.require_auth();

    let min_fee = get_min_fee(env)?;
    if new_fee < min_fee {
        return Err(Error::FeeTooSmall);
    }

    let mut provider = get_provider(env, provider_id)?;
    if caller != provider.owner {
        return Err(Error::PermissionDenied);
    }
    if provider.status == ProviderStatus::Removed {
        return Err(Error::AlreadyRemoved);
    }
    if provider.status != ProviderStatus::Active {
        return Err(Error::ProviderInactive);
    }

    settle_provider_pairings(env, provider_id, &mut provider)?;

    let old_fee = provider.fee;
    provider.fee = new_fee;
    env.storage()
        .instance()
        .set(&DataKey::Provider(provider_id), &provider);

    env.events().publish(
        (symbol_short!("p_fee"), provider_id),
        ProviderFeeUpdatedEvent {
            provider_id,
            old_fee,
            new_fee,
        },
    );

    Ok(())
}

/// Pays out everything a provider has earned so far: settles all live
/// pairings, then transfers the whole balance to the owner.
pub fn do_withdraw_provider_earnings(
    env: &Env,
    provider_id: u64,
    caller: Address,
) -> Result<(), Error> {
    caller.require_auth();

    let mut provider = get_provider(env, provider_id)?;
    if caller != provider.owner {
        return Err(Error::PermissionDenied);
    }
    if provider.status == ProviderStatus::Removed {
        return Err(Error::ProviderRemoved);
    }
    if provider.status != ProviderStatus::Active {
        return Err(Error::ProviderInactive);
    }

    settle_provider_pairings(env, provider_id, &mut provider)?;

    let payout = provider.balance;
    provider.balance = 0;
    env.storage()
        .instance()
        .set(&DataKey::Provider(provider_id), &provider);

    if payout > 0 {
        let token_addr = get_token(env)?;
        let token_client = soroban_sdk::token::Client::new(env, &token_addr);
        token_client.transfer(&env.current_contract_address(), &provider.owner, &payout);
    }

    env.events().publish(
        (symbol_short!("p_wdraw"), provider_id),
        EarningsWithdrawnEvent {
            provider_id,
            owner: provider.owner.clone(),
            amount: payout,
        },
    );

    Ok(())
}
