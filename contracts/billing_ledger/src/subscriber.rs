//! Subscriber lifecycle: register, deposit, pause.
//!
//! **PRs that only change subscriber behavior should edit this file only.**

use crate::accrual;
use crate::admin::get_token;
use crate::pairing;
use crate::queries::{get_provider, get_subscriber};
use crate::safe_math::{safe_add, safe_add_balance, safe_mul, validate_non_negative};
use crate::types::{
    DataKey, Error, FundsDepositedEvent, PairingCancelledEvent, ProviderStatus, Subscriber,
    SubscriberRegisteredEvent, SubscriptionPausedEvent,
};
use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

/// A new subscriber must pair with at least this many providers.
pub const MIN_PROVIDERS: u32 = 3;
/// And at most this many.
pub const MAX_PROVIDERS: u32 = 14;
/// The initial deposit must cover this many periods of every chosen provider's fee.
pub const MIN_DEPOSIT_PERIODS: i128 = 8;

pub fn next_subscriber_id(env: &Env) -> u64 {
    let key = Symbol::new(env, "next_sub");
    let id: u64 = env.storage().instance().get(&key).unwrap_or(0);
    env.storage().instance().set(&key, &(id + 1));
    id
}

/// Registers a subscriber against a list of providers, pulling the prepaid
/// deposit from the owner.
///
/// The deposit must cover `MIN_DEPOSIT_PERIODS` periods of every chosen
/// provider's fee; each chosen provider must be live and Active, and may
/// appear in the list at most once. Every pairing's accrual clock starts now.
pub fn do_register_subscriber(
    env: &Env,
    owner: Address,
    deposit: i128,
    plan: String,
    provider_ids: &Vec<u64>,
) -> Result<u64, Error> {
    owner.require_auth();

    let count = provider_ids.len();
    if !(MIN_PROVIDERS..=MAX_PROVIDERS).contains(&count) {
        return Err(Error::InvalidParam);
    }
    validate_non_negative(deposit)?;

    let mut total_required: i128 = 0;
    for (i, provider_id) in provider_ids.iter().enumerate() {
        // Duplicate subscribe to the same provider within one registration
        for j in 0..i as u32 {
            if provider_ids.get(j) == Some(provider_id) {
                return Err(Error::AlreadyPaired);
            }
        }

        let provider = get_provider(env, provider_id)?;
        match provider.status {
            ProviderStatus::Removed => return Err(Error::ProviderRemoved),
            ProviderStatus::Inactive => return Err(Error::ProviderInactive),
            ProviderStatus::Active => {}
        }
        total_required = safe_add(total_required, safe_mul(provider.fee, MIN_DEPOSIT_PERIODS)?)?;
    }

    if deposit < total_required {
        return Err(Error::DepositTooSmall);
    }

    let subscriber = Subscriber {
        owner: owner.clone(),
        balance: deposit,
        plan,
        paused: false,
    };
    let subscriber_id = next_subscriber_id(env);
    env.storage()
        .instance()
        .set(&DataKey::Subscriber(subscriber_id), &subscriber);

    let now = env.ledger().timestamp();
    for provider_id in provider_ids.iter() {
        pairing::add_pairing(env, provider_id, subscriber_id, now)?;
        let mut provider = get_provider(env, provider_id)?;
        provider.subscriber_count += 1;
        env.storage()
            .instance()
            .set(&DataKey::Provider(provider_id), &provider);
    }

    if deposit > 0 {
        let token_addr = get_token(env)?;
        let token_client = soroban_sdk::token::Client::new(env, &token_addr);
        token_client.transfer(&owner, &env.current_contract_address(), &deposit);
    }

    env.events().publish(
        (symbol_short!("s_reg"), subscriber_id),
        SubscriberRegisteredEvent {
            subscriber_id,
            owner,
            deposit,
            provider_count: count,
        },
    );

    Ok(subscriber_id)
}

/// Tops up a subscriber's prepaid balance, pulling `amount` from the owner.
pub fn do_deposit(
    env: &Env,
    subscriber_id: u64,
    caller: Address,
    amount: i128,
) -> Result<(), Error> {
    caller.require_auth();

    let mut subscriber = get_subscriber(env, subscriber_id)?;
    if caller != subscriber.owner {
        return Err(Error::PermissionDenied);
    }
    if subscriber.paused {
        return Err(Error::SubscriptionPaused);
    }

    subscriber.balance = safe_add_balance(subscriber.balance, amount)?;
    env.storage()
        .instance()
        .set(&DataKey::Subscriber(subscriber_id), &subscriber);

    if amount > 0 {
        let token_addr = get_token(env)?;
        let token_client = soroban_sdk::token::Client::new(env, &token_addr);
        token_client.transfer(&caller, &env.current_contract_address(), &amount);
    }

    env.events().publish(
        (symbol_short!("deposited"), subscriber_id),
        FundsDepositedEvent {
            subscriber_id,
            owner: subscriber.owner.clone(),
            amount,
            new_balance: subscriber.balance,
        },
    );

    Ok(())
}

/// Pauses a subscription: settles and cancels every live pairing, then marks
/// the subscriber paused. Terminal; the remaining balance stays on the record
/// and is not refunded.
///
/// Pairings whose provider was removed are cancelled without settlement
/// (lazy cleanup of provider removal). Pausing an already-paused subscription
/// is a no-op.
pub fn do_pause_subscription(env: &Env, subscriber_id: u64, caller: Address) -> Result<(), Error> {
    caller.require_auth();

    let subscriber = get_subscriber(env, subscriber_id)?;
    if caller != subscriber.owner {
        return Err(Error::PermissionDenied);
    }
    if subscriber.paused {
        return Ok(());
    }

    // Snapshot: remove_pairing relocates entries inside the live list.
    let providers = pairing::providers_of(env, subscriber_id);
    for provider_id in providers.iter() {
        let mut provider = get_provider(env, provider_id)?;

        let earned = if provider.status == ProviderStatus::Removed {
            0
        } else {
            let settlement = accrual::settle(env, provider_id, subscriber_id)?;
            provider.balance = safe_add(provider.balance, settlement.earned)?;
            settlement.earned
        };

        pairing::remove_pairing(env, provider_id, subscriber_id);
        provider.subscriber_count = provider.subscriber_count.saturating_sub(1);
        env.storage()
            .instance()
            .set(&DataKey::Provider(provider_id), &provider);

        env.events().publish(
            (symbol_short!("p_cancel"), provider_id, subscriber_id),
            PairingCancelledEvent {
                provider_id,
                subscriber_id,
                earned,
            },
        );
    }

    // Settlement debited the stored record; reload before flagging it paused.
    let mut subscriber = get_subscriber(env, subscriber_id)?;
    subscriber.paused = true;
    env.storage()
        .instance()
        .set(&DataKey::Subscriber(subscriber_id), &subscriber);

    env.events().publish(
        (symbol_short!("s_paused"), subscriber_id),
        SubscriptionPausedEvent {
            subscriber_id,
            owner: subscriber.owner.clone(),
            remaining_balance: subscriber.balance,
        },
    );

    Ok(())
}
