#![no_std]

//! Prepaid subscription billing ledger.
//!
//! Providers offer metered services at a fixed fee per 7-day period;
//! subscribers prepay a deposit that is consumed lazily, whole periods at a
//! time, by the providers they are paired with. The mirrored pairing index
//! gives O(1) pairing insertion and cancellation in both directions.

pub mod accrual;
pub mod admin;
pub mod indexed_set;
pub mod pairing;
pub mod provider;
pub mod queries;
pub mod safe_math;
pub mod state_machine;
pub mod subscriber;
pub mod types;

pub use accrual::PERIOD_SECONDS;
pub use state_machine::{can_transition, get_allowed_transitions, validate_provider_transition};
pub use subscriber::{MAX_PROVIDERS, MIN_DEPOSIT_PERIODS, MIN_PROVIDERS};
pub use types::{Error, IndexSide, Provider, ProviderStatus, Subscriber};

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};

#[contract]
pub struct BillingLedger;

#[contractimpl]
impl BillingLedger {
    /// Initialize the ledger: payment token, admin, and minimum per-period fee.
    pub fn init(env: Env, token: Address, admin: Address, min_fee: i128) -> Result<(), Error> {
        admin::do_init(&env, token, admin, min_fee)
    }

    /// Update the minimum per-period fee. Only callable by admin.
    pub fn set_min_fee(env: Env, admin: Address, min_fee: i128) -> Result<(), Error> {
        admin::do_set_min_fee(&env, admin, min_fee)
    }

    pub fn get_min_fee(env: Env) -> Result<i128, Error> {
        admin::get_min_fee(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        admin::require_admin(&env)
    }

    /// Register a provider offering a metered service at `fee` per period.
    ///
    /// `register_key` is a one-shot registration credential: a key that was
    /// ever consumed cannot register a second provider.
    pub fn register_provider(
        env: Env,
        owner: Address,
        register_key: BytesN<32>,
        fee: i128,
    ) -> Result<u64, Error> {
        provider::do_register_provider(&env, owner, register_key, fee)
    }

    /// Remove a provider (owner only, Active only). Refunds unwithdrawn
    /// earnings to the owner; terminal, the id is never reused.
    pub fn remove_provider(env: Env, provider_id: u64, caller: Address) -> Result<(), Error> {
        provider::do_remove_provider(&env, provider_id, caller)
    }

    /// Change a provider's per-period fee (owner only, Active only).
    ///
    /// Settles every current subscriber at the old fee before the new fee
    /// takes effect.
    pub fn update_provider_fee(
        env: Env,
        provider_id: u64,
        caller: Address,
        new_fee: i128,
    ) -> Result<(), Error> {
        provider::do_update_provider_fee(&env, provider_id, caller, new_fee)
    }

    /// Toggle the Active/Inactive state of a batch of providers (admin only,
    /// all-or-nothing).
    pub fn update_providers_state(
        env: Env,
        admin: Address,
        provider_ids: Vec<u64>,
        states: Vec<bool>,
    ) -> Result<(), Error> {
        admin::do_update_providers_state(&env, admin, &provider_ids, &states)
    }

    /// Settle a provider's live pairings and pay the whole earned balance out
    /// to the owner (owner only, Active only).
    pub fn withdraw_provider_earnings(
        env: Env,
        provider_id: u64,
        caller: Address,
    ) -> Result<(), Error> {
        provider::do_withdraw_provider_earnings(&env, provider_id, caller)
    }

    /// Register a subscriber paired with `provider_ids`, pulling `deposit`
    /// from the owner. The deposit must cover [`MIN_DEPOSIT_PERIODS`] periods
    /// of every chosen provider's fee.
    pub fn register_subscriber(
        env: Env,
        owner: Address,
        deposit: i128,
        plan: String,
        provider_ids: Vec<u64>,
    ) -> Result<u64, Error> {
        subscriber::do_register_subscriber(&env, owner, deposit, plan, &provider_ids)
    }

    /// Pause a subscription (owner only): settles and cancels every live
    /// pairing, then marks the subscriber paused. Terminal; the remaining
    /// balance stays on the record.
    pub fn pause_subscription(env: Env, subscriber_id: u64, caller: Address) -> Result<(), Error> {
        subscriber::do_pause_subscription(&env, subscriber_id, caller)
    }

    /// Top up a subscriber's prepaid balance (owner only, not paused).
    pub fn deposit(
        env: Env,
        subscriber_id: u64,
        caller: Address,
        amount: i128,
    ) -> Result<(), Error> {
        subscriber::do_deposit(&env, subscriber_id, caller, amount)
    }

    /// Read a provider record by id.
    pub fn get_provider(env: Env, provider_id: u64) -> Result<Provider, Error> {
        queries::get_provider(&env, provider_id)
    }

    /// Read a subscriber record by id.
    pub fn get_subscriber(env: Env, subscriber_id: u64) -> Result<Subscriber, Error> {
        queries::get_subscriber(&env, subscriber_id)
    }

    /// Subscriber ids currently paired with a provider.
    pub fn get_provider_subscribers(env: Env, provider_id: u64) -> Vec<u64> {
        queries::get_provider_subscribers(&env, provider_id)
    }

    /// Provider ids currently paired with a subscriber.
    pub fn get_subscriber_providers(env: Env, subscriber_id: u64) -> Vec<u64> {
        queries::get_subscriber_providers(&env, subscriber_id)
    }

    /// Unwithdrawn balance plus pending accrued fees of all live pairings.
    pub fn get_provider_earning(env: Env, provider_id: u64) -> Result<i128, Error> {
        queries::get_provider_earning(&env, provider_id)
    }

    /// Signed remaining deposit value: balance minus all pending accrued fees.
    /// Negative means the subscriber is already in deficit.
    pub fn get_subscriber_remaining(env: Env, subscriber_id: u64) -> Result<i128, Error> {
        queries::get_subscriber_remaining(&env, subscriber_id)
    }
}
