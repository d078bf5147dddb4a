//! Ledger types: errors, storage keys, provider/subscriber records and events.
//!
//! Kept in a separate module to reduce merge conflicts when editing accrual
//! or contract entrypoints.

use soroban_sdk::{contracterror, contracttype, Address, BytesN, String};

/// Which direction of the mirrored pairing index a key belongs to.
///
/// `Providers` keys a provider id to its subscriber members;
/// `Subscribers` keys a subscriber id to its provider members.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexSide {
    Providers = 0,
    Subscribers = 1,
}

/// Storage keys for ledger records and secondary indices.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Provider record by id.
    Provider(u64),
    /// Subscriber record by id.
    Subscriber(u64),
    /// Dense member list of one side of the pairing index: owner id -> Vec<u64>.
    Members(IndexSide, u64),
    /// 1-based position of a member within an owner's list; 0/absent = not a member.
    Position(IndexSide, u64, u64),
    /// Accrual clock for a live (provider, subscriber) pairing.
    LastSettled(u64, u64),
    /// Consumed provider registration keys.
    UsedKey(BytesN<32>),
}

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    /// Referenced provider or subscriber id was never registered.
    NotRegistered = 404,
    /// Caller is not the required owner or admin.
    PermissionDenied = 401,
    /// Provider status transition not allowed by the state machine.
    InvalidStateTransition = 400,
    /// Arithmetic overflow in fee or balance computation.
    Overflow = 403,
    /// Fee below the configured minimum.
    FeeTooSmall = 1001,
    /// Registration key was already consumed by an earlier provider.
    KeyAlreadyUsed = 1002,
    /// Operation requires an Active provider.
    ProviderInactive = 1003,
    /// Provider was already removed (terminal).
    AlreadyRemoved = 1004,
    /// Operation targets a removed provider.
    ProviderRemoved = 1005,
    /// Batch id/state lists have different lengths.
    ParamMismatch = 1006,
    /// Malformed parameter (e.g. provider list arity out of range).
    InvalidParam = 1007,
    /// Deposit does not cover the minimum prepaid periods for the chosen providers.
    DepositTooSmall = 1008,
    /// Pairing between this provider and subscriber already exists.
    AlreadyPaired = 1009,
    /// Subscription is paused (terminal) and can no longer be funded or billed.
    SubscriptionPaused = 1010,
    /// Arithmetic underflow (negative amount or balance would go negative).
    Underflow = 1011,
}

/// Lifecycle state of a provider.
///
/// `Active` providers accrue fees and accept new subscribers. Admin can toggle
/// `Active` ⇄ `Inactive`. `Removed` is terminal and reachable only from
/// `Active` (owner-initiated removal).
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProviderStatus {
    Active = 0,
    Inactive = 1,
    Removed = 2,
}

/// A registered service provider billing a fixed fee per period.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Provider {
    pub owner: Address,
    /// Fee per billing period, in token base units. Zeroed on removal.
    pub fee: i128,
    /// Earnings settled but not yet withdrawn.
    pub balance: i128,
    /// Mirrors the length of this provider's subscriber list.
    pub subscriber_count: u32,
    /// Current lifecycle state. Modified only through state machine transitions.
    pub status: ProviderStatus,
}

/// A subscriber prepaying a deposit consumed by its providers.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Subscriber {
    pub owner: Address,
    /// Remaining prepaid balance, in token base units.
    pub balance: i128,
    pub plan: String,
    /// Pausing is terminal; the record is never physically destroyed.
    pub paused: bool,
}

// Event types

#[contracttype]
#[derive(Clone, Debug)]
pub struct ProviderRegisteredEvent {
    pub provider_id: u64,
    pub owner: Address,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ProviderRemovedEvent {
    pub provider_id: u64,
    pub owner: Address,
    pub refund_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ProviderFeeUpdatedEvent {
    pub provider_id: u64,
    pub old_fee: i128,
    pub new_fee: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ProviderStateChangedEvent {
    pub provider_id: u64,
    pub active: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriberRegisteredEvent {
    pub subscriber_id: u64,
    pub owner: Address,
    pub deposit: i128,
    pub provider_count: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FundsDepositedEvent {
    pub subscriber_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub new_balance: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriptionPausedEvent {
    pub subscriber_id: u64,
    pub owner: Address,
    pub remaining_balance: i128,
}

/// Emitted whenever a live pairing is cancelled: subscription pause,
/// exhaustion during settlement, or cleanup after provider removal.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PairingCancelledEvent {
    pub provider_id: u64,
    pub subscriber_id: u64,
    pub earned: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct EarningsWithdrawnEvent {
    pub provider_id: u64,
    pub owner: Address,
    pub amount: i128,
}
