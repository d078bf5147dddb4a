//! Admin and config: init, min_fee, batch provider state updates.
//!
//! **PRs that only change admin or batch behavior should edit this file only.**

use crate::queries::get_provider;
use crate::state_machine::validate_provider_transition;
use crate::types::{DataKey, Error, ProviderStateChangedEvent, ProviderStatus};
use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

pub fn do_init(env: &Env, token: Address, admin: Address, min_fee: i128) -> Result<(), Error> {
    env.storage()
        .instance()
        .set(&Symbol::new(env, "token"), &token);
    env.storage()
        .instance()
        .set(&Symbol::new(env, "admin"), &admin);
    env.storage()
        .instance()
        .set(&Symbol::new(env, "min_fee"), &min_fee);
    Ok(())
}

pub fn require_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&Symbol::new(env, "admin"))
        .ok_or(Error::PermissionDenied)
}

pub fn do_set_min_fee(env: &Env, admin: Address, min_fee: i128) -> Result<(), Error> {
    admin.require_auth();
    let stored = require_admin(env)?;
    if admin != stored {
        return Err(Error::PermissionDenied);
    }
    env.storage()
        .instance()
        .set(&Symbol::new(env, "min_fee"), &min_fee);
    Ok(())
}

pub fn get_min_fee(env: &Env) -> Result<i128, Error> {
    env.storage()
        .instance()
        .get(&Symbol::new(env, "min_fee"))
        .ok_or(Error::NotRegistered)
}

pub fn get_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&Symbol::new(env, "token"))
        .ok_or(Error::NotRegistered)
}

/// Toggles the Active/Inactive state of a batch of providers. Admin only.
///
/// All-or-nothing: any invalid id aborts the whole batch, and the abort
/// reverts every toggle already applied. Removed providers are reported as
/// `NotRegistered` (removal is logical destruction, the id no longer names a
/// live provider).
pub fn do_update_providers_state(
    env: &Env,
    admin: Address,
    provider_ids: &Vec<u64>,
    states: &Vec<bool>,
) -> Result<(), Error> {
    admin.require_auth();
    let stored = require_admin(env)?;
    if admin != stored {
        return Err(Error::PermissionDenied);
    }

    if provider_ids.len() != states.len() {
        return Err(Error::ParamMismatch);
    }

    for (i, provider_id) in provider_ids.iter().enumerate() {
        let mut provider = get_provider(env, provider_id)?;
        if provider.status == ProviderStatus::Removed {
            return Err(Error::NotRegistered);
        }

        let active = states.get(i as u32).ok_or(Error::ParamMismatch)?;
        let target = if active {
            ProviderStatus::Active
        } else {
            ProviderStatus::Inactive
        };
        validate_provider_transition(&provider.status, &target)?;
        provider.status = target;
        env.storage()
            .instance()
            .set(&DataKey::Provider(provider_id), &provider);

        env.events().publish(
            (symbol_short!("p_state"), provider_id),
            ProviderStateChangedEvent {
                provider_id,
                active,
            },
        );
    }

    Ok(())
}
