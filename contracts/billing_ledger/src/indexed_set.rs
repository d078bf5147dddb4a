//! Swap-delete membership set backing both sides of the pairing index.
//!
//! Each (side, owner) pair owns a dense `Vec<u64>` of members plus a 1-based
//! position entry per member (0/absent = not a member). Insert appends in
//! O(1); removal overwrites the vacated slot with the last element and shrinks
//! the list, fixing up the moved element's position entry. Member order is
//! therefore not meaningful and callers must not depend on it beyond "current
//! members".

use crate::types::{DataKey, Error, IndexSide};
use soroban_sdk::{Env, Vec};

/// Current members of an owner's set. Empty if the owner has none.
pub fn members(env: &Env, side: IndexSide, owner: u64) -> Vec<u64> {
    env.storage()
        .instance()
        .get(&DataKey::Members(side, owner))
        .unwrap_or(Vec::new(env))
}

/// 1-based position of `member` in the owner's list, or 0 if absent.
pub fn position(env: &Env, side: IndexSide, owner: u64, member: u64) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::Position(side, owner, member))
        .unwrap_or(0)
}

pub fn contains(env: &Env, side: IndexSide, owner: u64, member: u64) -> bool {
    position(env, side, owner, member) != 0
}

pub fn len(env: &Env, side: IndexSide, owner: u64) -> u32 {
    members(env, side, owner).len()
}

/// Appends `member` to the owner's list and records its 1-based position.
///
/// Returns `Error::AlreadyPaired` if the member is already present, which is
/// the duplicate-subscribe guard for both index directions.
pub fn insert(env: &Env, side: IndexSide, owner: u64, member: u64) -> Result<u32, Error> {
    if contains(env, side, owner, member) {
        return Err(Error::AlreadyPaired);
    }
    let mut list = members(env, side, owner);
    list.push_back(member);
    let pos = list.len();
    env.storage()
        .instance()
        .set(&DataKey::Members(side, owner), &list);
    env.storage()
        .instance()
        .set(&DataKey::Position(side, owner, member), &pos);
    Ok(pos)
}

/// Removes `member` from the owner's list via swap-delete.
///
/// Returns `false` without touching storage if the member is absent, so
/// double-removal is a harmless no-op. When the removed slot is not the last,
/// the previously-last element is relocated into it and its position entry is
/// rewritten; callers iterating a list while removing from it must iterate a
/// snapshot taken beforehand.
pub fn remove_by_key(env: &Env, side: IndexSide, owner: u64, member: u64) -> bool {
    let pos = position(env, side, owner, member);
    if pos == 0 {
        return false;
    }

    let mut list = members(env, side, owner);
    let removed_index = pos - 1;
    let last_index = list.len() - 1;

    if removed_index != last_index {
        // Position entries are 1-based, so the moved element keeps `pos`.
        let moved = list.last().unwrap();
        list.set(removed_index, moved);
        env.storage()
            .instance()
            .set(&DataKey::Position(side, owner, moved), &pos);
    }

    list.pop_back();
    env.storage()
        .instance()
        .set(&DataKey::Members(side, owner), &list);
    env.storage()
        .instance()
        .remove(&DataKey::Position(side, owner, member));
    true
}
