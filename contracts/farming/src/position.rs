use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{
    accumulator,
    pool::{TTL_EXTEND_TO, TTL_THRESHOLD},
    ContractError,
};

// Persistent keys: (POS, pool_id, owner), (STAKER, pool_id, index), (STK_CNT, pool_id)
const POSITION: Symbol = symbol_short!("POS");
const STAKER: Symbol = symbol_short!("STAKER");
const STAKER_COUNT: Symbol = symbol_short!("STK_CNT");

/// Largest page `stakers` returns.
pub const MAX_STAKER_PAGE: u32 = 200;

/// One depositor's stake in one pool.
///
/// The record outlives a full withdrawal (`amount == 0`) and is never
/// removed. After every mutation `reward_debt == amount × acc / SCALE` for
/// the pool accumulator at that instant.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub pool_id: u32,
    pub owner: Address,
    pub amount: i128,
    pub reward_debt: i128,
}

impl StakePosition {
    pub fn empty(pool_id: u32, owner: &Address) -> Self {
        Self {
            pool_id,
            owner: owner.clone(),
            amount: 0,
            reward_debt: 0,
        }
    }

    /// Reward owed at accumulator value `acc`.
    pub fn pending(&self, acc: i128) -> Result<i128, ContractError> {
        accumulator::pending(self.amount, acc, self.reward_debt)
    }

    /// Re-anchor the debt to `acc` after `amount` changed or rewards were paid.
    pub fn settle(&mut self, acc: i128) -> Result<(), ContractError> {
        self.reward_debt = accumulator::accrued_reward(self.amount, acc)?;
        Ok(())
    }
}

fn position_key(pool_id: u32, owner: &Address) -> (Symbol, u32, Address) {
    (POSITION, pool_id, owner.clone())
}

fn staker_key(pool_id: u32, index: u32) -> (Symbol, u32, u32) {
    (STAKER, pool_id, index)
}

fn staker_count_key(pool_id: u32) -> (Symbol, u32) {
    (STAKER_COUNT, pool_id)
}

/// Load the position, or an empty one if `owner` never deposited.
pub fn load(env: &Env, pool_id: u32, owner: &Address) -> StakePosition {
    env.storage()
        .persistent()
        .get(&position_key(pool_id, owner))
        .unwrap_or_else(|| StakePosition::empty(pool_id, owner))
}

/// Persist the position. The first save for an owner also appends them to
/// the pool's staker index.
///
/// A position that was never opened and still holds nothing is not written,
/// so zero-amount calls from strangers leave no storage behind.
pub fn save(env: &Env, position: &StakePosition) -> Result<(), ContractError> {
    let key = position_key(position.pool_id, &position.owner);
    if !env.storage().persistent().has(&key) {
        if position.amount == 0 {
            return Ok(());
        }
        track_staker(env, position.pool_id, &position.owner)?;
    }
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(())
}

/// Number of owners that ever opened a position in `pool_id`.
pub fn staker_count(env: &Env, pool_id: u32) -> u32 {
    env.storage()
        .persistent()
        .get(&staker_count_key(pool_id))
        .unwrap_or(0)
}

/// Owners in opening order, `limit` entries from `start`.
///
/// Pages are capped at [`MAX_STAKER_PAGE`]; a `start` past the end yields an
/// empty page.
pub fn stakers(env: &Env, pool_id: u32, start: u32, limit: u32) -> Vec<Address> {
    let end = start
        .saturating_add(limit.min(MAX_STAKER_PAGE))
        .min(staker_count(env, pool_id));

    let mut page = Vec::new(env);
    for index in start..end {
        if let Some(owner) = env.storage().persistent().get(&staker_key(pool_id, index)) {
            page.push_back(owner);
        }
    }
    page
}

fn track_staker(env: &Env, pool_id: u32, owner: &Address) -> Result<(), ContractError> {
    let index = staker_count(env, pool_id);
    let next = index.checked_add(1).ok_or(ContractError::ArithmeticOverflow)?;

    let entry = staker_key(pool_id, index);
    env.storage().persistent().set(&entry, owner);
    env.storage()
        .persistent()
        .extend_ttl(&entry, TTL_THRESHOLD, TTL_EXTEND_TO);

    let count = staker_count_key(pool_id);
    env.storage().persistent().set(&count, &next);
    env.storage()
        .persistent()
        .extend_ttl(&count, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(())
}
