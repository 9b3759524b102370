use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOT_WGT");

// Persistent per-pool keys: (prefix, pool_id) and (prefix, stake_asset)
const POOL: Symbol = symbol_short!("POOL");
const POOL_BY_ASSET: Symbol = symbol_short!("POOL_AST");

pub(crate) const TTL_THRESHOLD: u32 = 518_400;
pub(crate) const TTL_EXTEND_TO: u32 = 3_110_400;

/// A reward-bearing bucket for one stake asset.
///
/// Pools are never deleted. Setting `allocation_weight` to zero deprecates a
/// pool: it stops receiving new emission but positions stay withdrawable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub stake_asset: Address,
    pub allocation_weight: u64,
    pub total_staked: i128,
    /// Cumulative reward per staked unit since creation, scaled by
    /// [`crate::accumulator::SCALE`]. Never decreases.
    pub acc_reward_per_share: i128,
    pub last_sync_time: u64,
    /// Smallest non-zero position a deposit may leave behind.
    pub min_stake: i128,
}

impl Pool {
    pub fn is_deprecated(&self) -> bool {
        self.allocation_weight == 0
    }
}

fn pool_key(pool_id: u32) -> (Symbol, u32) {
    (POOL, pool_id)
}

fn asset_key(stake_asset: &Address) -> (Symbol, Address) {
    (POOL_BY_ASSET, stake_asset.clone())
}

/// Number of pools ever created. Pool ids are `0..count`.
pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

/// Sum of `allocation_weight` over every pool.
pub fn total_weight(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
}

pub fn load(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    env.storage()
        .persistent()
        .get(&pool_key(pool_id))
        .ok_or(ContractError::InvalidPool)
}

pub fn save(env: &Env, pool: &Pool) {
    let key = pool_key(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Id of the pool staking `stake_asset`, if one exists.
pub fn find_by_asset(env: &Env, stake_asset: &Address) -> Option<u32> {
    env.storage().persistent().get(&asset_key(stake_asset))
}

/// Allocate a new pool and add its weight to the global total.
///
/// Callers must reject a `stake_asset` that already has a pool, and must
/// mass-resync first when `allocation_weight > 0`, since the new total
/// dilutes every other pool from this instant on.
pub fn register(
    env: &Env,
    stake_asset: &Address,
    allocation_weight: u64,
    min_stake: i128,
) -> Result<Pool, ContractError> {
    let id = count(env);
    let next_count = id.checked_add(1).ok_or(ContractError::ArithmeticOverflow)?;
    let new_total = total_weight(env)
        .checked_add(allocation_weight)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let pool = Pool {
        id,
        stake_asset: stake_asset.clone(),
        allocation_weight,
        total_staked: 0,
        acc_reward_per_share: 0,
        last_sync_time: env.ledger().timestamp(),
        min_stake,
    };

    save(env, &pool);
    let key = asset_key(stake_asset);
    env.storage().persistent().set(&key, &id);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    env.storage().instance().set(&POOL_COUNT, &next_count);
    env.storage().instance().set(&TOTAL_WEIGHT, &new_total);

    Ok(pool)
}

/// Replace a pool's weight, keeping the global total consistent.
///
/// `pool` must already be resynced to the current time.
pub fn reweight(env: &Env, pool: &mut Pool, allocation_weight: u64) -> Result<(), ContractError> {
    let new_total = total_weight(env)
        .checked_sub(pool.allocation_weight)
        .and_then(|w| w.checked_add(allocation_weight))
        .ok_or(ContractError::ArithmeticOverflow)?;

    pool.allocation_weight = allocation_weight;
    save(env, pool);
    env.storage().instance().set(&TOTAL_WEIGHT, &new_total);
    Ok(())
}
