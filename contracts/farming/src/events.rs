#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub reward_rate: i128,
    pub timestamp: u64,
}

/// Fired when a new pool is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool_id: u32,
    pub stake_asset: Address,
    pub allocation_weight: u64,
    pub min_stake: i128,
    pub total_allocation_weight: u64,
    pub timestamp: u64,
}

/// Fired when a pool's allocation weight changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationWeightSetEvent {
    pub pool_id: u32,
    pub old_weight: u64,
    pub new_weight: u64,
    pub total_allocation_weight: u64,
    pub deprecated: bool,
    pub timestamp: u64,
}

/// Fired when a pool's minimum stake changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinStakeSetEvent {
    pub pool_id: u32,
    pub min_stake: i128,
    pub timestamp: u64,
}

/// Fired when a depositor adds stake (or deposits zero to harvest).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub pool_id: u32,
    pub owner: Address,
    pub amount: i128,
    pub position_amount: i128,
    pub pool_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a depositor takes stake back out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub pool_id: u32,
    pub owner: Address,
    pub amount: i128,
    pub position_amount: i128,
    pub pool_total_staked: i128,
    pub timestamp: u64,
}

/// Fired whenever pending reward is paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestedEvent {
    pub pool_id: u32,
    pub owner: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the admin changes the emission rate.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub old_rate: i128,
    pub new_rate: i128,
    pub timestamp: u64,
}

/// Fired when reward tokens are added to the reserve.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub new_reserve: i128,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, reward_token: Address, reward_rate: i128) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            reward_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_created(
    env: &Env,
    pool_id: u32,
    stake_asset: Address,
    allocation_weight: u64,
    min_stake: i128,
    total_allocation_weight: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_NEW"), pool_id),
        PoolCreatedEvent {
            pool_id,
            stake_asset,
            allocation_weight,
            min_stake,
            total_allocation_weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_allocation_weight_set(
    env: &Env,
    pool_id: u32,
    old_weight: u64,
    new_weight: u64,
    total_allocation_weight: u64,
    deprecated: bool,
) {
    env.events().publish(
        (symbol_short!("POOL_WGT"), pool_id),
        AllocationWeightSetEvent {
            pool_id,
            old_weight,
            new_weight,
            total_allocation_weight,
            deprecated,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_min_stake_set(env: &Env, pool_id: u32, min_stake: i128) {
    env.events().publish(
        (symbol_short!("POOL_MIN"), pool_id),
        MinStakeSetEvent {
            pool_id,
            min_stake,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    pool_id: u32,
    owner: Address,
    amount: i128,
    position_amount: i128,
    pool_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), pool_id, owner.clone()),
        DepositedEvent {
            pool_id,
            owner,
            amount,
            position_amount,
            pool_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    pool_id: u32,
    owner: Address,
    amount: i128,
    position_amount: i128,
    pool_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), pool_id, owner.clone()),
        WithdrawnEvent {
            pool_id,
            owner,
            amount,
            position_amount,
            pool_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_harvested(env: &Env, pool_id: u32, owner: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("HARVEST"), pool_id, owner.clone()),
        HarvestedEvent {
            pool_id,
            owner,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_rate_set(env: &Env, old_rate: i128, new_rate: i128) {
    env.events().publish(
        (symbol_short!("RWD_RATE"),),
        RewardRateSetEvent {
            old_rate,
            new_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_funded(env: &Env, funder: Address, amount: i128, new_reserve: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        RewardsFundedEvent {
            funder,
            amount,
            new_reserve,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
