#![no_std]

pub mod accumulator;
pub mod custody;
pub mod emission;
pub mod events;
pub mod pool;
pub mod position;

use common::admin_tiers::{self, AdminTier};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

pub use pool::Pool;
pub use position::StakePosition;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InsufficientBalance = 5,
    InvalidPool = 6,
    InsufficientStake = 7,
    InsufficientAllowance = 8,
    ArithmeticOverflow = 9,
    InvalidRate = 10,
    TokensIdentical = 11,
    PoolAlreadyExists = 12,
    BelowMinimumStake = 13,
    InsufficientRewardReserve = 14,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Multi-pool yield farm.
///
/// A single emission rate is split across pools by allocation weight and,
/// inside each pool, across depositors pro rata to stake. Accrual is lazy:
/// each pool keeps a reward-per-share accumulator that is brought forward to
/// the ledger time whenever the pool is touched.
#[contract]
pub struct YieldFarmContract;

#[contractimpl]
impl YieldFarmContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `reward_token` – SAC address of the token paid out as rewards.
    /// * `reward_rate`  – reward tokens emitted **per second** across all pools.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        reward_rate: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        emission::bootstrap(&env, reward_rate)?;

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        custody::set_reward_token(&env, &reward_token);

        admin_tiers::set_super_admin(&env, &admin);
        admin_tiers::track_admin(&env, &admin);

        events::publish_initialized(&env, admin, reward_token, reward_rate);

        Ok(())
    }

    /// Top up the reward reserve. Anyone may fund.
    pub fn fund_rewards(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        funder.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        custody::fund_reserve(&env, &funder, amount)?;

        let reserve = custody::reward_reserve(&env)?;
        events::publish_rewards_funded(&env, funder, amount, reserve);

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Register a pool for `stake_asset` and return its id.
    ///
    /// Existing pools are resynced before the new weight joins the total, so
    /// the new pool only dilutes emission from this instant on.
    ///
    /// Requires at least `PoolManager` tier.
    pub fn create_pool(
        env: Env,
        caller: Address,
        stake_asset: Address,
        allocation_weight: u64,
        min_stake: i128,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::PoolManager)?;

        if min_stake < 0 {
            return Err(ContractError::InvalidInput);
        }
        if stake_asset == custody::reward_token(&env)? {
            return Err(ContractError::TokensIdentical);
        }
        if pool::find_by_asset(&env, &stake_asset).is_some() {
            return Err(ContractError::PoolAlreadyExists);
        }

        if allocation_weight > 0 {
            accumulator::resync_all(&env)?;
        }
        let created = pool::register(&env, &stake_asset, allocation_weight, min_stake)?;

        events::publish_pool_created(
            &env,
            created.id,
            stake_asset,
            allocation_weight,
            min_stake,
            pool::total_weight(&env),
        );

        Ok(created.id)
    }

    /// Change a pool's allocation weight. Zero deprecates the pool.
    ///
    /// The target pool is always resynced under the old weights. With
    /// `resync_all` every other pool is too; without it, other pools price
    /// their idle interval with the new total on their next touch.
    ///
    /// Requires at least `PoolManager` tier.
    pub fn set_allocation_weight(
        env: Env,
        caller: Address,
        pool_id: u32,
        allocation_weight: u64,
        resync_all: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::PoolManager)?;

        pool::load(&env, pool_id)?;

        if resync_all {
            accumulator::resync_all(&env)?;
        }
        let mut target = accumulator::resync(&env, pool_id)?;

        let old_weight = target.allocation_weight;
        pool::reweight(&env, &mut target, allocation_weight)?;

        events::publish_allocation_weight_set(
            &env,
            pool_id,
            old_weight,
            allocation_weight,
            pool::total_weight(&env),
            target.is_deprecated(),
        );

        Ok(())
    }

    /// Change the minimum position a deposit may leave behind.
    ///
    /// Requires at least `PoolManager` tier.
    pub fn set_min_stake(
        env: Env,
        caller: Address,
        pool_id: u32,
        min_stake: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::PoolManager)?;

        if min_stake < 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut target = pool::load(&env, pool_id)?;
        target.min_stake = min_stake;
        pool::save(&env, &target);

        events::publish_min_stake_set(&env, pool_id, min_stake);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool's stake asset and return the reward
    /// harvested on the way.
    ///
    /// The owner must have approved this contract for `amount`. A zero
    /// amount is a pure harvest.
    pub fn deposit(
        env: Env,
        pool_id: u32,
        owner: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        // 1. Bring the pool forward and settle what the position has earned.
        let mut target = accumulator::preview(&env, pool_id)?;
        let mut stake = position::load(&env, pool_id, &owner);
        let harvested = stake.pending(target.acc_reward_per_share)?;

        // 2. Apply the deposit in memory.
        stake.amount = stake
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if amount > 0 && stake.amount < target.min_stake {
            return Err(ContractError::BelowMinimumStake);
        }
        target.total_staked = target
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        stake.settle(target.acc_reward_per_share)?;

        // 3. Every external precondition is checked before the first write.
        custody::ensure_reserve(&env, harvested)?;
        custody::ensure_can_pull(&env, &target.stake_asset, &owner, amount)?;

        // 4. Commit, then move tokens.
        pool::save(&env, &target);
        position::save(&env, &stake)?;

        custody::pay_reward(&env, &owner, harvested)?;
        custody::pull_stake(&env, &target.stake_asset, &owner, amount);

        if harvested > 0 {
            events::publish_harvested(&env, pool_id, owner.clone(), harvested);
        }
        if amount > 0 {
            events::publish_deposited(
                &env,
                pool_id,
                owner,
                amount,
                stake.amount,
                target.total_staked,
            );
        }

        Ok(harvested)
    }

    /// Withdraw `amount` of stake and return the reward harvested on the way.
    ///
    /// Works on deprecated pools. A zero amount is a pure harvest.
    pub fn withdraw(
        env: Env,
        pool_id: u32,
        owner: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut target = accumulator::preview(&env, pool_id)?;
        let mut stake = position::load(&env, pool_id, &owner);
        if amount > stake.amount {
            return Err(ContractError::InsufficientStake);
        }
        let harvested = stake.pending(target.acc_reward_per_share)?;

        stake.amount = stake
            .amount
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        target.total_staked = target
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        stake.settle(target.acc_reward_per_share)?;

        custody::ensure_reserve(&env, harvested)?;

        pool::save(&env, &target);
        position::save(&env, &stake)?;

        custody::pay_reward(&env, &owner, harvested)?;
        custody::push_stake(&env, &target.stake_asset, &owner, amount);

        if harvested > 0 {
            events::publish_harvested(&env, pool_id, owner.clone(), harvested);
        }
        if amount > 0 {
            events::publish_withdrawn(
                &env,
                pool_id,
                owner,
                amount,
                stake.amount,
                target.total_staked,
            );
        }

        Ok(harvested)
    }

    /// Claim pending reward without changing the staked amount.
    pub fn harvest(env: Env, pool_id: u32, owner: Address) -> Result<i128, ContractError> {
        Self::deposit(env, pool_id, owner, 0)
    }

    // ── Emission ────────────────────────────────────────────────────────────

    /// Update the reward emission rate.
    ///
    /// Every pool is flushed at the current rate *before* the rate changes,
    /// so no depositor gains or loses reward retroactively.
    ///
    /// Requires at least `EmissionManager` tier.
    pub fn set_reward_rate(env: Env, caller: Address, new_rate: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::EmissionManager)?;

        let old_rate = emission::reward_rate(&env);
        emission::apply_rate(&env, new_rate)?;

        events::publish_reward_rate_set(&env, old_rate, new_rate);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Real-time pending reward for one position, without mutating state.
    pub fn pending_reward(env: Env, pool_id: u32, owner: Address) -> Result<i128, ContractError> {
        let synced = accumulator::preview(&env, pool_id)?;
        position::load(&env, pool_id, &owner).pending(synced.acc_reward_per_share)
    }

    /// Pending reward for `owner` summed over every pool.
    pub fn total_pending_reward(env: Env, owner: Address) -> Result<i128, ContractError> {
        let mut total: i128 = 0;
        for pool_id in 0..pool::count(&env) {
            let synced = accumulator::preview(&env, pool_id)?;
            let owed = position::load(&env, pool_id, &owner).pending(synced.acc_reward_per_share)?;
            total = total
                .checked_add(owed)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        Ok(total)
    }

    /// Pool state brought forward to the current ledger time.
    ///
    /// The resync is hypothetical: nothing is written.
    pub fn get_pool_info(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        accumulator::preview(&env, pool_id)
    }

    /// A depositor's position; zeroed if they never deposited.
    pub fn get_position(
        env: Env,
        pool_id: u32,
        owner: Address,
    ) -> Result<StakePosition, ContractError> {
        pool::load(&env, pool_id)?;
        Ok(position::load(&env, pool_id, &owner))
    }

    /// Owners that opened a position in the pool, in opening order.
    ///
    /// Returns at most `limit` entries (capped at 200) starting at `start`.
    pub fn get_pool_stakers(
        env: Env,
        pool_id: u32,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Address>, ContractError> {
        pool::load(&env, pool_id)?;
        Ok(position::stakers(&env, pool_id, start, limit))
    }

    pub fn get_staker_count(env: Env, pool_id: u32) -> Result<u32, ContractError> {
        pool::load(&env, pool_id)?;
        Ok(position::staker_count(&env, pool_id))
    }

    pub fn pool_count(env: Env) -> u32 {
        pool::count(&env)
    }

    pub fn get_total_allocation_weight(env: Env) -> u64 {
        pool::total_weight(&env)
    }

    /// Return the current global reward rate (tokens per second).
    pub fn get_reward_rate(env: Env) -> i128 {
        emission::reward_rate(&env)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        custody::reward_token(&env)
    }

    /// Reward tokens held by the contract and available for payouts.
    pub fn get_reward_reserve(env: Env) -> Result<i128, ContractError> {
        custody::reward_reserve(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        // The SuperAdmin tier moves with the admin role.
        admin_tiers::remove_admin_tier(&env, &old_admin);
        admin_tiers::untrack_admin(&env, &old_admin);
        admin_tiers::set_super_admin(&env, &new_admin);
        admin_tiers::track_admin(&env, &new_admin);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Promotes or assigns a target address to the specified admin tier.
    ///
    /// Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::promote_admin(&env, &caller, &target, tier) {
            return Err(ContractError::Unauthorized);
        }
        admin_tiers::track_admin(&env, &target);
        Ok(())
    }

    /// Removes the admin tier from the target address entirely.
    ///
    /// Only a `SuperAdmin` may call this.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::demote_admin(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        admin_tiers::untrack_admin(&env, &target);
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::get_admin_tier(&env, &admin)
    }

    /// Every address currently holding an admin tier.
    pub fn list_admins(env: Env) -> Vec<Address> {
        admin_tiers::list_admins(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` does not hold at least `min_tier`.
    /// Falls back to the single-admin check.
    fn require_admin_tier(
        env: &Env,
        caller: &Address,
        min_tier: &AdminTier,
    ) -> Result<(), ContractError> {
        if admin_tiers::require_tier(env, caller, min_tier) {
            return Ok(());
        }
        Self::require_admin(env, caller)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin_tiers;
