use soroban_sdk::Env;

use crate::{emission, pool, pool::Pool, ContractError};

/// Fixed-point scaling factor for `acc_reward_per_share`.
///
/// Accumulator values are stored multiplied by this constant so that
/// per-unit rewards far below one token survive integer division. With
/// 10^12 and 7-decimal Stellar assets, amounts up to ~10^20 stay inside
/// `i128` when multiplied by a realistic accumulator.
pub const SCALE: i128 = 1_000_000_000_000;

// ── Pure math ───────────────────────────────────────────────────────────────

/// Share of the global emission owed to one pool over `elapsed` seconds.
///
/// ```text
/// emitted = elapsed × reward_rate × weight / total_weight
/// ```
///
/// A zero `total_weight` (every pool deprecated) emits nothing.
pub fn pool_emission(
    elapsed: u64,
    reward_rate: i128,
    weight: u64,
    total_weight: u64,
) -> Result<i128, ContractError> {
    if total_weight == 0 || weight == 0 {
        return Ok(0);
    }

    i128::from(elapsed)
        .checked_mul(reward_rate)
        .and_then(|v| v.checked_mul(i128::from(weight)))
        .and_then(|v| v.checked_div(i128::from(total_weight)))
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Fold `emitted` reward into an accumulator shared by `total_staked` units.
///
/// ```text
/// acc' = acc + emitted × SCALE / total_staked
/// ```
pub fn accrue(acc: i128, emitted: i128, total_staked: i128) -> Result<i128, ContractError> {
    if total_staked <= 0 {
        return Ok(acc);
    }

    let delta = emitted
        .checked_mul(SCALE)
        .and_then(|v| v.checked_div(total_staked))
        .ok_or(ContractError::ArithmeticOverflow)?;

    acc.checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Reward attributable to `amount` units at accumulator value `acc`.
///
/// Rounds down, which is what keeps total payouts at or below the emission.
pub fn accrued_reward(amount: i128, acc: i128) -> Result<i128, ContractError> {
    amount
        .checked_mul(acc)
        .map(|v| v / SCALE)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Reward earned since the position's debt was last set.
///
/// ```text
/// pending = amount × acc / SCALE − reward_debt
/// ```
///
/// Clamped at zero: the debt was computed with the same rounding from an
/// accumulator that never decreases, so a negative value can only come
/// from rounding and must not be treated as owed.
pub fn pending(amount: i128, acc: i128, reward_debt: i128) -> Result<i128, ContractError> {
    let accrued = accrued_reward(amount, acc)?;
    let owed = accrued
        .checked_sub(reward_debt)
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(owed.max(0))
}

/// Bring `pool` forward to `now` and return the updated copy.
///
/// Nothing is written; callers decide whether to commit. Empty pools only
/// advance `last_sync_time`, so emission over an idle interval is never
/// banked. A clock reading behind `last_sync_time` leaves the pool as is.
pub fn advance(
    pool: &Pool,
    now: u64,
    reward_rate: i128,
    total_weight: u64,
) -> Result<Pool, ContractError> {
    let mut next = pool.clone();
    if now <= pool.last_sync_time {
        return Ok(next);
    }

    if pool.total_staked > 0 {
        let elapsed = now - pool.last_sync_time;
        let emitted =
            pool_emission(elapsed, reward_rate, pool.allocation_weight, total_weight)?;
        next.acc_reward_per_share = accrue(pool.acc_reward_per_share, emitted, pool.total_staked)?;
    }

    next.last_sync_time = now;
    Ok(next)
}

// ── Ledger-backed resynchronization ─────────────────────────────────────────

/// Hypothetical resync of `pool_id` against the current ledger time.
///
/// Read-only: used by queries and by mutating operations that want to run
/// every check before the first storage write.
pub fn preview(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    let current = pool::load(env, pool_id)?;
    advance(
        &current,
        env.ledger().timestamp(),
        emission::reward_rate(env),
        pool::total_weight(env),
    )
}

/// Resync `pool_id` and commit the result.
pub fn resync(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    let synced = preview(env, pool_id)?;
    pool::save(env, &synced);
    Ok(synced)
}

/// Mass resync: bank every pool's accrual under the current rate and weights.
///
/// Must run before anything that changes relative shares (total weight,
/// global rate), otherwise elapsed intervals would be re-priced.
pub fn resync_all(env: &Env) -> Result<(), ContractError> {
    for pool_id in 0..pool::count(env) {
        resync(env, pool_id)?;
    }
    Ok(())
}
