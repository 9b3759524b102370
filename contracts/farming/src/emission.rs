use soroban_sdk::{symbol_short, Env, Symbol};

use crate::{accumulator, ContractError};

const REWARD_RATE: Symbol = symbol_short!("RWD_RATE");

/// Reward tokens emitted per second across every pool.
pub fn reward_rate(env: &Env) -> i128 {
    env.storage().instance().get(&REWARD_RATE).unwrap_or(0)
}

/// Store the initial rate. No pools exist yet, so nothing needs banking.
pub fn bootstrap(env: &Env, rate: i128) -> Result<(), ContractError> {
    if rate < 0 {
        return Err(ContractError::InvalidRate);
    }
    env.storage().instance().set(&REWARD_RATE, &rate);
    Ok(())
}

/// Change the emission rate.
///
/// Every pool is resynced under the old rate first so reward already due is
/// banked before the new rate applies to any interval.
pub fn apply_rate(env: &Env, new_rate: i128) -> Result<(), ContractError> {
    if new_rate < 0 {
        return Err(ContractError::InvalidRate);
    }

    accumulator::resync_all(env)?;
    env.storage().instance().set(&REWARD_RATE, &new_rate);
    Ok(())
}
