//! Token movements between depositors and the contract.
//!
//! Every `ensure_*` check runs before the operation's first storage write so
//! that a failing transfer never leaves bookkeeping half-applied.

use soroban_sdk::{symbol_short, token, Address, Env, Symbol};

use crate::ContractError;

const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");

pub fn set_reward_token(env: &Env, reward_token: &Address) {
    env.storage().instance().set(&REWARD_TOKEN, reward_token);
}

pub fn reward_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&REWARD_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

/// Reward tokens currently held by the contract.
pub fn reward_reserve(env: &Env) -> Result<i128, ContractError> {
    let reward_token = reward_token(env)?;
    Ok(token::Client::new(env, &reward_token).balance(&env.current_contract_address()))
}

/// Check that `from` holds and has approved at least `amount` of `asset`.
pub fn ensure_can_pull(
    env: &Env,
    asset: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let client = token::Client::new(env, asset);
    if client.balance(from) < amount {
        return Err(ContractError::InsufficientBalance);
    }
    if client.allowance(from, &env.current_contract_address()) < amount {
        return Err(ContractError::InsufficientAllowance);
    }
    Ok(())
}

/// Check that the reward reserve can cover a payout of `amount`.
pub fn ensure_reserve(env: &Env, amount: i128) -> Result<(), ContractError> {
    if amount > 0 && reward_reserve(env)? < amount {
        return Err(ContractError::InsufficientRewardReserve);
    }
    Ok(())
}

/// Move `amount` of `asset` from `from` into custody using the allowance
/// granted to this contract.
pub fn pull_stake(env: &Env, asset: &Address, from: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    let contract = env.current_contract_address();
    token::Client::new(env, asset).transfer_from(&contract, from, &contract, &amount);
}

/// Return `amount` of `asset` from custody to `to`.
pub fn push_stake(env: &Env, asset: &Address, to: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    token::Client::new(env, asset).transfer(&env.current_contract_address(), to, &amount);
}

/// Pay `amount` reward tokens out of the reserve.
pub fn pay_reward(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let reward_token = reward_token(env)?;
    token::Client::new(env, &reward_token).transfer(
        &env.current_contract_address(),
        to,
        &amount,
    );
    Ok(())
}

/// Move `amount` reward tokens from `funder` into the reserve.
pub fn fund_reserve(env: &Env, funder: &Address, amount: i128) -> Result<(), ContractError> {
    let reward_token = reward_token(env)?;
    let client = token::Client::new(env, &reward_token);
    if client.balance(funder) < amount {
        return Err(ContractError::InsufficientBalance);
    }
    client.transfer(funder, &env.current_contract_address(), &amount);
    Ok(())
}
