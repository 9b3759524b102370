extern crate std;

use common::admin_tiers::AdminTier;
use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{ContractError, YieldFarmContract, YieldFarmContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, YieldFarmContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(YieldFarmContract, ());
    let client = YieldFarmContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &reward_token.address(), &10);

    (env, client, admin)
}

fn new_asset(env: &Env) -> Address {
    env.register_stellar_asset_contract_v2(Address::generate(env))
        .address()
}

// ── Bootstrap ────────────────────────────────────────────────────────────────

#[test]
fn test_admin_is_super_admin_after_init() {
    let (_env, client, admin) = setup();
    assert_eq!(client.get_admin_tier(&admin), Some(AdminTier::SuperAdmin));
}

// ── Tier permissions ─────────────────────────────────────────────────────────

#[test]
fn test_pool_manager_can_manage_pools() {
    let (env, client, admin) = setup();
    let manager = Address::generate(&env);
    client.promote_admin(&admin, &manager, &AdminTier::PoolManager);

    let pool_id = client.create_pool(&manager, &new_asset(&env), &100, &0);
    client.set_allocation_weight(&manager, &pool_id, &250, &true);
    client.set_min_stake(&manager, &pool_id, &10);

    let info = client.get_pool_info(&pool_id);
    assert_eq!(info.allocation_weight, 250);
    assert_eq!(info.min_stake, 10);
}

#[test]
fn test_pool_manager_cannot_change_emission() {
    let (env, client, admin) = setup();
    let manager = Address::generate(&env);
    client.promote_admin(&admin, &manager, &AdminTier::PoolManager);

    match client.try_set_reward_rate(&manager, &50) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_reward_rate(), 10);
}

#[test]
fn test_emission_manager_can_change_emission_and_pools() {
    let (env, client, admin) = setup();
    let manager = Address::generate(&env);
    client.promote_admin(&admin, &manager, &AdminTier::EmissionManager);

    client.set_reward_rate(&manager, &50);
    assert_eq!(client.get_reward_rate(), 50);

    client.create_pool(&manager, &new_asset(&env), &100, &0);
    assert_eq!(client.pool_count(), 1);
}

#[test]
fn test_demoted_admin_loses_access() {
    let (env, client, admin) = setup();
    let manager = Address::generate(&env);

    client.promote_admin(&admin, &manager, &AdminTier::PoolManager);
    assert_eq!(client.list_admins().len(), 2);
    client.demote_admin(&admin, &manager);
    assert_eq!(client.get_admin_tier(&manager), None);
    assert_eq!(client.list_admins().len(), 1);

    match client.try_create_pool(&manager, &new_asset(&env), &100, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_lower_tiers_cannot_promote() {
    let (env, client, admin) = setup();
    let manager = Address::generate(&env);
    let target = Address::generate(&env);

    client.promote_admin(&admin, &manager, &AdminTier::EmissionManager);

    match client.try_promote_admin(&manager, &target, &AdminTier::PoolManager) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_demote_admin(&manager, &admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_admin_tier(&target), None);
}

// ── Two-step admin transfer ──────────────────────────────────────────────────

#[test]
fn test_admin_transfer_flow() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);

    client.propose_admin(&admin, &successor);
    assert_eq!(client.get_pending_admin(), Some(successor.clone()));

    let stranger = Address::generate(&env);
    match client.try_accept_admin(&stranger) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    client.accept_admin(&successor);
    assert_eq!(client.get_admin(), successor);
    assert_eq!(client.get_pending_admin(), None);

    // SuperAdmin moves with the role.
    assert_eq!(client.get_admin_tier(&successor), Some(AdminTier::SuperAdmin));
    assert_eq!(client.get_admin_tier(&admin), None);
    assert_eq!(client.list_admins().len(), 1);

    client.set_reward_rate(&successor, &20);
    assert_eq!(client.get_reward_rate(), 20);

    let manager = Address::generate(&env);
    client.promote_admin(&successor, &manager, &AdminTier::PoolManager);
    assert_eq!(client.get_admin_tier(&manager), Some(AdminTier::PoolManager));
}

#[test]
fn test_previous_admin_loses_control_after_transfer() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);

    client.propose_admin(&admin, &successor);
    client.accept_admin(&successor);

    match client.try_set_reward_rate(&admin, &999) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_create_pool(&admin, &new_asset(&env), &100, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_promote_admin(&admin, &admin, &AdminTier::SuperAdmin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_reward_rate(), 10);
}

#[test]
fn test_cancel_admin_transfer() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);

    match client.try_cancel_admin_transfer(&admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    client.propose_admin(&admin, &successor);
    client.cancel_admin_transfer(&admin);
    assert_eq!(client.get_pending_admin(), None);

    match client.try_accept_admin(&successor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_non_admin_cannot_propose() {
    let (env, client, _admin) = setup();
    let intruder = Address::generate(&env);

    match client.try_propose_admin(&intruder, &intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}
