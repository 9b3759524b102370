use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const TIER_PREFIX: Symbol = symbol_short!("ADM_TIER");
const SUPER_ADMIN: Symbol = symbol_short!("S_ADMIN");
const ADMIN_LIST: Symbol = symbol_short!("ADM_LIST");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 3_110_400;

// ── Admin Tier Enum ──────────────────────────────────────────────────────────

/// Admin hierarchy for the farm. Each tier includes the powers below it.
///
/// - `PoolManager`     – create pools, change allocation weights and
///                       minimum stakes.
/// - `EmissionManager` – everything above plus changing the global reward
///                       rate.
/// - `SuperAdmin`      – everything, including promoting and demoting
///                       other admins.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    PoolManager = 1,
    EmissionManager = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::PoolManager => 1,
            AdminTier::EmissionManager => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    /// True if this tier grants everything `min_tier` grants.
    pub fn covers(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

fn tier_key(admin: &Address) -> (Symbol, Address) {
    (TIER_PREFIX, admin.clone())
}

// ── Tier registry ────────────────────────────────────────────────────────────

/// Assign `tier` to `admin`. Callers must authorize the change themselves.
pub fn set_admin_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = tier_key(admin);
    env.storage().persistent().set(&key, &tier);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn get_admin_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    env.storage().persistent().get(&tier_key(admin))
}

pub fn remove_admin_tier(env: &Env, admin: &Address) {
    env.storage().persistent().remove(&tier_key(admin));
}

/// Returns `true` if `caller` holds `min_tier` or higher.
pub fn require_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> bool {
    get_admin_tier(env, caller).is_some_and(|tier| tier.covers(min_tier))
}

/// Record the bootstrap admin and grant it `SuperAdmin`.
pub fn set_super_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&SUPER_ADMIN, admin);
    set_admin_tier(env, admin, AdminTier::SuperAdmin);
}

pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&SUPER_ADMIN)
}

// ── Promote / Demote ─────────────────────────────────────────────────────────

/// Grant `tier` to `target` on behalf of `caller`.
///
/// `caller` must already be authenticated. Returns `false` without changing
/// anything unless `caller` is a `SuperAdmin`.
pub fn promote_admin(env: &Env, caller: &Address, target: &Address, tier: AdminTier) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    set_admin_tier(env, target, tier);
    true
}

/// Strip every tier from `target` on behalf of `caller`.
///
/// Same authorization rule as [`promote_admin`].
pub fn demote_admin(env: &Env, caller: &Address, target: &Address) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    remove_admin_tier(env, target);
    true
}

// ── Admin list ───────────────────────────────────────────────────────────────

pub fn list_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&ADMIN_LIST)
        .unwrap_or(Vec::new(env))
}

/// Add `admin` to the tracked list if it is not there yet.
pub fn track_admin(env: &Env, admin: &Address) {
    let mut admins = list_admins(env);
    if admins.contains(admin) {
        return;
    }
    admins.push_back(admin.clone());
    env.storage().persistent().set(&ADMIN_LIST, &admins);
}

pub fn untrack_admin(env: &Env, admin: &Address) {
    let mut admins = list_admins(env);
    if let Some(index) = admins.first_index_of(admin) {
        admins.remove(index);
        env.storage().persistent().set(&ADMIN_LIST, &admins);
    }
}
