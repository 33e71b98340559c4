use soroban_sdk::{Env, Map, String};

use crate::errors::BrokerError;
use crate::storage::DataKey;
use crate::types::{BrokerSettings, Role};

pub const DEFAULT_MIN_TTL_SECONDS: u64 = 60;
pub const DEFAULT_TTL_SECONDS: u64 = 604_800; // 7 days
pub const DEFAULT_MAX_TTL_SECONDS: u64 = 2_592_000; // 30 days
pub const MAX_NAME_LEN: u32 = 64;
/// Open requests still collecting votes.
pub const MAX_PENDING_REQUESTS: u32 = 100;
pub const MAX_PAGE_SIZE: u32 = 50;

pub fn default_settings(env: &Env, default_threshold: u32) -> BrokerSettings {
    BrokerSettings {
        default_threshold,
        role_thresholds: Map::new(env),
        min_ttl: DEFAULT_MIN_TTL_SECONDS,
        max_ttl: DEFAULT_MAX_TTL_SECONDS,
        default_ttl: DEFAULT_TTL_SECONDS,
        early_fail: true,
        auto_execute: true,
    }
}

pub fn validate_settings(settings: &BrokerSettings) -> Result<(), BrokerError> {
    if settings.default_threshold == 0 {
        return Err(BrokerError::InvalidSettings);
    }
    for threshold in settings.role_thresholds.values() {
        if threshold == 0 {
            return Err(BrokerError::InvalidSettings);
        }
    }
    if settings.min_ttl == 0
        || settings.min_ttl > settings.default_ttl
        || settings.default_ttl > settings.max_ttl
    {
        return Err(BrokerError::InvalidSettings);
    }
    Ok(())
}

pub fn validate_name(name: &String) -> Result<(), BrokerError> {
    if name.len() == 0 || name.len() > MAX_NAME_LEN {
        return Err(BrokerError::InvalidName);
    }
    Ok(())
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Settings)
}

pub fn require_initialized(env: &Env) -> Result<(), BrokerError> {
    if !is_initialized(env) {
        return Err(BrokerError::NotInitialized);
    }
    Ok(())
}

pub fn settings(env: &Env) -> Result<BrokerSettings, BrokerError> {
    env.storage()
        .instance()
        .get(&DataKey::Settings)
        .ok_or(BrokerError::NotInitialized)
}

pub fn set_settings(env: &Env, settings: &BrokerSettings) {
    env.storage().instance().set(&DataKey::Settings, settings);
}

pub fn name(env: &Env) -> Result<String, BrokerError> {
    env.storage()
        .instance()
        .get(&DataKey::Name)
        .ok_or(BrokerError::NotInitialized)
}

pub fn set_name(env: &Env, name: &String) {
    env.storage().instance().set(&DataKey::Name, name);
}

/// Role-scoped default, falling back to the broker-wide default.
pub fn default_threshold_for(settings: &BrokerSettings, role: Role) -> u32 {
    settings
        .role_thresholds
        .get(role)
        .unwrap_or(settings.default_threshold)
}

/// Requested ttl, or the configured default, checked against the bounds.
pub fn resolve_ttl(settings: &BrokerSettings, ttl: Option<u64>) -> Result<u64, BrokerError> {
    let ttl = ttl.unwrap_or(settings.default_ttl);
    if ttl < settings.min_ttl || ttl > settings.max_ttl {
        return Err(BrokerError::InvalidTtl);
    }
    Ok(ttl)
}
