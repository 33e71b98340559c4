use soroban_sdk::{Env, String};

use crate::config;
use crate::errors::BrokerError;
use crate::registry;
use crate::types::{Action, ConsentMessage, Role};

/// Minimum role a signer needs to be routed a request for `action`.
pub fn required_role(action: &Action) -> Role {
    match action {
        Action::Transfer(_) | Action::ContractCall(_) => Role::User,
        Action::AddSigner(_)
        | Action::RemoveSigner(_)
        | Action::UpdateSettings(_)
        | Action::Rename(_) => Role::Admin,
    }
}

/// Rejects payloads that could never execute. Nothing here touches storage
/// other than read-only registry lookups.
pub fn validate(env: &Env, action: &Action) -> Result<(), BrokerError> {
    let now = env.ledger().timestamp();
    match action {
        Action::Transfer(args) => {
            if args.amount <= 0 || args.to == env.current_contract_address() {
                return Err(BrokerError::InvalidAction);
            }
        }
        Action::ContractCall(args) => {
            if args.contract == env.current_contract_address() {
                return Err(BrokerError::InvalidAction);
            }
        }
        Action::AddSigner(args) => {
            if args.threshold == Some(0) {
                return Err(BrokerError::InvalidAction);
            }
            if matches!(args.expires_at, Some(expires_at) if expires_at <= now) {
                return Err(BrokerError::InvalidAction);
            }
            config::validate_name(&args.name).map_err(|_| BrokerError::InvalidAction)?;
        }
        Action::RemoveSigner(id) => {
            registry::require(env, id)?;
        }
        Action::UpdateSettings(settings) => {
            config::validate_settings(settings).map_err(|_| BrokerError::InvalidAction)?;
        }
        Action::Rename(name) => {
            config::validate_name(name).map_err(|_| BrokerError::InvalidAction)?;
        }
    }
    Ok(())
}

pub fn consent_message(env: &Env, action: &Action, reason: String) -> ConsentMessage {
    let (title, description) = match action {
        Action::Transfer(_) => (
            "Transfer tokens",
            "Transfers the given amount of a token from this wallet to the recipient.",
        ),
        Action::ContractCall(_) => (
            "Call contract",
            "Invokes a function on another contract on behalf of this wallet.",
        ),
        Action::AddSigner(_) => (
            "Add signer",
            "Registers a signer, or updates the role and policy of an existing one.",
        ),
        Action::RemoveSigner(_) => (
            "Remove signer",
            "Removes a signer. Requests created earlier keep their signer snapshot.",
        ),
        Action::UpdateSettings(_) => (
            "Update settings",
            "Replaces thresholds, request lifetimes and execution policy.",
        ),
        Action::Rename(_) => ("Rename wallet", "Changes the display name of this wallet."),
    };
    ConsentMessage {
        title: String::from_str(env, title),
        reason,
        description: String::from_str(env, description),
    }
}
