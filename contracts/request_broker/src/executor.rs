//! Executes approved requests.
//!
//! Handlers never abort the invocation: failures of the token or target
//! contract are caught through the `try_` call variants and reported as
//! text, so the Fail record is persisted together with the votes that led
//! to it.

use soroban_sdk::{log, token, xdr::ToXdr, Address, Env, Error, String, Symbol, Val};

use crate::config;
use crate::errors::BrokerError;
use crate::events;
use crate::registry;
use crate::store;
use crate::types::{
    Action, AddSignerArgs, BrokerSettings, ContractCallArgs, ExecutionResult, ProcessedRequest,
    ProcessedStatus, Request, RequestStatus, Role, Signer, TransferArgs,
};

/// Executes an approved request once and archives the outcome.
pub fn run(env: &Env, request: Request, method: Symbol) -> Result<ProcessedRequest, BrokerError> {
    if let Some(processed) = store::get_processed(env, request.id) {
        return Ok(processed);
    }
    if request.status != RequestStatus::Approved {
        return Err(BrokerError::NotApproved);
    }

    let processed = match execute(env, &request) {
        Ok(result) => store::finalize(
            env,
            request,
            ProcessedStatus::Success,
            result,
            None,
            method,
        ),
        Err(error) => {
            log!(env, "request execution failed", request.id, error.clone());
            store::finalize(
                env,
                request,
                ProcessedStatus::Fail,
                ExecutionResult::None,
                Some(error),
                method,
            )
        }
    };
    Ok(processed)
}

pub fn execute(env: &Env, request: &Request) -> Result<ExecutionResult, String> {
    match &request.action {
        Action::Transfer(args) => transfer(env, args),
        Action::ContractCall(args) => call_contract(env, args),
        Action::AddSigner(args) => add_signer(env, args),
        Action::RemoveSigner(id) => remove_signer(env, id),
        Action::UpdateSettings(settings) => update_settings(env, settings),
        Action::Rename(name) => rename(env, name),
    }
}

fn failure(env: &Env, message: &str) -> String {
    String::from_str(env, message)
}

fn transfer(env: &Env, args: &TransferArgs) -> Result<ExecutionResult, String> {
    let token_client = token::TokenClient::new(env, &args.token);
    let broker = env.current_contract_address();

    match token_client.try_transfer(&broker, &args.to, &args.amount) {
        Ok(Ok(())) => Ok(ExecutionResult::Transferred(args.clone())),
        _ => Err(failure(env, "token transfer failed")),
    }
}

fn call_contract(env: &Env, args: &ContractCallArgs) -> Result<ExecutionResult, String> {
    match env.try_invoke_contract::<Val, Error>(&args.contract, &args.function, args.args.clone()) {
        Ok(Ok(value)) => Ok(ExecutionResult::ContractCalled(value.to_xdr(env))),
        Ok(Err(_)) => Err(failure(env, "contract call returned an unreadable value")),
        Err(_) => Err(failure(env, "contract call failed")),
    }
}

fn add_signer(env: &Env, args: &AddSignerArgs) -> Result<ExecutionResult, String> {
    if let Some(existing) = registry::get(env, &args.signer) {
        if existing.role == Role::Admin
            && args.role != Role::Admin
            && registry::admin_count(env) <= 1
        {
            return Err(failure(env, "cannot demote the last admin"));
        }
    }

    let signer = registry::put(
        env,
        Signer {
            id: args.signer.clone(),
            name: args.name.clone(),
            role: args.role,
            threshold: args.threshold,
            expires_at: args.expires_at,
            added_at: env.ledger().timestamp(),
        },
    );
    events::signer_added(env, &signer.id, signer.role);
    Ok(ExecutionResult::SignerAdded(signer.id))
}

fn remove_signer(env: &Env, id: &Address) -> Result<ExecutionResult, String> {
    let Some(signer) = registry::get(env, id) else {
        return Err(failure(env, "signer not found"));
    };
    if signer.role == Role::Admin && registry::admin_count(env) <= 1 {
        return Err(failure(env, "cannot remove the last admin"));
    }

    registry::remove(env, id).map_err(|_| failure(env, "signer not found"))?;
    events::signer_removed(env, id);
    Ok(ExecutionResult::SignerRemoved(id.clone()))
}

fn update_settings(env: &Env, settings: &BrokerSettings) -> Result<ExecutionResult, String> {
    config::validate_settings(settings).map_err(|_| failure(env, "invalid settings"))?;
    config::set_settings(env, settings);
    events::settings_updated(env);
    Ok(ExecutionResult::SettingsUpdated)
}

fn rename(env: &Env, name: &String) -> Result<ExecutionResult, String> {
    config::validate_name(name).map_err(|_| failure(env, "invalid name"))?;
    config::set_name(env, name);
    events::renamed(env, name);
    Ok(ExecutionResult::Renamed(name.clone()))
}
