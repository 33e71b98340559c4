use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Vec};

use crate::action;
use crate::config;
use crate::errors::BrokerError;
use crate::evaluator::Verdict;
use crate::executor;
use crate::registry;
use crate::storage::{self, DataKey};
use crate::store;
use crate::sweeper;
use crate::types::{
    Action, AddSignerArgs, BrokerSettings, ExecutionResult, ProcessedRequest, ProcessedStatus,
    Request, RequestState, RequestStatus, Role, Signer, Vote,
};

#[contract]
pub struct RequestBroker;

#[contractimpl]
impl RequestBroker {
    pub fn initialize(
        env: Env,
        name: String,
        admins: Vec<Address>,
        settings: BrokerSettings,
    ) -> Result<(), BrokerError> {
        if config::is_initialized(&env) {
            return Err(BrokerError::AlreadyInitialized);
        }

        if admins.is_empty() {
            return Err(BrokerError::EmptySignersList);
        }

        // Check for duplicate admins
        for i in 0..admins.len() {
            for j in (i + 1)..admins.len() {
                if admins.get_unchecked(i) == admins.get_unchecked(j) {
                    return Err(BrokerError::DuplicateSigner);
                }
            }
        }

        config::validate_name(&name)?;
        config::validate_settings(&settings)?;

        config::set_settings(&env, &settings);
        config::set_name(&env, &name);

        let now = env.ledger().timestamp();
        for admin in admins {
            registry::put(
                &env,
                Signer {
                    id: admin,
                    name: String::from_str(&env, "admin"),
                    role: Role::Admin,
                    threshold: None,
                    expires_at: None,
                    added_at: now,
                },
            );
        }
        storage::bump_instance(&env);
        Ok(())
    }

    /// Creates a request on behalf of a registered signer and returns its id.
    pub fn request_maker(
        env: Env,
        creator: Address,
        action: Action,
        reason: String,
        ttl: Option<u64>,
        threshold: Option<u32>,
    ) -> Result<u64, BrokerError> {
        config::require_initialized(&env)?;
        creator.require_auth();

        let signer = registry::require(&env, &creator)?;
        if !signer.is_active(env.ledger().timestamp()) {
            return Err(BrokerError::NotAllowed);
        }

        sweeper::sweep(&env, sweeper::LAZY_SWEEP_LIMIT);
        let request = store::create(
            &env,
            &creator,
            signer.threshold,
            action,
            reason,
            ttl,
            threshold,
        )?;
        storage::bump_instance(&env);
        Ok(request.id)
    }

    /// Asks the admins to register `caller` as a `Contract` signer. A caller
    /// may have one such request open at a time.
    pub fn request_connect(env: Env, caller: Address, name: String) -> Result<u64, BrokerError> {
        config::require_initialized(&env)?;
        caller.require_auth();

        if registry::contains(&env, &caller) {
            return Err(BrokerError::DuplicateSigner);
        }

        sweeper::sweep(&env, sweeper::LAZY_SWEEP_LIMIT);
        let connect_key = DataKey::Connect(caller.clone());
        if let Some(open) = storage::get_persistent::<u64>(&env, &connect_key) {
            if store::get_pending(&env, open).is_ok() {
                return Err(BrokerError::AlreadyRequested);
            }
        }
        let action = Action::AddSigner(AddSignerArgs {
            signer: caller.clone(),
            name,
            role: Role::Contract,
            threshold: None,
            expires_at: None,
        });
        let reason = String::from_str(&env, "connection request");
        let request = store::create(&env, &caller, None, action, reason, None, None)?;
        storage::set_persistent(&env, &connect_key, &request.id);
        storage::bump_instance(&env);
        Ok(request.id)
    }

    pub fn vote(env: Env, signer: Address, request_id: u64, vote: Vote) -> Result<RequestState, BrokerError> {
        config::require_initialized(&env)?;
        signer.require_auth();

        let (request, verdict) = store::record_vote(&env, request_id, &signer, vote)?;
        storage::bump_instance(&env);

        match verdict {
            Verdict::Pending => Ok(RequestState::Pending(request)),
            Verdict::Fail => {
                let processed = store::finalize(
                    &env,
                    request,
                    ProcessedStatus::Fail,
                    ExecutionResult::None,
                    Some(String::from_str(&env, "rejected by signers")),
                    symbol_short!("vote"),
                );
                Ok(RequestState::Processed(processed))
            }
            Verdict::Success => {
                let request = store::mark_approved(&env, request);
                if !config::settings(&env)?.auto_execute {
                    return Ok(RequestState::Pending(request));
                }
                let processed = executor::run(&env, request, symbol_short!("vote"))?;
                Ok(RequestState::Processed(processed))
            }
        }
    }

    /// Executes an approved request that has not run yet. Calling it for an
    /// already processed request returns the archived record.
    pub fn execute_request(
        env: Env,
        signer: Address,
        request_id: u64,
    ) -> Result<ProcessedRequest, BrokerError> {
        config::require_initialized(&env)?;
        signer.require_auth();

        let request = match store::get_pending(&env, request_id) {
            Ok(request) => request,
            Err(err) => {
                let processed = store::get_processed(&env, request_id).ok_or(err)?;
                if !store::is_participant(&processed.request, &signer) {
                    return Err(BrokerError::NotAllowed);
                }
                return Ok(processed);
            }
        };
        if !request.is_allowed(&signer) {
            return Err(BrokerError::NotAllowed);
        }

        let processed = executor::run(&env, request, symbol_short!("execute"))?;
        storage::bump_instance(&env);
        Ok(processed)
    }

    /// Withdraws a request that is still collecting votes. Only its creator may.
    pub fn cancel_request(
        env: Env,
        caller: Address,
        request_id: u64,
    ) -> Result<ProcessedRequest, BrokerError> {
        config::require_initialized(&env)?;
        caller.require_auth();

        let request = store::get_pending(&env, request_id)?;
        if request.created_by != caller {
            return Err(BrokerError::NotCreator);
        }
        if request.status != RequestStatus::Pending {
            return Err(BrokerError::VotingClosed);
        }

        let processed = store::finalize(
            &env,
            request,
            ProcessedStatus::Fail,
            ExecutionResult::None,
            Some(String::from_str(&env, "cancelled by creator")),
            symbol_short!("cancel"),
        );
        storage::bump_instance(&env);
        Ok(processed)
    }

    pub fn sweep_expired(env: Env, limit: u32) -> Result<u32, BrokerError> {
        config::require_initialized(&env)?;
        let expired = sweeper::sweep(&env, limit);
        storage::bump_instance(&env);
        Ok(expired)
    }

    pub fn check_pending_requests(env: Env, caller: Address) -> Result<Vec<Request>, BrokerError> {
        config::require_initialized(&env)?;
        Ok(store::list_pending_for(&env, &caller))
    }

    pub fn get_pending(env: Env, request_id: u64) -> Result<Request, BrokerError> {
        config::require_initialized(&env)?;
        store::get_pending(&env, request_id)
    }

    pub fn get_request(env: Env, request_id: u64) -> Result<RequestState, BrokerError> {
        config::require_initialized(&env)?;
        if let Ok(request) = store::get_pending(&env, request_id) {
            return Ok(RequestState::Pending(request));
        }
        store::get_processed(&env, request_id)
            .map(RequestState::Processed)
            .ok_or(BrokerError::NotFound)
    }

    pub fn check_processed_request(
        env: Env,
        caller: Address,
        request_id: u64,
    ) -> Result<ProcessedRequest, BrokerError> {
        config::require_initialized(&env)?;
        let processed = store::get_processed(&env, request_id).ok_or(BrokerError::NotFound)?;
        if !store::is_participant(&processed.request, &caller) {
            return Err(BrokerError::NotAllowed);
        }
        Ok(processed)
    }

    pub fn check_processed_requests(
        env: Env,
        caller: Address,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<ProcessedRequest>, BrokerError> {
        config::require_initialized(&env)?;
        Ok(store::processed_page(&env, &caller, offset, limit))
    }

    pub fn required_role(env: Env, action: Action) -> Result<Role, BrokerError> {
        config::require_initialized(&env)?;
        Ok(action::required_role(&action))
    }

    pub fn get_signer(env: Env, signer: Address) -> Result<Signer, BrokerError> {
        config::require_initialized(&env)?;
        registry::require(&env, &signer)
    }

    pub fn signers(env: Env) -> Result<Vec<Signer>, BrokerError> {
        config::require_initialized(&env)?;
        Ok(registry::all(&env))
    }

    pub fn is_signer(env: Env, signer: Address) -> Result<bool, BrokerError> {
        config::require_initialized(&env)?;
        Ok(registry::contains(&env, &signer))
    }

    pub fn settings(env: Env) -> Result<BrokerSettings, BrokerError> {
        config::settings(&env)
    }

    pub fn name(env: Env) -> Result<String, BrokerError> {
        config::name(&env)
    }

    pub fn request_count(env: Env) -> Result<u64, BrokerError> {
        config::require_initialized(&env)?;
        Ok(store::request_count(&env))
    }
}
