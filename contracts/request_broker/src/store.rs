//! Request store: pending requests, their votes, and the processed archive.
//!
//! Pending records live under `DataKey::Pending(id)`. Requests still
//! collecting votes sit in the deadline-ordered expiry queue and in the inbox
//! of every signer that has not voted on them yet. `finalize` is the only way
//! out of the pending set and the only writer of `DataKey::Processed(id)`;
//! it appends the id to the history of each participant.

use soroban_sdk::{log, Address, Env, Map, String, Symbol, Vec};

use crate::action;
use crate::config;
use crate::errors::BrokerError;
use crate::evaluator::{self, Verdict};
use crate::events;
use crate::registry;
use crate::storage::{self, DataKey, ExpiryEntry};
use crate::types::{
    Action, ExecutionResult, ProcessedRequest, ProcessedStatus, Request, RequestStatus, Vote,
    REQUEST_SCHEMA_VERSION,
};

pub fn request_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::RequestCount)
        .unwrap_or(0u64)
}

fn next_id(env: &Env) -> u64 {
    let id = request_count(env) + 1;
    env.storage().instance().set(&DataKey::RequestCount, &id);
    id
}

/// Creates a pending request routed to every signer eligible for the
/// action's role at this moment.
///
/// `creator_threshold` is the creator's own signer policy, if any.
pub fn create(
    env: &Env,
    creator: &Address,
    creator_threshold: Option<u32>,
    action: Action,
    reason: String,
    ttl: Option<u64>,
    threshold: Option<u32>,
) -> Result<Request, BrokerError> {
    action::validate(env, &action)?;

    let settings = config::settings(env)?;
    let ttl = config::resolve_ttl(&settings, ttl)?;
    let now = env.ledger().timestamp();
    let deadline = now.checked_add(ttl).ok_or(BrokerError::InvalidTtl)?;

    let mut queue = storage::expiry_queue(env);
    if queue.len() >= config::MAX_PENDING_REQUESTS {
        return Err(BrokerError::TooManyPending);
    }

    let role = action::required_role(&action);
    let allowed_signers = registry::eligible(env, role, now);
    if allowed_signers.is_empty() {
        return Err(BrokerError::NoEligibleSigners);
    }

    let threshold = threshold
        .or(creator_threshold)
        .unwrap_or_else(|| config::default_threshold_for(&settings, role));
    if threshold == 0 || threshold > allowed_signers.len() {
        return Err(BrokerError::InvalidThreshold);
    }

    let consent = action::consent_message(env, &action, reason);
    let request = Request {
        id: next_id(env),
        action,
        consent,
        allowed_signers,
        votes: Map::new(env),
        role,
        threshold,
        early_fail: settings.early_fail,
        deadline,
        created_at: now,
        created_by: creator.clone(),
        status: RequestStatus::Pending,
        version: REQUEST_SCHEMA_VERSION,
    };

    save_pending(env, &request);

    // after every entry with an earlier or equal deadline
    let mut index = queue.len();
    while let Some(entry) = index.checked_sub(1).and_then(|last| queue.get(last)) {
        if entry.deadline <= deadline {
            break;
        }
        index -= 1;
    }
    queue.insert(
        index,
        ExpiryEntry {
            deadline,
            id: request.id,
        },
    );
    storage::set_expiry_queue(env, &queue);

    for signer in request.allowed_signers.iter() {
        let mut inbox = storage::inbox(env, &signer);
        inbox.push_back(request.id);
        storage::set_inbox(env, &signer, &inbox);
    }

    events::request_created(env, request.id, creator, threshold, request.deadline);
    Ok(request)
}

pub fn get_pending(env: &Env, id: u64) -> Result<Request, BrokerError> {
    storage::get_persistent(env, &DataKey::Pending(id)).ok_or(BrokerError::NotFound)
}

pub(crate) fn save_pending(env: &Env, request: &Request) {
    storage::set_persistent(env, &DataKey::Pending(request.id), request);
}

pub fn get_processed(env: &Env, id: u64) -> Option<ProcessedRequest> {
    storage::get_persistent(env, &DataKey::Processed(id))
}

/// Requests still waiting on `signer`: in the snapshot, not voted, still
/// collecting votes and not past their deadline.
pub fn list_pending_for(env: &Env, signer: &Address) -> Vec<Request> {
    let now = env.ledger().timestamp();
    let mut requests = Vec::new(env);
    for id in storage::inbox(env, signer) {
        let Ok(request) = get_pending(env, id) else {
            continue;
        };
        if request.status == RequestStatus::Pending
            && !request.is_expired(now)
            && request.is_allowed(signer)
            && !request.has_voted(signer)
        {
            requests.push_back(request);
        }
    }
    requests
}

/// Stores `vote` and evaluates the request with it. The returned request
/// is already persisted with the vote; acting on the verdict is up to the
/// caller.
pub fn record_vote(
    env: &Env,
    id: u64,
    signer: &Address,
    vote: Vote,
) -> Result<(Request, Verdict), BrokerError> {
    let mut request = match get_pending(env, id) {
        Ok(request) => request,
        Err(err) => {
            return match get_processed(env, id) {
                Some(processed) if processed.status == ProcessedStatus::Expired => {
                    Err(BrokerError::RequestExpired)
                }
                _ => Err(err),
            }
        }
    };

    if request.status != RequestStatus::Pending {
        return Err(BrokerError::VotingClosed);
    }
    if request.is_expired(env.ledger().timestamp()) {
        return Err(BrokerError::RequestExpired);
    }
    if !request.is_allowed(signer) {
        return Err(BrokerError::NotAllowed);
    }
    if request.has_voted(signer) {
        return Err(BrokerError::AlreadyVoted);
    }

    request.votes.set(signer.clone(), vote);
    save_pending(env, &request);
    remove_from_inbox(env, signer, id);
    events::vote_recorded(env, id, signer, vote);

    let verdict = evaluator::evaluate(&request);
    Ok((request, verdict))
}

/// Marks an approved request; it stays in the pending set until executed.
pub fn mark_approved(env: &Env, mut request: Request) -> Request {
    close_voting(env, &request);
    request.status = RequestStatus::Approved;
    save_pending(env, &request);
    events::request_approved(env, request.id);
    request
}

/// Moves `request` into the processed archive.
///
/// Finalizing an id that is already processed returns the stored record
/// untouched, whatever arguments are passed.
pub fn finalize(
    env: &Env,
    request: Request,
    status: ProcessedStatus,
    result: ExecutionResult,
    error: Option<String>,
    method: Symbol,
) -> ProcessedRequest {
    if let Some(existing) = get_processed(env, request.id) {
        return existing;
    }

    let id = request.id;
    if request.status == RequestStatus::Pending {
        close_voting(env, &request);
    }
    storage::push_history(env, &request.created_by, id);
    for signer in request.allowed_signers.iter() {
        if signer != request.created_by {
            storage::push_history(env, &signer, id);
        }
    }

    let processed = ProcessedRequest {
        id,
        status,
        request,
        result,
        error,
        completed_at: env.ledger().timestamp(),
        method,
    };
    storage::set_persistent(env, &DataKey::Processed(id), &processed);
    storage::remove_persistent(env, &DataKey::Pending(id));

    log!(env, "request finalized", id, status);
    events::request_processed(env, id, status);
    processed
}

/// Takes a request out of the expiry queue and out of the inboxes of the
/// signers that have not voted on it.
fn close_voting(env: &Env, request: &Request) {
    let mut queue = storage::expiry_queue(env);
    for (i, entry) in queue.iter().enumerate() {
        if entry.id == request.id {
            queue.remove(i as u32);
            storage::set_expiry_queue(env, &queue);
            break;
        }
    }

    for signer in request.allowed_signers.iter() {
        if !request.has_voted(&signer) {
            remove_from_inbox(env, &signer, request.id);
        }
    }
}

fn remove_from_inbox(env: &Env, signer: &Address, id: u64) {
    let mut inbox = storage::inbox(env, signer);
    if let Some(index) = inbox.first_index_of(id) {
        inbox.remove(index);
        storage::set_inbox(env, signer, &inbox);
    }
}

/// Processed records `caller` created or could vote on, in completion
/// order. At most `MAX_PAGE_SIZE` records are returned.
pub fn processed_page(env: &Env, caller: &Address, offset: u32, limit: u32) -> Vec<ProcessedRequest> {
    let mut page = Vec::new(env);
    let end = offset
        .saturating_add(limit.min(config::MAX_PAGE_SIZE))
        .min(storage::history_len(env, caller));
    for position in offset..end {
        let Some(id) = storage::history_at(env, caller, position) else {
            continue;
        };
        if let Some(processed) = get_processed(env, id) {
            page.push_back(processed);
        }
    }
    page
}

pub fn is_participant(request: &Request, caller: &Address) -> bool {
    request.created_by == *caller || request.is_allowed(caller)
}
