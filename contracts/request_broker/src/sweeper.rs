use soroban_sdk::{symbol_short, Env};

use crate::storage;
use crate::store;
use crate::types::{ExecutionResult, ProcessedStatus, RequestStatus};

/// Sweep budget spent by every request creation.
pub const LAZY_SWEEP_LIMIT: u32 = 5;

/// Finalizes up to `limit` requests whose deadline has elapsed, earliest
/// deadline first, and returns how many were expired.
///
/// Walks the expiry queue from the front and stops at the first deadline
/// still in the future, so at most `limit` requests are loaded. Approved
/// requests are not queued and never expire.
pub fn sweep(env: &Env, limit: u32) -> u32 {
    let now = env.ledger().timestamp();
    let mut expired = 0u32;

    for _ in 0..limit {
        let mut queue = storage::expiry_queue(env);
        let Some(next) = queue.first() else {
            break;
        };
        if now < next.deadline {
            break;
        }

        match store::get_pending(env, next.id) {
            Ok(request) if request.status == RequestStatus::Pending => {
                store::finalize(
                    env,
                    request,
                    ProcessedStatus::Expired,
                    ExecutionResult::None,
                    None,
                    symbol_short!("sweep"),
                );
                expired += 1;
            }
            // stale entry
            _ => {
                queue.pop_front();
                storage::set_expiry_queue(env, &queue);
            }
        }
    }

    expired
}
