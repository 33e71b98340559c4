use crate::types::{Request, Vote};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Verdict {
    Pending,
    Success,
    Fail,
}

/// Decides a request from its votes, snapshot and frozen threshold.
///
/// Only votes from the snapshot are ever recorded, so every entry of
/// `request.votes` counts. With `early_fail` set the request fails as soon
/// as the remaining possible confirmations can no longer reach the
/// threshold; otherwise it fails only once every allowed signer has voted.
pub fn evaluate(request: &Request) -> Verdict {
    let mut confirms: u32 = 0;
    let mut rejects: u32 = 0;
    for vote in request.votes.values() {
        match vote {
            Vote::Confirm => confirms += 1,
            Vote::Reject => rejects += 1,
        }
    }

    if confirms >= request.threshold {
        return Verdict::Success;
    }

    let allowed = request.allowed_signers.len();
    if request.early_fail && allowed.saturating_sub(rejects) < request.threshold {
        return Verdict::Fail;
    }
    if confirms + rejects >= allowed {
        return Verdict::Fail;
    }

    Verdict::Pending
}
