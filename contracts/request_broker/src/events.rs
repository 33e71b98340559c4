use soroban_sdk::{contractevent, Address, Env, String};

use crate::types::{ProcessedStatus, Role, Vote};

#[contractevent(topics = ["created"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestCreated {
    #[topic]
    pub id: u64,
    pub creator: Address,
    pub threshold: u32,
    pub deadline: u64,
}

#[contractevent(topics = ["voted"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteRecorded {
    #[topic]
    pub id: u64,
    pub signer: Address,
    pub vote: Vote,
}

#[contractevent(topics = ["approved"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestApproved {
    #[topic]
    pub id: u64,
}

#[contractevent(topics = ["processed"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestProcessed {
    #[topic]
    pub id: u64,
    pub status: ProcessedStatus,
}

#[contractevent(topics = ["signer_added"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerAdded {
    #[topic]
    pub signer: Address,
    pub role: Role,
}

#[contractevent(topics = ["signer_removed"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerRemoved {
    #[topic]
    pub signer: Address,
}

#[contractevent(topics = ["settings"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettingsUpdated {
    pub updated_at: u64,
}

#[contractevent(topics = ["renamed"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalletRenamed {
    pub name: String,
}

pub(crate) fn request_created(env: &Env, id: u64, creator: &Address, threshold: u32, deadline: u64) {
    RequestCreated {
        id,
        creator: creator.clone(),
        threshold,
        deadline,
    }
    .publish(env);
}

pub(crate) fn vote_recorded(env: &Env, id: u64, signer: &Address, vote: Vote) {
    VoteRecorded {
        id,
        signer: signer.clone(),
        vote,
    }
    .publish(env);
}

pub(crate) fn request_approved(env: &Env, id: u64) {
    RequestApproved { id }.publish(env);
}

pub(crate) fn request_processed(env: &Env, id: u64, status: ProcessedStatus) {
    RequestProcessed { id, status }.publish(env);
}

pub(crate) fn signer_added(env: &Env, signer: &Address, role: Role) {
    SignerAdded {
        signer: signer.clone(),
        role,
    }
    .publish(env);
}

pub(crate) fn signer_removed(env: &Env, signer: &Address) {
    SignerRemoved {
        signer: signer.clone(),
    }
    .publish(env);
}

pub(crate) fn settings_updated(env: &Env) {
    SettingsUpdated {
        updated_at: env.ledger().timestamp(),
    }
    .publish(env);
}

pub(crate) fn renamed(env: &Env, name: &String) {
    WalletRenamed { name: name.clone() }.publish(env);
}
