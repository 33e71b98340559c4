use soroban_sdk::{contracttype, Address, Env, IntoVal, TryFromVal, Val, Vec};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // instance
    Settings,
    Name,
    RequestCount,
    ExpiryQueue,
    SignerIds,
    // persistent
    Signer(Address),
    Pending(u64),
    Processed(u64),
    Inbox(Address),
    History(Address, u32),
    HistoryLen(Address),
    Connect(Address),
}

/// Open request in the expiry queue, which is kept sorted by deadline.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpiryEntry {
    pub deadline: u64,
    pub id: u64,
}

pub(crate) fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub(crate) fn get_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage().persistent().extend_ttl(
            key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
    value
}

pub(crate) fn set_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub(crate) fn has_persistent(env: &Env, key: &DataKey) -> bool {
    env.storage().persistent().has(key)
}

pub(crate) fn remove_persistent(env: &Env, key: &DataKey) {
    env.storage().persistent().remove(key);
}

pub(crate) fn expiry_queue(env: &Env) -> Vec<ExpiryEntry> {
    env.storage()
        .instance()
        .get(&DataKey::ExpiryQueue)
        .unwrap_or(Vec::new(env))
}

pub(crate) fn set_expiry_queue(env: &Env, queue: &Vec<ExpiryEntry>) {
    env.storage().instance().set(&DataKey::ExpiryQueue, queue);
}

pub(crate) fn inbox(env: &Env, signer: &Address) -> Vec<u64> {
    get_persistent(env, &DataKey::Inbox(signer.clone())).unwrap_or(Vec::new(env))
}

pub(crate) fn set_inbox(env: &Env, signer: &Address, ids: &Vec<u64>) {
    let key = DataKey::Inbox(signer.clone());
    if ids.is_empty() {
        remove_persistent(env, &key);
    } else {
        set_persistent(env, &key, ids);
    }
}

pub(crate) fn history_len(env: &Env, participant: &Address) -> u32 {
    get_persistent(env, &DataKey::HistoryLen(participant.clone())).unwrap_or(0u32)
}

pub(crate) fn push_history(env: &Env, participant: &Address, id: u64) {
    let len = history_len(env, participant);
    set_persistent(env, &DataKey::History(participant.clone(), len), &id);
    set_persistent(env, &DataKey::HistoryLen(participant.clone()), &(len + 1));
}

pub(crate) fn history_at(env: &Env, participant: &Address, position: u32) -> Option<u64> {
    get_persistent(env, &DataKey::History(participant.clone(), position))
}

pub(crate) fn signer_ids(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::SignerIds)
        .unwrap_or(Vec::new(env))
}

pub(crate) fn set_signer_ids(env: &Env, ids: &Vec<Address>) {
    env.storage().instance().set(&DataKey::SignerIds, ids);
}
