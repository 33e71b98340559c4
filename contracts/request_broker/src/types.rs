use soroban_sdk::{contracttype, Address, Bytes, Map, String, Symbol, Val, Vec};

/// Bumped whenever the stored `Request` layout changes.
pub const REQUEST_SCHEMA_VERSION: u32 = 1;

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Role {
    User = 0,
    Contract = 1,
    Admin = 2,
}

impl Role {
    /// Whether a signer holding `self` may vote on a request requiring `required`.
    pub fn satisfies(&self, required: Role) -> bool {
        match self {
            Role::Admin => true,
            Role::Contract => matches!(required, Role::Contract | Role::User),
            Role::User => required == Role::User,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signer {
    pub id: Address,
    pub name: String,
    pub role: Role,
    pub threshold: Option<u32>,
    pub expires_at: Option<u64>,
    pub added_at: u64,
}

impl Signer {
    pub fn is_active(&self, now: u64) -> bool {
        match self.expires_at {
            Some(expires_at) => now < expires_at,
            None => true,
        }
    }
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Vote {
    Confirm = 0,
    Reject = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferArgs {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractCallArgs {
    pub contract: Address,
    pub function: Symbol,
    pub args: Vec<Val>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddSignerArgs {
    pub signer: Address,
    pub name: String,
    pub role: Role,
    pub threshold: Option<u32>,
    pub expires_at: Option<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BrokerSettings {
    pub default_threshold: u32,
    pub role_thresholds: Map<Role, u32>,
    pub min_ttl: u64,
    pub max_ttl: u64,
    pub default_ttl: u64,
    /// Resolve Fail as soon as the threshold can no longer be reached.
    pub early_fail: bool,
    /// Execute in the same call that approves the request.
    pub auto_execute: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Transfer(TransferArgs),
    ContractCall(ContractCallArgs),
    AddSigner(AddSignerArgs),
    RemoveSigner(Address),
    UpdateSettings(BrokerSettings),
    Rename(String),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentMessage {
    pub title: String,
    pub reason: String,
    pub description: String,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RequestStatus {
    /// Collecting votes.
    Pending = 0,
    /// Threshold reached, waiting for execution.
    Approved = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    pub id: u64,
    pub action: Action,
    pub consent: ConsentMessage,
    pub allowed_signers: Vec<Address>,
    pub votes: Map<Address, Vote>,
    pub role: Role,
    pub threshold: u32,
    pub early_fail: bool,
    pub deadline: u64,
    pub created_at: u64,
    pub created_by: Address,
    pub status: RequestStatus,
    pub version: u32,
}

impl Request {
    pub fn is_allowed(&self, signer: &Address) -> bool {
        self.allowed_signers.contains(signer)
    }

    pub fn has_voted(&self, signer: &Address) -> bool {
        self.votes.contains_key(signer.clone())
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.deadline
    }
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProcessedStatus {
    Success = 0,
    Fail = 1,
    Expired = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExecutionResult {
    /// Nothing ran: the request failed, expired or was cancelled.
    None,
    Transferred(TransferArgs),
    /// XDR encoding of the value returned by the target contract.
    ContractCalled(Bytes),
    SignerAdded(Address),
    SignerRemoved(Address),
    SettingsUpdated,
    Renamed(String),
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ProcessedRequest {
    pub id: u64,
    pub status: ProcessedStatus,
    pub request: Request,
    pub result: ExecutionResult,
    pub error: Option<String>,
    pub completed_at: u64,
    pub method: Symbol,
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum RequestState {
    Pending(Request),
    Processed(ProcessedRequest),
}
