use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum BrokerError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidThreshold = 3,
    EmptySignersList = 4,
    DuplicateSigner = 5,
    SignerNotFound = 6,
    InvalidTtl = 7,
    InvalidAction = 8,
    NotFound = 9,
    NotAllowed = 10,
    AlreadyVoted = 11,
    RequestExpired = 12,
    VotingClosed = 13,
    NotApproved = 14,
    NotCreator = 15,
    NoEligibleSigners = 16,
    InvalidSettings = 17,
    InvalidName = 18,
    AlreadyRequested = 19,
    TooManyPending = 20,
}
