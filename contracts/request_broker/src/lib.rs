#![no_std]

mod action;
mod broker;
mod config;
mod errors;
mod evaluator;
mod events;
mod executor;
mod registry;
mod storage;
mod store;
mod sweeper;
mod types;


pub use broker::*;
pub use config::{
    default_settings, DEFAULT_MAX_TTL_SECONDS, DEFAULT_MIN_TTL_SECONDS, DEFAULT_TTL_SECONDS,
    MAX_PAGE_SIZE, MAX_PENDING_REQUESTS,
};
pub use errors::BrokerError;
pub use evaluator::{evaluate, Verdict};
pub use types::*;
