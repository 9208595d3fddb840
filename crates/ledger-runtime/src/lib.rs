//! Host for the SafeTourX contracts.
//!
//! Contracts run on an in-process `cw-multi-test` chain. The host adds what
//! the contracts' lifecycle model needs on top of it: stable instance ids,
//! routing of opt-in, close-out, update, delete and clear-state to contract
//! entry points, a round clock mapped onto block height and time, and a
//! journal of accepted calls.

pub mod codes;
pub mod config;
pub mod error;
pub mod journal;
pub mod ledger;
pub mod lifecycle;
pub mod types;

pub use codes::ContractKind;
pub use config::GenesisConfig;
pub use error::LedgerError;
pub use journal::{Journal, TxnRecord};
pub use ledger::Ledger;
pub use lifecycle::{EntryPoint, Lifecycle};
pub use types::{AppId, Round};
