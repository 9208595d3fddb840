//! Emergency alert log.
//!
//! Keeps only the most recent alert: hash, sender and block time. Earlier
//! alerts survive in the chain's transaction history, not here.

pub mod contract;
mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
