//! Identity registry.
//!
//! Each account opts in, then registers or updates the hash of an
//! off-chain identity document. Records are keyed by sender and never
//! readable or writable by anyone else.

pub mod contract;
mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
