//! Booking escrow.
//!
//! One instance holds exactly one booking. The booking moves forward only:
//!
//! ```text
//! book ──► PENDING ──checkin──────────────────────► COMPLETED
//!             └──refund (block height > deadline)──► REFUNDED
//! ```
//!
//! `COMPLETED` and `REFUNDED` are terminal for `checkin` and `refund`. A new
//! `book` overwrites whatever is stored, in any state, from any sender.

pub mod contract;
mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
