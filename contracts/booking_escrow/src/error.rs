use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

use crate::state::BookingStatus;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("no booking")]
    NoBooking,

    #[error("booking is {status:?}, not pending")]
    NotPending { status: BookingStatus },

    #[error("refund deadline not passed (deadline {deadline}, height {height})")]
    RefundTooEarly { deadline: u64, height: u64 },

    #[error("cannot migrate from contract {actual}")]
    WrongContract { actual: String },
}
