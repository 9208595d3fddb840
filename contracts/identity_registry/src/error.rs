use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("sender has not opted in")]
    NotOptedIn,

    #[error("sender already opted in")]
    AlreadyOptedIn,

    #[error("cannot migrate from contract {actual}")]
    WrongContract { actual: String },
}
