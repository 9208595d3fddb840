use cosmwasm_std::StdError;
use std::fmt;
use thiserror::Error;

use crate::lifecycle::Lifecycle;
use crate::types::{AppId, Round};

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The contract, or message decoding in front of it, refused the call.
    /// Nothing it wrote is kept.
    #[error("{lifecycle:?} on {app} rejected: {}", .source.root_cause())]
    Rejected {
        app: AppId,
        lifecycle: Lifecycle,
        #[source]
        source: anyhow::Error,
    },
    #[error("{0} already exists; instances are created only by deploy")]
    AlreadyCreated(AppId),
    #[error("no application with id {0}")]
    UnknownApp(AppId),
    #[error("clock cannot move back from round {current} to {requested}")]
    ClockRegression { current: Round, requested: Round },
    #[error("clock overflow")]
    ClockOverflow,
    #[error("query failed: {0}")]
    Query(#[from] StdError),
    #[error("message encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, LedgerError::Rejected { .. })
    }

    /// Innermost cause of a rejection.
    pub fn reason(&self) -> Option<String> {
        match self {
            LedgerError::Rejected { source, .. } => Some(source.root_cause().to_string()),
            _ => None,
        }
    }

    /// The contract's own error value, when the contract refused the call.
    pub fn contract_error<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        match self {
            LedgerError::Rejected { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}
