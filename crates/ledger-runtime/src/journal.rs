//! Append-only record of accepted calls. Contracts keep only their latest
//! state; history lives here. Rejected calls are never recorded.

use cosmwasm_std::Addr;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codes::ContractKind;
use crate::lifecycle::Lifecycle;
use crate::types::{AppId, Round};

/// One accepted call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnRecord {
    pub seq: u64,
    pub round: Round,
    /// Block time in seconds.
    pub timestamp: u64,
    pub app_id: AppId,
    pub contract: ContractKind,
    pub sender: Addr,
    pub lifecycle: Lifecycle,
    /// The message delivered to the contract.
    pub msg: Value,
    /// SHA-256 over the instance's raw storage after the call, hex.
    pub state_digest: String,
}

#[derive(Clone, Debug, Default)]
pub struct Journal {
    records: Vec<TxnRecord>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sequence number to hand out.
    pub fn next_seq(&self) -> u64 {
        self.records.len() as u64 + 1
    }

    pub(crate) fn append(&mut self, record: TxnRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TxnRecord] {
        &self.records
    }

    pub fn for_app(&self, app: AppId) -> impl Iterator<Item = &TxnRecord> {
        self.records.iter().filter(move |r| r.app_id == app)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
