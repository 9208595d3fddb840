use serde::{Deserialize, Serialize};
use std::fmt;

/// Block height.
pub type Round = u64;

/// Host-assigned instance number, from 1 upward. Stable for the life of the
/// ledger, unlike the contract address which the chain picks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub u64);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "app#{}", self.0)
    }
}
