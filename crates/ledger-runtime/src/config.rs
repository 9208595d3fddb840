use serde::{Deserialize, Serialize};

use crate::types::Round;

/// Starting block of the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    pub round: Round,
    /// Block time in seconds.
    pub timestamp: u64,
    /// Seconds of block time added per round when the clock is advanced.
    pub seconds_per_round: u64,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            round: 1,
            timestamp: 0,
            seconds_per_round: 4,
        }
    }
}
