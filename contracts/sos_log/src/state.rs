use cosmwasm_std::{Addr, HexBinary};
use cw_storage_plus::Item;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AlertSnapshot {
    /// Digest of (timestamp, rounded coordinates, user id), computed off-chain.
    #[serde(rename = "latest_sos_hash")]
    pub hash: HexBinary,
    #[serde(rename = "latest_sos_sender")]
    pub sender: Addr,
    /// Block time in seconds.
    #[serde(rename = "latest_sos_time")]
    pub timestamp: u64,
}

pub const LATEST: Item<AlertSnapshot> = Item::new("latest_sos");
