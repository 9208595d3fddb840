use cosmwasm_std::{Addr, HexBinary};
use cw_storage_plus::Map;
use serde::{Deserialize, Serialize};

/// Per-account record. Present exactly while the account is opted in.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityRecord {
    /// Absent between opt-in and the first `register`.
    pub id_hash: Option<HexBinary>,
}

pub const IDENTITIES: Map<&Addr, IdentityRecord> = Map::new("identities");
