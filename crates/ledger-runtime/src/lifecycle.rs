use cosmwasm_std::Addr;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// What kind of call the host is delivering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// First deployment of an instance. Only `Ledger::deploy` performs it.
    Create,
    /// Normal operation call carrying the caller's execute message.
    Call,
    OptIn,
    CloseOut,
    Update,
    Delete,
    /// Chain-run clear-state program for one account.
    ClearState,
}

/// Contract entry point a lifecycle is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryPoint {
    Instantiate,
    Execute,
    Migrate,
    Sudo,
}

impl Lifecycle {
    pub fn entry_point(self) -> EntryPoint {
        match self {
            Lifecycle::Create => EntryPoint::Instantiate,
            Lifecycle::Call | Lifecycle::OptIn | Lifecycle::CloseOut => EntryPoint::Execute,
            Lifecycle::Update => EntryPoint::Migrate,
            Lifecycle::Delete | Lifecycle::ClearState => EntryPoint::Sudo,
        }
    }

    /// The message delivered for this lifecycle. `payload` is the caller's
    /// message for `Call` and the migrate message for `Update`; the other
    /// lifecycles have fixed messages. A contract refuses a lifecycle simply
    /// by not accepting its message.
    pub fn message(self, sender: &Addr, payload: Value) -> Value {
        match self {
            Lifecycle::Create | Lifecycle::Call | Lifecycle::Update => payload,
            Lifecycle::OptIn => json!({ "opt_in": {} }),
            Lifecycle::CloseOut => json!({ "close_out": {} }),
            Lifecycle::Delete => json!({ "delete": {} }),
            Lifecycle::ClearState => json!({ "clear_state": { "account": sender } }),
        }
    }
}
