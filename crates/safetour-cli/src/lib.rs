//! Scenario replay for the SafeTourX contracts.
//!
//! A scenario is a JSON document: a genesis block plus an ordered list of
//! steps (deploy, advance the clock, call, clear state, query state). The
//! runner drives one in-process [`Ledger`](ledger_runtime::Ledger) through
//! them and reports every outcome.

pub mod scenario;

pub use ledger_runtime::ContractKind;
pub use scenario::{
    Expect, Outcome, RunSummary, Runner, Scenario, ScenarioError, Step, StepReport,
};
