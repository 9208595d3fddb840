use cosmwasm_std::Addr;
use ledger_runtime::{
    AppId, ContractKind, GenesisConfig, Ledger, LedgerError, Lifecycle, Round, TxnRecord,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("step {step}: unknown app alias {alias:?}")]
    UnknownAlias { step: usize, alias: String },
    #[error("step {step}: app alias {alias:?} already in use")]
    DuplicateAlias { step: usize, alias: String },
    #[error("step {step}: {source}")]
    Ledger {
        step: usize,
        #[source]
        source: LedgerError,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expect {
    Accept,
    Reject,
}

fn normal_call() -> Lifecycle {
    Lifecycle::Call
}

fn empty_msg() -> Value {
    json!({})
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Deploy {
        contract: ContractKind,
        alias: String,
        creator: Addr,
    },
    Advance {
        rounds: u64,
    },
    AdvanceTo {
        round: Round,
    },
    Call {
        app: String,
        sender: Addr,
        #[serde(default = "normal_call")]
        lifecycle: Lifecycle,
        /// Execute message for `call`, migrate message for `update`. Ignored
        /// by the other lifecycles.
        #[serde(default = "empty_msg")]
        msg: Value,
        #[serde(default)]
        expect: Option<Expect>,
    },
    ClearState {
        app: String,
        sender: Addr,
    },
    Show {
        app: String,
        query: Value,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub genesis: GenesisConfig,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Deployed {
        alias: String,
        contract: ContractKind,
        app_id: AppId,
        address: Addr,
    },
    Clock {
        timestamp: u64,
    },
    Accepted {
        receipt: TxnRecord,
    },
    Rejected {
        reason: String,
    },
    State {
        alias: String,
        /// Query answer; `null` once the instance has been deleted.
        state: Value,
    },
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub round: Round,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Expect>,
}

impl StepReport {
    /// The step carried an expectation and the outcome contradicts it.
    pub fn is_mismatch(&self) -> bool {
        match (&self.expected, &self.outcome) {
            (Some(Expect::Accept), Outcome::Rejected { .. }) => true,
            (Some(Expect::Reject), Outcome::Accepted { .. }) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub steps: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Indices of steps whose outcome contradicted `expect`.
    pub mismatches: Vec<usize>,
}

/// Drives one ledger through scenario steps.
pub struct Runner {
    ledger: Ledger,
    apps: BTreeMap<String, AppId>,
    reports: Vec<StepReport>,
}

impl Runner {
    pub fn new(genesis: &GenesisConfig) -> Result<Self, LedgerError> {
        Ok(Self {
            ledger: Ledger::new(genesis)?,
            apps: BTreeMap::new(),
            reports: Vec::new(),
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn app(&self, alias: &str) -> Option<AppId> {
        self.apps.get(alias).copied()
    }

    pub fn reports(&self) -> &[StepReport] {
        &self.reports
    }

    /// Run every step in order. Rejected calls are outcomes, not errors;
    /// only malformed scenarios abort the run.
    pub fn run(&mut self, steps: &[Step]) -> Result<RunSummary, ScenarioError> {
        let mut summary = RunSummary::default();
        for (index, step) in steps.iter().enumerate() {
            let report = self.step(index, step)?;
            summary.steps += 1;
            match report.outcome {
                Outcome::Accepted { .. } => summary.accepted += 1,
                Outcome::Rejected { .. } => summary.rejected += 1,
                _ => {}
            }
            if report.is_mismatch() {
                warn!(step = index, expected = ?report.expected, "outcome contradicts expectation");
                summary.mismatches.push(index);
            }
            self.reports.push(report);
        }
        Ok(summary)
    }

    pub fn step(&mut self, index: usize, step: &Step) -> Result<StepReport, ScenarioError> {
        debug!(step = index, ?step, "replaying");
        let fatal = |source| ScenarioError::Ledger {
            step: index,
            source,
        };
        let mut expected = None;
        let outcome = match step {
            Step::Deploy {
                contract,
                alias,
                creator,
            } => {
                if self.apps.contains_key(alias) {
                    return Err(ScenarioError::DuplicateAlias {
                        step: index,
                        alias: alias.clone(),
                    });
                }
                let app_id = self.ledger.deploy(*contract, creator).map_err(fatal)?;
                self.apps.insert(alias.clone(), app_id);
                Outcome::Deployed {
                    alias: alias.clone(),
                    contract: *contract,
                    app_id,
                    address: self.ledger.address(app_id).map_err(fatal)?.clone(),
                }
            }
            Step::Advance { rounds } => {
                self.ledger.advance(*rounds).map_err(fatal)?;
                Outcome::Clock {
                    timestamp: self.ledger.timestamp(),
                }
            }
            Step::AdvanceTo { round } => {
                self.ledger.advance_to(*round).map_err(fatal)?;
                Outcome::Clock {
                    timestamp: self.ledger.timestamp(),
                }
            }
            Step::Call {
                app,
                sender,
                lifecycle,
                msg,
                expect,
            } => {
                expected = *expect;
                let app_id = self.resolve(index, app)?;
                settle(self.ledger.call(app_id, sender, *lifecycle, msg.clone()))
            }
            Step::ClearState { app, sender } => {
                let app_id = self.resolve(index, app)?;
                settle(self.ledger.clear_state(app_id, sender))
            }
            Step::Show { app, query } => {
                let app_id = self.resolve(index, app)?;
                let state = if self.ledger.contains(app_id) {
                    self.ledger.query::<Value>(app_id, query).map_err(fatal)?
                } else {
                    Value::Null
                };
                Outcome::State {
                    alias: app.clone(),
                    state,
                }
            }
        };
        Ok(StepReport {
            index,
            round: self.ledger.round(),
            outcome,
            expected,
        })
    }

    fn resolve(&self, step: usize, alias: &str) -> Result<AppId, ScenarioError> {
        self.app(alias).ok_or_else(|| ScenarioError::UnknownAlias {
            step,
            alias: alias.to_string(),
        })
    }
}

/// Calls against deleted instances count as rejections too.
fn settle(result: Result<TxnRecord, LedgerError>) -> Outcome {
    match result {
        Ok(receipt) => Outcome::Accepted { receipt },
        Err(e) => Outcome::Rejected {
            reason: e.to_string(),
        },
    }
}
