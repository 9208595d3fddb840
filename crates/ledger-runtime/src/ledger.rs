use std::collections::BTreeMap;

use cosmwasm_std::{Addr, Timestamp};
use cw_multi_test::{App, AppResponse, Executor};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::codes::ContractKind;
use crate::config::GenesisConfig;
use crate::error::LedgerError;
use crate::journal::{Journal, TxnRecord};
use crate::lifecycle::{EntryPoint, Lifecycle};
use crate::types::{AppId, Round};

/// Contract admin of every instance. Update is submitted under it on behalf
/// of whichever account asked.
const HOST_ADMIN: &str = "safetour-host";

const NANOS_PER_SECOND: u64 = 1_000_000_000;

#[derive(Clone, Debug)]
struct Hosted {
    kind: ContractKind,
    addr: Addr,
    code_id: u64,
}

pub struct Ledger {
    app: App,
    admin: Addr,
    seconds_per_round: u64,
    codes: BTreeMap<ContractKind, u64>,
    apps: BTreeMap<AppId, Hosted>,
    next_id: u64,
    journal: Journal,
}

fn block_time(seconds: u64) -> Result<Timestamp, LedgerError> {
    seconds
        .checked_mul(NANOS_PER_SECOND)
        .map(Timestamp::from_nanos)
        .ok_or(LedgerError::ClockOverflow)
}

impl Ledger {
    pub fn new(genesis: &GenesisConfig) -> Result<Self, LedgerError> {
        let time = block_time(genesis.timestamp)?;
        let mut app = App::default();
        app.update_block(|block| {
            block.height = genesis.round;
            block.time = time;
        });
        Ok(Self {
            app,
            admin: Addr::unchecked(HOST_ADMIN),
            seconds_per_round: genesis.seconds_per_round,
            codes: BTreeMap::new(),
            apps: BTreeMap::new(),
            next_id: 1,
            journal: Journal::new(),
        })
    }

    pub fn round(&self) -> Round {
        self.app.block_info().height
    }

    /// Block time in seconds.
    pub fn timestamp(&self) -> u64 {
        self.app.block_info().time.seconds()
    }

    /// Move forward `rounds` blocks; block time moves `seconds_per_round`
    /// per block.
    pub fn advance(&mut self, rounds: u64) -> Result<(), LedgerError> {
        let block = self.app.block_info();
        let height = block
            .height
            .checked_add(rounds)
            .ok_or(LedgerError::ClockOverflow)?;
        let seconds = rounds
            .checked_mul(self.seconds_per_round)
            .and_then(|elapsed| block.time.seconds().checked_add(elapsed))
            .ok_or(LedgerError::ClockOverflow)?;
        let time = block_time(seconds)?;
        self.app.update_block(|b| {
            b.height = height;
            b.time = time;
        });
        Ok(())
    }

    pub fn advance_to(&mut self, round: Round) -> Result<(), LedgerError> {
        let current = self.round();
        if round < current {
            return Err(LedgerError::ClockRegression {
                current,
                requested: round,
            });
        }
        self.advance(round - current)
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn contains(&self, app: AppId) -> bool {
        self.apps.contains_key(&app)
    }

    /// Chain address of a live instance.
    pub fn address(&self, app: AppId) -> Result<&Addr, LedgerError> {
        self.hosted(app).map(|h| &h.addr)
    }

    pub fn kind(&self, app: AppId) -> Result<ContractKind, LedgerError> {
        self.hosted(app).map(|h| h.kind)
    }

    /// Instantiate a new instance of `kind`. The only way to run `Create`.
    pub fn deploy(&mut self, kind: ContractKind, creator: &Addr) -> Result<AppId, LedgerError> {
        let app_id = AppId(self.next_id);
        let code_id = match self.codes.get(&kind) {
            Some(id) => *id,
            None => {
                let id = self.app.store_code(kind.code());
                self.codes.insert(kind, id);
                id
            }
        };
        let msg = Value::Object(Default::default());
        let addr = self
            .app
            .instantiate_contract(
                code_id,
                creator.clone(),
                &msg,
                &[],
                kind.label(),
                Some(self.admin.to_string()),
            )
            .map_err(|source| {
                warn!(contract = kind.label(), %creator, reason = %source.root_cause(), "deploy rejected");
                LedgerError::Rejected {
                    app: app_id,
                    lifecycle: Lifecycle::Create,
                    source,
                }
            })?;
        self.next_id += 1;
        self.apps.insert(
            app_id,
            Hosted {
                kind,
                addr: addr.clone(),
                code_id,
            },
        );
        info!(contract = kind.label(), app = %app_id, %addr, %creator, "instance deployed");
        self.record(app_id, kind, &addr, creator, Lifecycle::Create, msg);
        Ok(app_id)
    }

    /// Deliver one lifecycle call. On rejection nothing the contract wrote
    /// is kept and the journal is untouched.
    pub fn call(
        &mut self,
        app: AppId,
        sender: &Addr,
        lifecycle: Lifecycle,
        payload: Value,
    ) -> Result<TxnRecord, LedgerError> {
        let hosted = self.hosted(app)?.clone();
        let msg = lifecycle.message(sender, payload);
        let outcome: anyhow::Result<AppResponse> = match lifecycle.entry_point() {
            EntryPoint::Instantiate => return Err(LedgerError::AlreadyCreated(app)),
            EntryPoint::Execute => {
                self.app
                    .execute_contract(sender.clone(), hosted.addr.clone(), &msg, &[])
            }
            EntryPoint::Migrate => self.app.migrate_contract(
                self.admin.clone(),
                hosted.addr.clone(),
                &msg,
                hosted.code_id,
            ),
            EntryPoint::Sudo => self.app.wasm_sudo(hosted.addr.clone(), &msg),
        };

        match outcome {
            Ok(_) => {
                let record =
                    self.record(app, hosted.kind, &hosted.addr, sender, lifecycle, msg);
                if lifecycle == Lifecycle::Delete {
                    self.apps.remove(&app);
                    info!(contract = hosted.kind.label(), %app, %sender, "instance deleted");
                }
                info!(
                    contract = hosted.kind.label(),
                    %app,
                    %sender,
                    ?lifecycle,
                    round = record.round,
                    seq = record.seq,
                    "call accepted"
                );
                Ok(record)
            }
            Err(source) => {
                warn!(
                    contract = hosted.kind.label(),
                    %app,
                    %sender,
                    ?lifecycle,
                    round = self.round(),
                    reason = %source.root_cause(),
                    "call rejected"
                );
                Err(LedgerError::Rejected {
                    app,
                    lifecycle,
                    source,
                })
            }
        }
    }

    /// Normal call with a typed execute message.
    pub fn execute<T: Serialize>(
        &mut self,
        app: AppId,
        sender: &Addr,
        msg: &T,
    ) -> Result<TxnRecord, LedgerError> {
        let payload = serde_json::to_value(msg)?;
        self.call(app, sender, Lifecycle::Call, payload)
    }

    pub fn opt_in(&mut self, app: AppId, sender: &Addr) -> Result<TxnRecord, LedgerError> {
        self.call(app, sender, Lifecycle::OptIn, Value::Null)
    }

    pub fn close_out(&mut self, app: AppId, sender: &Addr) -> Result<TxnRecord, LedgerError> {
        self.call(app, sender, Lifecycle::CloseOut, Value::Null)
    }

    pub fn update(&mut self, app: AppId, sender: &Addr) -> Result<TxnRecord, LedgerError> {
        self.call(app, sender, Lifecycle::Update, Value::Object(Default::default()))
    }

    pub fn delete(&mut self, app: AppId, sender: &Addr) -> Result<TxnRecord, LedgerError> {
        self.call(app, sender, Lifecycle::Delete, Value::Null)
    }

    /// Run the clear-state program for `sender`. Contracts accept it
    /// unconditionally.
    pub fn clear_state(&mut self, app: AppId, sender: &Addr) -> Result<TxnRecord, LedgerError> {
        self.call(app, sender, Lifecycle::ClearState, Value::Null)
    }

    /// Smart query against a live instance.
    pub fn query<T: DeserializeOwned>(
        &self,
        app: AppId,
        msg: &impl Serialize,
    ) -> Result<T, LedgerError> {
        let addr = self.address(app)?;
        Ok(self.app.wrap().query_wasm_smart(addr.as_str(), msg)?)
    }

    /// SHA-256 over the instance's raw storage, hex.
    pub fn state_digest(&self, app: AppId) -> Result<String, LedgerError> {
        let addr = self.address(app)?;
        Ok(self.digest(addr))
    }

    fn digest(&self, addr: &Addr) -> String {
        let mut hasher = Sha256::new();
        for (key, value) in self.app.dump_wasm_raw(addr) {
            hasher.update((key.len() as u64).to_be_bytes());
            hasher.update(&key);
            hasher.update((value.len() as u64).to_be_bytes());
            hasher.update(&value);
        }
        hex::encode(hasher.finalize())
    }

    fn hosted(&self, app: AppId) -> Result<&Hosted, LedgerError> {
        self.apps.get(&app).ok_or(LedgerError::UnknownApp(app))
    }

    fn record(
        &mut self,
        app_id: AppId,
        contract: ContractKind,
        addr: &Addr,
        sender: &Addr,
        lifecycle: Lifecycle,
        msg: Value,
    ) -> TxnRecord {
        let record = TxnRecord {
            seq: self.journal.next_seq(),
            round: self.round(),
            timestamp: self.timestamp(),
            app_id,
            contract,
            sender: sender.clone(),
            lifecycle,
            msg,
            state_digest: self.digest(addr),
        };
        self.journal.append(record.clone());
        record
    }
}
