//! Shared fixtures for cross-contract tests: one `cw-multi-test` chain
//! hosting every SafeTourX contract.

use anyhow::Result;
use booking_escrow::msg::{BookingResponse, QueryMsg as BookingQuery};
use booking_escrow::state::BookingRecord;
use cosmwasm_std::{Addr, Empty, HexBinary, Timestamp};
use cw_multi_test::{App, AppResponse, Executor};
use identity_registry::msg::{IdentityResponse, QueryMsg as IdentityQuery};
use ledger_runtime::ContractKind;
use serde::Serialize;
use sha2::{Digest, Sha256};
use sos_log::msg::{LatestResponse, QueryMsg as SosQuery};
use sos_log::state::AlertSnapshot;

pub const OPERATOR: &str = "tourism-board";
pub const ADMIN: &str = "chain-admin";

pub struct Suite {
    pub app: App,
    pub booking: Addr,
    pub identity: Addr,
    pub sos: Addr,
}

impl Suite {
    /// Chain at `height` with block time `seconds`.
    pub fn new(height: u64, seconds: u64) -> Result<Self> {
        let mut app = App::default();
        app.update_block(|b| {
            b.height = height;
            b.time = Timestamp::from_seconds(seconds);
        });
        let operator = Addr::unchecked(OPERATOR);
        let mut deploy = |kind: ContractKind| -> Result<Addr> {
            let code_id = app.store_code(kind.code());
            app.instantiate_contract(
                code_id,
                operator.clone(),
                &Empty {},
                &[],
                kind.label(),
                Some(ADMIN.to_string()),
            )
        };
        let booking = deploy(ContractKind::BookingEscrow)?;
        let identity = deploy(ContractKind::IdentityRegistry)?;
        let sos = deploy(ContractKind::SosLog)?;
        Ok(Self {
            app,
            booking,
            identity,
            sos,
        })
    }

    /// Move to block `height`, four seconds per block.
    pub fn at(&mut self, height: u64) {
        self.app.update_block(|b| {
            let elapsed = height.saturating_sub(b.height);
            b.time = b.time.plus_seconds(elapsed * 4);
            b.height = height;
        });
    }

    pub fn exec(
        &mut self,
        sender: &str,
        contract: &Addr,
        msg: &(impl Serialize + std::fmt::Debug),
    ) -> Result<AppResponse> {
        self.app
            .execute_contract(Addr::unchecked(sender), contract.clone(), msg, &[])
    }

    pub fn booking(&self) -> Result<Option<BookingRecord>> {
        let res: BookingResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.booking, &BookingQuery::Booking {})?;
        Ok(res.booking)
    }

    pub fn identity(&self, account: &str) -> Result<IdentityResponse> {
        Ok(self.app.wrap().query_wasm_smart(
            &self.identity,
            &IdentityQuery::Identity {
                account: Addr::unchecked(account),
            },
        )?)
    }

    pub fn latest_sos(&self) -> Result<Option<AlertSnapshot>> {
        let res: LatestResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.sos, &SosQuery::Latest {})?;
        Ok(res.latest)
    }
}

/// Off-chain identity digest: SHA-256 of the profile document.
pub fn identity_hash(profile: &str) -> HexBinary {
    HexBinary::from(Sha256::digest(profile.as_bytes()).to_vec())
}
