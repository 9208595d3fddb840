//! Opt-in, close-out, update, delete and clear-state routed by the host.

use anyhow::Result;
use cosmwasm_std::Addr;
use identity_registry::msg::{ExecuteMsg as IdentityMsg, IdentityResponse, QueryMsg as IdentityQuery};
use ledger_runtime::{ContractKind, GenesisConfig, Ledger, LedgerError, Lifecycle};
use safetour_integration_tests::{identity_hash, OPERATOR};
use serde_json::Value;

fn ledger() -> Result<Ledger> {
    Ok(Ledger::new(&GenesisConfig::default())?)
}

#[test]
fn lifecycle_policies_per_contract() -> Result<()> {
    let mut ledger = ledger()?;
    let operator = Addr::unchecked(OPERATOR);
    let admin = Addr::unchecked("admin");
    let booking = ledger.deploy(ContractKind::BookingEscrow, &operator)?;
    let identity = ledger.deploy(ContractKind::IdentityRegistry, &operator)?;
    let sos = ledger.deploy(ContractKind::SosLog, &operator)?;

    for app in [booking, sos] {
        for lifecycle in [Lifecycle::OptIn, Lifecycle::CloseOut, Lifecycle::Delete] {
            let err = ledger.call(app, &admin, lifecycle, Value::Null).unwrap_err();
            assert!(err.is_rejection(), "{app} accepted {lifecycle:?}");
        }
        ledger.update(app, &admin)?;
    }

    ledger.update(identity, &admin)?;
    ledger.opt_in(identity, &admin)?;
    ledger.close_out(identity, &admin)?;
    ledger.delete(identity, &admin)?;
    assert!(!ledger.contains(identity));
    assert!(matches!(
        ledger.opt_in(identity, &admin),
        Err(LedgerError::UnknownApp(_))
    ));

    // creation happens once, at deploy
    assert!(matches!(
        ledger.call(booking, &admin, Lifecycle::Create, Value::Null),
        Err(LedgerError::AlreadyCreated(_))
    ));
    Ok(())
}

#[test]
fn clear_state_is_always_accepted() -> Result<()> {
    let mut ledger = ledger()?;
    let operator = Addr::unchecked(OPERATOR);
    let identity = ledger.deploy(ContractKind::IdentityRegistry, &operator)?;
    let booking = ledger.deploy(ContractKind::BookingEscrow, &operator)?;
    let a = Addr::unchecked("a");

    ledger.opt_in(identity, &a)?;
    ledger.execute(identity, &a, &IdentityMsg::Register { id_hash: identity_hash("h") })?;

    let record = ledger.clear_state(identity, &a)?;
    assert_eq!(record.lifecycle, Lifecycle::ClearState);
    let after: IdentityResponse =
        ledger.query(identity, &IdentityQuery::Identity { account: a.clone() })?;
    assert!(!after.opted_in);

    // never opted in, still accepted
    let record = ledger.clear_state(booking, &Addr::unchecked("b"))?;
    assert_eq!(record.lifecycle, Lifecycle::ClearState);
    ledger.clear_state(identity, &Addr::unchecked("b"))?;
    Ok(())
}
