//! Per-account identity records.

use anyhow::Result;
use identity_registry::msg::ExecuteMsg;
use identity_registry::ContractError;
use safetour_integration_tests::{identity_hash, Suite};

#[test]
fn accounts_do_not_see_each_other() -> Result<()> {
    let mut s = Suite::new(1, 0)?;
    let ids = s.identity.clone();
    let (h1, h2) = (identity_hash("alice"), identity_hash("bob"));

    s.exec("a", &ids, &ExecuteMsg::OptIn {})?;
    s.exec("b", &ids, &ExecuteMsg::OptIn {})?;
    s.exec("a", &ids, &ExecuteMsg::Register { id_hash: h1.clone() })?;
    s.exec("b", &ids, &ExecuteMsg::Register { id_hash: h2.clone() })?;

    assert_eq!(s.identity("a")?.id_hash, Some(h1));
    assert_eq!(s.identity("b")?.id_hash, Some(h2));
    assert!(!s.identity("c")?.opted_in);
    Ok(())
}

#[test]
fn update_overwrites_and_rejoin_starts_empty() -> Result<()> {
    let mut s = Suite::new(1, 0)?;
    let ids = s.identity.clone();
    s.exec("a", &ids, &ExecuteMsg::OptIn {})?;
    s.exec("a", &ids, &ExecuteMsg::Register { id_hash: identity_hash("old") })?;
    s.exec("a", &ids, &ExecuteMsg::Update { id_hash: identity_hash("new") })?;
    assert_eq!(s.identity("a")?.id_hash, Some(identity_hash("new")));

    s.exec("a", &ids, &ExecuteMsg::CloseOut {})?;
    let err = s
        .exec("a", &ids, &ExecuteMsg::Update { id_hash: identity_hash("x") })
        .unwrap_err();
    assert_eq!(err.downcast_ref::<ContractError>(), Some(&ContractError::NotOptedIn));

    s.exec("a", &ids, &ExecuteMsg::OptIn {})?;
    let record = s.identity("a")?;
    assert!(record.opted_in);
    assert_eq!(record.id_hash, None);
    Ok(())
}

#[test]
fn wrong_argument_count_is_refused() -> Result<()> {
    let mut s = Suite::new(1, 0)?;
    let ids = s.identity.clone();
    s.exec("a", &ids, &ExecuteMsg::OptIn {})?;

    let extra = serde_json::json!({ "register": { "id_hash": "ab", "note": "x" } });
    assert!(s.exec("a", &ids, &extra).is_err());
    let missing = serde_json::json!({ "register": {} });
    assert!(s.exec("a", &ids, &missing).is_err());
    assert_eq!(s.identity("a")?.id_hash, None);
    Ok(())
}
