//! All three contracts on one chain, sharing the block clock.

use anyhow::Result;
use booking_escrow::msg::ExecuteMsg as BookingMsg;
use booking_escrow::state::{BookingRecord, BookingStatus};
use cosmwasm_std::{Addr, HexBinary, Uint64};
use identity_registry::msg::ExecuteMsg as IdentityMsg;
use sos_log::msg::ExecuteMsg as SosMsg;
use sos_log::state::AlertSnapshot;
use safetour_integration_tests::{identity_hash, Suite};

#[test]
fn tourist_journey_across_contracts() -> Result<()> {
    let mut s = Suite::new(1, 1_700_000_000)?;
    let (booking, ids, sos) = (s.booking.clone(), s.identity.clone(), s.sos.clone());

    s.at(10);
    s.exec("tourist", &ids, &IdentityMsg::OptIn {})?;
    s.exec(
        "tourist",
        &ids,
        &IdentityMsg::Register {
            id_hash: identity_hash("passport:X123"),
        },
    )?;
    s.exec(
        "tourist",
        &booking,
        &BookingMsg::Book {
            hotel_id: "HOTEL1".to_string(),
            amount: Uint64::new(500),
        },
    )?;

    s.at(50);
    s.exec("tourist", &booking, &BookingMsg::Checkin {})?;
    s.exec(
        "tourist",
        &sos,
        &SosMsg::Sos {
            hash: HexBinary::from(vec![0xde, 0xad]),
        },
    )?;

    assert_eq!(
        s.booking()?,
        Some(BookingRecord {
            hotel_id: "HOTEL1".to_string(),
            amount: Uint64::new(500),
            deadline: 1010,
            status: BookingStatus::Completed,
        })
    );
    assert_eq!(
        s.identity("tourist")?.id_hash,
        Some(identity_hash("passport:X123"))
    );
    assert_eq!(
        s.latest_sos()?,
        Some(AlertSnapshot {
            hash: HexBinary::from(vec![0xde, 0xad]),
            sender: Addr::unchecked("tourist"),
            timestamp: 1_700_000_000 + 49 * 4,
        })
    );
    Ok(())
}

#[test]
fn rejection_in_one_contract_leaves_others_untouched() -> Result<()> {
    let mut s = Suite::new(1, 0)?;
    let (booking, ids, sos) = (s.booking.clone(), s.identity.clone(), s.sos.clone());
    let first = HexBinary::from(vec![1]);
    s.exec("guest", &sos, &SosMsg::Sos { hash: first.clone() })?;
    let sos_raw = s.app.dump_wasm_raw(&sos);

    assert!(s.exec("guest", &booking, &BookingMsg::Refund {}).is_err());
    assert!(s
        .exec(
            "guest",
            &ids,
            &IdentityMsg::Register {
                id_hash: identity_hash("h")
            }
        )
        .is_err());
    // a malformed alert is refused before the contract runs
    assert!(s
        .exec("guest", &sos, &serde_json::json!({ "sos": { "hash": "ab", "extra": 1 } }))
        .is_err());

    assert_eq!(s.app.dump_wasm_raw(&sos), sos_raw);
    assert_eq!(s.latest_sos()?.map(|a| a.hash), Some(first));
    assert_eq!(s.booking()?, None);
    assert!(!s.identity("guest")?.opted_in);
    Ok(())
}
