//! End-to-end escrow timelines on a shared chain.

use anyhow::Result;
use booking_escrow::msg::ExecuteMsg;
use booking_escrow::state::BookingStatus;
use booking_escrow::ContractError;
use cosmwasm_std::Uint64;
use safetour_integration_tests::Suite;

fn book(hotel: &str, amount: u64) -> ExecuteMsg {
    ExecuteMsg::Book {
        hotel_id: hotel.to_string(),
        amount: Uint64::new(amount),
    }
}

fn status(s: &Suite) -> Result<Option<BookingStatus>> {
    Ok(s.booking()?.map(|b| b.status))
}

#[test]
fn checkin_then_late_refund() -> Result<()> {
    let mut s = Suite::new(1, 0)?;
    let booking = s.booking.clone();

    s.at(10);
    s.exec("guest", &booking, &book("HOTEL1", 500))?;
    s.at(50);
    s.exec("guest", &booking, &ExecuteMsg::Checkin {})?;
    assert_eq!(status(&s)?, Some(BookingStatus::Completed));

    s.at(2000);
    let err = s
        .exec("guest", &booking, &ExecuteMsg::Refund {})
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::NotPending {
            status: BookingStatus::Completed
        })
    );
    assert_eq!(status(&s)?, Some(BookingStatus::Completed));
    Ok(())
}

#[test]
fn refund_needs_height_past_deadline() -> Result<()> {
    let mut s = Suite::new(1, 0)?;
    let booking = s.booking.clone();

    s.at(5);
    s.exec("guest", &booking, &book("HOTEL2", 100))?;
    assert_eq!(s.booking()?.map(|b| b.deadline), Some(1005));

    s.at(1005);
    let err = s
        .exec("guest", &booking, &ExecuteMsg::Refund {})
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::RefundTooEarly {
            deadline: 1005,
            height: 1005
        })
    );
    s.at(1006);
    s.exec("guest", &booking, &ExecuteMsg::Refund {})?;
    assert_eq!(status(&s)?, Some(BookingStatus::Refunded));

    // terminal: a second refund or a checkin is refused
    assert!(s.exec("guest", &booking, &ExecuteMsg::Refund {}).is_err());
    assert!(s.exec("guest", &booking, &ExecuteMsg::Checkin {}).is_err());
    assert_eq!(status(&s)?, Some(BookingStatus::Refunded));
    Ok(())
}

#[test]
fn anyone_may_rebook_over_a_finished_booking() -> Result<()> {
    let mut s = Suite::new(1, 0)?;
    let booking = s.booking.clone();
    s.at(10);
    s.exec("a", &booking, &book("HOTEL1", 500))?;
    s.exec("a", &booking, &ExecuteMsg::Checkin {})?;

    s.at(20);
    s.exec("stranger", &booking, &book("HOTEL3", 1))?;
    let record = s
        .booking()?
        .ok_or_else(|| anyhow::anyhow!("booking missing"))?;
    assert_eq!(record.status, BookingStatus::Pending);
    assert_eq!(record.hotel_id, "HOTEL3");
    assert_eq!(record.amount, Uint64::new(1));
    assert_eq!(record.deadline, 1020);
    Ok(())
}

#[test]
fn deadline_overflow_rolls_back() -> Result<()> {
    let mut s = Suite::new(u64::MAX - 10, 0)?;
    let booking = s.booking.clone();
    let err = s.exec("guest", &booking, &book("HOTEL1", 5)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContractError>(),
        Some(ContractError::Overflow(_))
    ));
    assert_eq!(s.booking()?, None);
    Ok(())
}
