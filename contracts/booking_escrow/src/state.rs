use cosmwasm_std::Uint64;
use cw_storage_plus::Item;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Completed,
    Refunded,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }
}

/// Field names are the storage keys of the record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BookingRecord {
    pub hotel_id: String,
    pub amount: Uint64,
    /// Last block height at which a refund is still refused.
    pub deadline: u64,
    pub status: BookingStatus,
}

pub const BOOKING: Item<BookingRecord> = Item::new("booking");
