//! Validation errors for reservation records.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("guest name must not be empty")]
    EmptyGuestName,

    #[error("check-out ({check_out}) must be after check-in ({check_in})")]
    InvalidDates {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("a reservation needs at least one guest")]
    NoGuests,

    #[error("{guests} guests exceed the limit of {max}")]
    TooManyGuests { guests: u32, max: u32 },

    #[error("{nights} nights exceed the limit of {max}")]
    StayTooLong { nights: u32, max: u32 },

    #[error("deposit {deposit} exceeds total price {total}")]
    DepositExceedsTotal { deposit: u64, total: u64 },

    #[error("cannot parse date: {0}")]
    InvalidDate(String),

    #[error("reservation not found: {0}")]
    NotFound(String),
}
