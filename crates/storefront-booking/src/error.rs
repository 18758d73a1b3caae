//! Booking error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Cannot go back before the current month")]
    BeforeCurrentMonth,

    #[error("Reservations open from tomorrow")]
    NotAfterToday,

    #[error("No classes on Sundays")]
    Sunday,

    #[error("Date out of range")]
    OutOfRange,

    #[error("Invalid reservation time: {0}")]
    InvalidTime(String),
}
