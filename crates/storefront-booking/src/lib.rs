//! Storefront Class Booking
//!
//! Date selection rules for the reservation calendar:
//! - the month cursor never goes back past the current month
//! - classes are bookable from tomorrow on
//! - no classes on Sundays
//! - picking a day in a neighbouring month moves the cursor there

mod calendar;
mod error;
mod slots;

pub use calendar::{DayCell, ReservationCalendar, Selection};
pub use error::BookingError;
pub use slots::{parse_reserved_time, reserved_on};

pub type Result<T> = std::result::Result<T, BookingError>;
