//! Booked time slots

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::BookingError;
use crate::Result;

const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse a backend reservation time. Offsets are dropped; the shop works in
/// its own local time.
pub fn parse_reserved_time(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| BookingError::InvalidTime(raw.to_string()))
}

/// Booked start times on `day`, earliest first
pub fn reserved_on(day: NaiveDate, reserved: &[String]) -> Vec<NaiveTime> {
    let mut times: Vec<NaiveTime> = reserved
        .iter()
        .filter_map(|raw| match parse_reserved_time(raw) {
            Ok(dt) => Some(dt),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unparsable reservation time");
                None
            }
        })
        .filter(|dt| dt.date() == day)
        .map(|dt| dt.time())
        .collect();

    times.sort();
    times.dedup();
    times
}
