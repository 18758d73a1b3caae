//! Reservation commands
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use storefront_core::{DayCell, Result, Selection};

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub today: NaiveDate,
    /// `YYYY-MM` of the displayed month
    pub month: String,
    pub selected: NaiveDate,
    pub selection: Option<Selection>,
    /// Booked start times on the selected day
    pub reserved: Vec<NaiveTime>,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReservedTimes {
    All(Vec<String>),
    Day {
        date: NaiveDate,
        times: Vec<NaiveTime>,
    },
}

pub async fn reserved_times(
    state: &AppState,
    date: Option<NaiveDate>,
) -> CommandResult<ReservedTimes> {
    let storefront = state.storefront();
    let result = match date {
        Some(date) => storefront
            .reserved_on(date)
            .await
            .map(|times| ReservedTimes::Day { date, times }),
        None => storefront.reserved_times().await.map(ReservedTimes::All),
    };
    result.into()
}

pub async fn calendar(
    state: &AppState,
    months: u32,
    select: Option<NaiveDate>,
) -> CommandResult<CalendarView> {
    build_calendar(state, months, select).await.into()
}

async fn build_calendar(
    state: &AppState,
    months: u32,
    select: Option<NaiveDate>,
) -> Result<CalendarView> {
    let storefront = state.storefront();

    for _ in 0..months {
        storefront.calendar_next_month()?;
    }

    let selection = match select {
        Some(day) => Some(storefront.select_date(day)?),
        None => None,
    };

    let reserved = match selection {
        Some(Selection::TimeTable(day)) => storefront.reserved_on(day).await?,
        _ => Vec::new(),
    };

    let calendar = storefront.calendar();
    Ok(CalendarView {
        today: calendar.today(),
        month: calendar.current().format("%Y-%m").to_string(),
        selected: calendar.selected(),
        selection,
        reserved,
        days: calendar.month_days(),
    })
}
