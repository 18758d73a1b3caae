//! Reservation calendar state

use chrono::{Datelike, Local, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::Result;

/// What a successful date pick did to the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "date")]
pub enum Selection {
    /// Day is in the displayed month; show its time table
    TimeTable(NaiveDate),
    /// Day belongs to a later month; cursor moved one month forward
    MovedForward(NaiveDate),
    /// Day belongs to an earlier month; cursor moved one month back
    MovedBack(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub bookable: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationCalendar {
    today: NaiveDate,
    /// Month cursor; any day inside the displayed month
    current: NaiveDate,
    selected: NaiveDate,
}

impl ReservationCalendar {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            current: today,
            selected: today,
        }
    }

    /// Calendar anchored on the local date
    pub fn starting_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Step the cursor back a month; refused while it sits on today's month
    pub fn prev_month(&mut self) -> Result<NaiveDate> {
        if self.current <= self.today {
            return Err(BookingError::BeforeCurrentMonth);
        }

        self.current = self
            .current
            .checked_sub_months(Months::new(1))
            .ok_or(BookingError::OutOfRange)?;
        Ok(self.current)
    }

    pub fn next_month(&mut self) -> Result<NaiveDate> {
        self.current = self
            .current
            .checked_add_months(Months::new(1))
            .ok_or(BookingError::OutOfRange)?;
        Ok(self.current)
    }

    /// Bookable means strictly after today and not a Sunday
    pub fn is_bookable(&self, day: NaiveDate) -> bool {
        day > self.today && day.weekday() != Weekday::Sun
    }

    pub fn select_date(&mut self, day: NaiveDate) -> Result<Selection> {
        if day <= self.today {
            return Err(BookingError::NotAfterToday);
        }
        if day.weekday() == Weekday::Sun {
            return Err(BookingError::Sunday);
        }

        let displayed = month_key(self.current);
        let picked = month_key(day);

        let selection = if picked == displayed {
            Selection::TimeTable(day)
        } else if picked > displayed {
            self.next_month()?;
            Selection::MovedForward(day)
        } else {
            self.current = self
                .current
                .checked_sub_months(Months::new(1))
                .ok_or(BookingError::OutOfRange)?;
            Selection::MovedBack(day)
        };

        self.selected = day;
        tracing::debug!(date = %day, ?selection, "Selected reservation date");

        Ok(selection)
    }

    pub fn go_to_today(&mut self) {
        self.current = self.today;
        self.selected = self.today;
    }

    /// Every day of the displayed month
    pub fn month_days(&self) -> Vec<DayCell> {
        let Some(first) = self.current.with_day(1) else {
            return Vec::new();
        };

        first
            .iter_days()
            .take_while(|day| day.month() == first.month())
            .map(|date| DayCell {
                date,
                bookable: self.is_bookable(date),
                selected: date == self.selected,
            })
            .collect()
    }
}

fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}
