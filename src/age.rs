//! age.rs
//!
//! Calendar age in the form "X years, Y months, Z days", shown above the
//! week grid.
//!
//! Chrono has no year/month/day diff, so the borrowing is done by hand:
//!   • day underflow borrows the length of the month before `today`
//!   • month underflow borrows a year

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarAge {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl CalendarAge {
    pub fn between(birth: NaiveDate, today: NaiveDate) -> Self {
        let mut years = today.year() - birth.year();
        let mut months = today.month() as i32 - birth.month() as i32;
        let mut days = today.day() as i32 - birth.day() as i32;

        if days < 0 {
            months -= 1;
            let (prev_year, prev_month) = match today.month() {
                1 => (today.year() - 1, 12),
                m => (today.year(), m - 1),
            };
            days += days_in_month(prev_year, prev_month) as i32;
        }

        if months < 0 {
            years -= 1;
            months += 12;
        }

        Self {
            years,
            months,
            days,
        }
    }
}

impl fmt::Display for CalendarAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

fn plural(n: i32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Length of `month` in `year`, leap years included.
fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = match month {
        12 => NaiveDate::from_ymd_opt(year + 1, 1, 1),
        m => NaiveDate::from_ymd_opt(year, m + 1, 1),
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}
