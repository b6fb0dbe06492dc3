//! time_utils.rs
//!
//! Pure temporal arithmetic behind the week calendar and the countdown.
//!
//! Every function takes the current instant as an explicit `now` argument and
//! is total: any representable instant and any year count (zero and negative
//! included) yields a well-defined value.
//!
//! Two approximations are deliberate and observable:
//!   • the remaining-time breakdown uses 30.44-day months, 365.25-day years
//!     and `days mod 30`, not calendar-accurate month lengths
//!   • shared lived weeks round down while shared remaining weeks round up,
//!     each from the `now` split point, so their sum can miss the total by one

use chrono::{DateTime, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

pub const MS_PER_WEEK: i64 = 7 * 24 * 60 * 60 * 1000;
const NS_PER_WEEK: i128 = MS_PER_WEEK as i128 * 1_000_000;

/// Remaining lifetime split into calendar-ish units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemainingTime {
    pub years: u64,
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl RemainingTime {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Overlap of two life intervals, counted in weeks.
///
/// When the intervals do not overlap `start > end` and every count is zero;
/// the dates are then diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedLifeWeeks {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_shared_weeks: u64,
    pub lived_shared_weeks: u64,
    pub remaining_shared_weeks: u64,
}

impl SharedLifeWeeks {
    pub fn overlaps(&self) -> bool {
        self.start <= self.end
    }
}

/// Advances the year field of `instant` by `years`.
///
/// Feb 29 landing on a non-leap year is clamped to Feb 28, time of day kept.
/// Results outside chrono's range saturate to its bounds.
pub fn add_years(instant: DateTime<Utc>, years: i32) -> DateTime<Utc> {
    let months = u32::try_from(years.unsigned_abs())
        .ok()
        .and_then(|y| y.checked_mul(12))
        .map(Months::new);

    let shifted = match months {
        Some(m) if years >= 0 => instant.checked_add_months(m),
        Some(m) => instant.checked_sub_months(m),
        None => None,
    };

    shifted.unwrap_or(if years >= 0 {
        DateTime::<Utc>::MAX_UTC
    } else {
        DateTime::<Utc>::MIN_UTC
    })
}

/// Whole weeks elapsed since `birth_date`. Negative for a future birth date.
pub fn lived_weeks(birth_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    span_nanos(now - birth_date).div_euclid(NS_PER_WEEK) as i64
}

/// Time left until `birth_date + life_expectancy_years`.
pub fn remaining_time(
    birth_date: DateTime<Utc>,
    life_expectancy_years: i32,
    now: DateTime<Utc>,
) -> RemainingTime {
    let death_date = add_years(birth_date, life_expectancy_years);
    if now > death_date {
        return RemainingTime::default();
    }

    let diff_ms = (death_date - now).num_milliseconds().max(0) as u64;

    let total_seconds = diff_ms / 1000;
    let total_minutes = total_seconds / 60;
    let total_hours = total_minutes / 60;
    let total_days = total_hours / 24;
    // floor(days / 30.44) and floor(days / 365.25) in exact integer form
    let total_months = total_days * 100 / 3044;
    let years = total_days * 100 / 36525;

    RemainingTime {
        years,
        months: total_months % 12,
        days: total_days % 30,
        hours: total_hours % 24,
        minutes: total_minutes % 60,
        seconds: total_seconds % 60,
    }
}

/// Weeks shared by two lives, and how many of them are behind or ahead of `now`.
pub fn shared_life_weeks(
    birth_date_a: DateTime<Utc>,
    life_expectancy_a: i32,
    birth_date_b: DateTime<Utc>,
    life_expectancy_b: i32,
    now: DateTime<Utc>,
) -> SharedLifeWeeks {
    let end_a = add_years(birth_date_a, life_expectancy_a);
    let end_b = add_years(birth_date_b, life_expectancy_b);

    let start = birth_date_a.max(birth_date_b);
    let end = end_a.min(end_b);

    if start > end {
        return SharedLifeWeeks {
            start,
            end,
            total_shared_weeks: 0,
            lived_shared_weeks: 0,
            remaining_shared_weeks: 0,
        };
    }

    let total_shared_weeks = weeks_ceil(end - start);

    let lived_shared_weeks = if now > start {
        weeks_floor(now.min(end) - start).min(total_shared_weeks)
    } else {
        0
    };

    let remaining_shared_weeks = if now < end {
        weeks_ceil(end - now.max(start))
    } else {
        0
    };

    SharedLifeWeeks {
        start,
        end,
        total_shared_weeks,
        lived_shared_weeks,
        remaining_shared_weeks,
    }
}

// Exact length in nanoseconds, sub-millisecond spans included.
fn span_nanos(span: TimeDelta) -> i128 {
    i128::from(span.num_seconds()) * 1_000_000_000 + i128::from(span.subsec_nanos())
}

fn weeks_floor(span: TimeDelta) -> u64 {
    (span_nanos(span).max(0) / NS_PER_WEEK) as u64
}

fn weeks_ceil(span: TimeDelta) -> u64 {
    (span_nanos(span).max(0) as u128).div_ceil(NS_PER_WEEK as u128) as u64
}
