use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LifeError;
use crate::time_utils::{self, RemainingTime, SharedLifeWeeks};

pub const MIN_LIFE_EXPECTANCY: i32 = 50;
pub const MAX_LIFE_EXPECTANCY: i32 = 120;
pub const DEFAULT_LIFE_EXPECTANCY: i32 = 80;
pub const WEEKS_PER_YEAR: i64 = 52;

/// One person's birth date and projected life span.
///
/// Values are replaced, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub birth_date: DateTime<Utc>,
    pub life_expectancy_years: i32,
}

/// Birth to projected end of life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Person {
    pub fn new(birth_date: DateTime<Utc>, life_expectancy_years: i32) -> Self {
        Self {
            birth_date,
            life_expectancy_years,
        }
    }

    /// Builds a person from form input: a `YYYY-MM-DD` date (midnight UTC)
    /// and a life expectancy within the slider range.
    pub fn from_form(date: &str, life_expectancy_years: i32) -> Result<Self, LifeError> {
        let birth_date = parse_birth_date(date)?;
        if !(MIN_LIFE_EXPECTANCY..=MAX_LIFE_EXPECTANCY).contains(&life_expectancy_years) {
            return Err(LifeError::LifeExpectancyOutOfRange(life_expectancy_years));
        }
        Ok(Self::new(birth_date, life_expectancy_years))
    }

    pub fn life_interval(&self) -> LifeInterval {
        LifeInterval {
            start: self.birth_date,
            end: time_utils::add_years(self.birth_date, self.life_expectancy_years),
        }
    }

    /// Size of this person's week grid: 52 weeks per expected year.
    pub fn total_weeks(&self) -> i64 {
        i64::from(self.life_expectancy_years) * WEEKS_PER_YEAR
    }

    pub fn lived_weeks(&self, now: DateTime<Utc>) -> i64 {
        time_utils::lived_weeks(self.birth_date, now)
    }

    pub fn remaining_time(&self, now: DateTime<Utc>) -> RemainingTime {
        time_utils::remaining_time(self.birth_date, self.life_expectancy_years, now)
    }

    pub fn shared_with(&self, other: &Person, now: DateTime<Utc>) -> SharedLifeWeeks {
        time_utils::shared_life_weeks(
            self.birth_date,
            self.life_expectancy_years,
            other.birth_date,
            other.life_expectancy_years,
            now,
        )
    }
}

/// Parses `YYYY-MM-DD` as midnight UTC.
pub fn parse_birth_date(date: &str) -> Result<DateTime<Utc>, LifeError> {
    let trimmed = date.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| LifeError::InvalidDate(trimmed.to_string()))
}
