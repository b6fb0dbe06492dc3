use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::age::CalendarAge;
use crate::person::Person;
use crate::time_utils::{RemainingTime, SharedLifeWeeks};

/// Every number shown for one render.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub generated_at: DateTime<Utc>,
    pub age: CalendarAge,
    pub life_expectancy_years: i32,
    pub lived_weeks: i64,
    pub total_weeks: i64,
    pub remaining: RemainingTime,
    pub shared: Option<SharedLifeWeeks>,
}

impl Stats {
    pub fn collect(primary: &Person, second: Option<&Person>, now: DateTime<Utc>) -> Self {
        Self {
            generated_at: now,
            age: CalendarAge::between(primary.birth_date.date_naive(), now.date_naive()),
            life_expectancy_years: primary.life_expectancy_years,
            lived_weeks: primary.lived_weeks(now),
            total_weeks: primary.total_weeks(),
            remaining: primary.remaining_time(now),
            shared: second.map(|other| primary.shared_with(other, now)),
        }
    }
}
