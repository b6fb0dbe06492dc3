//! calendar.rs
//!
//! Models what the page shows: the week grid (one column per expected year,
//! 52 rows) and the timeline progress bars. Both are plain values recomputed
//! whenever a person changes; rendering lives in `svg`.

use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::error::LifeError;
use crate::person::{MAX_LIFE_EXPECTANCY, Person, WEEKS_PER_YEAR};
use crate::time_utils::{MS_PER_WEEK, SharedLifeWeeks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Calendar,
    Timeline,
}

impl FromStr for ViewMode {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calendar" => Ok(ViewMode::Calendar),
            "timeline" => Ok(ViewMode::Timeline),
            _ => Err(LifeError::InvalidViewMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekState {
    Lived,
    Future,
    SharedLived,
    SharedFuture,
}

impl WeekState {
    pub fn css_class(self) -> &'static str {
        match self {
            WeekState::Lived => "week-lived",
            WeekState::Future => "week-future",
            WeekState::SharedLived => "week-shared-lived",
            WeekState::SharedFuture => "week-shared-future",
        }
    }
}

/// Week grid for the primary person, optionally tinted by the weeks shared
/// with a second person.
#[derive(Debug, Clone)]
pub struct LifeCalendar {
    pub years: usize,
    pub lived_weeks: i64,
    pub total_weeks: i64,
    pub shared: Option<SharedLifeWeeks>,
    // indexed by week number (year * 52 + week)
    cells: Vec<WeekState>,
}

impl LifeCalendar {
    pub const ROWS: usize = WEEKS_PER_YEAR as usize;

    /// Columns are capped at `MAX_LIFE_EXPECTANCY` years; `total_weeks` keeps
    /// the uncapped figure.
    pub fn build(primary: &Person, second: Option<&Person>, now: DateTime<Utc>) -> Self {
        let years = primary.life_expectancy_years.clamp(0, MAX_LIFE_EXPECTANCY) as usize;
        let lived_weeks = primary.lived_weeks(now);
        let shared = second.map(|other| primary.shared_with(other, now));

        let cells = (0..years * Self::ROWS)
            .map(|week_number| {
                let own = if (week_number as i64) < lived_weeks {
                    WeekState::Lived
                } else {
                    WeekState::Future
                };

                let Some(shared) = shared else {
                    return own;
                };

                let week_date = TimeDelta::try_days(7 * week_number as i64)
                    .and_then(|offset| primary.birth_date.checked_add_signed(offset));

                match week_date {
                    Some(date) if date >= shared.start && date <= shared.end => {
                        if date <= now {
                            WeekState::SharedLived
                        } else {
                            WeekState::SharedFuture
                        }
                    }
                    _ => own,
                }
            })
            .collect();

        Self {
            years,
            lived_weeks,
            total_weeks: primary.total_weeks(),
            shared,
            cells,
        }
    }

    /// State of the square in column `year`, row `week`.
    pub fn cell(&self, year: usize, week: usize) -> Option<WeekState> {
        if week >= Self::ROWS {
            return None;
        }
        self.cells.get(year * Self::ROWS + week).copied()
    }

    pub fn cells(&self) -> &[WeekState] {
        &self.cells
    }

    pub fn count(&self, state: WeekState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    pub fn title(&self) -> &'static str {
        if self.shared.is_some() {
            "Your life together"
        } else {
            "Your life in weeks"
        }
    }

    pub fn headline(&self) -> String {
        match &self.shared {
            Some(shared) => format!(
                "Each square is one week. You have lived {} weeks together out of {} shared weeks.",
                shared.lived_shared_weeks, shared.total_shared_weeks
            ),
            None => format!(
                "Each square is one week. You have lived {} weeks out of {}.",
                self.lived_weeks, self.total_weeks
            ),
        }
    }
}

/// One person's progress bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonProgress {
    pub lived_weeks: i64,
    pub total_weeks: i64,
    pub lived_percent: i64,
    pub years_lived: i64,
    pub years_remaining: i64,
    pub axis_ticks: Vec<i32>,
}

impl PersonProgress {
    pub fn of(person: &Person, now: DateTime<Utc>) -> Self {
        let lived_weeks = person.lived_weeks(now);
        let total_weeks = person.total_weeks();
        let years = person.life_expectancy_years;

        let mut axis_ticks: Vec<i32> = (0..5).map(|i| (i * years).div_euclid(4)).collect();
        axis_ticks.push(years);

        Self {
            lived_weeks,
            total_weeks,
            lived_percent: floor_percent(lived_weeks, total_weeks),
            years_lived: lived_weeks.div_euclid(WEEKS_PER_YEAR),
            years_remaining: ceil_div(total_weeks - lived_weeks, WEEKS_PER_YEAR),
            axis_ticks,
        }
    }
}

/// The shared-time bar, positioned along the primary person's life.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedProgress {
    pub percent: i64,
    pub offset_percent: f64,
    pub total_width_percent: f64,
    pub lived_width_percent: f64,
    pub years_together: i64,
    pub future_years_together: i64,
}

impl SharedProgress {
    pub fn of(primary: &Person, second: &Person, shared: &SharedLifeWeeks) -> Self {
        let total = shared.total_shared_weeks as i64;
        let lived = shared.lived_shared_weeks as i64;
        let widest = primary.total_weeks().max(second.total_weeks()) as f64;

        let offset_weeks =
            ((shared.start - primary.birth_date).num_milliseconds() as f64 / MS_PER_WEEK as f64).max(0.0);

        Self {
            percent: floor_percent(lived, total),
            offset_percent: ratio_percent(offset_weeks, primary.total_weeks() as f64),
            total_width_percent: ratio_percent(total as f64, widest),
            lived_width_percent: ratio_percent(lived as f64, widest),
            years_together: lived.div_euclid(WEEKS_PER_YEAR),
            future_years_together: ceil_div(total - lived, WEEKS_PER_YEAR),
        }
    }
}

/// Timeline view: a bar per person plus the shared bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub primary: PersonProgress,
    pub second: Option<PersonProgress>,
    pub shared: Option<SharedProgress>,
}

impl Timeline {
    pub fn build(primary: &Person, second: Option<&Person>, now: DateTime<Utc>) -> Self {
        let shared = second.map(|other| {
            let weeks = primary.shared_with(other, now);
            SharedProgress::of(primary, other, &weeks)
        });

        Self {
            primary: PersonProgress::of(primary, now),
            second: second.map(|other| PersonProgress::of(other, now)),
            shared,
        }
    }
}

fn floor_percent(part: i64, whole: i64) -> i64 {
    if whole <= 0 {
        return 0;
    }
    (part * 100).div_euclid(whole)
}

fn ratio_percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 { 0.0 } else { part / whole * 100.0 }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    -(-a).div_euclid(b)
}
