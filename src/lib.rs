//! Life in weeks: elapsed and remaining time from a birth date and a life
//! expectancy, drawn as a week grid and optionally intersected with a second
//! person's life.

pub mod age;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod counter;
pub mod error;
pub mod estimator;
pub mod logging;
pub mod person;
pub mod report;
pub mod stats;
pub mod svg;
pub mod time_utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::LifeError;
pub use person::{LifeInterval, Person};
pub use time_utils::{RemainingTime, SharedLifeWeeks, lived_weeks, remaining_time, shared_life_weeks};
