//! Runtime configuration, read from environment variables.
//!
//! | variable                 | default    |
//! |--------------------------|------------|
//! | `BIRTH_DATE`             | required   |
//! | `LIFE_EXPECTANCY`        | 80         |
//! | `SECOND_BIRTH_DATE`      | unset      |
//! | `SECOND_LIFE_EXPECTANCY` | 80         |
//! | `VIEW_MODE`              | `calendar` |
//! | `OUTPUT_DIR`             | `.`        |
//! | `QUESTIONNAIRE`          | unset      |
//! | `WATCH_SECONDS`          | 0          |

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::calendar::ViewMode;
use crate::error::LifeError;
use crate::person::DEFAULT_LIFE_EXPECTANCY;

#[derive(Debug, Clone, PartialEq)]
pub struct PersonConfig {
    pub birth_date: String,
    pub life_expectancy: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub primary: PersonConfig,
    pub second: Option<PersonConfig>,
    pub view_mode: ViewMode,
    pub output_dir: PathBuf,
    pub questionnaire: Option<PathBuf>,
    pub watch_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let birth_date = get("BIRTH_DATE").context("BIRTH_DATE environment variable not set")?;
        let primary = PersonConfig {
            birth_date,
            life_expectancy: parse_years(get("LIFE_EXPECTANCY"))
                .context("failed to read LIFE_EXPECTANCY")?,
        };

        let second = match get("SECOND_BIRTH_DATE") {
            Some(birth_date) => Some(PersonConfig {
                birth_date,
                life_expectancy: parse_years(get("SECOND_LIFE_EXPECTANCY"))
                    .context("failed to read SECOND_LIFE_EXPECTANCY")?,
            }),
            None => None,
        };

        let view_mode = match get("VIEW_MODE") {
            Some(mode) => mode.parse::<ViewMode>()?,
            None => ViewMode::default(),
        };

        let watch_seconds = match get("WATCH_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("WATCH_SECONDS must be a whole number, got {raw:?}"))?,
            None => 0,
        };

        Ok(Self {
            primary,
            second,
            view_mode,
            output_dir: get("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            questionnaire: get("QUESTIONNAIRE").map(PathBuf::from),
            watch_seconds,
        })
    }
}

fn parse_years(raw: Option<String>) -> Result<i32, LifeError> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .map_err(|_| LifeError::InvalidLifeExpectancy(raw)),
        None => Ok(DEFAULT_LIFE_EXPECTANCY),
    }
}
