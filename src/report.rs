use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::calendar::{LifeCalendar, Timeline, ViewMode};
use crate::person::Person;
use crate::stats::Stats;
use crate::svg::{self, Theme};

pub const DARK_FILE: &str = "life_dark.svg";
pub const LIGHT_FILE: &str = "life_light.svg";
pub const SUMMARY_FILE: &str = "summary.json";

/// Everything produced for one render: the numbers and both themed SVGs.
pub struct Report {
    pub stats: Stats,
    pub svg_dark: String,
    pub svg_light: String,
}

impl Report {
    pub fn build(primary: &Person, second: Option<&Person>, mode: ViewMode, now: DateTime<Utc>) -> Self {
        let stats = Stats::collect(primary, second, now);
        let calendar = LifeCalendar::build(primary, second, now);
        let timeline = Timeline::build(primary, second, now);

        Self {
            svg_dark: svg::generate_svg(&stats, &calendar, &timeline, mode, Theme::Dark),
            svg_light: svg::generate_svg(&stats, &calendar, &timeline, mode, Theme::Light),
            stats,
        }
    }

    /// Writes both SVGs and `summary.json` into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;

        let summary = serde_json::to_string_pretty(&self.stats).context("failed to serialize summary")?;

        let mut written = Vec::new();
        for (name, contents) in [
            (DARK_FILE, &self.svg_dark),
            (LIGHT_FILE, &self.svg_light),
            (SUMMARY_FILE, &summary),
        ] {
            let path = dir.join(name);
            fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
            written.push(path);
        }

        Ok(written)
    }

    pub fn summary_line(&self) -> String {
        let s = &self.stats;
        let mut line = format!(
            "{} lived, {} of {} weeks, {} left",
            s.age,
            s.lived_weeks,
            s.total_weeks,
            svg::format_remaining(&s.remaining)
        );
        if let Some(shared) = &s.shared {
            line.push_str(&format!(
                "; {} of {} shared weeks lived, {} ahead",
                shared.lived_shared_weeks, shared.total_shared_weeks, shared.remaining_shared_weeks
            ));
        }
        line
    }
}
