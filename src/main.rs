use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use lifeweeks::clock::{Clock, SystemClock};
use lifeweeks::config::Config;
use lifeweeks::counter::{Countdown, DEFAULT_PERIOD};
use lifeweeks::estimator::Questionnaire;
use lifeweeks::person::Person;
use lifeweeks::report::Report;
use lifeweeks::{logging, svg};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env()?;

    // A questionnaire, when given, replaces the slider value
    let life_expectancy = match &config.questionnaire {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read questionnaire {}", path.display()))?;
            let estimate = Questionnaire::from_json(&raw)?.estimate();
            info!(estimate, "life expectancy estimated from questionnaire");
            estimate
        }
        None => config.primary.life_expectancy,
    };

    let primary = Person::from_form(&config.primary.birth_date, life_expectancy)
        .context("invalid primary person")?;
    let second = config
        .second
        .as_ref()
        .map(|p| Person::from_form(&p.birth_date, p.life_expectancy))
        .transpose()
        .context("invalid second person")?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let report = Report::build(&primary, second.as_ref(), config.view_mode, clock.now());
    report.write_to(&config.output_dir)?;

    println!("{}", report.summary_line());

    if config.watch_seconds > 0 {
        let mut countdown = Countdown::start(primary, clock, DEFAULT_PERIOD);
        for _ in 0..config.watch_seconds {
            let Some(remaining) = countdown.changed().await else {
                break;
            };
            println!("{}", svg::format_remaining(&remaining));
        }
        countdown.stop();
    }

    Ok(())
}
