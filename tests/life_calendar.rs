use chrono::{DateTime, Datelike, TimeZone, Utc};
use lifeweeks::calendar::ViewMode;
use lifeweeks::clock::{Clock, FixedClock};
use lifeweeks::config::Config;
use lifeweeks::estimator::Questionnaire;
use lifeweeks::person::Person;
use lifeweeks::report::{DARK_FILE, LIGHT_FILE, Report, SUMMARY_FILE};
use lifeweeks::time_utils::add_years;
use lifeweeks::{lived_weeks, remaining_time, shared_life_weeks};

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 10, 19, 8, 15, 0).unwrap())
}

#[test]
fn born_in_1900_with_eighty_years_has_nothing_left() {
    let remaining = remaining_time(date(1900, 1, 1), 80, clock().now());
    assert!(remaining.is_zero());
}

#[test]
fn twenty_year_old_has_about_sixty_years_left() {
    let now = clock().now();
    let remaining = remaining_time(add_years(now, -20), 80, now);
    assert!((59..=60).contains(&remaining.years), "{remaining:?}");
    assert!(remaining.months <= 11);
    assert!(remaining.hours <= 23);
    assert!(remaining.minutes <= 59);
    assert!(remaining.seconds <= 59);
}

#[test]
fn future_birth_dates_have_negative_lived_weeks() {
    let now = clock().now();
    assert!(lived_weeks(date(2026, 1, 1), now) < 0);
    assert!(lived_weeks(date(1990, 1, 1), now) > 0);
}

#[test]
fn couples_born_two_years_apart() {
    let shared = shared_life_weeks(date(1990, 1, 1), 80, date(1992, 1, 1), 80, clock().now());
    assert_eq!(shared.start, date(1992, 1, 1));
    assert_eq!(shared.end, date(2070, 1, 1));
    assert_eq!(shared.end.year(), 1990 + 80);
    assert!(shared.total_shared_weeks > 0);
    assert!(shared.lived_shared_weeks > 0);
    assert!(shared.remaining_shared_weeks > 0);
}

#[test]
fn lives_ninety_years_apart_share_nothing() {
    let shared = shared_life_weeks(date(1990, 1, 1), 80, date(2080, 1, 1), 80, clock().now());
    assert_eq!(shared.total_shared_weeks, 0);
    assert_eq!(shared.lived_shared_weeks, 0);
    assert_eq!(shared.remaining_shared_weeks, 0);
}

#[test]
fn report_writes_svgs_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let primary = Person::from_form("1990-01-01", 80).unwrap();
    let second = Person::from_form("1992-01-01", 85).unwrap();

    let report = Report::build(&primary, Some(&second), ViewMode::Calendar, clock().now());
    let written = report.write_to(&dir.path().join("out")).unwrap();
    assert_eq!(written.len(), 3);

    let dark = std::fs::read_to_string(dir.path().join("out").join(DARK_FILE)).unwrap();
    let light = std::fs::read_to_string(dir.path().join("out").join(LIGHT_FILE)).unwrap();
    assert!(dark.contains("#161b22"));
    assert!(light.contains("#ffffff"));
    assert!(dark.contains("week-shared-lived"));

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("out").join(SUMMARY_FILE)).unwrap())
            .unwrap();
    assert_eq!(summary["life_expectancy_years"], 80);
    assert_eq!(summary["total_weeks"], 80 * 52);
    assert_eq!(
        summary["lived_weeks"],
        lived_weeks(primary.birth_date, clock().now())
    );
    assert!(summary["shared"]["total_shared_weeks"].as_u64().unwrap() > 0);

    let line = report.summary_line();
    assert!(line.contains("of 4160 weeks"));
    assert!(line.contains("shared weeks lived"));
}

#[test]
fn questionnaire_estimate_feeds_the_form() {
    let q = Questionnaire::from_json(r#"{ "gender": "female", "smoking": "no", "activity": "5+" }"#).unwrap();
    // 86 + 25 * 0.18 - 10 = 80.5
    assert_eq!(q.estimate(), 81);

    let person = Person::from_form("1995-05-05", q.estimate()).unwrap();
    assert_eq!(person.life_interval().end, date(2076, 5, 5));
}

#[test]
fn configuration_to_report() {
    let vars = [
        ("BIRTH_DATE", "1985-07-20"),
        ("VIEW_MODE", "timeline"),
        ("SECOND_BIRTH_DATE", "1987-02-11"),
    ];
    let config = Config::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
    .unwrap();

    let primary = Person::from_form(&config.primary.birth_date, config.primary.life_expectancy).unwrap();
    let second = config
        .second
        .as_ref()
        .map(|p| Person::from_form(&p.birth_date, p.life_expectancy).unwrap());

    let report = Report::build(&primary, second.as_ref(), config.view_mode, clock().now());
    assert!(report.svg_light.contains("Shared time"));
    // bars, not one square per week
    assert!(report.svg_light.matches("<rect").count() < 50);
}
