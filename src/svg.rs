use crate::calendar::{LifeCalendar, PersonProgress, SharedProgress, Timeline, ViewMode, WeekState};
use crate::stats::Stats;
use crate::time_utils::RemainingTime;

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_ALIGN_CHARS: usize = 50;

const CELL: f32 = 10.0;
const CELL_GAP: f32 = 2.0;
const YEAR_HEADER_HEIGHT: f32 = 16.0;
const BAR_WIDTH: f32 = 600.0;
const BAR_HEIGHT: f32 = 24.0;
const BAR_BLOCK_HEIGHT: f32 = 80.0;
const LEGEND_HEIGHT: f32 = 30.0;

#[derive(Clone, Copy)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
    pub lived: &'static str,
    pub future: &'static str,
    pub future_stroke: &'static str,
    pub shared_lived: &'static str,
    pub shared_future: &'static str,
    pub second_lived: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
                lived: "#8b949e",
                future: "#21262d",
                future_stroke: "#30363d",
                shared_lived: "#ffbb5c",
                shared_future: "#7cb9d1",
                second_lived: "#7cb9d1",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
                lived: "#d1d1d1",
                future: "#f0f0f0",
                future_stroke: "#e5e5e5",
                shared_lived: "#ffd28f",
                shared_future: "#a8d8ea",
                second_lived: "#a8d8ea",
            },
        }
    }
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Splits a row into `key: `, dot leader and value so values line up.
pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.len() + value.len();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

pub fn format_remaining(r: &RemainingTime) -> String {
    format!(
        "{}y {}m {}d {:02}:{:02}:{:02}",
        r.years, r.months, r.days, r.hours, r.minutes, r.seconds
    )
}

fn stat_rows(stats: &Stats) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Age", stats.age.to_string()),
        ("Life expectancy", format!("{} years", stats.life_expectancy_years)),
        (
            "Weeks lived",
            format!("{} / {}", stats.lived_weeks, stats.total_weeks),
        ),
        ("Time left", format_remaining(&stats.remaining)),
    ];

    if let Some(shared) = &stats.shared {
        rows.push((
            "Weeks together",
            format!(
                "{} / {}",
                shared.lived_shared_weeks, shared.total_shared_weeks
            ),
        ));
        rows.push((
            "Weeks ahead together",
            shared.remaining_shared_weeks.to_string(),
        ));
    }

    rows
}

// Header block: returns (tspans, width in chars, height in px)

fn build_header(stats: &Stats, title: &str, headline: &str) -> (String, usize, f32) {
    let rows = stat_rows(stats);

    let align_width = rows
        .iter()
        .map(|(k, v)| k.len() + 2 + v.len())
        .max()
        .unwrap_or(0)
        .max(MIN_ALIGN_CHARS);

    let mut out = format!(
        "<tspan x=\"{LEFT_PADDING}\" y=\"{START_Y}\" class=\"key\">{}</tspan>\n",
        escape_xml(title)
    );

    for (i, (key, value)) in rows.iter().enumerate() {
        let y = START_Y + (i as i32 + 1) * LINE_HEIGHT;
        let (k, d, v) = build_stat_row(key, value, align_width);
        out.push_str(&format!(
            r#"<tspan x="{LEFT_PADDING}" y="{y}" class="cc">. </tspan><tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
            escape_xml(&k),
            escape_xml(&d),
            escape_xml(&v)
        ));
    }

    let y = START_Y + (rows.len() as i32 + 1) * LINE_HEIGHT;
    out.push_str(&format!(
        "<tspan x=\"{LEFT_PADDING}\" y=\"{y}\" class=\"cc\">{}</tspan>\n",
        escape_xml(headline)
    ));

    let height = START_Y as f32 + (rows.len() as f32 + 2.0) * LINE_HEIGHT as f32;
    (out, align_width.max(headline.len()), height)
}

// Week grid: one column per year, one row per week. Returns (elements, width, height)

fn build_grid(calendar: &LifeCalendar, top: f32) -> (String, f32, f32) {
    let pitch = CELL + CELL_GAP;
    let mut out = String::new();

    for year in 0..calendar.years {
        // label every fifth year to keep the header readable
        if year % 5 == 0 {
            let x = LEFT_PADDING + year as f32 * pitch;
            out.push_str(&format!(
                "<text x=\"{x}\" y=\"{}\" class=\"cc\" font-size=\"9px\">{year}</text>\n",
                top + YEAR_HEADER_HEIGHT - 4.0
            ));
        }
    }

    let grid_top = top + YEAR_HEADER_HEIGHT;
    for year in 0..calendar.years {
        for week in 0..LifeCalendar::ROWS {
            let Some(state) = calendar.cell(year, week) else {
                continue;
            };
            let x = LEFT_PADDING + year as f32 * pitch;
            let y = grid_top + week as f32 * pitch;
            out.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{CELL}\" height=\"{CELL}\" class=\"{}\"/>\n",
                state.css_class()
            ));
        }
    }

    let width = LEFT_PADDING + calendar.years as f32 * pitch;
    let height = YEAR_HEADER_HEIGHT + LifeCalendar::ROWS as f32 * pitch;
    (out, width, height)
}

fn build_progress_bar(
    label: &str,
    caption: &str,
    progress: &PersonProgress,
    fill_class: &str,
    top: f32,
) -> String {
    let lived = clamp_percent(progress.lived_percent as f64);
    let fill_width = BAR_WIDTH * lived / 100.0;
    let bar_y = top + 8.0;

    let mut out = format!(
        r#"<text x="{LEFT_PADDING}" y="{top}" class="key">{}</text>
<text x="{}" y="{top}" class="cc" text-anchor="end">{}% {}</text>
<rect x="{LEFT_PADDING}" y="{bar_y}" width="{BAR_WIDTH}" height="{BAR_HEIGHT}" rx="12" class="week-future"/>
<rect x="{LEFT_PADDING}" y="{bar_y}" width="{fill_width}" height="{BAR_HEIGHT}" rx="12" class="{fill_class}"/>
"#,
        escape_xml(label),
        LEFT_PADDING + BAR_WIDTH,
        progress.lived_percent,
        escape_xml(caption),
    );

    let tick_y = bar_y + BAR_HEIGHT + 14.0;
    let ticks = progress.axis_ticks.len().max(2) - 1;
    for (i, tick) in progress.axis_ticks.iter().enumerate() {
        let x = LEFT_PADDING + BAR_WIDTH * i as f32 / ticks as f32;
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"{tick_y}\" class=\"cc\" font-size=\"10px\" text-anchor=\"middle\">{tick}y</text>\n"
        ));
    }

    out
}

fn build_shared_bar(shared: &SharedProgress, top: f32) -> String {
    let bar_y = top + 8.0;
    let offset = LEFT_PADDING + BAR_WIDTH * clamp_percent(shared.offset_percent) / 100.0;
    let total = BAR_WIDTH * clamp_percent(shared.total_width_percent) / 100.0;
    let lived = BAR_WIDTH * clamp_percent(shared.lived_width_percent) / 100.0;

    format!(
        r#"<text x="{LEFT_PADDING}" y="{top}" class="key">Shared time</text>
<text x="{}" y="{top}" class="cc" text-anchor="end">{}% of your time together</text>
<rect x="{LEFT_PADDING}" y="{bar_y}" width="{BAR_WIDTH}" height="{BAR_HEIGHT}" rx="12" class="week-future"/>
<rect x="{offset}" y="{bar_y}" width="{total}" height="{BAR_HEIGHT}" class="week-shared-future"/>
<rect x="{offset}" y="{bar_y}" width="{lived}" height="{BAR_HEIGHT}" class="week-shared-lived"/>
"#,
        LEFT_PADDING + BAR_WIDTH,
        shared.percent,
    )
}

// Timeline bars. Returns (elements, width, height)

fn build_timeline(timeline: &Timeline, top: f32) -> (String, f32, f32) {
    let mut out = String::new();
    let mut y = top + LINE_HEIGHT as f32;

    out.push_str(&build_progress_bar(
        "You",
        "of your life",
        &timeline.primary,
        "week-lived",
        y,
    ));
    y += BAR_BLOCK_HEIGHT;

    if let Some(second) = &timeline.second {
        out.push_str(&build_progress_bar(
            "Second person",
            "of their life",
            second,
            "second-lived",
            y,
        ));
        y += BAR_BLOCK_HEIGHT;
    }

    if let Some(shared) = &timeline.shared {
        out.push_str(&build_shared_bar(shared, y));
        y += BAR_BLOCK_HEIGHT;
    }

    let mut cards = vec![
        ("Years lived", timeline.primary.years_lived),
        ("Years left", timeline.primary.years_remaining),
    ];
    if let Some(shared) = &timeline.shared {
        cards.push(("Years together", shared.years_together));
        cards.push(("Years ahead together", shared.future_years_together));
    }
    for (i, (label, value)) in cards.iter().enumerate() {
        let x = LEFT_PADDING + i as f32 * (BAR_WIDTH / 4.0);
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" class=\"cc\" font-size=\"11px\">{}</text>\n<text x=\"{x}\" y=\"{}\" class=\"value\" font-size=\"22px\">{value}</text>\n",
            escape_xml(label),
            y + 26.0
        ));
    }
    y += 40.0;

    (out, LEFT_PADDING + BAR_WIDTH, y - top)
}

fn build_legend(mode: ViewMode, two_people: bool, top: f32) -> String {
    let entries: Vec<(&str, &str)> = match (mode, two_people) {
        (ViewMode::Calendar, true) => vec![
            (WeekState::SharedLived.css_class(), "Weeks lived together"),
            (WeekState::SharedFuture.css_class(), "Weeks ahead together"),
            (WeekState::Future.css_class(), "Weeks outside the shared period"),
        ],
        (ViewMode::Calendar, false) => vec![
            (WeekState::Lived.css_class(), "Weeks lived"),
            (WeekState::Future.css_class(), "Weeks ahead"),
        ],
        (ViewMode::Timeline, true) => vec![
            (WeekState::Lived.css_class(), "Your time lived"),
            ("second-lived", "Time lived (second person)"),
            (WeekState::SharedLived.css_class(), "Shared time lived"),
        ],
        (ViewMode::Timeline, false) => vec![(WeekState::Lived.css_class(), "Your time lived")],
    };

    let mut out = String::new();
    let mut x = LEFT_PADDING;
    for (class, label) in entries {
        out.push_str(&format!(
            "<rect x=\"{x}\" y=\"{top}\" width=\"{CELL}\" height=\"{CELL}\" class=\"{class}\"/>\n<text x=\"{}\" y=\"{}\" class=\"cc\" font-size=\"11px\">{}</text>\n",
            x + CELL + 4.0,
            top + CELL - 1.0,
            escape_xml(label)
        ));
        x += CELL + 12.0 + label.len() as f32 * 6.5;
    }
    out
}

fn clamp_percent(p: f64) -> f32 {
    p.clamp(0.0, 100.0) as f32
}

/// Renders the calendar or timeline view as a standalone SVG document.
pub fn generate_svg(
    stats: &Stats,
    calendar: &LifeCalendar,
    timeline: &Timeline,
    mode: ViewMode,
    theme: Theme,
) -> String {
    let colors = theme.colors();
    let two_people = calendar.shared.is_some();

    let (header, header_chars, header_height) =
        build_header(stats, calendar.title(), &calendar.headline());
    let header_width = LEFT_PADDING + header_chars as f32 * CHAR_WIDTH;

    let body_top = header_height + 10.0;
    let (body, body_width, body_height) = match mode {
        ViewMode::Calendar => build_grid(calendar, body_top),
        ViewMode::Timeline => build_timeline(timeline, body_top),
    };

    let legend_top = body_top + body_height + 12.0;
    let legend = build_legend(mode, two_people, legend_top);

    let w = header_width.max(body_width) + RIGHT_PADDING;
    let h = legend_top + LEGEND_HEIGHT;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key                {{ fill: {key}; }}
.value              {{ fill: {value}; }}
.cc                 {{ fill: {cc}; }}
.week-lived         {{ fill: {lived}; }}
.week-future        {{ fill: {future}; stroke: {future_stroke}; stroke-width: 1; }}
.week-shared-lived  {{ fill: {shared_lived}; }}
.week-shared-future {{ fill: {shared_future}; }}
.second-lived       {{ fill: {second_lived}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<!-- HEADER -->
<text fill="{text}">
{header}
</text>

<!-- BODY -->
{body}
<!-- LEGEND -->
{legend}
</svg>
"#,
        w = w,
        h = h,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        lived = colors.lived,
        future = colors.future,
        future_stroke = colors.future_stroke,
        shared_lived = colors.shared_lived,
        shared_future = colors.shared_future,
        second_lived = colors.second_lived,
        header = header,
        body = body,
        legend = legend
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::Person;
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn render(second: Option<&Person>, mode: ViewMode, theme: Theme) -> String {
        let primary = Person::from_form("1990-01-01", 80).unwrap();
        let stats = Stats::collect(&primary, second, now());
        let calendar = LifeCalendar::build(&primary, second, now());
        let timeline = Timeline::build(&primary, second, now());
        generate_svg(&stats, &calendar, &timeline, mode, theme)
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn stat_row_pads_with_dots() {
        let (k, d, v) = build_stat_row("Age", "33", 12);
        assert_eq!(k, "Age: ");
        assert_eq!(d, ".....");
        assert_eq!(v, "33");

        let (_, d, _) = build_stat_row("Age", "33", 9);
        assert_eq!(d, ". ");
        let (_, d, _) = build_stat_row("Age", "33", 3);
        assert_eq!(d, "");
    }

    #[test]
    fn remaining_is_formatted_compactly() {
        let r = RemainingTime {
            years: 44,
            months: 6,
            days: 17,
            hours: 3,
            minutes: 4,
            seconds: 5,
        };
        assert_eq!(format_remaining(&r), "44y 6m 17d 03:04:05");
    }

    #[test]
    fn calendar_svg_has_one_square_per_week() {
        let svg = render(None, ViewMode::Calendar, Theme::Light);
        let squares = svg.matches("class=\"week-lived\"").count()
            + svg.matches("class=\"week-future\"").count();
        // two extra squares come from the legend
        assert_eq!(squares, 80 * 52 + 2);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Your life in weeks"));
    }

    #[test]
    fn shared_calendar_uses_shared_classes_and_legend() {
        let second = Person::from_form("2000-01-01", 80).unwrap();
        let svg = render(Some(&second), ViewMode::Calendar, Theme::Dark);
        assert!(svg.contains("class=\"week-shared-lived\""));
        assert!(svg.contains("class=\"week-shared-future\""));
        assert!(svg.contains("Weeks lived together"));
        assert!(svg.contains("Weeks together"));
        assert!(svg.contains("#161b22"));
    }

    #[test]
    fn timeline_svg_draws_bars_instead_of_grid() {
        let second = Person::from_form("2000-01-01", 80).unwrap();
        let svg = render(Some(&second), ViewMode::Timeline, Theme::Light);
        assert!(svg.contains("of your life"));
        assert!(svg.contains("Shared time"));
        assert!(svg.contains("Years ahead together"));
        assert!(svg.matches("<rect").count() < 50);
    }
}
