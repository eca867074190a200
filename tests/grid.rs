//! Display-window properties over a wide range of months.

use chrono::{Datelike, NaiveDate, Weekday};
use kalandar::{
    build_grid, date_to_key, parse_date_key, CalendarConfig, CalendarOptions, CalendarState,
    Highlight,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    ymd(2024, 6, 12)
}

/// Every month from 1899 through 2101.
fn months() -> impl Iterator<Item = (i32, u32)> {
    (1899..=2101).flat_map(|y| (1..=12).map(move |m| (y, m)))
}

#[test]
fn fit_weeks_is_always_42_days() {
    let config = CalendarConfig::default();
    for (y, m) in months() {
        let state = CalendarState::with_today(ymd(y, m, 1), &config, today());
        assert_eq!(build_grid(&state, &config).len(), 42, "{y}-{m}");
    }
}

#[test]
fn variable_weeks_are_whole_weeks_sunday_to_saturday() {
    let config = CalendarConfig::default().with_fit_weeks(false);
    for (y, m) in months() {
        let state = CalendarState::with_today(ymd(y, m, 1), &config, today());
        let grid = build_grid(&state, &config);
        assert_eq!(grid.len() % 7, 0, "{y}-{m}");
        assert!((28..=42).contains(&grid.len()), "{y}-{m}");
        assert_eq!(grid[0].date.weekday(), Weekday::Sun, "{y}-{m}");
        assert_eq!(grid[grid.len() - 1].date.weekday(), Weekday::Sat, "{y}-{m}");
    }
}

#[test]
fn windows_are_contiguous_and_fill_marks_other_months() {
    for fit_weeks in [true, false] {
        let config = CalendarConfig::default().with_fit_weeks(fit_weeks);
        for (y, m) in months() {
            let state = CalendarState::with_today(ymd(y, m, 1), &config, today());
            let grid = build_grid(&state, &config);

            assert!(grid.windows(2).all(|w| w[0].date.succ_opt() == Some(w[1].date)), "{y}-{m}");
            for cell in &grid {
                assert_eq!(cell.is_fill, cell.date.month() != m, "{y}-{m} {}", cell.date);
            }
            assert_eq!(
                grid.iter().filter(|c| !c.is_fill).count() as u32,
                kalandar::calendar::days_in_month(y, m - 1).unwrap(),
            );
        }
    }
}

#[test]
fn date_keys_round_trip_across_window() {
    let config = CalendarConfig::default();
    let state = CalendarState::with_today(ymd(2000, 2, 1), &config, today());
    for cell in build_grid(&state, &config) {
        let key = date_to_key(cell.date);
        assert_eq!(key.len(), 10);
        assert_eq!(parse_date_key(&key).unwrap(), cell.date);
    }
}

#[test]
fn leap_february_in_fit_weeks() {
    let options = CalendarOptions::from_json(r#"{ "date": "2024-02-01", "fitWeeks": true }"#).unwrap();
    let config = CalendarConfig::resolve(&options);
    let state = CalendarState::with_today(options.date_input(), &config, today());
    let grid = build_grid(&state, &config);

    assert_eq!(grid.len(), 42);
    let leap_day = grid.iter().find(|c| c.date == ymd(2024, 2, 29)).unwrap();
    assert!(!leap_day.is_fill);
}

#[test]
fn short_february_without_fit_weeks() {
    let config = CalendarConfig::default().with_fit_weeks(false);
    let state = CalendarState::with_today("2023-02-15", &config, today());
    let grid = build_grid(&state, &config);

    assert_eq!(grid.len(), 35);
    assert_eq!(grid.last().unwrap().date, ymd(2023, 3, 4));
}

#[test]
fn december_rolls_into_january() {
    let config = CalendarConfig::default();
    let mut state = CalendarState::with_today(ymd(2024, 12, 1), &config, today());
    state.next_month();
    assert_eq!((state.year(), state.month0()), (2025, 0));
}

#[test]
fn january_of_min_year_cannot_go_back() {
    let config = CalendarConfig::default().with_year_bounds(1990, 2030);
    let mut state = CalendarState::with_today(ymd(1990, 1, 20), &config, today());
    assert!(!state.can_go_prev());
    assert!(!state.prev_month());
    assert_eq!((state.year(), state.month0()), (1990, 0));
}

#[test]
fn labelled_holiday() {
    let config = CalendarConfig::default()
        .with_year_bounds(0, 2030)
        .with_highlight(ymd(2024, 12, 25), Highlight::with_label("Holiday"));
    let state = CalendarState::with_today(ymd(2024, 12, 1), &config, today());
    let grid = build_grid(&state, &config);

    let holiday = grid.iter().find(|c| c.date == ymd(2024, 12, 25)).unwrap();
    assert!(holiday.tags().contains(&"has-label"));
    assert_eq!(holiday.label(), Some("Holiday"));

    let other = grid.iter().find(|c| c.date == ymd(2024, 12, 26)).unwrap();
    assert!(other.highlight.is_none());
    assert!(!other.tags().contains(&"has-label"));
}

#[test]
fn highlights_from_toml_file() {
    let path = std::env::temp_dir().join(format!("kalandar-test-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
        minYear = "2010"
        fit_weeks = "False"

        [highlightedDates."2024-07-04"]
        class = "holiday fireworks"
        label = "Independence Day"
        "#,
    )
    .unwrap();
    let options = CalendarOptions::load_from(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let config = CalendarConfig::resolve(&options);
    assert_eq!(config.min_year(), 2010);
    assert!(!config.fit_weeks());

    let state = CalendarState::with_today(ymd(2024, 7, 1), &config, today());
    let grid = build_grid(&state, &config);
    let july4 = grid.iter().find(|c| c.date == ymd(2024, 7, 4)).unwrap();
    assert_eq!(july4.tags(), ["holiday", "fireworks", "has-label"]);
}
