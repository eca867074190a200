//! The display window: every day shown for one month, Sunday-first.

use chrono::{Datelike, Days, NaiveDate};

use super::{date_to_key, is_weekend, last_of_month, CalendarState};
use crate::config::{CalendarConfig, Highlight};

/// Six full weeks.
pub const FIT_WEEKS_DAYS: u64 = 6 * 7;

/// One day in the display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell<'a> {
    pub date:       NaiveDate,
    /// Outside the displayed month.
    pub is_fill:    bool,
    pub is_today:   bool,
    pub is_weekend: bool,
    pub highlight:  Option<&'a Highlight>,
}

impl<'a> DayCell<'a> {
    pub fn key(&self) -> String {
        date_to_key(self.date)
    }

    /// Classification tags in render order: `fill`, `today`, `weekend`, the
    /// highlight's class tokens, then `has-label` for a non-empty label.
    pub fn tags(&self) -> Vec<&'a str> {
        let mut tags = Vec::new();
        if self.is_fill    { tags.push("fill"); }
        if self.is_today   { tags.push("today"); }
        if self.is_weekend { tags.push("weekend"); }
        if let Some(h) = self.highlight {
            tags.extend(h.classes());
            if h.has_label() { tags.push("has-label"); }
        }
        tags
    }

    /// The label attribute: `None` when no label is set, which is also the
    /// case for a highlight that defines only a class.
    pub fn label(&self) -> Option<&'a str> {
        self.highlight.and_then(|h| h.label.as_deref())
    }
}

/// Builds the display window for the state's month.
///
/// Starts on the Sunday on or before the 1st. With `fit_weeks` the window
/// is always [`FIT_WEEKS_DAYS`] long; otherwise it ends on the Saturday on
/// or after the last day of the month. Pure: no hooks fire here.
pub fn build_grid<'a>(state: &CalendarState, config: &'a CalendarConfig) -> Vec<DayCell<'a>> {
    let (Some(first), Some(last)) = (state.first_of_month(), last_of_month(state.year(), state.month0()))
    else {
        return Vec::new();
    };

    let leading  = u64::from(first.weekday().num_days_from_sunday());
    let trailing = if config.fit_weeks() {
        FIT_WEEKS_DAYS - u64::from(last.day()) - leading
    } else {
        6 - u64::from(last.weekday().num_days_from_sunday())
    };

    let first_shown = first.checked_sub_days(Days::new(leading)).unwrap_or(NaiveDate::MIN);
    let last_shown  = last.checked_add_days(Days::new(trailing)).unwrap_or(NaiveDate::MAX);

    first_shown
        .iter_days()
        .take_while(|d| *d <= last_shown)
        .map(|date| DayCell {
            date,
            is_fill:    date.month0() != state.month0(),
            is_today:   date == state.today(),
            is_weekend: is_weekend(date),
            highlight:  config.highlight_for(date),
        })
        .collect()
}

/// Splits a window into rows of seven.
pub fn weeks<'c, 'a>(cells: &'c [DayCell<'a>]) -> std::slice::Chunks<'c, DayCell<'a>> {
    cells.chunks(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state(y: i32, m: u32, config: &CalendarConfig) -> CalendarState {
        CalendarState::with_today(ymd(y, m, 1), config, ymd(2024, 6, 12))
    }

    #[test]
    fn fit_weeks_leap_february() {
        let config = CalendarConfig::default();
        let grid = build_grid(&state(2024, 2, &config), &config);
        assert_eq!(grid.len(), 42);
        // Feb 1 2024 is a Thursday.
        assert_eq!(grid[0].date, ymd(2024, 1, 28));
        let leap = grid.iter().find(|c| c.date == ymd(2024, 2, 29)).unwrap();
        assert!(!leap.is_fill);
        assert_eq!(grid[41].date, ymd(2024, 3, 9));
    }

    #[test]
    fn variable_weeks_february_2023() {
        let config = CalendarConfig::default().with_fit_weeks(false);
        let grid = build_grid(&state(2023, 2, &config), &config);
        assert_eq!(grid.len(), 35);
        assert_eq!(grid[0].date, ymd(2023, 1, 29));
        assert_eq!(grid[34].date, ymd(2023, 3, 4));
        assert_eq!(grid[34].date.weekday(), Weekday::Sat);
    }

    #[test]
    fn variable_weeks_can_be_four_rows() {
        // Feb 2015 starts on a Sunday and has 28 days.
        let config = CalendarConfig::default().with_fit_weeks(false);
        let grid = build_grid(&state(2015, 2, &config), &config);
        assert_eq!(grid.len(), 28);
        assert!(grid.iter().all(|c| !c.is_fill));
    }

    #[test]
    fn fit_weeks_month_starting_sunday_has_no_leading_fill() {
        let config = CalendarConfig::default();
        let grid = build_grid(&state(2015, 2, &config), &config);
        assert_eq!(grid[0].date, ymd(2015, 2, 1));
        assert_eq!(grid.iter().filter(|c| c.is_fill).count(), 14);
    }

    #[test]
    fn today_and_weekend_flags() {
        let config = CalendarConfig::default();
        let grid = build_grid(&state(2024, 6, &config), &config);
        let today: Vec<_> = grid.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, ymd(2024, 6, 12));
        for cell in &grid {
            let wd = cell.date.weekday();
            assert_eq!(cell.is_weekend, wd == Weekday::Sat || wd == Weekday::Sun);
        }
    }

    #[test]
    fn tags_follow_classification_and_highlight() {
        let christmas = ymd(2024, 12, 25);
        let config = CalendarConfig::default()
            .with_year_bounds(0, 2030)
            .with_highlight(christmas, Highlight {
                class: Some("holiday red".into()),
                label: Some("Holiday".into()),
            })
            .with_highlight(ymd(2024, 12, 28), Highlight::with_label(""))
            .with_highlight(ymd(2025, 1, 4), Highlight::with_class("party"));
        let grid = build_grid(&state(2024, 12, &config), &config);

        let cell = grid.iter().find(|c| c.date == christmas).unwrap();
        assert_eq!(cell.tags(), ["holiday", "red", "has-label"]);
        assert_eq!(cell.label(), Some("Holiday"));

        let empty_label = grid.iter().find(|c| c.date == ymd(2024, 12, 28)).unwrap();
        assert_eq!(empty_label.tags(), ["weekend"]);
        assert_eq!(empty_label.label(), Some(""));

        let class_only = grid.iter().find(|c| c.date == ymd(2025, 1, 4)).unwrap();
        assert_eq!(class_only.tags(), ["fill", "weekend", "party"]);
        assert_eq!(class_only.label(), None);

        let plain = grid.iter().find(|c| c.date == ymd(2024, 12, 24)).unwrap();
        assert!(plain.highlight.is_none());
        assert!(plain.tags().is_empty());
    }

    #[test]
    fn weeks_are_rows_of_seven() {
        let config = CalendarConfig::default();
        let grid = build_grid(&state(2024, 9, &config), &config);
        let rows: Vec<_> = weeks(&grid).collect();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.len() == 7 && r[0].date.weekday() == Weekday::Sun));
    }

    #[test]
    fn key_matches_date() {
        let config = CalendarConfig::default();
        let grid = build_grid(&state(2024, 3, &config), &config);
        assert_eq!(grid[0].key(), "2024-02-25");
    }
}
