//! Displayed month and month-to-month navigation.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

use super::first_of_month;
use crate::config::CalendarConfig;
use crate::error::CalendarError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ─── Initial date ─────────────────────────────────────────────────────────────

/// Where the first displayed month comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateInput {
    /// The current date.
    #[default]
    Now,
    Date(NaiveDate),
    /// An ISO-like date string, parsed on construction.
    Text(String),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self { DateInput::Date(date) }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self { DateInput::Text(s.to_owned()) }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self { DateInput::Text(s) }
}

impl DateInput {
    /// `today` stands in for [`DateInput::Now`].
    pub fn resolve(&self, today: NaiveDate) -> Result<NaiveDate, CalendarError> {
        match self {
            DateInput::Now        => Ok(today),
            DateInput::Date(date) => Ok(*date),
            DateInput::Text(s)    => parse_date_str(s)
                .ok_or_else(|| CalendarError::InvalidDateString { input: s.clone() }),
        }
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, a local date-time, RFC 3339,
/// `YYYY-MM` and a bare `YYYY`. The calendar date is taken as written;
/// offsets are not converted.
pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| parse_year_month(s))
}

fn parse_year_month(s: &str) -> Option<NaiveDate> {
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    match s.split_once('-') {
        Some((y, m)) if y.len() == 4 && m.len() == 2 && all_digits(y) && all_digits(m) => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, 1)
        }
        None if s.len() == 4 && all_digits(s) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        _ => None,
    }
}

// ─── State ────────────────────────────────────────────────────────────────────

/// The displayed (year, month) plus the fixed "today" used for
/// classification. `month0` is always in `0..=11`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    year:          i32,
    month0:        u32,
    today:         NaiveDate,
    min_year:      i32,
    max_year:      i32,
    date_fallback: Option<String>,
}

impl CalendarState {
    /// Starts at the month of `input`, with today taken from the local clock.
    pub fn initialize(input: impl Into<DateInput>, config: &CalendarConfig) -> Self {
        Self::with_today(input, config, Local::now().date_naive())
    }

    /// Like [`CalendarState::initialize`] with a fixed `today`. An
    /// unparseable date string is logged and replaced by `today`.
    pub fn with_today(input: impl Into<DateInput>, config: &CalendarConfig, today: NaiveDate) -> Self {
        let (start, date_fallback) = match input.into().resolve(today) {
            Ok(date) => (date, None),
            Err(CalendarError::InvalidDateString { input }) => {
                tracing::warn!("{input} is not a valid date string format; showing {today}");
                (today, Some(input))
            }
            Err(e) => {
                tracing::warn!("{e}");
                (today, None)
            }
        };

        Self {
            year:     start.year(),
            month0:   start.month0(),
            today,
            min_year: config.min_year(),
            max_year: config.max_year(),
            date_fallback,
        }
    }

    pub fn year(&self)     -> i32       { self.year }
    pub fn month0(&self)   -> u32       { self.month0 }
    pub fn today(&self)    -> NaiveDate { self.today }
    pub fn min_year(&self) -> i32       { self.min_year }
    pub fn max_year(&self) -> i32       { self.max_year }

    /// The date string that failed to parse, if construction fell back to today.
    pub fn date_fallback(&self) -> Option<&str> {
        self.date_fallback.as_deref()
    }

    /// First day of the displayed month.
    pub fn first_of_month(&self) -> Option<NaiveDate> {
        first_of_month(self.year, self.month0)
    }

    /// Moves one month forward. There is no `max_year` check here; hosts
    /// gate the control with [`CalendarState::can_go_next`]. Only a month
    /// beyond chrono's date range is refused.
    pub fn next_month(&mut self) -> bool {
        let (year, month0) = if self.month0 == 11 {
            match self.year.checked_add(1) {
                Some(y) => (y, 0),
                None    => return false,
            }
        } else {
            (self.year, self.month0 + 1)
        };
        if first_of_month(year, month0).is_none() {
            tracing::debug!("{year}-{:02} is outside the supported date range", month0 + 1);
            return false;
        }
        self.year   = year;
        self.month0 = month0;
        true
    }

    /// Moves one month back unless that would land before `min_year`.
    pub fn prev_month(&mut self) -> bool {
        let (year, month0) = if self.month0 == 0 {
            (self.year - 1, 11)
        } else {
            (self.year, self.month0 - 1)
        };
        if year < self.min_year || first_of_month(year, month0).is_none() {
            return false;
        }
        self.year   = year;
        self.month0 = month0;
        true
    }

    pub fn can_go_prev(&self) -> bool {
        !(self.month0 == 0 && self.year == self.min_year)
    }

    pub fn can_go_next(&self) -> bool {
        !(self.month0 == 11 && self.year == self.max_year)
    }
}
