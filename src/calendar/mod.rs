//! Calendar arithmetic shared by the state machine and the grid builder.
//!
//! Months are zero-based throughout (`0` = January), the same convention as
//! chrono's [`Datelike::month0`].

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::CalendarError;

pub mod grid;
pub mod state;

pub use grid::{build_grid, weeks, DayCell, FIT_WEEKS_DAYS};
pub use state::{CalendarState, DateInput};

/// First day of the given month, or `None` when the year is outside the
/// range chrono can represent.
pub fn first_of_month(year: i32, month0: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
}

/// Last day of the given month.
pub fn last_of_month(year: i32, month0: u32) -> Option<NaiveDate> {
    let (next_year, next_month0) = if month0 == 11 { (year + 1, 0) } else { (year, month0 + 1) };
    match first_of_month(next_year, next_month0) {
        Some(next) => next.pred_opt(),
        // December of chrono's last representable year.
        None => NaiveDate::from_ymd_opt(year, month0 + 1, 31),
    }
}

pub fn days_in_month(year: i32, month0: u32) -> Option<u32> {
    last_of_month(year, month0).map(|d| d.day())
}

/// Saturday and Sunday, regardless of any week-start setting.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Canonical `YYYY-MM-DD` key used for highlight lookup.
pub fn date_to_key(date: NaiveDate) -> String {
    let year = date.year();
    let sign = if year < 0 { "-" } else { "" };
    format!("{sign}{:04}-{:02}-{:02}", year.unsigned_abs(), date.month(), date.day())
}

/// Inverse of [`date_to_key`]. Month and day must be two digits.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, CalendarError> {
    let invalid = || CalendarError::InvalidDateKey { key: key.to_owned() };

    let (year, rest) = match key.strip_prefix('-') {
        Some(unsigned) => {
            let (y, rest) = unsigned.split_once('-').ok_or_else(invalid)?;
            (format!("-{y}"), rest)
        }
        None => {
            let (y, rest) = key.split_once('-').ok_or_else(invalid)?;
            (y.to_owned(), rest)
        }
    };
    let (month, day) = rest.split_once('-').ok_or_else(invalid)?;
    if month.len() != 2 || day.len() != 2 || year.trim_start_matches('-').len() < 4 {
        return Err(invalid());
    }

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 1), Some(29));
        assert_eq!(days_in_month(2023, 1), Some(28));
        assert_eq!(days_in_month(1900, 1), Some(28));
        assert_eq!(days_in_month(2000, 1), Some(29));
        assert_eq!(days_in_month(2024, 11), Some(31));
        assert_eq!(days_in_month(2024, 3), Some(30));
    }

    #[test]
    fn last_of_december_rolls_over_year() {
        assert_eq!(last_of_month(2024, 11), Some(ymd(2024, 12, 31)));
    }

    #[test]
    fn last_of_month_at_range_end() {
        let max_year = NaiveDate::MAX.year();
        assert_eq!(last_of_month(max_year, 11), NaiveDate::from_ymd_opt(max_year, 12, 31));
    }

    #[test]
    fn weekend_is_saturday_and_sunday() {
        // 2024-06-01 is a Saturday.
        assert!(is_weekend(ymd(2024, 6, 1)));
        assert!(is_weekend(ymd(2024, 6, 2)));
        for d in 3..=7 {
            assert!(!is_weekend(ymd(2024, 6, d)));
        }
    }

    #[test]
    fn key_is_zero_padded() {
        assert_eq!(date_to_key(ymd(2024, 3, 5)), "2024-03-05");
        assert_eq!(date_to_key(ymd(987, 12, 25)), "0987-12-25");
    }

    #[test]
    fn key_round_trips() {
        for date in [ymd(2024, 2, 29), ymd(1, 1, 1), ymd(9999, 12, 31), ymd(-44, 3, 15)] {
            assert_eq!(parse_date_key(&date_to_key(date)).unwrap(), date);
        }
    }

    #[test]
    fn key_rejects_unpadded_and_impossible_dates() {
        for bad in ["2024-2-01", "2024-02-1", "24-02-01", "2023-02-29", "2024-13-01", "", "2024"] {
            assert!(
                matches!(parse_date_key(bad), Err(CalendarError::InvalidDateKey { .. })),
                "{bad} should be rejected"
            );
        }
    }
}
