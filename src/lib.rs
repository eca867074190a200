//! Month calendar core: which days a month view shows, how each one is
//! classified, and how the displayed month moves.
//!
//! ```
//! use chrono::NaiveDate;
//! use kalandar::{build_grid, CalendarConfig, CalendarState};
//!
//! let config = CalendarConfig::default().with_year_bounds(2000, 2030);
//! let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
//! let mut state = CalendarState::with_today("2024-02", &config, today);
//!
//! let grid = build_grid(&state, &config);
//! assert_eq!(grid.len(), 42);
//! assert!(grid.iter().any(|c| c.is_today));
//!
//! state.next_month();
//! assert_eq!(state.month0(), 2);
//! ```
//!
//! The terminal front end in `main.rs` is one host for this core; any other
//! presentation layer plugs in through [`CalendarHooks`].

pub mod calendar;
pub mod config;
pub mod error;
pub mod hooks;

pub use calendar::{
    build_grid, date_to_key, is_weekend, parse_date_key, weeks, CalendarState, DateInput,
    DayCell,
};
pub use config::{CalendarConfig, CalendarOptions, Highlight};
pub use error::CalendarError;
pub use hooks::{Calendar, CalendarHooks, MonthView, NoHooks};
