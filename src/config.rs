//! Calendar options and their resolution into a typed configuration.
//!
//! [`CalendarOptions`] is the input boundary: every field is optional and
//! loosely typed, so it can be filled from a TOML file, a JSON string or by
//! hand. [`CalendarConfig::resolve`] turns it into a fully populated value.
//! Resolution never fails; a field of the wrong shape falls back to its
//! default and the fallback is logged at debug level.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::calendar::{date_to_key, parse_date_key, DateInput};
use crate::error::CalendarError;

pub const CONFIG_PATH_ENV_VAR: &str = "KALANDAR_CONFIG";

pub const DEFAULT_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tu", "We", "Th", "Fr", "Sa"];

pub const DEFAULT_MONTH_NAMES: [&str; 12] = [
    "January", "February", "March",     "April",   "May",      "June",
    "July",    "August",   "September", "October", "November", "December",
];

pub const DEFAULT_MIN_YEAR: i32 = 0;
pub const DEFAULT_MAX_YEAR: i32 = 2024;

// ─── Highlight metadata ───────────────────────────────────────────────────────

/// Extra classification attached to one date.
///
/// `label: None` and `label: Some("")` are different: the first leaves the
/// label attribute unset, the second sets it to an empty string. Only a
/// non-empty label earns the `has-label` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    pub class: Option<String>,
    pub label: Option<String>,
}

impl Highlight {
    pub fn with_class(class: impl Into<String>) -> Self {
        Self { class: Some(class.into()), label: None }
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self { class: None, label: Some(label.into()) }
    }

    /// Whitespace-separated class tokens.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class.as_deref().unwrap_or("").split_whitespace()
    }

    pub fn has_label(&self) -> bool {
        self.label.as_deref().is_some_and(|l| !l.is_empty())
    }

    fn from_value(key: &str, value: &Value) -> Option<Self> {
        let Value::Object(fields) = value else {
            tracing::debug!("highlight {key}: expected a table, got {value}; skipped");
            return None;
        };
        let text = |field: &str| match fields.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                tracing::debug!("highlight {key}: `{field}` is not a string ({other}); ignored");
                None
            }
            None => None,
        };
        Some(Self { class: text("class"), label: text("label") })
    }
}

// ─── Input boundary ───────────────────────────────────────────────────────────

/// Unvalidated calendar options. Keys are accepted in snake_case and in
/// the camelCase spelling (`minYear`, `fitWeeks`, ...). When an object
/// carries both spellings the snake_case one wins.
#[derive(Debug, Clone, Default)]
pub struct CalendarOptions {
    pub date:              Option<Value>,
    pub day_names:         Option<Value>,
    pub month_names:       Option<Value>,
    pub week_start:        Option<Value>,
    pub min_year:          Option<Value>,
    pub max_year:          Option<Value>,
    pub fit_weeks:         Option<Value>,
    pub highlighted_dates: Option<Value>,
}

/// Takes `snake` or, failing that, `camel` out of `map`.
fn field(map: &mut Map<String, Value>, snake: &str, camel: &str) -> Option<Value> {
    let camel_value = map.remove(camel);
    match map.remove(snake) {
        Some(value) => {
            if camel_value.is_some() {
                tracing::debug!("both `{snake}` and `{camel}` given; using `{snake}`");
            }
            Some(value)
        }
        None => camel_value,
    }
}

impl CalendarOptions {
    /// Anything other than an object yields the defaults. Each key is read
    /// on its own, so one odd entry never discards the others.
    pub fn from_value(value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                tracing::debug!("options are not an object ({other}); using defaults");
                return Self::default();
            }
        };
        let options = Self {
            date:              map.remove("date"),
            day_names:         field(&mut map, "day_names", "dayNames"),
            month_names:       field(&mut map, "month_names", "monthNames"),
            week_start:        field(&mut map, "week_start", "weekStart"),
            min_year:          field(&mut map, "min_year", "minYear"),
            max_year:          field(&mut map, "max_year", "maxYear"),
            fit_weeks:         field(&mut map, "fit_weeks", "fitWeeks"),
            highlighted_dates: field(&mut map, "highlighted_dates", "highlightedDates"),
        };
        for key in map.keys() {
            tracing::debug!("unknown option `{key}` ignored");
        }
        options
    }

    pub fn from_json(s: &str) -> Result<Self, CalendarError> {
        Ok(Self::from_value(serde_json::from_str(s)?))
    }

    pub fn from_toml(s: &str) -> Result<Self, CalendarError> {
        let table: toml::Table = toml::from_str(s)?;
        Ok(Self::from_value(toml_to_json(toml::Value::Table(table))))
    }

    /// Loads `config.toml` from the config directory, or the file named by
    /// `KALANDAR_CONFIG`. A missing file yields the defaults.
    pub fn load() -> Result<Self, CalendarError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, CalendarError> {
        if !path.exists() {
            tracing::debug!("no config at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|source| CalendarError::ReadConfig { path: path.to_owned(), source })?;
        Self::from_toml(&text)
    }

    /// The initial date to display, as given.
    pub fn date_input(&self) -> DateInput {
        match &self.date {
            None | Some(Value::Null) => DateInput::Now,
            Some(Value::String(s)) => DateInput::Text(s.clone()),
            Some(other) => {
                tracing::debug!("date option {other} is neither a date nor a string");
                DateInput::Now
            }
        }
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV_VAR) {
        return PathBuf::from(path);
    }
    config_dir().join("config.toml")
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kalandar")
}

/// TOML date-times become strings so they reach the date parser.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s)   => Value::String(s),
        toml::Value::Integer(i)  => Value::from(i),
        toml::Value::Float(f)    => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b)  => Value::Bool(b),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(a)    => Value::Array(a.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(t)    => {
            Value::Object(t.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect())
        }
    }
}

// ─── Resolved configuration ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarConfig {
    day_names:         Vec<String>,
    month_names:       Vec<String>,
    week_start:        i64,
    min_year:          i32,
    max_year:          i32,
    fit_weeks:         bool,
    highlighted_dates: HashMap<String, Highlight>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            day_names:         DEFAULT_DAY_NAMES.iter().map(|s| s.to_string()).collect(),
            month_names:       DEFAULT_MONTH_NAMES.iter().map(|s| s.to_string()).collect(),
            week_start:        0,
            min_year:          DEFAULT_MIN_YEAR,
            max_year:          DEFAULT_MAX_YEAR,
            fit_weeks:         true,
            highlighted_dates: HashMap::new(),
        }
    }
}

impl CalendarConfig {
    /// Fills every field from `options`, falling back to the default for
    /// anything missing or of the wrong shape.
    pub fn resolve(options: &CalendarOptions) -> Self {
        let d = Self::default();
        Self {
            day_names:   names("day_names", options.day_names.as_ref(), d.day_names),
            month_names: names("month_names", options.month_names.as_ref(), d.month_names),
            week_start:  integer("week_start", options.week_start.as_ref()).unwrap_or(d.week_start),
            min_year:    year("min_year", options.min_year.as_ref()).unwrap_or(d.min_year),
            max_year:    year("max_year", options.max_year.as_ref()).unwrap_or(d.max_year),
            fit_weeks:   boolean("fit_weeks", options.fit_weeks.as_ref()).unwrap_or(d.fit_weeks),
            highlighted_dates: highlights(options.highlighted_dates.as_ref()),
        }
    }

    pub fn with_fit_weeks(mut self, fit_weeks: bool) -> Self {
        self.fit_weeks = fit_weeks;
        self
    }

    pub fn with_year_bounds(mut self, min_year: i32, max_year: i32) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    pub fn with_highlight(mut self, date: NaiveDate, highlight: Highlight) -> Self {
        self.highlighted_dates.insert(date_to_key(date), highlight);
        self
    }

    pub fn day_names(&self)   -> &[String] { &self.day_names }
    pub fn month_names(&self) -> &[String] { &self.month_names }
    /// Parsed and kept, but weeks always start on Sunday.
    pub fn week_start(&self)  -> i64       { self.week_start }
    pub fn min_year(&self)    -> i32       { self.min_year }
    pub fn max_year(&self)    -> i32       { self.max_year }
    pub fn fit_weeks(&self)   -> bool      { self.fit_weeks }

    pub fn highlighted_dates(&self) -> &HashMap<String, Highlight> {
        &self.highlighted_dates
    }

    pub fn month_name(&self, month0: u32) -> &str {
        self.month_names.get(month0 as usize).map_or("", String::as_str)
    }

    /// Exact date-key lookup.
    pub fn highlight_for(&self, date: NaiveDate) -> Option<&Highlight> {
        self.highlighted_dates.get(&date_to_key(date))
    }
}

// ─── Field normalization ──────────────────────────────────────────────────────

/// Leading-integer parse: whitespace, optional sign, then digits up to the
/// first non-digit. `"1990abc"` is 1990, `"abc"` is nothing.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _          => (false, s),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let n: i64 = rest[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}

fn integer(field: &str, value: Option<&Value>) -> Option<i64> {
    let parsed = match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    };
    if parsed.is_none() {
        tracing::debug!("{field}: {:?} is not an integer; using default", value);
    }
    parsed
}

fn year(field: &str, value: Option<&Value>) -> Option<i32> {
    let n = integer(field, value)?;
    let year = i32::try_from(n).ok();
    if year.is_none() {
        tracing::debug!("{field}: {n} is out of range; using default");
    }
    year
}

fn boolean(field: &str, value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b)   => Some(*b),
        Value::String(s) => Some(s.eq_ignore_ascii_case("true")),
        other => {
            tracing::debug!("{field}: {other} is not a boolean; using default");
            None
        }
    }
}

fn names(field: &str, value: Option<&Value>, default: Vec<String>) -> Vec<String> {
    let Some(value) = value else { return default };
    let parsed: Option<Vec<String>> = value.as_array().and_then(|items| {
        items.iter().map(|v| v.as_str().map(str::to_owned)).collect()
    });
    match parsed {
        Some(names) if names.len() == default.len() => names,
        _ => {
            tracing::debug!("{field}: expected {} strings; using default", default.len());
            default
        }
    }
}

fn highlights(value: Option<&Value>) -> HashMap<String, Highlight> {
    let Some(value) = value else { return HashMap::new() };
    let Value::Object(entries) = value else {
        tracing::debug!("highlighted_dates is not a table; ignored");
        return HashMap::new();
    };
    entries
        .iter()
        .filter(|(_, v)| !matches!(v, Value::Null | Value::Bool(false)))
        .filter_map(|(key, v)| {
            if parse_date_key(key).is_err() {
                tracing::debug!("highlight key {key:?} is not YYYY-MM-DD and will never match");
            }
            Highlight::from_value(key, v).map(|h| (key.clone(), h))
        })
        .collect()
}
