//! Error types for the kalandar crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the kalandar crate.
///
/// None of these stop a calendar from being built: construction always
/// falls back to defaults, and the variants exist so callers can report
/// what was replaced.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// The initial date string did not parse as any accepted format.
    #[error("{input} is not a valid date string format")]
    InvalidDateString {
        /// The rejected input.
        input: String,
    },

    /// A date key was not of the form `YYYY-MM-DD` or named no real date.
    #[error("invalid date key {key:?}, expected YYYY-MM-DD")]
    InvalidDateKey {
        /// The rejected key.
        key: String,
    },

    /// The config file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ReadConfig {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML.
    #[error("failed to parse config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// An options string is not valid JSON.
    #[error("failed to parse options: {0}")]
    ParseJson(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_date_string() {
        let e = CalendarError::InvalidDateString { input: "soon".into() };
        assert_eq!(e.to_string(), "soon is not a valid date string format");
    }

    #[test]
    fn error_invalid_date_key() {
        let e = CalendarError::InvalidDateKey { key: "2024-2-1".into() };
        assert_eq!(
            e.to_string(),
            "invalid date key \"2024-2-1\", expected YYYY-MM-DD"
        );
    }

    #[test]
    fn error_read_config_names_path() {
        let e = CalendarError::ReadConfig {
            path: PathBuf::from("/tmp/kal.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(e.to_string(), "failed to read config file /tmp/kal.toml: denied");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
