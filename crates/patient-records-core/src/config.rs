//! Runtime configuration.
//!
//! Resolved once when a controller is opened and passed in, so nothing reads
//! process environment while handling user actions.

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::validation::DATE_FORMAT;

/// Environment variable: load the mock data set (`true`/`false`/`1`/`0`).
pub const ENV_SEED: &str = "PATIENT_RECORDS_SEED";
/// Environment variable: pin "today" (`YYYY-MM-DD`) for new visits.
pub const ENV_TODAY: &str = "PATIENT_RECORDS_TODAY";

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be true/false/1/0, got {value:?}")]
    InvalidBool { key: &'static str, value: String },

    #[error("{key} must be a YYYY-MM-DD date, got {value:?}")]
    InvalidDate { key: &'static str, value: String },
}

/// Controller configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordsConfig {
    /// Start with the mock patients and visits loaded
    pub seed_mock_data: bool,
    /// Date used for new visits; `None` means the local calendar date
    pub today: Option<NaiveDate>,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            seed_mock_data: true,
            today: None,
        }
    }
}

impl RecordsConfig {
    /// An empty store with a fixed clock; what tests usually want.
    pub fn empty_on(today: NaiveDate) -> Self {
        Self {
            seed_mock_data: false,
            today: Some(today),
        }
    }

    /// Read configuration from the process environment. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_SEED) {
            config.seed_mock_data = match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(ConfigError::InvalidBool {
                        key: ENV_SEED,
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup(ENV_TODAY) {
            let today = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
                ConfigError::InvalidDate {
                    key: ENV_TODAY,
                    value: value.clone(),
                }
            })?;
            config.today = Some(today);
        }

        Ok(config)
    }

    /// The date stamped on newly created visits.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = RecordsConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, RecordsConfig::default());
        assert!(config.seed_mock_data);
    }

    #[test]
    fn test_reads_values() {
        let config = RecordsConfig::from_lookup(lookup_from(&[
            (ENV_SEED, "0"),
            (ENV_TODAY, "2024-05-01"),
        ]))
        .unwrap();
        assert!(!config.seed_mock_data);
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_rejects_bad_bool() {
        let err = RecordsConfig::from_lookup(lookup_from(&[(ENV_SEED, "maybe")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBool {
                key: ENV_SEED,
                value: "maybe".into()
            }
        );
    }

    #[test]
    fn test_rejects_bad_date() {
        let err = RecordsConfig::from_lookup(lookup_from(&[(ENV_TODAY, "tomorrow")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate { .. }));
    }
}
