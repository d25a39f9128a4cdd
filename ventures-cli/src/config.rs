//! Runtime configuration from the environment.
//!
//! `.env` in the working directory and `ventures.env` in the config directory
//! are read first; variables already set in the process environment win.

use std::env;
use std::time::Duration;

use simplelog::LevelFilter;
use thiserror::Error;

use crate::paths;

pub const URL_VAR: &str = "VENTURES_URL";
pub const API_KEY_VAR: &str = "VENTURES_API_KEY";
pub const BUCKET_VAR: &str = "VENTURES_BUCKET";
pub const TIMEOUT_VAR: &str = "VENTURES_TIMEOUT_SECS";
pub const LOG_VAR: &str = "VENTURES_LOG";

const DEFAULT_BUCKET: &str = "uploads";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("VENTURES_API_KEY must be set when VENTURES_URL is set")]
    MissingApiKey,

    #[error("VENTURES_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),

    #[error("VENTURES_LOG must be one of off, error, warn, info, debug, trace; got {0:?}")]
    InvalidLogLevel(String),
}

/// Connection to the remote data API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub url: String,
    pub api_key: String,
    pub bucket: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` runs against the in-memory demo data.
    pub remote: Option<Remote>,
    pub timeout: Duration,
    pub log_level: LevelFilter,
}

impl Config {
    /// Loads env files, then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        if let Some(path) = paths::env_file() {
            let _ = dotenvy::from_path(path);
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let remote = match get(URL_VAR) {
            Some(url) => Some(Remote {
                url,
                api_key: get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?,
                bucket: get(BUCKET_VAR).unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            }),
            None => None,
        };

        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let log_level = match get(LOG_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| ConfigError::InvalidLogLevel(raw))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            remote,
            timeout,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_run_offline() {
        let config = config(&[]).unwrap();
        assert_eq!(config.remote, None);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_remote_settings() {
        let config = config(&[
            (URL_VAR, "https://project.example.co"),
            (API_KEY_VAR, "anon"),
            (TIMEOUT_VAR, " 5 "),
            (LOG_VAR, "debug"),
        ])
        .unwrap();

        let remote = config.remote.unwrap();
        assert_eq!(remote.bucket, "uploads");
        assert_eq!(remote.api_key, "anon");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config(&[(URL_VAR, "https://project.example.co")]),
            Err(ConfigError::MissingApiKey)
        );
        assert_eq!(
            config(&[(TIMEOUT_VAR, "soon")]),
            Err(ConfigError::InvalidTimeout("soon".into()))
        );
        assert!(matches!(
            config(&[(LOG_VAR, "loud")]),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_blank_url_means_offline() {
        assert_eq!(config(&[(URL_VAR, "  ")]).unwrap().remote, None);
    }
}
