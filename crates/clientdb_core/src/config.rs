//! Process configuration read from the environment.
//!
//! | Variable             | Default               |
//! |----------------------|-----------------------|
//! | `CLIENTDB_DB_PATH`   | `demo.db`             |
//! | `CLIENTDB_LOG_LEVEL` | `default_log_level()` |
//! | `CLIENTDB_LOG_DIR`   | unset (no file logs)  |

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "CLIENTDB_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "CLIENTDB_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CLIENTDB_LOG_DIR";
pub const DEFAULT_DB_PATH: &str = "demo.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyValue(&'static str),
    Invalid { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(key) => write!(f, "{key} is set but empty"),
            Self::Invalid { key, message } => write!(f, "invalid {key}: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved settings for opening the store and starting logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::from_values(lookup(ENV_DB_PATH), lookup(ENV_LOG_LEVEL), lookup(ENV_LOG_DIR))
    }

    /// Builds configuration from already-resolved raw values; `None` keeps the default.
    pub fn from_values(
        db_path: Option<String>,
        log_level: Option<String>,
        log_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = db_path {
            let trimmed = path.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::EmptyValue(ENV_DB_PATH));
            }
            config.db_path = PathBuf::from(trimmed);
        }

        if let Some(level) = log_level {
            config.log_level = normalize_level(&level).map_err(|message| ConfigError::Invalid {
                key: ENV_LOG_LEVEL,
                message,
            })?;
        }

        if let Some(dir) = log_dir {
            let dir = normalize_log_dir(&dir).map_err(|message| ConfigError::Invalid {
                key: ENV_LOG_DIR,
                message,
            })?;
            config.log_dir = Some(dir);
        }

        Ok(config)
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
    fn defaults_apply_when_nothing_is_set() {
        let config = CoreConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.db_path, PathBuf::from("demo.db"));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn values_are_read_and_normalized() {
        let log_dir = std::env::temp_dir().join("clientdb-logs");
        let config = CoreConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, " clients.db "),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, log_dir.to_str().unwrap()),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("clients.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(log_dir));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = CoreConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::EmptyValue(ENV_DB_PATH));

        let err = CoreConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENV_LOG_LEVEL));

        let err = CoreConfig::from_lookup(lookup_from(&[(ENV_LOG_DIR, "relative/logs")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENV_LOG_DIR));
    }
}
