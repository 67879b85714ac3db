//! Shell configuration resolved from the process environment.
//!
//! # Responsibility
//! - Resolve store path, logging and calendar options once at startup.
//! - Reject malformed values instead of silently replacing them.
//!
//! # Invariants
//! - Unset or blank variables fall back to documented defaults.
//! - `upcoming_limit` stays within `1..=MAX_UPCOMING_LIMIT`.

use crate::logging::default_log_level;
use crate::model::date_key::WeekStart;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "DESKTOPAI_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "DESKTOPAI_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "DESKTOPAI_LOG_DIR";
pub const ENV_WEEK_START: &str = "DESKTOPAI_WEEK_START";
pub const ENV_UPCOMING_LIMIT: &str = "DESKTOPAI_UPCOMING_LIMIT";

const DEFAULT_DB_FILE_NAME: &str = "desktopai.sqlite3";
pub const DEFAULT_UPCOMING_LIMIT: u32 = 10;
pub const MAX_UPCOMING_LIMIT: u32 = 50;

/// Malformed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} value `{}`; expected {}",
            self.key, self.value, self.expected
        )
    }
}

impl Error for ConfigError {}

/// Resolved shell configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub week_start: WeekStart,
    pub upcoming_limit: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            week_start: WeekStart::default(),
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

impl ShellConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, one call per variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        if let Some(value) = read(ENV_WEEK_START) {
            config.week_start = parse_week_start(&value)?;
        }
        if let Some(value) = read(ENV_UPCOMING_LIMIT) {
            config.upcoming_limit = parse_upcoming_limit(&value)?;
        }

        Ok(config)
    }
}

fn parse_week_start(value: &str) -> Result<WeekStart, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "sunday" | "sun" => Ok(WeekStart::Sunday),
        "monday" | "mon" => Ok(WeekStart::Monday),
        _ => Err(ConfigError {
            key: ENV_WEEK_START,
            value: value.to_string(),
            expected: "sunday|monday",
        }),
    }
}

fn parse_upcoming_limit(value: &str) -> Result<u32, ConfigError> {
    match value.parse::<u32>() {
        Ok(limit) if (1..=MAX_UPCOMING_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(ConfigError {
            key: ENV_UPCOMING_LIMIT,
            value: value.to_string(),
            expected: "an integer in 1..=50",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ShellConfig, DEFAULT_UPCOMING_LIMIT, ENV_DB_PATH, ENV_LOG_DIR, ENV_UPCOMING_LIMIT,
        ENV_WEEK_START,
    };
    use crate::model::date_key::WeekStart;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ShellConfig, super::ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ShellConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]).expect("defaults should resolve");
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.upcoming_limit, DEFAULT_UPCOMING_LIMIT);
        assert_eq!(config.week_start, WeekStart::Sunday);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn reads_overrides_and_ignores_blank_values() {
        let config = config_from(&[
            (ENV_DB_PATH, " /tmp/shell.sqlite3 "),
            (ENV_LOG_DIR, "   "),
            (ENV_WEEK_START, "Monday"),
            (ENV_UPCOMING_LIMIT, "25"),
        ])
        .expect("overrides should resolve");

        assert_eq!(config.db_path, PathBuf::from("/tmp/shell.sqlite3"));
        assert!(config.log_dir.is_none());
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.upcoming_limit, 25);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = config_from(&[(ENV_WEEK_START, "friday")]).expect_err("bad week start");
        assert_eq!(err.key, ENV_WEEK_START);

        let err = config_from(&[(ENV_UPCOMING_LIMIT, "0")]).expect_err("zero limit");
        assert_eq!(err.key, ENV_UPCOMING_LIMIT);

        let err = config_from(&[(ENV_UPCOMING_LIMIT, "500")]).expect_err("limit above max");
        assert!(err.to_string().contains("1..=50"));
    }
}
