//! Logger configuration and environment overrides
//!
//! Environment variables read by [`ChronicleConfig::from_env`]:
//! - `CHRONICLE_LOG_LEVEL`: threshold (`info`, `warning`, `error`, `critical`)
//! - `CHRONICLE_PRIVACY_PREFIX`: privacy prefix (non-empty)
//!
//! Invalid values are reported on stderr and the default is kept.

use super::error::{LoggerError, Result};
use super::log_level::Severity;
use super::privacy::{validate_privacy_prefix, DEFAULT_PRIVACY_PREFIX};
use serde::{Deserialize, Serialize};

pub const ENV_LOG_LEVEL: &str = "CHRONICLE_LOG_LEVEL";
pub const ENV_PRIVACY_PREFIX: &str = "CHRONICLE_PRIVACY_PREFIX";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChronicleConfig {
    /// Minimum severity the default backend lets through
    pub threshold: Severity,
    /// Keys starting with this are private
    pub privacy_prefix: String,
    /// Resolve file/line of log calls; `unknown`/`0` when disabled
    pub capture_location: bool,
}

impl Default for ChronicleConfig {
    fn default() -> Self {
        Self {
            threshold: Severity::Warning,
            privacy_prefix: DEFAULT_PRIVACY_PREFIX.to_string(),
            capture_location: true,
        }
    }
}

impl ChronicleConfig {
    /// Defaults with overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            match parse_threshold(&raw) {
                Ok(threshold) => config.threshold = threshold,
                Err(e) => eprintln!("[LOGGER WARNING] {}; keeping {}", e, config.threshold),
            }
        }

        if let Some(raw) = lookup(ENV_PRIVACY_PREFIX) {
            match parse_privacy_prefix(&raw) {
                Ok(prefix) => config.privacy_prefix = prefix,
                Err(e) => eprintln!(
                    "[LOGGER WARNING] {}; keeping '{}'",
                    e, config.privacy_prefix
                ),
            }
        }

        config
    }
}

pub fn parse_threshold(raw: &str) -> Result<Severity> {
    raw.parse::<Severity>()
        .map_err(|message| LoggerError::config(ENV_LOG_LEVEL, message))
}

pub fn parse_privacy_prefix(raw: &str) -> Result<String> {
    validate_privacy_prefix(raw)
        .map_err(|_| LoggerError::config(ENV_PRIVACY_PREFIX, "prefix must not be empty"))
}
