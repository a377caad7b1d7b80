//! Log level definitions
//!
//! `LogLevel` is the tag written into each record (`"loglevel"`), while
//! `Severity` is what the sink filters on. `LogLevel::Always` has no severity of
//! its own: it is sent at the highest one so any threshold lets it through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity understood by a [`Sink`](super::Sink), ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Severity {
    Info = 0,
    #[default]
    Warning = 1,
    Error = 2,
    Critical = 3,
}

impl Severity {
    /// The most severe level; always passes a threshold check.
    pub const MAX: Severity = Severity::Critical;

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Syslog priority code (RFC 5424 numbering)
    pub fn syslog_code(&self) -> u8 {
        match self {
            Severity::Info => 6,
            Severity::Warning => 4,
            Severity::Error => 3,
            Severity::Critical => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INFO" => Ok(Severity::Info),
            "WARN" | "WARNING" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" | "FATAL" => Ok(Severity::Critical),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}

/// Level tag of an assembled record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Critical,
    /// Emitted regardless of the configured threshold
    Always,
}

impl LogLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Always => "ALWAYS",
        }
    }

    /// Severity the record is handed to the sink with
    pub fn severity(&self) -> Severity {
        match self {
            LogLevel::Info => Severity::Info,
            LogLevel::Warning => Severity::Warning,
            LogLevel::Error => Severity::Error,
            LogLevel::Critical | LogLevel::Always => Severity::MAX,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            "ALWAYS" => Ok(LogLevel::Always),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_maps_to_max_severity() {
        assert_eq!(LogLevel::Always.severity(), Severity::MAX);
        assert_eq!(LogLevel::Always.to_str(), "ALWAYS");
        assert!(LogLevel::Always.severity() >= Severity::Critical);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
        assert_eq!(Severity::default(), Severity::Warning);
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("WARN".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!(" critical ".parse::<Severity>(), Ok(Severity::Critical));
        assert!("loud".parse::<Severity>().is_err());

        assert_eq!("always".parse::<LogLevel>(), Ok(LogLevel::Always));
        assert!("debug".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_syslog_codes() {
        assert_eq!(Severity::Info.syslog_code(), 6);
        assert_eq!(Severity::Critical.syslog_code(), 2);
    }
}
