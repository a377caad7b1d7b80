//! Derived record metadata: timestamp and call site

use chrono::{DateTime, Utc};
use std::panic::Location;

/// Timestamp layout written into every record (UTC, second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SSZ`
#[must_use]
pub fn format_timestamp(datetime: &DateTime<Utc>) -> String {
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

/// Current UTC time in record format
#[must_use]
pub fn timestamp_now() -> String {
    format_timestamp(&Utc::now())
}

/// Source location of a public logging call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
}

impl CallSite {
    pub const UNKNOWN_FILE: &'static str = "unknown";

    /// Location of the caller
    ///
    /// Every public entry point between the user's code and this function
    /// must carry `#[track_caller]`, otherwise the location of the innermost
    /// untracked frame is reported.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        if location.file().is_empty() {
            return Self::unknown();
        }
        Self {
            file: location.file().to_string(),
            line: location.line(),
        }
    }

    /// Placeholder used when the call site cannot be resolved
    pub fn unknown() -> Self {
        Self {
            file: Self::UNKNOWN_FILE.to_string(),
            line: 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.line == 0 && self.file == Self::UNKNOWN_FILE
    }
}

impl Default for CallSite {
    fn default() -> Self {
        Self::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format() {
        let datetime = Utc
            .with_ymd_and_hms(2013, 10, 28, 21, 26, 31)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(987);

        assert_eq!(format_timestamp(&datetime), "2013-10-28T21:26:31Z");
    }

    #[test]
    fn test_timestamp_now_shape() {
        let now = timestamp_now();
        assert_eq!(now.len(), 20);
        assert!(now.ends_with('Z'));
        assert_eq!(&now[4..5], "-");
        assert_eq!(&now[10..11], "T");
        assert!(DateTime::parse_from_rfc3339(&now).is_ok());
    }

    #[test]
    fn test_caller_reports_this_file() {
        let expected_line = line!() + 1;
        let site = CallSite::caller();

        assert!(site.file.ends_with("metadata.rs"));
        assert_eq!(site.line, expected_line);
    }

    #[test]
    fn test_unknown_placeholder() {
        let site = CallSite::unknown();
        assert_eq!(site.file, "unknown");
        assert_eq!(site.line, 0);
        assert!(site.is_unknown());
        assert_eq!(CallSite::default(), site);
    }
}
