//! Classification of sensitive fields and redaction of rendered records
//!
//! A key is private when it starts with the logger's privacy prefix. Private
//! values never become top-level record fields; they are gathered, unkeyed, in
//! a list stored under the prefix itself (`private` by default) so they can be
//! stripped before logs are shown to end users.

use super::error::{LoggerError, Result};

/// Prefix marking a key as private unless configured otherwise
pub const DEFAULT_PRIVACY_PREFIX: &str = "private";

/// Outcome of classifying a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Private,
    Ordinary,
}

impl Classification {
    pub fn is_private(&self) -> bool {
        matches!(self, Classification::Private)
    }
}

/// Classify `key` against `prefix` (case-sensitive prefix match)
///
/// An empty prefix marks every key private.
#[inline]
pub fn classify(key: &str, prefix: &str) -> Classification {
    if key.starts_with(prefix) {
        Classification::Private
    } else {
        Classification::Ordinary
    }
}

/// Trimmed prefix, or an error when nothing is left
///
/// An empty prefix would turn every key private.
pub fn validate_privacy_prefix(raw: &str) -> Result<String> {
    let prefix = raw.trim();
    if prefix.is_empty() {
        return Err(LoggerError::config(
            "privacy_prefix",
            "prefix must not be empty",
        ));
    }
    Ok(prefix.to_string())
}

/// Remove the private list from an already rendered record
///
/// `prefix` is the privacy prefix the record was written with; the list is
/// stored under that key. Returns the record re-serialized without it.
pub fn redact_json(payload: &str, prefix: &str) -> Result<String> {
    let mut value: serde_json::Value = serde_json::from_str(payload)?;
    if let Some(object) = value.as_object_mut() {
        object.remove(prefix);
    }
    Ok(serde_json::to_string(&value)?)
}
