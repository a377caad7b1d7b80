//! Record assembly and JSON rendering
//!
//! A record is a flat JSON object. Sources are applied in a fixed order so that
//! later ones overwrite earlier ones on key collisions:
//!
//! 1. persistent bindings
//! 2. `timestamp`, `loglevel`
//! 3. `file`, `lineno`
//! 4. `event`
//! 5. ordinary per-call fields
//! 6. the private list, keyed by the current privacy prefix (only when at
//!    least one private value was collected)
//!
//! The list key starts with the prefix, so no ordinary field can share it.

use super::binding::BindingStore;
use super::field_value::FieldValue;
use super::fields::Fields;
use super::log_level::LogLevel;
use super::metadata::{timestamp_now, CallSite};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Metadata derived for a single call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMetadata {
    pub timestamp: String,
    pub call_site: CallSite,
}

impl RecordMetadata {
    /// Metadata stamped with the current UTC time
    pub fn now(call_site: CallSite) -> Self {
        Self {
            timestamp: timestamp_now(),
            call_site,
        }
    }
}

/// One assembled log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    level: LogLevel,
    private_key: String,
    fields: Map<String, Value>,
}

impl LogRecord {
    /// Assemble a record from the logger context and the call's arguments
    ///
    /// Per-call ordinary fields land on this record only. Per-call private
    /// values are appended to the store and show up in every later record
    /// until the store is cleared.
    pub fn assemble(
        level: LogLevel,
        event: Option<FieldValue>,
        call_fields: Fields,
        store: &BindingStore,
        metadata: RecordMetadata,
    ) -> Self {
        let (bindings, ordinary, private_values, private_key) = store.with_context(|context| {
            let ordinary = context.absorb_call_fields(call_fields);
            (
                context.bindings().clone(),
                ordinary,
                context.private_values().to_vec(),
                context.privacy_prefix().to_string(),
            )
        });

        let mut fields: Map<String, Value> = bindings
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json_value()))
            .collect();

        fields.insert("timestamp".to_string(), Value::String(metadata.timestamp));
        fields.insert("loglevel".to_string(), Value::String(level.to_str().to_string()));

        fields.insert("file".to_string(), Value::String(metadata.call_site.file));
        fields.insert("lineno".to_string(), Value::from(metadata.call_site.line));

        if let Some(event) = event {
            fields.insert("event".to_string(), event.to_json_value());
        }

        for (key, value) in ordinary {
            fields.insert(key, value.to_json_value());
        }

        if !private_values.is_empty() {
            fields.insert(
                private_key.clone(),
                Value::Array(private_values.iter().map(FieldValue::to_json_value).collect()),
            );
        }

        Self {
            level,
            private_key,
            fields,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn event(&self) -> Option<&Value> {
        self.fields.get("event")
    }

    /// Key the private list is stored under (the prefix at assembly time)
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Collected private values, if any
    pub fn private_values(&self) -> Option<&Vec<Value>> {
        self.fields.get(&self.private_key).and_then(Value::as_array)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Copy of this record without the private list
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut fields = self.fields.clone();
        fields.remove(&self.private_key);
        Self {
            level: self.level,
            private_key: self.private_key.clone(),
            fields,
        }
    }

    /// Render as a single-line JSON object
    ///
    /// Non-ASCII text is written as-is. Rendering cannot fail for a map of
    /// `serde_json::Value`s; should it ever, a minimal record describing the
    /// failure is returned instead so the log call still produces output.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.fields).unwrap_or_else(|e| self.fallback_json(&e))
    }

    fn fallback_json(&self, error: &serde_json::Error) -> String {
        eprintln!("[LOGGER ERROR] Failed to serialize record: {}", error);
        let mut fallback = Map::new();
        fallback.insert("loglevel".to_string(), Value::String(self.level.to_str().to_string()));
        fallback.insert(
            "serialization_error".to_string(),
            Value::String(error.to_string()),
        );
        Value::Object(fallback).to_string()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Serialize for LogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
