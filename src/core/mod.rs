//! Core logger types and traits

pub mod binding;
pub mod config;
pub mod error;
pub mod field_value;
pub mod fields;
pub mod log_level;
pub mod logger;
pub mod metadata;
pub mod metrics;
pub mod privacy;
pub mod record;
pub mod sink;

pub use binding::{BindingContext, BindingStore};
pub use config::ChronicleConfig;
pub use error::{LoggerError, Result};
pub use field_value::FieldValue;
pub use fields::Fields;
pub use log_level::{LogLevel, Severity};
pub use logger::{global, Chronicle, ChronicleBuilder};
pub use metadata::CallSite;
pub use metrics::LoggerMetrics;
pub use privacy::{
    classify, redact_json, validate_privacy_prefix, Classification, DEFAULT_PRIVACY_PREFIX,
};
pub use record::{LogRecord, RecordMetadata};
pub use sink::{Backend, Destination, Sink};
