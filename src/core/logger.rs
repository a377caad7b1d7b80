//! Main logger implementation

use super::{
    binding::{BindingContext, BindingStore},
    config::ChronicleConfig,
    error::Result,
    field_value::FieldValue,
    fields::Fields,
    log_level::{LogLevel, Severity},
    metadata::CallSite,
    metrics::LoggerMetrics,
    privacy::{validate_privacy_prefix, DEFAULT_PRIVACY_PREFIX},
    record::{LogRecord, RecordMetadata},
    sink::{Backend, Destination, Sink},
};
use crate::destinations::ConsoleDestination;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Structured logger with persistent bindings and private-value collection
///
/// Every call assembles one JSON record from the bound fields, the message,
/// the call's own fields and derived metadata, then hands it to the sink at
/// the level's severity. Threshold filtering is the sink's job; the record is
/// assembled either way, so private values passed to a filtered call are
/// still collected.
///
/// A `Chronicle` is `Send + Sync`; share it through `Arc` or use [`global`].
pub struct Chronicle {
    name: String,
    store: BindingStore,
    sink: Arc<dyn Sink>,
    capture_location: bool,
}

impl Chronicle {
    /// Logger writing to the console, configured from the environment
    #[must_use]
    pub fn new() -> Self {
        Self::builder().config(ChronicleConfig::from_env()).build()
    }

    /// Logger forwarding to an existing sink
    #[must_use]
    pub fn with_sink(sink: Arc<dyn Sink>) -> Self {
        Self::builder().sink(sink).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add fields to every subsequent record
    ///
    /// Keys starting with the privacy prefix are collected into the record's
    /// private list instead. Existing keys are overwritten.
    pub fn bind(&self, fields: Fields) {
        self.store.bind(fields);
    }

    /// Remove all bindings and collected private values
    pub fn clear_bindings(&self) {
        self.store.clear();
    }

    pub fn privacy_prefix(&self) -> String {
        self.store.privacy_prefix()
    }

    /// Change the privacy prefix; already bound keys are not reclassified
    ///
    /// Later records carry the private list under the new prefix. An empty
    /// prefix is rejected with [`LoggerError::InvalidConfiguration`](super::LoggerError).
    pub fn set_privacy_prefix(&self, prefix: &str) -> Result<()> {
        self.store.set_privacy_prefix(prefix)
    }

    /// Copy of the current bindings
    pub fn bindings(&self) -> HashMap<String, FieldValue> {
        self.store.snapshot()
    }

    /// Copy of the collected private values, in call order
    pub fn private_values(&self) -> Vec<FieldValue> {
        self.store.private_values()
    }

    pub fn store(&self) -> &BindingStore {
        &self.store
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn set_threshold(&self, threshold: Severity) {
        self.sink.set_threshold(threshold);
    }

    pub fn threshold(&self) -> Severity {
        self.sink.threshold()
    }

    pub fn replace_destinations(&self, destinations: Vec<Box<dyn Destination>>) {
        self.sink.replace_destinations(destinations);
    }

    /// Counters of the sink, when it keeps any (the default [`Backend`] does)
    pub fn metrics(&self) -> Option<Arc<LoggerMetrics>> {
        self.sink.metrics()
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    /// Log at `level` with an optional message and per-call fields
    ///
    /// This is the entry point for records without a message: the level
    /// methods below always set `event`, `log(level, None, fields)` (or
    /// `log!(logger, level, { .. })`) leaves it out.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: Option<FieldValue>, fields: Fields) {
        let call_site = if self.capture_location {
            CallSite::caller()
        } else {
            CallSite::unknown()
        };
        self.dispatch(level, message, fields, call_site);
    }

    /// Log using the first of `args` as the message
    ///
    /// Any further positional values are accepted and ignored.
    #[track_caller]
    pub fn log_args<I, V>(&self, level: LogLevel, args: I, fields: Fields)
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        let message = args.into_iter().next().map(Into::into);
        self.log(level, message, fields);
    }

    // Level shorthands. Each takes a message; the `*_with` forms add per-call
    // fields. Use `log` for a record without a message.

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Info, Some(message.into()), Fields::new());
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Warning, Some(message.into()), Fields::new());
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Error, Some(message.into()), Fields::new());
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Critical, Some(message.into()), Fields::new());
    }

    /// Log regardless of the configured threshold
    #[inline]
    #[track_caller]
    pub fn always(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Always, Some(message.into()), Fields::new());
    }

    #[track_caller]
    pub fn info_with(&self, message: impl Into<FieldValue>, fields: Fields) {
        self.log(LogLevel::Info, Some(message.into()), fields);
    }

    #[track_caller]
    pub fn warning_with(&self, message: impl Into<FieldValue>, fields: Fields) {
        self.log(LogLevel::Warning, Some(message.into()), fields);
    }

    #[track_caller]
    pub fn error_with(&self, message: impl Into<FieldValue>, fields: Fields) {
        self.log(LogLevel::Error, Some(message.into()), fields);
    }

    #[track_caller]
    pub fn critical_with(&self, message: impl Into<FieldValue>, fields: Fields) {
        self.log(LogLevel::Critical, Some(message.into()), fields);
    }

    #[track_caller]
    pub fn always_with(&self, message: impl Into<FieldValue>, fields: Fields) {
        self.log(LogLevel::Always, Some(message.into()), fields);
    }

    fn dispatch(
        &self,
        level: LogLevel,
        message: Option<FieldValue>,
        fields: Fields,
        call_site: CallSite,
    ) {
        let record = LogRecord::assemble(
            level,
            message,
            fields,
            &self.store,
            RecordMetadata::now(call_site),
        );
        let payload = record.to_json();

        // A misbehaving custom sink must not unwind into the caller
        let emit_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.sink.emit(level.severity(), &payload)
        }));
        if emit_result.is_err() {
            eprintln!(
                "[LOGGER CRITICAL] Sink panicked while emitting a {} record from logger '{}'",
                level, self.name
            );
        }
    }
}

impl Default for Chronicle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Chronicle {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

static GLOBAL: OnceLock<Chronicle> = OnceLock::new();

/// Process-wide logger, built on first use with [`Chronicle::new`]
///
/// Bindings made through it are visible from every module that logs with it.
pub fn global() -> &'static Chronicle {
    GLOBAL.get_or_init(Chronicle::new)
}

/// Builder for constructing a Chronicle with a fluent API
///
/// # Example
/// ```
/// use chronicle_logger::prelude::*;
///
/// let memory = MemoryDestination::new();
/// let logger = Chronicle::builder()
///     .name("auth")
///     .threshold(Severity::Info)
///     .privacy_prefix("secret")
///     .destination(memory.clone())
///     .build();
///
/// logger.info_with("login", Fields::new().with_field("secret_user", "paul"));
/// assert_eq!(memory.last_json().unwrap()["secret"][0], "paul");
/// ```
pub struct ChronicleBuilder {
    name: String,
    config: ChronicleConfig,
    threshold_set: bool,
    destinations: Vec<Box<dyn Destination>>,
    sink: Option<Arc<dyn Sink>>,
}

impl ChronicleBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: String::new(),
            config: ChronicleConfig::default(),
            threshold_set: false,
            destinations: Vec::new(),
            sink: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: ChronicleConfig) -> Self {
        self.config = config;
        self.threshold_set = true;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, threshold: Severity) -> Self {
        self.config.threshold = threshold;
        self.threshold_set = true;
        self
    }

    /// Privacy prefix; an empty one is reported on stderr at build time and
    /// the default is used instead
    #[must_use = "builder methods return a new value"]
    pub fn privacy_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.privacy_prefix = prefix.into();
        self
    }

    /// Resolve caller file/line (default `true`)
    #[must_use = "builder methods return a new value"]
    pub fn capture_location(mut self, enable: bool) -> Self {
        self.config.capture_location = enable;
        self
    }

    /// Add a destination
    ///
    /// Without any destination (and without a custom sink) records go to the
    /// console.
    #[must_use = "builder methods return a new value"]
    pub fn destination<D: Destination + 'static>(mut self, destination: D) -> Self {
        self.destinations.push(Box::new(destination));
        self
    }

    /// Forward to a custom sink instead of a new [`Backend`]
    ///
    /// Destinations and an explicit threshold given to the builder are applied
    /// to this sink.
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the Chronicle
    pub fn build(self) -> Chronicle {
        let sink: Arc<dyn Sink> = match self.sink {
            Some(sink) => {
                if self.threshold_set {
                    sink.set_threshold(self.config.threshold);
                }
                if !self.destinations.is_empty() {
                    sink.replace_destinations(self.destinations);
                }
                sink
            }
            None => {
                let backend = Backend::new(self.config.threshold);
                if self.destinations.is_empty() {
                    backend.add_destination(Box::new(ConsoleDestination::new()));
                } else {
                    for destination in self.destinations {
                        backend.add_destination(destination);
                    }
                }
                Arc::new(backend)
            }
        };

        let privacy_prefix = match validate_privacy_prefix(&self.config.privacy_prefix) {
            Ok(prefix) => prefix,
            Err(e) => {
                eprintln!("[LOGGER WARNING] {}; keeping '{}'", e, DEFAULT_PRIVACY_PREFIX);
                DEFAULT_PRIVACY_PREFIX.to_string()
            }
        };

        Chronicle {
            name: self.name,
            store: BindingStore::from_context(BindingContext::with_prefix(privacy_prefix)),
            sink,
            capture_location: self.config.capture_location,
        }
    }
}

impl Default for ChronicleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Chronicle {
    /// Create a builder for Chronicle
    #[must_use]
    pub fn builder() -> ChronicleBuilder {
        ChronicleBuilder::new()
    }
}
