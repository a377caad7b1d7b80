//! # Chronicle Logger
//!
//! A structured-logging facade producing one JSON object per log call.
//!
//! ## Features
//!
//! - **Call-site metadata**: UTC timestamp, file and line added automatically
//! - **Bindings**: `bind()` fields once, see them in every later record
//! - **Private values**: keys starting with the privacy prefix (`"private"` by
//!   default) are collected into a separate list, stored under the prefix,
//!   that can be stripped before logs are shown to users
//! - **Always level**: status records that pass any threshold
//! - **Thread Safe**: one logger can be shared by many threads
//!
//! ```
//! use chronicle_logger::prelude::*;
//!
//! let memory = MemoryDestination::new();
//! let logger = Chronicle::builder().destination(memory.clone()).build();
//!
//! logger.bind(Fields::new().with_field("ipaddress", "1.2.3.4").with_field("private", "User is Paul"));
//! logger.error("Invalid user login credentials");
//!
//! let record = memory.last_json().unwrap();
//! assert_eq!(record["ipaddress"], "1.2.3.4");
//! assert_eq!(record["private"][0], "User is Paul");
//! ```

pub mod core;
pub mod destinations;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        global, Backend, BindingStore, CallSite, Chronicle, ChronicleBuilder, ChronicleConfig,
        Destination, FieldValue, Fields, LogLevel, LogRecord, LoggerError, LoggerMetrics, Result,
        Severity, Sink,
    };
    pub use crate::destinations::{ConsoleDestination, FileDestination, MemoryDestination};
}

pub use core::{
    classify, global, redact_json, Backend, BindingContext, BindingStore, CallSite, Chronicle,
    ChronicleBuilder, ChronicleConfig, Classification, Destination, FieldValue, Fields, LogLevel,
    LogRecord, LoggerError, LoggerMetrics, RecordMetadata, Result, Severity, Sink,
    validate_privacy_prefix, DEFAULT_PRIVACY_PREFIX,
};
pub use destinations::{ConsoleDestination, FileDestination, MemoryDestination};
