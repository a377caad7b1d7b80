//! Logging macros for ergonomic message formatting and inline fields.
//!
//! Fields go in braces before the message, keyed by identifier the way
//! keyword arguments would be. The message takes `format!` arguments.
//!
//! # Examples
//!
//! ```
//! use chronicle_logger::prelude::*;
//! use chronicle_logger::{error, fields, info};
//!
//! let memory = MemoryDestination::new();
//! let logger = Chronicle::builder()
//!     .threshold(Severity::Info)
//!     .destination(memory.clone())
//!     .build();
//!
//! logger.bind(fields! { ipaddress = "1.2.3.4", unique_log_id = 54321 });
//!
//! // Message only
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With per-call fields, private ones included
//! error!(logger, { private = "User is Paul", attempt = 3 }, "Invalid login #{}", 3);
//!
//! let record = memory.last_json().unwrap();
//! assert_eq!(record["event"], "Invalid login #3");
//! assert_eq!(record["private"][0], "User is Paul");
//! ```

/// Build a [`Fields`](crate::Fields) value from `key = value` pairs.
///
/// # Examples
///
/// ```
/// use chronicle_logger::fields;
///
/// let f = fields! { status = "Logging in", private = "User is Paul" };
/// assert_eq!(f.len(), 2);
/// assert!(fields!().is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $( fields.add_field(stringify!($key), $value); )+
        fields
    }};
}

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use chronicle_logger::prelude::*;
/// # let logger = Chronicle::builder().destination(MemoryDestination::new()).build();
/// use chronicle_logger::log;
/// log!(logger, LogLevel::Warning, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Critical, { disk = "sda1" });
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, { $($key:ident = $value:expr),* $(,)? }, $($arg:tt)+) => {
        $logger.log(
            $level,
            ::std::option::Option::Some($crate::FieldValue::from(format!($($arg)+))),
            $crate::fields!($($key = $value),*),
        )
    };
    ($logger:expr, $level:expr, { $($key:ident = $value:expr),* $(,)? }) => {
        $logger.log($level, ::std::option::Option::None, $crate::fields!($($key = $value),*))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            ::std::option::Option::Some($crate::FieldValue::from(format!($($arg)+))),
            $crate::Fields::new(),
        )
    };
}

/// Log an info-level record.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level record.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level record.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level record.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log a record that passes any threshold.
///
/// # Examples
///
/// ```
/// # use chronicle_logger::prelude::*;
/// # let logger = Chronicle::builder().destination(MemoryDestination::new()).build();
/// use chronicle_logger::always;
/// always!(logger, "My App v{} starting...", "1.0");
/// ```
#[macro_export]
macro_rules! always {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Always, $($arg)+)
    };
}
