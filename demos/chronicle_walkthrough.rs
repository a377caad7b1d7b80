//! Walkthrough of bindings, private values and the ALWAYS level
//!
//! Run with: cargo run --example chronicle_walkthrough

use chronicle_logger::prelude::*;
use chronicle_logger::{fields, redact_json};

mod backoff {
    use chronicle_logger::{fields, FieldValue};

    /// Binds made here are visible to every other user of the global logger
    pub fn log_func() {
        let log = chronicle_logger::global();
        log.bind(fields! { login_backoff_timer = vec![FieldValue::from(30), FieldValue::from("seconds")] });
        log.warning("Set backoff timer");
    }
}

fn main() -> Result<()> {
    let log = chronicle_logger::global();
    let captured = MemoryDestination::new();
    log.replace_destinations(vec![
        Box::new(ConsoleDestination::new()) as Box<dyn Destination>,
        Box::new(captured.clone()),
    ]);

    // Startup message no matter what the threshold is
    log.always("My App v1.0 starting...");

    // Connection received; remember who it is for every later record
    log.bind(fields! { ipaddress = "1.2.3.4", unique_log_id = 54321 });

    // Keys starting with "private" are collected apart from the regular fields
    log.bind(fields! { status = "Logging in", private = "User is Paul" });

    log.error_with(
        "Invalid user login credentials",
        fields! {
            private = "Failed database access code 32 (exception data goes here)",
            private2 = "Login name does not exist",
        },
    );

    backoff::log_func();

    // What a customer-facing log viewer would show
    if let Some(last) = captured.payloads().last() {
        println!("redacted: {}", redact_json(last, &log.privacy_prefix())?);
    }

    log.clear_bindings();
    log.warning("Test log to show that previous bindings are deleted.");

    if let Some(metrics) = log.metrics() {
        println!(
            "emitted: {}, filtered: {}, failure rate: {:.2}%",
            metrics.emitted(),
            metrics.filtered(),
            metrics.failure_rate()
        );
    }

    log.flush()
}
