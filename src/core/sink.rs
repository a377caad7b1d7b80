//! Sink interface and the default backend
//!
//! A [`Sink`] receives rendered records together with a [`Severity`]. It owns
//! threshold filtering and the list of [`Destination`]s; the logger never
//! filters on its own.

use super::error::Result;
use super::log_level::Severity;
use super::metrics::LoggerMetrics;
use parking_lot::RwLock;
use std::sync::Arc;

/// Output destination for rendered records (console, file, socket, ...)
pub trait Destination: Send + Sync {
    fn write(&mut self, severity: Severity, payload: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Leveled backend a logger forwards rendered records to
///
/// `emit` is best-effort: implementations report failures through their own
/// channels and never panic or return errors to the logging call.
pub trait Sink: Send + Sync {
    fn emit(&self, severity: Severity, payload: &str);
    fn set_threshold(&self, threshold: Severity);
    fn threshold(&self) -> Severity;
    fn replace_destinations(&self, destinations: Vec<Box<dyn Destination>>);

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Delivery counters, for sinks that keep them
    fn metrics(&self) -> Option<Arc<LoggerMetrics>> {
        None
    }
}

/// Default [`Sink`]: threshold filter in front of a list of destinations
///
/// Each destination call is isolated with `catch_unwind` so one failing
/// destination does not keep the others from receiving the record.
pub struct Backend {
    threshold: RwLock<Severity>,
    destinations: RwLock<Vec<Box<dyn Destination>>>,
    metrics: Arc<LoggerMetrics>,
}

impl Backend {
    #[must_use]
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold: RwLock::new(threshold),
            destinations: RwLock::new(Vec::new()),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    #[must_use]
    pub fn with_destination<D: Destination + 'static>(self, destination: D) -> Self {
        self.add_destination(Box::new(destination));
        self
    }

    pub fn add_destination(&self, destination: Box<dyn Destination>) {
        self.destinations.write().push(destination);
    }

    pub fn destination_names(&self) -> Vec<String> {
        self.destinations
            .read()
            .iter()
            .map(|d| d.name().to_string())
            .collect()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Shared handle to the metrics, usable after the backend moved into a logger
    pub fn metrics_handle(&self) -> Arc<LoggerMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Write to every destination; returns `true` if any of them failed
    fn dispatch(
        destinations: &mut [Box<dyn Destination>],
        severity: Severity,
        payload: &str,
        metrics: &LoggerMetrics,
    ) -> bool {
        let mut has_error = false;

        for (idx, destination) in destinations.iter_mut().enumerate() {
            let write_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                destination.write(severity, payload)
            }));

            match write_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Destination #{} ({}) failed: {}",
                        idx,
                        destination.name(),
                        e
                    );
                    metrics.record_destination_failure();
                    has_error = true;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Destination #{} panicked: {}. \
                         Other destinations continue to function.",
                        idx, panic_msg
                    );
                    metrics.record_destination_failure();
                    has_error = true;
                }
            }
        }

        has_error
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new(Severity::default())
    }
}

impl Sink for Backend {
    fn emit(&self, severity: Severity, payload: &str) {
        if severity < *self.threshold.read() {
            self.metrics.record_filtered();
            return;
        }

        let mut destinations = self.destinations.write();
        if Self::dispatch(&mut destinations, severity, payload, &self.metrics) {
            self.metrics.record_failed();
        } else {
            self.metrics.record_emitted();
        }
    }

    fn set_threshold(&self, threshold: Severity) {
        *self.threshold.write() = threshold;
    }

    fn threshold(&self) -> Severity {
        *self.threshold.read()
    }

    fn replace_destinations(&self, destinations: Vec<Box<dyn Destination>>) {
        let mut current = self.destinations.write();
        for destination in current.iter_mut() {
            if let Err(e) = destination.flush() {
                eprintln!(
                    "[LOGGER ERROR] Failed to flush destination '{}' before removal: {}",
                    destination.name(),
                    e
                );
            }
        }
        *current = destinations;
    }

    fn flush(&self) -> Result<()> {
        let mut destinations = self.destinations.write();
        for destination in destinations.iter_mut() {
            destination.flush()?;
        }
        Ok(())
    }

    fn metrics(&self) -> Option<Arc<LoggerMetrics>> {
        Some(self.metrics_handle())
    }
}

impl Drop for Backend {
    fn drop(&mut self) {
        if let Err(e) = Sink::flush(self) {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let failed = self.metrics.failed();
        if failed > 0 {
            eprintln!(
                "[LOGGER WARNING] Backend shutting down with {} failed records (failure rate: {:.2}%)",
                failed,
                self.metrics.failure_rate()
            );
        }
    }
}
