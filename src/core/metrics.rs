//! Backend metrics for observability
//!
//! Counters describing what happened to records handed to a [`Backend`](super::Backend).

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for backend observability
///
/// # Example
///
/// ```
/// use chronicle_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_emitted();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.emitted(), 1);
/// assert_eq!(metrics.filtered(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records written to every destination without error
    emitted: AtomicU64,

    /// Records below the threshold
    filtered: AtomicU64,

    /// Records at least one destination failed or panicked on
    failed: AtomicU64,

    /// Individual destination failures (one record may count several)
    destination_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            destination_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn destination_failures(&self) -> u64 {
        self.destination_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_filtered(&self) {
        self.filtered.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_destination_failure(&self) {
        self.destination_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Percentage of records that passed the threshold but failed somewhere
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed();
        let attempted = failed + self.emitted();
        if attempted == 0 {
            return 0.0;
        }
        (failed as f64 / attempted as f64) * 100.0
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
