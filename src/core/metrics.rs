//! Logger metrics for observability
//!
//! Counters for log calls that were written, filtered by the threshold, or
//! partially failed at the sink or listener stage.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use logbro::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.filtered_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Log calls that passed the threshold and were rendered
    total_logged: AtomicU64,

    /// Log calls dropped by the threshold or an unknown level name
    filtered: AtomicU64,

    /// Sink writes that returned an error
    write_failures: AtomicU64,

    /// Listener invocations that panicked
    listener_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            listener_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn listener_failures(&self) -> u64 {
        self.listener_failures.load(Ordering::Relaxed)
    }

    /// Record a rendered log call. Returns the previous count.
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a filtered log call. Returns the previous count.
    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed sink write. Returns the previous count.
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Record panicking listeners.
    #[inline]
    pub fn record_listener_failures(&self, count: u64) {
        self.listener_failures.fetch_add(count, Ordering::Relaxed);
    }

    /// Percentage of rendered calls whose sink write failed
    pub fn write_failure_rate(&self) -> f64 {
        let logged = self.total_logged();
        if logged == 0 {
            return 0.0;
        }
        (self.write_failures() as f64 / logged as f64) * 100.0
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.listener_failures.store(0, Ordering::Relaxed);
    }
}
