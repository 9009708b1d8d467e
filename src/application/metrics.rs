//! Counters for detections and cookie clearing.
//!
//! Lets the host (or an operator) see how often alerts fire, how many are
//! de-duplicated, and how clearing runs go.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared counters.
///
/// Clones share the same counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// 431 events that raised an alert
    alerts_raised: AtomicU64,
    /// 431 events dropped by the cooldown
    events_suppressed: AtomicU64,
    /// 431 events whose hostname failed the scope predicate
    events_out_of_scope: AtomicU64,
    /// Events whose URL could not be parsed
    events_malformed: AtomicU64,
    /// Cookies removed across all clears
    cookies_removed: AtomicU64,
    /// Cookie removals that failed
    removal_failures: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    pub(crate) fn record_alert(&self) {
        self.inner.alerts_raised.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_suppressed(&self) {
        self.inner.events_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_out_of_scope(&self) {
        self.inner
            .events_out_of_scope
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_malformed(&self) {
        self.inner.events_malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_clear(&self, removed: usize, failed: usize) {
        self.inner
            .cookies_removed
            .fetch_add(removed as u64, Ordering::Relaxed);
        self.inner
            .removal_failures
            .fetch_add(failed as u64, Ordering::Relaxed);
    }

    /// Get the number of alerts raised.
    pub fn alerts_raised(&self) -> u64 {
        self.inner.alerts_raised.load(Ordering::Relaxed)
    }

    /// Get the number of events suppressed by the cooldown.
    pub fn events_suppressed(&self) -> u64 {
        self.inner.events_suppressed.load(Ordering::Relaxed)
    }

    /// Get the number of out-of-scope events.
    pub fn events_out_of_scope(&self) -> u64 {
        self.inner.events_out_of_scope.load(Ordering::Relaxed)
    }

    /// Get the number of malformed events.
    pub fn events_malformed(&self) -> u64 {
        self.inner.events_malformed.load(Ordering::Relaxed)
    }

    /// Get the number of cookies removed.
    pub fn cookies_removed(&self) -> u64 {
        self.inner.cookies_removed.load(Ordering::Relaxed)
    }

    /// Get the number of failed cookie removals.
    pub fn removal_failures(&self) -> u64 {
        self.inner.removal_failures.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            alerts_raised: self.alerts_raised(),
            events_suppressed: self.events_suppressed(),
            events_out_of_scope: self.events_out_of_scope(),
            events_malformed: self.events_malformed(),
            cookies_removed: self.cookies_removed(),
            removal_failures: self.removal_failures(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub alerts_raised: u64,
    pub events_suppressed: u64,
    pub events_out_of_scope: u64,
    pub events_malformed: u64,
    pub cookies_removed: u64,
    pub removal_failures: u64,
}

impl MetricsSnapshot {
    /// In-scope 431 events seen, alerted or suppressed.
    pub fn detections(&self) -> u64 {
        self.alerts_raised.saturating_add(self.events_suppressed)
    }
}
