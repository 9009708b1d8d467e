//! Detection of oversized-header failures on completed requests.
//!
//! For each completed request the monitor:
//! 1. ignores anything but status 431,
//! 2. extracts the hostname, dropping malformed URLs,
//! 3. drops hostnames that fail the scope predicate,
//! 4. consults the recency cache and suppresses repeats within the cooldown,
//! 5. raises the badge and a notification.
//!
//! The scope check runs before the cache is touched, so an out-of-scope
//! hostname never occupies a cooldown slot.

use crate::application::alerter::{AlertDelivery, Alerter};
use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, RecencyStore};
use crate::application::registry::RecencyCache;
use crate::domain::hostname::hostname_from_url;
use crate::domain::scope::DomainScope;
use serde::Deserialize;
use std::sync::Arc;

/// `Request Header Fields Too Large`
pub const HEADER_FIELDS_TOO_LARGE: u16 = 431;

/// A completed request reported by the host's network interception.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedRequest {
    pub status_code: u16,
    pub url: String,
}

impl CompletedRequest {
    /// Create a completed-request record.
    pub fn new(status_code: u16, url: impl Into<String>) -> Self {
        Self {
            status_code,
            url: url.into(),
        }
    }
}

/// What the monitor did with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// Status was not 431
    Ignored,
    /// URL had no usable hostname
    Malformed,
    /// Hostname failed the scope predicate
    OutOfScope(String),
    /// Same hostname alerted within the cooldown window
    Suppressed(String),
    /// Alert raised for the hostname
    Alerted {
        hostname: String,
        delivery: AlertDelivery,
    },
}

impl MonitorOutcome {
    /// Whether a user-visible alert was attempted.
    pub fn is_alerted(&self) -> bool {
        matches!(self, MonitorOutcome::Alerted { .. })
    }
}

/// Watches completed requests for 431 responses on in-scope hosts.
#[derive(Debug, Clone)]
pub struct EventMonitor<S>
where
    S: RecencyStore + Clone,
{
    cache: RecencyCache<S>,
    scope: DomainScope,
    clock: Arc<dyn Clock>,
    alerter: Alerter,
    metrics: Metrics,
}

impl<S> EventMonitor<S>
where
    S: RecencyStore + Clone,
{
    /// Create a monitor.
    pub fn new(
        cache: RecencyCache<S>,
        scope: DomainScope,
        clock: Arc<dyn Clock>,
        alerter: Alerter,
        metrics: Metrics,
    ) -> Self {
        Self {
            cache,
            scope,
            clock,
            alerter,
            metrics,
        }
    }

    /// Handle one completed request.
    ///
    /// Never fails: malformed input and output failures are logged and the
    /// next event is processed normally.
    pub async fn on_request_completed(&self, request: &CompletedRequest) -> MonitorOutcome {
        if request.status_code != HEADER_FIELDS_TOO_LARGE {
            return MonitorOutcome::Ignored;
        }

        let hostname = match hostname_from_url(&request.url) {
            Ok(hostname) => hostname,
            Err(err) => {
                self.metrics.record_malformed();
                tracing::warn!(url = %request.url, error = %err, "dropping 431 event with unparsable URL");
                return MonitorOutcome::Malformed;
            }
        };

        if !self.scope.is_in_scope(&hostname) {
            self.metrics.record_out_of_scope();
            tracing::debug!(hostname = %hostname, "ignoring 431 for out-of-scope hostname");
            return MonitorOutcome::OutOfScope(hostname);
        }

        if !self.cache.accept(&hostname, self.clock.now()) {
            self.metrics.record_suppressed();
            tracing::debug!(hostname = %hostname, "431 already reported recently");
            return MonitorOutcome::Suppressed(hostname);
        }

        self.metrics.record_alert();
        tracing::info!(hostname = %hostname, "431 Request Header Fields Too Large detected");
        let delivery = self.alerter.raise(&hostname).await;

        MonitorOutcome::Alerted { hostname, delivery }
    }

    /// Sweep stale cooldown entries at the current time.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        self.cache.sweep(self.clock.now())
    }

    /// Reset the badge, e.g. when the user opens the panel.
    pub async fn clear_badge(&self) -> bool {
        self.alerter.clear_badge().await
    }

    /// The recency cache.
    pub fn cache(&self) -> &RecencyCache<S> {
        &self.cache
    }

    /// The clock used for cooldown decisions.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Shared metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
