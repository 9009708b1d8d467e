//! Extension wiring.
//!
//! [`CookieClearerBuilder`] validates configuration and assembles the
//! monitor, the panel controller and the optional sweep task around one
//! shared scope, recency cache and metrics set.

use crate::application::{
    alerter::Alerter,
    eraser::CookieEraser,
    metrics::Metrics,
    monitor::{CompletedRequest, EventMonitor, MonitorOutcome},
    panel::{ManualClear, PanelStatus},
    ports::{BadgeSurface, Clock, CookieStore, NotificationSurface},
    registry::RecencyCache,
    sweeper::SweepConfigError,
};
use crate::domain::alert::AlertStyle;
use crate::domain::policy::{CooldownPolicy, PolicyError, DEFAULT_COOLDOWN};
use crate::domain::scope::{DomainScope, ScopeError, DEFAULT_SCOPE_SUFFIX};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::storage::ShardedRecencyStore;
use crate::infrastructure::surfaces::TracingSurface;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "async")]
use crate::application::sweeper::{CacheSweeper, ShutdownError, SweepConfig, SweeperHandle};
#[cfg(feature = "async")]
use std::sync::Mutex;

/// Recency store used by the assembled extension.
pub type DefaultRecencyStore = Arc<ShardedRecencyStore>;

/// Error returned when building a [`CookieClearer`] fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// No cookie store was supplied
    #[error("a cookie store is required")]
    MissingCookieStore,
    /// Scope suffix is not a valid two-label domain
    #[error("scope configuration error: {0}")]
    Scope(#[from] ScopeError),
    /// Cooldown window is invalid
    #[error("cooldown configuration error: {0}")]
    Policy(#[from] PolicyError),
    /// Sweep interval is invalid
    #[error("sweep configuration error: {0}")]
    Sweep(#[from] SweepConfigError),
    /// Periodic sweep was requested outside a tokio runtime
    #[error("periodic sweep requires a running tokio runtime")]
    NoRuntime,
}

/// Builder for constructing a [`CookieClearer`].
pub struct CookieClearerBuilder {
    scope_suffix: String,
    cooldown: Duration,
    clock: Option<Arc<dyn Clock>>,
    style: AlertStyle,
    cookie_store: Option<Arc<dyn CookieStore>>,
    badge: Option<Arc<dyn BadgeSurface>>,
    notifier: Option<Arc<dyn NotificationSurface>>,
    periodic_sweep: bool,
}

impl Default for CookieClearerBuilder {
    fn default() -> Self {
        Self {
            scope_suffix: DEFAULT_SCOPE_SUFFIX.to_string(),
            cooldown: DEFAULT_COOLDOWN,
            clock: None,
            style: AlertStyle::default(),
            cookie_store: None,
            badge: None,
            notifier: None,
            periodic_sweep: false,
        }
    }
}

impl CookieClearerBuilder {
    /// Protect hosts under `suffix` (two labels, e.g. `domo.com`).
    pub fn with_scope_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.scope_suffix = suffix.into();
        self
    }

    /// Set the per-hostname alert cooldown. Defaults to 10 seconds.
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set a custom clock (default: `SystemClock`).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set badge and notification presentation.
    pub fn with_alert_style(mut self, style: AlertStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the cookie store. Required.
    pub fn with_cookie_store(mut self, store: Arc<dyn CookieStore>) -> Self {
        self.cookie_store = Some(store);
        self
    }

    /// Set the badge surface (default: `TracingSurface`).
    pub fn with_badge_surface(mut self, badge: Arc<dyn BadgeSurface>) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Set the notification surface (default: `TracingSurface`).
    pub fn with_notification_surface(mut self, notifier: Arc<dyn NotificationSurface>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Spawn a background task sweeping the recency cache every two
    /// cooldown windows.
    ///
    /// **Requires the `async` feature** and a running tokio runtime at
    /// `build()` time. Stop it with [`CookieClearer::shutdown`].
    #[cfg(feature = "async")]
    pub fn with_periodic_sweep(mut self, enabled: bool) -> Self {
        self.periodic_sweep = enabled;
        self
    }

    /// Build the extension.
    ///
    /// # Errors
    /// Returns `BuildError` if the configuration is invalid.
    pub fn build(self) -> Result<CookieClearer, BuildError> {
        let store = self.cookie_store.ok_or(BuildError::MissingCookieStore)?;
        let scope = DomainScope::new(&self.scope_suffix)?;
        let policy = CooldownPolicy::new(self.cooldown)?;

        let metrics = Metrics::new();
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));

        let (badge, notifier): (Arc<dyn BadgeSurface>, Arc<dyn NotificationSurface>) =
            match (self.badge, self.notifier) {
                (Some(badge), Some(notifier)) => (badge, notifier),
                (badge, notifier) => {
                    let fallback = Arc::new(TracingSurface::new());
                    (
                        badge.unwrap_or_else(|| fallback.clone() as Arc<dyn BadgeSurface>),
                        notifier.unwrap_or(fallback as Arc<dyn NotificationSurface>),
                    )
                }
            };
        let alerter = Alerter::new(badge, notifier, self.style);

        let cache = RecencyCache::new(Arc::new(ShardedRecencyStore::new()), policy);
        let eraser = CookieEraser::new(store, scope.clone()).with_metrics(metrics.clone());
        let monitor = EventMonitor::new(
            cache.clone(),
            scope,
            clock.clone(),
            alerter.clone(),
            metrics.clone(),
        );
        let panel = ManualClear::new(eraser.clone(), alerter);

        #[cfg(feature = "async")]
        let sweeper_handle = if self.periodic_sweep {
            if tokio::runtime::Handle::try_current().is_err() {
                return Err(BuildError::NoRuntime);
            }
            let config = SweepConfig::new(cache.sweep_interval())?;
            let handle = CacheSweeper::new(cache, clock, config).start();
            Arc::new(Mutex::new(Some(handle)))
        } else {
            Arc::new(Mutex::new(None))
        };

        #[cfg(not(feature = "async"))]
        let _ = (cache, clock, self.periodic_sweep);

        tracing::debug!(
            scope = %eraser.scope().suffix(),
            cooldown_ms = policy.window().as_millis() as u64,
            "cookie clearer ready"
        );

        Ok(CookieClearer {
            monitor,
            panel,
            eraser,
            metrics,
            #[cfg(feature = "async")]
            sweeper_handle,
        })
    }
}

/// The assembled extension: passive monitor plus manual clear panel.
#[derive(Debug, Clone)]
pub struct CookieClearer {
    monitor: EventMonitor<DefaultRecencyStore>,
    panel: ManualClear,
    eraser: CookieEraser,
    metrics: Metrics,
    #[cfg(feature = "async")]
    sweeper_handle: Arc<Mutex<Option<SweeperHandle>>>,
}

impl CookieClearer {
    /// Create a builder for configuring the extension.
    ///
    /// Defaults:
    /// - Scope suffix: `domo.com`
    /// - Cooldown: 10 seconds
    /// - Clock: `SystemClock`
    /// - Badge and notifications: `TracingSurface`
    /// - Periodic sweep: disabled
    pub fn builder() -> CookieClearerBuilder {
        CookieClearerBuilder::default()
    }

    /// Feed a completed request to the monitor.
    pub async fn on_request_completed(&self, request: &CompletedRequest) -> MonitorOutcome {
        self.monitor.on_request_completed(request).await
    }

    /// The panel was opened.
    pub async fn panel_opened(&self) {
        self.panel.opened().await;
    }

    /// Clear cookies for the active tab from the panel.
    pub async fn clear_active_tab(&self, tab_url: Option<&str>) -> PanelStatus {
        self.panel.clear_active_tab(tab_url).await
    }

    /// Match pattern for registering network interception.
    pub fn host_pattern(&self) -> String {
        self.eraser.scope().host_pattern()
    }

    /// Get the event monitor.
    pub fn monitor(&self) -> &EventMonitor<DefaultRecencyStore> {
        &self.monitor
    }

    /// Get the panel controller.
    pub fn panel(&self) -> &ManualClear {
        &self.panel
    }

    /// Get the cookie eraser.
    pub fn eraser(&self) -> &CookieEraser {
        &self.eraser
    }

    /// Get shared metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Stop the periodic sweep, if running.
    ///
    /// **Requires the `async` feature.**
    ///
    /// # Errors
    /// Returns an error if the sweep task fails to shut down cleanly.
    #[cfg(feature = "async")]
    pub async fn shutdown(&self) -> Result<(), ShutdownError> {
        // Release the lock before awaiting
        let handle = {
            let mut guard = self
                .sweeper_handle
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            guard.take()
        };

        if let Some(handle) = handle {
            handle.shutdown().await?;
        }
        Ok(())
    }
}
