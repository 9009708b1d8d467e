//! # cookie-clearer
//!
//! Detects `431 Request Header Fields Too Large` responses on a multi-tenant
//! application and clears only the cookies scoped to the affected tenant host.
//!
//! Oversized cookie headers lock a user out of one tenant (`acme.domo.com`)
//! while their sessions on sibling tenants (`other.domo.com`) are fine. This
//! crate watches completed requests, alerts once per host per cooldown, and
//! clears exactly the cookies the browser would send to that host.
//!
//! ## Quick Start
//!
//! ```rust
//! use cookie_clearer::{CompletedRequest, Cookie, CookieClearer, InMemoryCookieStore};
//! use std::sync::Arc;
//!
//! # futures::executor::block_on(async {
//! let store = Arc::new(InMemoryCookieStore::with_cookies([
//!     Cookie::new("session", "acme.domo.com", "0"),
//!     Cookie::new("session", "other.domo.com", "0"),
//! ]));
//!
//! let clearer = CookieClearer::builder()
//!     .with_cookie_store(store.clone())
//!     .build()
//!     .unwrap();
//!
//! // Passive path: a 431 on an in-scope host raises the badge once
//! let outcome = clearer
//!     .on_request_completed(&CompletedRequest::new(431, "https://acme.domo.com/"))
//!     .await;
//! assert!(outcome.is_alerted());
//!
//! // Manual path: the user clears the active tab
//! let status = clearer.clear_active_tab(Some("https://acme.domo.com/")).await;
//! assert_eq!(status.message, "Cleared 1 cookie for\nacme.domo.com");
//!
//! // The sibling tenant keeps its session
//! assert_eq!(store.snapshot()[0].domain, "other.domo.com");
//! # });
//! ```
//!
//! ## Scope
//!
//! Every operation is gated on one predicate: a hostname is in scope only if
//! it is a single label directly under the protected suffix.
//!
//! ```rust
//! use cookie_clearer::is_in_scope;
//!
//! assert!(is_in_scope("acme-corp.domo.com"));
//! assert!(!is_in_scope("evil-domo.com"));
//! assert!(!is_in_scope("domo.com.evil.net"));
//! assert!(!is_in_scope("x.y.domo.com"));
//! ```
//!
//! The eraser re-checks the predicate itself, so a caller that skips the check
//! cannot widen what gets deleted.
//!
//! ## Cooldown
//!
//! Alerts for the same hostname are suppressed for a window (10 seconds by
//! default). Entries are swept once they are older than twice the window,
//! either on demand with [`EventMonitor::sweep`] or by a background task:
//!
//! ```rust,no_run
//! # use cookie_clearer::{CookieClearer, InMemoryCookieStore};
//! # use std::sync::Arc;
//! # use std::time::Duration;
//! # async fn example() {
//! let clearer = CookieClearer::builder()
//!     .with_cookie_store(Arc::new(InMemoryCookieStore::new()))
//!     .with_cooldown(Duration::from_secs(30))
//!     .with_periodic_sweep(true)
//!     .build()
//!     .unwrap();
//!
//! // ...
//!
//! clearer.shutdown().await.expect("shutdown failed");
//! # }
//! ```
//!
//! ## Observability
//!
//! All components log through `tracing` with a `hostname` field, and count
//! what they do in shared [`Metrics`]:
//!
//! ```rust,no_run
//! # use cookie_clearer::{CookieClearer, InMemoryCookieStore};
//! # use std::sync::Arc;
//! # let clearer = CookieClearer::builder()
//! #     .with_cookie_store(Arc::new(InMemoryCookieStore::new()))
//! #     .build()
//! #     .unwrap();
//! let snapshot = clearer.metrics().snapshot();
//! println!("alerts: {}", snapshot.alerts_raised);
//! println!("suppressed: {}", snapshot.events_suppressed);
//! println!("cookies removed: {}", snapshot.cookies_removed);
//! ```

// Domain layer - pure rules
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    alert::{AlertStyle, BadgeStyle, Notification},
    clear_result::ClearResult,
    cookie::{Cookie, CookieKey, RemovalRequest},
    hostname::{hostname_from_url, HostnameError},
    policy::{CooldownPolicy, PolicyDecision, PolicyError, DEFAULT_COOLDOWN},
    scope::{is_in_scope, parent_scope, DomainScope, ScopeError, DEFAULT_SCOPE_SUFFIX},
};

pub use application::{
    alerter::{AlertDelivery, Alerter},
    eraser::{ClearError, CookieEraser},
    metrics::{Metrics, MetricsSnapshot},
    monitor::{CompletedRequest, EventMonitor, MonitorOutcome, HEADER_FIELDS_TOO_LARGE},
    panel::{ManualClear, PanelStatus, StatusLevel},
    ports::{
        BadgeSurface, Clock, CookieStore, CookieStoreError, NotificationSurface, RecencyStore,
        SurfaceError,
    },
    registry::RecencyCache,
    sweeper::{CacheSweeper, ShutdownError, SweepConfig, SweepConfigError},
};

#[cfg(feature = "async")]
pub use application::sweeper::SweeperHandle;

pub use infrastructure::{
    clock::SystemClock,
    cookie_store::InMemoryCookieStore,
    extension::{BuildError, CookieClearer, CookieClearerBuilder},
    storage::ShardedRecencyStore,
    surfaces::TracingSurface,
};
