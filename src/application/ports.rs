//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports; the browser
//! host provides the real cookie store, badge and notification surfaces.

use crate::domain::alert::Notification;
use crate::domain::cookie::{Cookie, RemovalRequest};
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Instant;

/// Port for obtaining current time.
///
/// Infrastructure provides concrete implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}

/// Port for the hostname -> last-accepted-timestamp map.
///
/// Implementations must make `with_entry` atomic for a single hostname so a
/// read-then-write cooldown decision cannot interleave with another event
/// for the same hostname.
pub trait RecencyStore: Send + Sync + Debug {
    /// Access the slot for `hostname` with mutable access.
    ///
    /// The accessor sees `None` when there is no entry. Leaving `Some` in the
    /// slot stores it; setting it to `None` removes the entry.
    fn with_entry<F, R>(&self, hostname: &str, accessor: F) -> R
    where
        F: FnOnce(&mut Option<Instant>) -> R;

    /// Read the timestamp recorded for `hostname`.
    fn get(&self, hostname: &str) -> Option<Instant>;

    /// Get the number of entries.
    fn len(&self) -> usize;

    /// Check if the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries.
    fn clear(&self);

    /// Remove entries for which the predicate returns false.
    fn retain<F>(&self, f: F)
    where
        F: FnMut(&str, Instant) -> bool;
}

/// Error reported by the cookie store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CookieStoreError {
    /// The remove call resolved without naming a removed cookie.
    ///
    /// Browser adapters return this when `cookies.remove` yields `null`,
    /// e.g. when the cookie vanished between lookup and removal.
    #[error("removal was not confirmed by the cookie store")]
    NotRemoved,
    /// The store rejected the call
    #[error("{0}")]
    Backend(String),
}

/// Port for the browser's cookie store, the only source of cookie data.
#[async_trait]
pub trait CookieStore: Send + Sync + Debug {
    /// List cookies matching a domain filter.
    ///
    /// Stores may interpret the filter loosely (browsers also return
    /// subdomain cookies); callers must re-filter the result.
    async fn get_all(&self, domain: &str) -> Result<Vec<Cookie>, CookieStoreError>;

    /// Remove one cookie by URL, name and store partition.
    ///
    /// Removing a cookie that does not exist is a successful no-op.
    async fn remove(&self, request: &RemovalRequest) -> Result<(), CookieStoreError>;
}

/// Error reported by a badge or notification surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{surface} failed: {reason}")]
pub struct SurfaceError {
    pub surface: &'static str,
    pub reason: String,
}

impl SurfaceError {
    /// Create a surface error.
    pub fn new(surface: &'static str, reason: impl Into<String>) -> Self {
        Self {
            surface,
            reason: reason.into(),
        }
    }
}

/// Port for the extension action badge.
#[async_trait]
pub trait BadgeSurface: Send + Sync + Debug {
    /// Set the badge text; an empty string clears the badge.
    async fn set_text(&self, text: &str) -> Result<(), SurfaceError>;

    /// Set the badge background color.
    async fn set_background_color(&self, color: &str) -> Result<(), SurfaceError>;
}

/// Port for user notifications.
#[async_trait]
pub trait NotificationSurface: Send + Sync + Debug {
    /// Show a notification and return its identifier.
    async fn create(&self, notification: &Notification) -> Result<String, SurfaceError>;
}
