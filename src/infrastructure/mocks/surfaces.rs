//! Recording badge and notification surfaces for testing.

use crate::application::ports::{BadgeSurface, NotificationSurface, SurfaceError};
use crate::domain::alert::Notification;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

const POISONED: &str = "recording surface mutex poisoned - a test thread panicked while holding the lock";

/// A call received by [`RecordingBadge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeCall {
    Text(String),
    Color(String),
}

/// Badge surface that records calls and can be made to fail.
#[derive(Debug, Default)]
pub struct RecordingBadge {
    calls: Mutex<Vec<BadgeCall>>,
    failing: AtomicBool,
}

impl RecordingBadge {
    /// Create a working badge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a badge whose every call fails.
    pub fn failing() -> Self {
        let badge = Self::default();
        badge.set_failing(true);
        badge
    }

    /// Toggle failure of subsequent calls.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every call received, including failed ones.
    pub fn calls(&self) -> Vec<BadgeCall> {
        self.calls.lock().expect(POISONED).clone()
    }

    /// Text from the last `set_text` call.
    pub fn text(&self) -> Option<String> {
        self.calls().into_iter().rev().find_map(|call| match call {
            BadgeCall::Text(text) => Some(text),
            BadgeCall::Color(_) => None,
        })
    }

    fn record(&self, call: BadgeCall) -> Result<(), SurfaceError> {
        self.calls.lock().expect(POISONED).push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(SurfaceError::new("badge", "action surface unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl BadgeSurface for RecordingBadge {
    async fn set_text(&self, text: &str) -> Result<(), SurfaceError> {
        self.record(BadgeCall::Text(text.to_string()))
    }

    async fn set_background_color(&self, color: &str) -> Result<(), SurfaceError> {
        self.record(BadgeCall::Color(color.to_string()))
    }
}

/// Notification surface that records notifications and can be made to fail.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    created: Mutex<Vec<Notification>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    /// Create a working notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notifier that rejects every notification, as when the user
    /// has denied the permission.
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.set_failing(true);
        notifier
    }

    /// Toggle failure of subsequent notifications.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Notifications successfully created.
    pub fn notifications(&self) -> Vec<Notification> {
        self.created.lock().expect(POISONED).clone()
    }

    /// Number of notifications successfully created.
    pub fn count(&self) -> usize {
        self.created.lock().expect(POISONED).len()
    }
}

#[async_trait]
impl NotificationSurface for RecordingNotifier {
    async fn create(&self, notification: &Notification) -> Result<String, SurfaceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SurfaceError::new("notification", "permission denied"));
        }
        let mut created = self.created.lock().expect(POISONED);
        created.push(notification.clone());
        Ok(format!("notification-{}", created.len()))
    }
}
