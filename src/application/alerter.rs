//! Best-effort badge and notification output.
//!
//! Output failures are logged and reported back as flags, never as errors:
//! a missing badge or notification is already the signal the user sees.

use crate::application::ports::{BadgeSurface, NotificationSurface};
use crate::domain::alert::AlertStyle;
use futures::future::join;
use std::sync::Arc;

/// Which parts of an alert reached the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertDelivery {
    /// Badge text and color were both set
    pub badge: bool,
    /// Notification was created
    pub notification: bool,
}

impl AlertDelivery {
    /// True when both outputs succeeded.
    pub fn is_complete(&self) -> bool {
        self.badge && self.notification
    }
}

/// Drives the badge and notification surfaces.
#[derive(Debug, Clone)]
pub struct Alerter {
    badge: Arc<dyn BadgeSurface>,
    notifier: Arc<dyn NotificationSurface>,
    style: AlertStyle,
}

impl Alerter {
    /// Create an alerter over the given surfaces.
    pub fn new(
        badge: Arc<dyn BadgeSurface>,
        notifier: Arc<dyn NotificationSurface>,
        style: AlertStyle,
    ) -> Self {
        Self {
            badge,
            notifier,
            style,
        }
    }

    /// The presentation used for alerts.
    pub fn style(&self) -> &AlertStyle {
        &self.style
    }

    /// Raise the badge and notify about a 431 on `hostname`.
    ///
    /// Badge and notification are independent; neither waits on nor rolls
    /// back the other.
    pub async fn raise(&self, hostname: &str) -> AlertDelivery {
        let (badge, notification) = join(self.raise_badge(hostname), self.notify(hostname)).await;
        AlertDelivery {
            badge,
            notification,
        }
    }

    /// Reset the badge to empty.
    ///
    /// Returns false (after logging) if the surface rejected the call.
    pub async fn clear_badge(&self) -> bool {
        match self.badge.set_text("").await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "failed to clear badge");
                false
            }
        }
    }

    async fn raise_badge(&self, hostname: &str) -> bool {
        let (text, color) = join(
            self.badge.set_text(&self.style.badge.text),
            self.badge.set_background_color(&self.style.badge.color),
        )
        .await;

        let mut ok = true;
        if let Err(err) = text {
            tracing::error!(hostname, error = %err, "failed to set badge text");
            ok = false;
        }
        if let Err(err) = color {
            tracing::error!(hostname, error = %err, "failed to set badge color");
            ok = false;
        }
        ok
    }

    async fn notify(&self, hostname: &str) -> bool {
        let notification = self.style.notification_for(hostname);
        match self.notifier.create(&notification).await {
            Ok(id) => {
                tracing::debug!(hostname, notification_id = %id, "notification created");
                true
            }
            Err(err) => {
                tracing::error!(hostname, error = %err, "failed to create notification");
                false
            }
        }
    }
}
