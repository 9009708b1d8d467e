//! Headless badge and notification adapter.
//!
//! Emits each output as a `tracing` event instead of touching a browser
//! surface. Used when no real surface is wired in, e.g. in a CLI or a
//! server-side replay of completed-request logs.

use crate::application::ports::{BadgeSurface, NotificationSurface, SurfaceError};
use crate::domain::alert::Notification;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

/// Badge and notification surface that logs instead of rendering.
#[derive(Debug, Default)]
pub struct TracingSurface {
    next_id: AtomicU64,
}

impl TracingSurface {
    /// Create a logging surface.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BadgeSurface for TracingSurface {
    async fn set_text(&self, text: &str) -> Result<(), SurfaceError> {
        if text.is_empty() {
            tracing::info!("badge cleared");
        } else {
            tracing::info!(badge = text, "badge set");
        }
        Ok(())
    }

    async fn set_background_color(&self, color: &str) -> Result<(), SurfaceError> {
        tracing::trace!(color, "badge color set");
        Ok(())
    }
}

#[async_trait]
impl NotificationSurface for TracingSurface {
    async fn create(&self, notification: &Notification) -> Result<String, SurfaceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::warn!(
            title = %notification.title,
            priority = notification.priority,
            "{}",
            notification.message
        );
        Ok(format!("cookie-clearer-{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alert::AlertStyle;
    use crate::infrastructure::mocks::MockCaptureLayer;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_notifications_are_logged_with_unique_ids() {
        let capture = MockCaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let surface = TracingSurface::new();
        let notification = AlertStyle::default().notification_for("acme.domo.com");

        let (first, second) = tracing::subscriber::with_default(subscriber, || {
            futures::executor::block_on(async {
                (
                    surface.create(&notification).await.unwrap(),
                    surface.create(&notification).await.unwrap(),
                )
            })
        });

        assert_ne!(first, second);
        assert!(capture.contains(Level::WARN, "431 error detected on acme.domo.com"));
    }

    #[test]
    fn test_badge_logging() {
        let capture = MockCaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let surface = TracingSurface::new();

        tracing::subscriber::with_default(subscriber, || {
            futures::executor::block_on(async {
                surface.set_text("!").await.unwrap();
                surface.set_text("").await.unwrap();
            })
        });

        assert!(capture.contains(Level::INFO, "badge set"));
        assert!(capture.contains(Level::INFO, "badge cleared"));
    }
}
