//! Tracing layer that captures log events for assertions.

use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::Layer;

const POISONED: &str =
    "MockCaptureLayer mutex poisoned - a test thread panicked while holding the lock";

/// Captures every event so tests can check what the crate logged.
///
/// # Examples
///
/// ```
/// use cookie_clearer::infrastructure::mocks::MockCaptureLayer;
/// use tracing::Level;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let capture = MockCaptureLayer::new();
/// let subscriber = tracing_subscriber::registry().with(capture.clone());
///
/// tracing::subscriber::with_default(subscriber, || {
///     tracing::error!(hostname = "acme.domo.com", "badge update failed");
/// });
///
/// assert!(capture.contains(Level::ERROR, "badge update failed"));
/// assert_eq!(capture.events()[0].hostname.as_deref(), Some("acme.domo.com"));
/// ```
#[derive(Clone, Default)]
pub struct MockCaptureLayer {
    captured: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// A captured log event.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    /// Value of the `hostname` field, when present
    pub hostname: Option<String>,
}

impl MockCaptureLayer {
    /// Create a new capture layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.captured.lock().expect(POISONED).clone()
    }

    /// Events at exactly `level`.
    pub fn at_level(&self, level: Level) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.level == level)
            .collect()
    }

    /// Whether an event at `level` has a message containing `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.at_level(level)
            .iter()
            .any(|event| event.message.contains(needle))
    }

    /// Get the count of captured events.
    pub fn count(&self) -> usize {
        self.captured.lock().expect(POISONED).len()
    }

    /// Clear all captured events.
    pub fn clear(&self) {
        self.captured.lock().expect(POISONED).clear();
    }
}

impl<S> Layer<S> for MockCaptureLayer
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        self.captured.lock().expect(POISONED).push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
            hostname: visitor.hostname,
        });
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    hostname: Option<String>,
}

impl tracing::field::Visit for EventVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "hostname" => self.hostname = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            "hostname" => self.hostname = Some(format!("{:?}", value).trim_matches('"').to_string()),
            _ => {}
        }
    }
}
