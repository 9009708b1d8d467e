//! Mock implementations for testing.
//!
//! This module provides test doubles for the clock, the browser
//! collaborators and the log output, enabling controlled testing of
//! application logic.

pub mod clock;
pub mod cookie_store;
pub mod layer;
pub mod surfaces;

pub use clock::MockClock;
pub use cookie_store::ScriptedCookieStore;
pub use layer::{CapturedEvent, MockCaptureLayer};
pub use surfaces::{BadgeCall, RecordingBadge, RecordingNotifier};
