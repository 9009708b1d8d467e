//! Infrastructure layer - external adapters and integrations.
//!
//! This layer provides adapters for:
//! - Clock abstraction (system time vs mock)
//! - Recency storage (sharded map)
//! - An in-memory cookie store with browser query semantics
//! - Headless badge and notification output
//! - The assembled extension and its builder

pub mod clock;
pub mod cookie_store;
pub mod extension;
pub mod storage;
pub mod surfaces;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds. It provides controllable clocks, scripted cookie
/// stores and recording output surfaces.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// cookie-clearer = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
