//! Application layer - orchestration of domain logic.
//!
//! This layer wires the pure rules to the outside world:
//! - Recency cache (per-hostname cooldown state)
//! - Cookie eraser (selection and concurrent removal)
//! - Event monitor and alerter (431 detection and output)
//! - Manual clear panel and periodic sweep
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from the browser APIs it runs against.

pub mod alerter;
pub mod eraser;
pub mod metrics;
pub mod monitor;
pub mod panel;
pub mod ports;
pub mod registry;
pub mod sweeper;
