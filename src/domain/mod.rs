//! Domain layer - pure rules with no I/O.
//!
//! This layer contains the concepts the rest of the crate is built on:
//! - The hostname scope predicate
//! - Cookie records and the cookie selection rule
//! - Hostname extraction from URLs
//! - The cooldown policy
//! - Clear results and alert presentation
//!
//! All types in this layer are pure and easily testable.

pub mod alert;
pub mod clear_result;
pub mod cookie;
pub mod hostname;
pub mod policy;
pub mod scope;
