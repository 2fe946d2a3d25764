//! # Feature: Handle Bookkeeping
//!
//! Persisted notification-handle sets per reminder category, plus the
//! per-category locks every reschedule cycle runs under.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Per-category mutex so overlapping reschedules serialize
//! - 1.0.0: Initial release with flat and id-keyed handle sets

pub mod store;

pub use store::{Category, HandleStore};
