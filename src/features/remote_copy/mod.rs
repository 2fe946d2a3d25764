//! # Feature: Remote Copy
//!
//! Notification copy with remote overrides. Admin-configured app settings
//! can replace any notification string, per language or globally, and a
//! TTL cache keeps the override map warm while serving stale data when the
//! backend is unreachable.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.5.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Injected TTL and clock into the cache
//! - 1.1.0: Per-language JSON override values
//! - 1.0.0: Initial release with builtin Norwegian and English copy

pub mod cache;
pub(crate) mod defaults;
pub mod resolver;

pub use cache::SettingsCache;
pub use resolver::{apply_template, ReminderCopy, TemplateResolver};
