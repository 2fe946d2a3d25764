//! # Feature: Countdown Reminders
//!
//! Local notifications counting down to the wedding day, fired at fixed
//! day offsets before the date.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.4.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.2.0: Copy resolution moved to the shared template resolver
//! - 1.1.0: Offsets configurable via notification settings
//! - 1.0.0: Initial release with fixed 30/7/1 day reminders

pub mod scheduler;

pub use scheduler::CountdownScheduler;
