//! # Feature: Custom Reminders
//!
//! Reminders the couple creates themselves, scheduled one at a time and
//! tracked per reminder id so an individual reminder can be cancelled
//! when it is edited or deleted. Fires at 09:00 local time on the chosen
//! date regardless of the time stored on the reminder.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.2.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.0.0: Initial release

pub mod scheduler;

pub use scheduler::{CustomReminder, CustomReminderScheduler};
