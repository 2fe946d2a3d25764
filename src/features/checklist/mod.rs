//! # Feature: Checklist Reminders
//!
//! One advance reminder per open checklist task, timed off the wedding
//! date. Each task carries a months-before lead: the task falls due that
//! many months ahead of the wedding at 09:00 local time, and its reminder
//! fires seven days before the due point at 10:00.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.1.0: Failed schedule count reported so callers can surface a toast
//! - 1.0.0: Initial release

pub mod scheduler;

pub use scheduler::ChecklistReminderScheduler;
