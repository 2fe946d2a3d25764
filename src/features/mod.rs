//! # Features Module
//!
//! Every reminder feature the engine schedules: the wedding countdown,
//! checklist task reminders, user-created custom reminders, the persisted
//! handle bookkeeping they share, and remote-configurable notification
//! copy.
//!
//! - **Version**: 1.3.0
//! - **Since**: 0.2.0
//! - **Toggleable**: per feature
//!
//! ## Changelog
//! - 1.3.0: Custom reminders added
//! - 1.2.0: Remote copy overrides with TTL cache
//! - 1.1.0: Handle bookkeeping split out of the schedulers
//! - 1.0.0: Countdown and checklist reminders

pub mod checklist;
pub mod countdown;
pub mod custom;
pub mod handles;
pub mod remote_copy;

// Re-export commonly used items
pub use checklist::ChecklistReminderScheduler;
pub use countdown::CountdownScheduler;
pub use custom::{CustomReminder, CustomReminderScheduler};
pub use handles::{Category, HandleStore};
pub use remote_copy::{apply_template, ReminderCopy, SettingsCache, TemplateResolver};
