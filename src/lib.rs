// Core layer - shared types (settings, content, language, clock)
pub mod core;

// Features layer - all feature modules
pub mod features;

// Platform layer - traits the host app implements (notifier, storage, sources)
pub mod platform;

// Application layer
pub mod coordinator;

// In-memory fakes shared by the unit tests
#[cfg(test)]
pub(crate) mod testing;

// Re-export core items for consumers
pub use crate::core::{
    Clock, Language, NotificationHandle, NotificationPayload, NotificationRequest,
    NotificationSettings, SystemClock,
};

// Re-export feature items
pub use features::{
    // Checklist reminders
    ChecklistReminderScheduler,
    // Countdown reminders
    CountdownScheduler,
    // Custom reminders
    CustomReminder, CustomReminderScheduler,
    // Handle bookkeeping
    Category, HandleStore,
    // Remote copy
    apply_template, ReminderCopy, SettingsCache, TemplateResolver,
};

// Re-export platform traits
pub use platform::{
    ChecklistTask, EventDetails, EventDetailsSource, Notifier, NoticeSink, Session, SessionSource,
    SettingsSource, Storage, TaskSource,
};

pub use coordinator::{RescheduleCoordinator, ScheduleReport};
