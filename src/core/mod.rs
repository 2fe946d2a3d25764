//! # Core Module
//!
//! Shared domain types for the reminder engine: notification settings,
//! typed notification content, the app language, and the injectable clock.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Clock trait extracted so schedulers and the settings cache share one time source
//! - 1.1.0: Notification payload moved from a free-form data bag to a typed enum
//! - 1.0.0: Initial creation with settings and language modules

pub mod clock;
pub mod content;
pub mod language;
pub mod settings;

// Re-export commonly used items
pub use clock::{Clock, SystemClock};
pub use content::{NotificationHandle, NotificationPayload, NotificationRequest};
pub use language::{Language, LANGUAGE_KEY};
pub use settings::{NotificationSettings, SETTINGS_KEY};
