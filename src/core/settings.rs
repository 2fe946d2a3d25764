//! Notification settings persisted on the device.

use crate::platform::Storage;
use anyhow::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Storage key for the settings blob.
pub const SETTINGS_KEY: &str = "@wedflow/notification_settings";

/// User-facing notification switches plus the countdown offsets.
///
/// Serialized with camelCase field names so existing installs keep their
/// stored settings across app versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Master switch. Off means the engine owns no countdown or checklist
    /// notifications; custom reminders are gated on it at creation time.
    pub enabled: bool,
    pub checklist_reminders: bool,
    pub wedding_countdown: bool,
    /// Days before the wedding to fire countdown reminders. Order and
    /// duplicates pass through to the scheduler untouched.
    pub days_before: Vec<u32>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            enabled: false,
            checklist_reminders: true,
            wedding_countdown: true,
            days_before: vec![30, 7, 1],
        }
    }
}

impl NotificationSettings {
    /// Read the persisted settings, falling back to defaults when the key
    /// is missing or unreadable. Never fails.
    pub async fn load(storage: &dyn Storage) -> Self {
        match storage.get(SETTINGS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("Unreadable notification settings, using defaults: {}", e);
                    NotificationSettings::default()
                }
            },
            Ok(None) => {
                debug!("No stored notification settings, using defaults");
                NotificationSettings::default()
            }
            Err(e) => {
                warn!("Failed to read notification settings, using defaults: {}", e);
                NotificationSettings::default()
            }
        }
    }

    /// Persist the settings blob. Saving goes through the coordinator's
    /// `save_settings` so a new blob is always followed by a reschedule or
    /// teardown pass.
    pub(crate) async fn save(&self, storage: &dyn Storage) -> Result<()> {
        let raw = serde_json::to_string(self)?;
        storage.set(SETTINGS_KEY, &raw).await
    }
}
