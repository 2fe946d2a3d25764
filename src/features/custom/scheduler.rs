//! User-defined one-shot reminders.

use crate::core::clock::at_hour;
use crate::core::{Clock, NotificationHandle, NotificationPayload, NotificationRequest, NotificationSettings};
use crate::features::handles::{Category, HandleStore};
use crate::platform::{Notifier, Storage};
use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Local time of day custom reminders fire at.
const FIRE_HOUR: u32 = 9;

/// A reminder the couple created themselves, independent of the checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomReminder {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub reminder_date: NaiveDateTime,
    pub category: String,
}

/// Schedules and cancels custom reminders one at a time, keyed by
/// reminder id.
pub struct CustomReminderScheduler {
    notifier: Arc<dyn Notifier>,
    store: Arc<HandleStore>,
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl CustomReminderScheduler {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        store: Arc<HandleStore>,
        storage: Arc<dyn Storage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        CustomReminderScheduler {
            notifier,
            store,
            storage,
            clock,
        }
    }

    /// Schedule a single reminder at 09:00 on its reminder date.
    ///
    /// Returns the live handle on success, `None` when notifications are
    /// off, the instant has already passed, or scheduling failed.
    pub async fn schedule(&self, reminder: &CustomReminder) -> Option<NotificationHandle> {
        let settings = NotificationSettings::load(self.storage.as_ref()).await;
        if !settings.enabled {
            debug!(
                "Notifications disabled, not scheduling custom reminder {}",
                reminder.id
            );
            return None;
        }

        let _guard = self.store.lock(Category::Custom).await;

        let fire_at = at_hour(reminder.reminder_date.date(), FIRE_HOUR);
        if fire_at <= self.clock.now() {
            debug!(
                "Custom reminder {} is in the past ({}), skipping",
                reminder.id, fire_at
            );
            return None;
        }

        let request = NotificationRequest::new(
            reminder.title.clone(),
            reminder.description.clone().unwrap_or_default(),
            NotificationPayload::Custom {
                reminder_id: reminder.id.clone(),
            },
        );
        let handle = match self.notifier.schedule_at(request, fire_at).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Failed to schedule custom reminder {}: {}", reminder.id, e);
                return None;
            }
        };

        if let Err(e) = self.store.insert_custom(&reminder.id, handle.clone()).await {
            warn!(
                "Failed to persist handle for custom reminder {}: {}",
                reminder.id, e
            );
            if let Err(e) = self.notifier.cancel(&handle).await {
                warn!("Failed to cancel untracked notification {}: {}", handle, e);
            }
            return None;
        }

        Some(handle)
    }

    /// Cancel the reminder with the given id, if one is tracked.
    pub async fn cancel(&self, reminder_id: &str) {
        let _guard = self.store.lock(Category::Custom).await;

        let map = self.store.custom_map().await;
        let handle = match map.get(reminder_id) {
            Some(handle) => handle.clone(),
            None => {
                debug!("No tracked notification for custom reminder {}", reminder_id);
                return;
            }
        };

        if let Err(e) = self.notifier.cancel(&handle).await {
            warn!("Failed to cancel custom reminder {}: {}", reminder_id, e);
        }
        if let Err(e) = self.store.remove_custom(reminder_id).await {
            warn!(
                "Failed to remove handle for custom reminder {}: {}",
                reminder_id, e
            );
        }
    }

    /// Cancel every tracked custom reminder and clear the mapping.
    pub async fn cancel_all(&self) {
        let _guard = self.store.lock(Category::Custom).await;
        self.store
            .cancel_and_clear(self.notifier.as_ref(), Category::Custom)
            .await;
    }
}
