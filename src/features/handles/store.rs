//! Enum-keyed persisted handle table.

use crate::core::NotificationHandle;
use crate::platform::{Notifier, Storage};
use anyhow::Result;
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Reminder category, the unit of shared cancellation and bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Countdown,
    Checklist,
    Custom,
}

impl Category {
    pub fn storage_key(&self) -> &'static str {
        match self {
            Category::Countdown => "@wedflow/countdown_ids",
            Category::Checklist => "@wedflow/checklist_ids",
            Category::Custom => "@wedflow/custom_ids_by_reminder_id",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Countdown => "countdown",
            Category::Checklist => "checklist",
            Category::Custom => "custom",
        }
    }

    fn index(&self) -> usize {
        match self {
            Category::Countdown => 0,
            Category::Checklist => 1,
            Category::Custom => 2,
        }
    }
}

/// Persisted handle sets for all categories.
///
/// Countdown and Checklist store a flat handle array replaced wholesale
/// per reschedule; Custom stores a reminder-id to handle map mutated via
/// read-modify-write. Reads fail open: a missing or unreadable value is an
/// empty set.
///
/// The store does no locking of its own. Callers take the category's guard
/// via [`lock`](HandleStore::lock) and hold it across their whole cancel,
/// recompute, schedule, persist sequence so overlapping cycles on one
/// category serialize instead of racing on the stored set.
pub struct HandleStore {
    storage: Arc<dyn Storage>,
    locks: [Mutex<()>; 3],
}

impl HandleStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        HandleStore {
            storage,
            locks: [Mutex::new(()), Mutex::new(()), Mutex::new(())],
        }
    }

    /// Guard serializing reschedule cycles for one category.
    pub async fn lock(&self, category: Category) -> MutexGuard<'_, ()> {
        self.locks[category.index()].lock().await
    }

    /// Every handle recorded for the category. Custom returns its map's
    /// values.
    pub async fn load(&self, category: Category) -> Vec<NotificationHandle> {
        match category {
            Category::Custom => self.custom_map().await.into_values().collect(),
            _ => self.read_list(category).await,
        }
    }

    /// Replace the flat handle set for Countdown or Checklist.
    pub async fn replace(&self, category: Category, handles: &[NotificationHandle]) -> Result<()> {
        debug_assert!(!matches!(category, Category::Custom));
        let raw = serde_json::to_string(handles)?;
        self.storage.set(category.storage_key(), &raw).await
    }

    /// Append one handle to a flat category via read-modify-write. Batch
    /// schedulers use this to keep partial progress durable.
    pub async fn push(&self, category: Category, handle: NotificationHandle) -> Result<()> {
        debug_assert!(!matches!(category, Category::Custom));
        let mut handles = self.read_list(category).await;
        handles.push(handle);
        self.replace(category, &handles).await
    }

    /// Drop the category's stored set entirely.
    pub async fn clear(&self, category: Category) -> Result<()> {
        self.storage.remove(category.storage_key()).await
    }

    /// Cancel every stored handle for the category, then clear the set.
    /// Individual cancel failures are logged and skipped so one dead
    /// handle cannot strand the rest. Runs under the caller's guard.
    pub async fn cancel_and_clear(&self, notifier: &dyn Notifier, category: Category) {
        for handle in self.load(category).await {
            if let Err(e) = notifier.cancel(&handle).await {
                warn!(
                    "Failed to cancel {} notification {}: {}",
                    category.label(),
                    handle,
                    e
                );
            }
        }
        if let Err(e) = self.clear(category).await {
            warn!("Failed to clear {} handle set: {}", category.label(), e);
        }
    }

    /// The Custom category's reminder-id to handle map.
    pub async fn custom_map(&self) -> HashMap<String, NotificationHandle> {
        match self.storage.get(Category::Custom.storage_key()).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!("Unreadable custom handle map, treating as empty: {}", e);
                    HashMap::new()
                }
            },
            Ok(None) => HashMap::new(),
            Err(e) => {
                warn!("Failed to read custom handle map, treating as empty: {}", e);
                HashMap::new()
            }
        }
    }

    /// Merge one reminder's handle into the Custom map.
    pub async fn insert_custom(&self, reminder_id: &str, handle: NotificationHandle) -> Result<()> {
        let mut map = self.custom_map().await;
        map.insert(reminder_id.to_string(), handle);
        self.write_custom(&map).await
    }

    /// Remove one reminder's entry, returning the handle it held.
    pub async fn remove_custom(&self, reminder_id: &str) -> Result<Option<NotificationHandle>> {
        let mut map = self.custom_map().await;
        let removed = map.remove(reminder_id);
        if removed.is_some() {
            self.write_custom(&map).await?;
        }
        Ok(removed)
    }

    async fn write_custom(&self, map: &HashMap<String, NotificationHandle>) -> Result<()> {
        let raw = serde_json::to_string(map)?;
        self.storage.set(Category::Custom.storage_key(), &raw).await
    }

    async fn read_list(&self, category: Category) -> Vec<NotificationHandle> {
        match self.storage.get(category.storage_key()).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(handles) => handles,
                Err(e) => {
                    warn!(
                        "Unreadable {} handle set, treating as empty: {}",
                        category.label(),
                        e
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(
                    "Failed to read {} handle set, treating as empty: {}",
                    category.label(),
                    e
                );
                Vec::new()
            }
        }
    }
}
