//! # Platform Module
//!
//! Seams the host app implements around the engine: the OS notification
//! surface, device key-value storage, the toast sink, and the read-only
//! sources for tasks, remote settings, auth, and wedding details. The
//! engine is pure orchestration over these traits and implements none of
//! them itself.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: NoticeSink extracted so toasts are host-owned
//! - 1.0.0: Initial creation with notifier, storage, and source traits

pub mod sources;

pub use sources::{
    ChecklistTask, EventDetails, EventDetailsSource, Session, SessionSource, SettingsSource,
    TaskSource,
};

use crate::core::{NotificationHandle, NotificationRequest};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Local-notification surface of the OS.
///
/// `schedule_at` takes naive local wall time; the platform fires the
/// notification when the device clock reaches that instant.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn schedule_at(
        &self,
        request: NotificationRequest,
        at: NaiveDateTime,
    ) -> Result<NotificationHandle>;

    async fn cancel(&self, handle: &NotificationHandle) -> Result<()>;

    /// Cancel every notification owned by the app. The engine never calls
    /// this; it exists for host-level teardown such as logout.
    async fn cancel_all(&self) -> Result<()>;

    /// Handles of everything currently scheduled, for diagnostics screens.
    async fn list_scheduled(&self) -> Result<Vec<NotificationHandle>>;
}

/// Device-local string key-value store.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Fire-and-forget user notice, a toast in the app shell.
pub trait NoticeSink: Send + Sync {
    fn show(&self, message: &str);
}
