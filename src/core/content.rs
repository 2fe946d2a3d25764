//! Typed notification content.
//!
//! The platform notifier receives a title, a body, and a payload the app
//! shell uses to route taps. One payload variant exists per reminder
//! category and is matched exhaustively wherever content is built.

use serde::{Deserialize, Serialize};

/// Opaque identifier returned by the platform when a notification is
/// scheduled. Required later to cancel it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationHandle(pub String);

impl NotificationHandle {
    pub fn new(id: impl Into<String>) -> Self {
        NotificationHandle(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NotificationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tap-routing payload attached to every scheduled notification.
///
/// The `type` tag and camelCase field names match what the app shell's
/// notification-tap handler has always consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NotificationPayload {
    #[serde(rename_all = "camelCase")]
    Countdown { days_before: u32 },
    Checklist { task: String },
    #[serde(rename_all = "camelCase")]
    Custom { reminder_id: String },
}

/// Everything the platform needs to display one notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub payload: NotificationPayload,
}

impl NotificationRequest {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        payload: NotificationPayload,
    ) -> Self {
        NotificationRequest {
            title: title.into(),
            body: body.into(),
            payload,
        }
    }
}
