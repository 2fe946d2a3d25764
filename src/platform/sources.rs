//! Read-only data sources feeding the schedulers.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One checklist task as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistTask {
    pub id: String,
    pub title: String,
    /// How many months before the wedding this task should be done.
    pub months_before: u32,
    pub completed: bool,
}

/// Wedding details as captured by onboarding. The date stays a raw string
/// here; parsing and rejecting it is the engine's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub event_date: String,
}

impl EventDetails {
    /// The wedding date, if the stored string holds one. Accepts a plain
    /// `YYYY-MM-DD` value or an RFC 3339 timestamp, whose date part wins.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.event_date.trim();
        if let Ok(date) = raw.parse::<NaiveDate>() {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
    }
}

/// An authenticated couple session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
}

/// Checklist tasks for the signed-in couple.
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn tasks(&self, auth_token: &str) -> Result<Vec<ChecklistTask>>;
}

/// Remote-configurable app settings, copy overrides among them. Fetched
/// over the network and therefore fallible.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn app_settings(&self) -> Result<HashMap<String, String>>;
}

/// Current auth session, if any.
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn session(&self) -> Option<Session>;
}

/// Wedding details, if the couple has completed onboarding.
#[async_trait]
pub trait EventDetailsSource: Send + Sync {
    async fn event_details(&self) -> Option<EventDetails>;
}
