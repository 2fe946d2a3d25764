//! Copy resolution with remote overrides.

use super::cache::SettingsCache;
use super::defaults;
use crate::core::Language;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

// Remote-config keys, one per notification string.
const KEY_TOAST_CHECKLIST_FAILED: &str = "notification_toast_checklist_failed";
const KEY_TOAST_UPDATED: &str = "notification_toast_updated";
const KEY_TOAST_PERMISSION_GRANTED: &str = "notification_toast_permission_granted";
const KEY_CHECKLIST_TITLE: &str = "notification_checklist_title";
const KEY_CHECKLIST_BODY: &str = "notification_checklist_body";
const KEY_COUNTDOWN_TITLE: &str = "notification_countdown_title";
const KEY_COUNTDOWN_BODY: &str = "notification_countdown_body";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap())
}

/// Replace `{name}` placeholders with values from `params`. Placeholders
/// without a matching param stay verbatim in the output.
pub fn apply_template(template: &str, params: &[(&str, &str)]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures<'_>| {
            match params.iter().find(|(name, _)| *name == &caps[1]) {
                Some((_, value)) => (*value).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Where a parameterized copy entry got its text from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CopyTemplate {
    /// Admin-supplied template, rendered by placeholder substitution only.
    Override(String),
    /// Builtin copy, which may vary by the call-time parameter.
    Builtin,
}

/// Resolved notification copy for one language.
///
/// The three parameterized entries stay lazy: their text is produced when
/// the call site supplies the task title or day count.
#[derive(Debug, Clone)]
pub struct ReminderCopy {
    language: Language,
    pub toast_checklist_failed: String,
    pub toast_updated: String,
    pub toast_permission_granted: String,
    pub checklist_title: String,
    checklist_body: CopyTemplate,
    countdown_title: CopyTemplate,
    countdown_body: CopyTemplate,
}

impl ReminderCopy {
    pub fn checklist_body(&self, task_title: &str) -> String {
        let template = match &self.checklist_body {
            CopyTemplate::Override(t) => t.as_str(),
            CopyTemplate::Builtin => defaults::for_language(self.language).checklist_body,
        };
        apply_template(template, &[("task", task_title)])
    }

    /// Countdown title for a day offset. Builtin copy picks the tomorrow,
    /// wedding-day, or generic variant; an override is substituted
    /// literally with no variant selection.
    pub fn countdown_title(&self, days_before: u32) -> String {
        match &self.countdown_title {
            CopyTemplate::Override(t) => {
                apply_template(t, &[("days", days_before.to_string().as_str())])
            }
            CopyTemplate::Builtin => defaults::countdown_title(self.language, days_before),
        }
    }

    /// Countdown body for a day offset, with the same override rules as
    /// the title.
    pub fn countdown_body(&self, days_before: u32) -> String {
        match &self.countdown_body {
            CopyTemplate::Override(t) => {
                apply_template(t, &[("days", days_before.to_string().as_str())])
            }
            CopyTemplate::Builtin => defaults::countdown_body(self.language, days_before),
        }
    }
}

/// Resolves [`ReminderCopy`] bundles from the cached remote settings.
pub struct TemplateResolver {
    cache: Arc<SettingsCache>,
}

impl TemplateResolver {
    pub fn new(cache: Arc<SettingsCache>) -> Self {
        TemplateResolver { cache }
    }

    /// Resolve the full copy bundle for one language.
    pub async fn resolve(&self, language: Language) -> ReminderCopy {
        let map = self.cache.get_map().await;
        let builtin = defaults::for_language(language);

        ReminderCopy {
            language,
            toast_checklist_failed: resolve_plain(
                &map,
                KEY_TOAST_CHECKLIST_FAILED,
                language,
                builtin.toast_checklist_failed,
            ),
            toast_updated: resolve_plain(&map, KEY_TOAST_UPDATED, language, builtin.toast_updated),
            toast_permission_granted: resolve_plain(
                &map,
                KEY_TOAST_PERMISSION_GRANTED,
                language,
                builtin.toast_permission_granted,
            ),
            checklist_title: resolve_plain(
                &map,
                KEY_CHECKLIST_TITLE,
                language,
                builtin.checklist_title,
            ),
            checklist_body: resolve_template(&map, KEY_CHECKLIST_BODY, language),
            countdown_title: resolve_template(&map, KEY_COUNTDOWN_TITLE, language),
            countdown_body: resolve_template(&map, KEY_COUNTDOWN_BODY, language),
        }
    }
}

/// Override text for a key, if the settings map carries a usable one.
///
/// A value that parses as a JSON object of strings is per-language copy
/// and applies only when it has a non-empty entry for `language`. Any
/// other non-empty value applies to every language as-is.
fn resolve_override(
    map: &HashMap<String, String>,
    key: &str,
    language: Language,
) -> Option<String> {
    let raw = map.get(key)?;
    if let Ok(by_language) = serde_json::from_str::<HashMap<String, String>>(raw) {
        return by_language
            .get(language.code())
            .filter(|value| !value.trim().is_empty())
            .cloned();
    }
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.clone())
    }
}

fn resolve_plain(
    map: &HashMap<String, String>,
    key: &str,
    language: Language,
    builtin: &str,
) -> String {
    resolve_override(map, key, language).unwrap_or_else(|| builtin.to_string())
}

fn resolve_template(map: &HashMap<String, String>, key: &str, language: Language) -> CopyTemplate {
    match resolve_override(map, key, language) {
        Some(template) => CopyTemplate::Override(template),
        None => CopyTemplate::Builtin,
    }
}
