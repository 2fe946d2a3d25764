//! Builtin notification copy.
//!
//! These strings ship with the app and are the final fallback when no
//! remote override applies. Only the countdown entries vary by day count,
//! and the "tomorrow" and "wedding day" variants exist only here. Remote
//! overrides are plain templates without day special-casing.

use crate::core::Language;

pub(crate) struct DefaultCopy {
    pub toast_checklist_failed: &'static str,
    pub toast_updated: &'static str,
    pub toast_permission_granted: &'static str,
    pub checklist_title: &'static str,
    pub checklist_body: &'static str,
}

const NB: DefaultCopy = DefaultCopy {
    toast_checklist_failed: "Noen gjøremålspåminnelser kunne ikke planlegges.",
    toast_updated: "Påminnelser oppdatert.",
    toast_permission_granted: "Varsler er aktivert.",
    checklist_title: "Påminnelse om gjøremål",
    checklist_body: "Husk: \"{task}\" bør gjøres snart!",
};

const EN: DefaultCopy = DefaultCopy {
    toast_checklist_failed: "Some checklist reminders could not be scheduled.",
    toast_updated: "Reminders updated.",
    toast_permission_granted: "Notifications are enabled.",
    checklist_title: "Task reminder",
    checklist_body: "Remember: \"{task}\" should be done soon!",
};

pub(crate) fn for_language(language: Language) -> &'static DefaultCopy {
    match language {
        Language::Nb => &NB,
        Language::En => &EN,
    }
}

/// Builtin countdown title for a day offset.
pub(crate) fn countdown_title(language: Language, days_before: u32) -> String {
    match (language, days_before) {
        (Language::Nb, 1) => "Bryllupet er i morgen!".to_string(),
        (Language::Nb, 0) => "Gratulerer med dagen!".to_string(),
        (Language::Nb, n) => format!("{} dager til bryllupet!", n),
        (Language::En, 1) => "The wedding is tomorrow!".to_string(),
        (Language::En, 0) => "Congratulations on your big day!".to_string(),
        (Language::En, n) => format!("{} days until the wedding!", n),
    }
}

/// Builtin countdown body for a day offset.
pub(crate) fn countdown_body(language: Language, days_before: u32) -> String {
    match (language, days_before) {
        (Language::Nb, 1) => "Siste sjekk av alle detaljer. Vi gleder oss med dere!",
        (Language::Nb, 0) => "I dag er den store dagen. Nyt hvert øyeblikk!",
        (Language::Nb, _) => "Ikke glem å sjekke gjøremålslisten din.",
        (Language::En, 1) => "Time for a final check of every detail. We are excited for you!",
        (Language::En, 0) => "Today is the big day. Enjoy every moment!",
        (Language::En, _) => "Don't forget to check your wedding checklist.",
    }
    .to_string()
}
