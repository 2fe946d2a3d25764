use crate::core::{Clock, Language, NotificationSettings};
use crate::features::checklist::ChecklistReminderScheduler;
use crate::features::countdown::CountdownScheduler;
use crate::features::custom::CustomReminderScheduler;
use crate::features::handles::{Category, HandleStore};
use crate::features::remote_copy::{SettingsCache, TemplateResolver};
use crate::platform::{
    EventDetailsSource, NoticeSink, Notifier, SessionSource, SettingsSource, Storage, TaskSource,
};
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of a reschedule cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScheduleReport {
    /// Checklist tasks whose reminder could not be scheduled.
    pub checklist_failed: u32,
}

/// Top-level entry point tying the schedulers together.
///
/// Every entry point re-reads settings and language from storage, so
/// callers never pass stale state. Mass operations only ever touch the
/// Countdown and Checklist categories; custom reminders belong to the
/// caller and are managed one at a time via [`custom`](Self::custom).
pub struct RescheduleCoordinator {
    countdown: CountdownScheduler,
    checklist: ChecklistReminderScheduler,
    custom: CustomReminderScheduler,
    notifier: Arc<dyn Notifier>,
    store: Arc<HandleStore>,
    storage: Arc<dyn Storage>,
    notices: Arc<dyn NoticeSink>,
    resolver: Arc<TemplateResolver>,
}

impl RescheduleCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        notifier: Arc<dyn Notifier>,
        storage: Arc<dyn Storage>,
        tasks: Arc<dyn TaskSource>,
        app_settings: Arc<dyn SettingsSource>,
        session: Arc<dyn SessionSource>,
        event_details: Arc<dyn EventDetailsSource>,
        notices: Arc<dyn NoticeSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let store = Arc::new(HandleStore::new(storage.clone()));
        let cache = Arc::new(SettingsCache::with_default_ttl(app_settings, clock.clone()));
        let resolver = Arc::new(TemplateResolver::new(cache));
        let countdown = CountdownScheduler::new(
            notifier.clone(),
            store.clone(),
            resolver.clone(),
            event_details.clone(),
            clock.clone(),
        );
        let checklist = ChecklistReminderScheduler::new(
            notifier.clone(),
            store.clone(),
            resolver.clone(),
            session,
            tasks,
            event_details,
            clock.clone(),
        );
        let custom = CustomReminderScheduler::new(
            notifier.clone(),
            store.clone(),
            storage.clone(),
            clock,
        );
        RescheduleCoordinator {
            countdown,
            checklist,
            custom,
            notifier,
            store,
            storage,
            notices,
            resolver,
        }
    }

    /// The per-reminder scheduler for caller-owned custom reminders.
    pub fn custom(&self) -> &CustomReminderScheduler {
        &self.custom
    }

    /// Rebuild the Countdown and Checklist categories for the given
    /// settings.
    ///
    /// With notifications disabled both categories are torn down. Custom
    /// reminders are left alone either way; they follow the caller's own
    /// create and delete flow.
    pub async fn schedule_all(&self, settings: &NotificationSettings) -> ScheduleReport {
        let request_id = Uuid::new_v4();
        debug!(
            "[{}] Full reschedule (enabled: {}, checklist: {}, countdown: {})",
            request_id, settings.enabled, settings.checklist_reminders, settings.wedding_countdown
        );

        if !settings.enabled {
            {
                let _guard = self.store.lock(Category::Countdown).await;
                self.store
                    .cancel_and_clear(self.notifier.as_ref(), Category::Countdown)
                    .await;
            }
            {
                let _guard = self.store.lock(Category::Checklist).await;
                self.store
                    .cancel_and_clear(self.notifier.as_ref(), Category::Checklist)
                    .await;
            }
            debug!("[{}] Notifications disabled, categories torn down", request_id);
            return ScheduleReport::default();
        }

        let language = Language::load(self.storage.as_ref()).await;
        self.countdown.schedule(settings, language).await;
        // The checklist scheduler clears its category itself when the
        // flag is off, so no branch is needed here.
        let checklist_failed = self.checklist.schedule(settings, language).await;

        info!(
            "[{}] Reschedule complete ({} checklist failures)",
            request_id, checklist_failed
        );
        ScheduleReport { checklist_failed }
    }

    /// Re-derive only the Checklist category, for when task data changed
    /// but settings did not.
    pub async fn reschedule_checklist(&self) -> ScheduleReport {
        let settings = NotificationSettings::load(self.storage.as_ref()).await;
        let language = Language::load(self.storage.as_ref()).await;
        let checklist_failed = self.checklist.schedule(&settings, language).await;
        ScheduleReport { checklist_failed }
    }

    /// Reload settings, rebuild everything, and surface the outcome as a
    /// user notice.
    ///
    /// A partial checklist failure always produces the failure notice.
    /// The success notice is only shown when the caller asked for it,
    /// so background refreshes stay quiet.
    pub async fn reschedule_all(&self, show_success_toast: bool) -> ScheduleReport {
        let settings = NotificationSettings::load(self.storage.as_ref()).await;
        let report = self.schedule_all(&settings).await;
        self.surface(report, show_success_toast).await;
        report
    }

    /// Persist new settings, then bring every scheduled notification in
    /// line with them.
    pub async fn save_settings(&self, settings: &NotificationSettings) -> ScheduleReport {
        if let Err(e) = settings.save(self.storage.as_ref()).await {
            warn!("Failed to persist notification settings: {}", e);
        }
        self.schedule_all(settings).await
    }

    async fn surface(&self, report: ScheduleReport, show_success_toast: bool) {
        let language = Language::load(self.storage.as_ref()).await;
        let copy = self.resolver.resolve(language).await;
        if report.checklist_failed > 0 {
            self.notices.show(&copy.toast_checklist_failed);
        } else if show_success_toast {
            self.notices.show(&copy.toast_updated);
        }
    }
}
