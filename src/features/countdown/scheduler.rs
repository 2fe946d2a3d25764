//! Countdown reminder scheduling.

use crate::core::clock::at_hour;
use crate::core::{Clock, Language, NotificationPayload, NotificationRequest, NotificationSettings};
use crate::features::handles::{Category, HandleStore};
use crate::features::remote_copy::TemplateResolver;
use crate::platform::{EventDetailsSource, Notifier};
use chrono::{Days, NaiveDate};
use log::{debug, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Local time of day countdown reminders fire at.
const FIRE_HOUR: u32 = 9;

/// Schedules the day-offset notifications counting down to the wedding.
pub struct CountdownScheduler {
    notifier: Arc<dyn Notifier>,
    store: Arc<HandleStore>,
    resolver: Arc<TemplateResolver>,
    event_details: Arc<dyn EventDetailsSource>,
    clock: Arc<dyn Clock>,
}

impl CountdownScheduler {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        store: Arc<HandleStore>,
        resolver: Arc<TemplateResolver>,
        event_details: Arc<dyn EventDetailsSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        CountdownScheduler {
            notifier,
            store,
            resolver,
            event_details,
            clock,
        }
    }

    /// Rebuild the Countdown category from scratch.
    ///
    /// The previous handle set is always cancelled and cleared first, even
    /// when the countdown toggle is off, so a disabled feature cannot
    /// leave stale notifications behind. Individual schedule failures are
    /// logged and skipped; only successfully scheduled handles are
    /// persisted.
    pub async fn schedule(&self, settings: &NotificationSettings, language: Language) {
        let request_id = Uuid::new_v4();
        let _guard = self.store.lock(Category::Countdown).await;
        debug!("[{}] Countdown reschedule starting", request_id);

        self.store
            .cancel_and_clear(self.notifier.as_ref(), Category::Countdown)
            .await;

        if !settings.wedding_countdown {
            debug!(
                "[{}] Wedding countdown disabled, category left empty",
                request_id
            );
            return;
        }

        let event_date = match self.load_event_date().await {
            Some(date) => date,
            None => {
                debug!("[{}] No usable wedding date, nothing to schedule", request_id);
                return;
            }
        };

        let copy = self.resolver.resolve(language).await;
        let now = self.clock.now();
        let mut scheduled = Vec::new();

        for &offset in &settings.days_before {
            let date = match event_date.checked_sub_days(Days::new(u64::from(offset))) {
                Some(date) => date,
                None => {
                    warn!(
                        "[{}] Offset {} days underflows the calendar, skipping",
                        request_id, offset
                    );
                    continue;
                }
            };
            let candidate = at_hour(date, FIRE_HOUR);
            if candidate <= now {
                debug!("[{}] Offset {} days is in the past, skipping", request_id, offset);
                continue;
            }

            let request = NotificationRequest::new(
                copy.countdown_title(offset),
                copy.countdown_body(offset),
                NotificationPayload::Countdown {
                    days_before: offset,
                },
            );
            match self.notifier.schedule_at(request, candidate).await {
                Ok(handle) => scheduled.push(handle),
                Err(e) => {
                    warn!(
                        "[{}] Failed to schedule the {}-day countdown reminder: {}",
                        request_id, offset, e
                    );
                }
            }
        }

        debug!(
            "[{}] Scheduled {} countdown reminders",
            request_id,
            scheduled.len()
        );
        if let Err(e) = self.store.replace(Category::Countdown, &scheduled).await {
            warn!("[{}] Failed to persist countdown handles: {}", request_id, e);
        }
    }

    async fn load_event_date(&self) -> Option<NaiveDate> {
        self.event_details
            .event_details()
            .await
            .and_then(|details| details.parsed_date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::remote_copy::SettingsCache;
    use crate::testing::{
        dt, FixedClock, MemoryStorage, RecordingNotifier, ScriptedSettings, StaticEventDetails,
    };

    struct Fixture {
        notifier: Arc<RecordingNotifier>,
        storage: Arc<MemoryStorage>,
        store: Arc<HandleStore>,
        event_details: Arc<StaticEventDetails>,
        scheduler: CountdownScheduler,
    }

    fn fixture(event_date: Option<&str>, now: chrono::NaiveDateTime) -> Fixture {
        crate::testing::init_test_logging();
        let notifier = Arc::new(RecordingNotifier::new());
        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(HandleStore::new(storage.clone()));
        let event_details = Arc::new(StaticEventDetails::new(event_date));
        let clock = Arc::new(FixedClock::at(now));
        let cache = Arc::new(SettingsCache::with_default_ttl(
            Arc::new(ScriptedSettings::new()),
            clock.clone(),
        ));
        let resolver = Arc::new(TemplateResolver::new(cache));
        let scheduler = CountdownScheduler::new(
            notifier.clone(),
            store.clone(),
            resolver,
            event_details.clone(),
            clock,
        );
        Fixture {
            notifier,
            storage,
            store,
            event_details,
            scheduler,
        }
    }

    fn settings(days_before: &[u32]) -> NotificationSettings {
        NotificationSettings {
            enabled: true,
            checklist_reminders: true,
            wedding_countdown: true,
            days_before: days_before.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_schedules_only_future_offsets() {
        // Wedding is 10 days out, so the 30-day offset is already past.
        let f = fixture(Some("2026-06-15"), dt(2026, 6, 5, 12, 0));

        f.scheduler.schedule(&settings(&[30, 7, 1]), Language::Nb).await;

        let live = f.notifier.live();
        assert_eq!(live.len(), 2);
        assert_eq!(live[0].at, dt(2026, 6, 8, 9, 0));
        assert_eq!(live[1].at, dt(2026, 6, 14, 9, 0));
        assert_eq!(live[0].request.title, "7 dager til bryllupet!");
        assert_eq!(live[1].request.title, "Bryllupet er i morgen!");
        assert_eq!(
            live[0].request.payload,
            NotificationPayload::Countdown { days_before: 7 }
        );

        let stored = f.store.load(Category::Countdown).await;
        assert_eq!(stored, f.notifier.live_handles());
    }

    #[tokio::test]
    async fn test_reschedule_cancels_previous_set_first() {
        let f = fixture(Some("2026-06-15"), dt(2026, 6, 5, 12, 0));
        let config = settings(&[7, 1]);

        f.scheduler.schedule(&config, Language::Nb).await;
        let first = f.notifier.live_handles();
        f.scheduler.schedule(&config, Language::Nb).await;

        assert_eq!(f.notifier.live().len(), 2);
        for handle in first {
            assert!(f.notifier.cancelled().contains(&handle));
        }
        assert_eq!(f.store.load(Category::Countdown).await.len(), 2);
    }

    #[tokio::test]
    async fn test_disabled_toggle_clears_category_and_stops() {
        let f = fixture(Some("2026-06-15"), dt(2026, 6, 5, 12, 0));
        f.scheduler.schedule(&settings(&[7, 1]), Language::Nb).await;
        assert_eq!(f.notifier.live().len(), 2);

        let mut off = settings(&[7, 1]);
        off.wedding_countdown = false;
        f.scheduler.schedule(&off, Language::Nb).await;

        assert!(f.notifier.live().is_empty());
        assert!(f.store.load(Category::Countdown).await.is_empty());
        assert!(f
            .storage
            .get_sync(Category::Countdown.storage_key())
            .is_none());
    }

    #[tokio::test]
    async fn test_missing_or_unparseable_event_date_is_soft_noop() {
        let f = fixture(None, dt(2026, 6, 5, 12, 0));
        f.scheduler.schedule(&settings(&[7]), Language::Nb).await;
        assert!(f.notifier.live().is_empty());

        f.event_details.set(Some("sommeren 2026"));
        f.scheduler.schedule(&settings(&[7]), Language::Nb).await;
        assert!(f.notifier.live().is_empty());
        assert!(f
            .storage
            .get_sync(Category::Countdown.storage_key())
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_offsets_pass_through() {
        let f = fixture(Some("2026-06-15"), dt(2026, 6, 5, 12, 0));

        f.scheduler.schedule(&settings(&[7, 7]), Language::Nb).await;

        let live = f.notifier.live();
        assert_eq!(live.len(), 2);
        assert_eq!(live[0].at, live[1].at);
    }

    #[tokio::test]
    async fn test_same_day_offset_is_skipped_when_nine_oclock_passed() {
        // Offset 0 lands on the wedding day at 09:00; at 12:00 that
        // instant is no longer strictly in the future.
        let f = fixture(Some("2026-06-15"), dt(2026, 6, 15, 12, 0));

        f.scheduler.schedule(&settings(&[0]), Language::Nb).await;

        assert!(f.notifier.live().is_empty());
    }

    #[tokio::test]
    async fn test_schedule_failure_is_logged_not_persisted() {
        let f = fixture(Some("2026-06-15"), dt(2026, 6, 5, 12, 0));
        f.notifier.fail_next_schedules(1);

        f.scheduler.schedule(&settings(&[7, 1]), Language::Nb).await;

        assert_eq!(f.notifier.live().len(), 1);
        let stored = f.store.load(Category::Countdown).await;
        assert_eq!(stored, f.notifier.live_handles());
    }
}
