//! Checklist reminder scheduling.

use crate::core::clock::at_hour;
use crate::core::{Clock, Language, NotificationPayload, NotificationRequest, NotificationSettings};
use crate::features::handles::{Category, HandleStore};
use crate::features::remote_copy::TemplateResolver;
use crate::platform::{EventDetailsSource, Notifier, SessionSource, TaskSource};
use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use log::{debug, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Local time of day task due points anchor to.
const DUE_HOUR: u32 = 9;
/// Local time of day the advance reminder fires at.
const REMINDER_HOUR: u32 = 10;
/// Days before a task's due point that its reminder fires.
const LEAD_DAYS: u64 = 7;

/// Schedules one advance reminder per open checklist task.
pub struct ChecklistReminderScheduler {
    notifier: Arc<dyn Notifier>,
    store: Arc<HandleStore>,
    resolver: Arc<TemplateResolver>,
    session: Arc<dyn SessionSource>,
    tasks: Arc<dyn TaskSource>,
    event_details: Arc<dyn EventDetailsSource>,
    clock: Arc<dyn Clock>,
}

impl ChecklistReminderScheduler {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        store: Arc<HandleStore>,
        resolver: Arc<TemplateResolver>,
        session: Arc<dyn SessionSource>,
        tasks: Arc<dyn TaskSource>,
        event_details: Arc<dyn EventDetailsSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        ChecklistReminderScheduler {
            notifier,
            store,
            resolver,
            session,
            tasks,
            event_details,
            clock,
        }
    }

    /// Rebuild the Checklist category from scratch, returning how many
    /// tasks failed to schedule.
    ///
    /// Unmet preconditions (notifications off, signed out, no usable
    /// wedding date, task fetch error) are quiet no-ops returning zero.
    /// Handles are persisted one by one so earlier progress survives a
    /// failure further down the task list.
    pub async fn schedule(&self, settings: &NotificationSettings, language: Language) -> u32 {
        let request_id = Uuid::new_v4();
        let _guard = self.store.lock(Category::Checklist).await;
        debug!("[{}] Checklist reschedule starting", request_id);

        self.store
            .cancel_and_clear(self.notifier.as_ref(), Category::Checklist)
            .await;

        if !settings.enabled || !settings.checklist_reminders {
            debug!(
                "[{}] Checklist reminders disabled, category left empty",
                request_id
            );
            return 0;
        }

        let session = match self.session.session().await {
            Some(session) => session,
            None => {
                debug!("[{}] No active session, skipping checklist reminders", request_id);
                return 0;
            }
        };

        let event_date = match self.load_event_date().await {
            Some(date) => date,
            None => {
                debug!(
                    "[{}] No usable wedding date, skipping checklist reminders",
                    request_id
                );
                return 0;
            }
        };

        let tasks = match self.tasks.tasks(&session.token).await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(
                    "[{}] Checklist fetch failed, skipping reminders: {}",
                    request_id, e
                );
                return 0;
            }
        };

        let copy = self.resolver.resolve(language).await;
        let now = self.clock.now();
        let mut failed = 0u32;
        let mut scheduled = 0u32;

        for task in tasks.iter().filter(|task| !task.completed) {
            let reminder_at = match reminder_instant(event_date, task.months_before) {
                Some(at) => at,
                None => {
                    warn!(
                        "[{}] Task {} due date underflows the calendar, skipping",
                        request_id, task.id
                    );
                    continue;
                }
            };
            if reminder_at <= now {
                debug!(
                    "[{}] Reminder for task {} is in the past, skipping",
                    request_id, task.id
                );
                continue;
            }

            let request = NotificationRequest::new(
                copy.checklist_title.clone(),
                copy.checklist_body(&task.title),
                NotificationPayload::Checklist {
                    task: task.title.clone(),
                },
            );
            match self.notifier.schedule_at(request, reminder_at).await {
                Ok(handle) => {
                    // Persist as we go so earlier handles survive a later
                    // failure in this loop.
                    match self.store.push(Category::Checklist, handle.clone()).await {
                        Ok(()) => scheduled += 1,
                        Err(e) => {
                            warn!(
                                "[{}] Failed to persist handle for task {}: {}",
                                request_id, task.id, e
                            );
                            if let Err(e) = self.notifier.cancel(&handle).await {
                                warn!(
                                    "[{}] Failed to cancel untracked notification {}: {}",
                                    request_id, handle, e
                                );
                            }
                            failed += 1;
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        "[{}] Failed to schedule reminder for task {}: {}",
                        request_id, task.id, e
                    );
                    failed += 1;
                }
            }
        }

        debug!(
            "[{}] Scheduled {} checklist reminders, {} failed",
            request_id, scheduled, failed
        );
        failed
    }

    async fn load_event_date(&self) -> Option<NaiveDate> {
        self.event_details
            .event_details()
            .await
            .and_then(|details| details.parsed_date())
    }
}

/// Due point for a task: the wedding date shifted back `months_before`
/// whole months, at 09:00. Month arithmetic is calendar-aware and clamps
/// to the end of shorter months.
fn due_instant(event_date: NaiveDate, months_before: u32) -> Option<NaiveDateTime> {
    let due = event_date.checked_sub_months(Months::new(months_before))?;
    Some(at_hour(due, DUE_HOUR))
}

/// Reminder instant for a task: seven days ahead of its due point, at
/// 10:00.
fn reminder_instant(event_date: NaiveDate, months_before: u32) -> Option<NaiveDateTime> {
    let due = due_instant(event_date, months_before)?;
    let date = due.date().checked_sub_days(Days::new(LEAD_DAYS))?;
    Some(at_hour(date, REMINDER_HOUR))
}
