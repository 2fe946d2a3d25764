//! In-memory fakes shared by the unit tests.
//!
//! Every fake records what the engine did to it and can be told to fail
//! on demand, so tests drive error paths without any real platform
//! behind them.

use crate::core::{Clock, NotificationHandle, NotificationRequest};
use crate::platform::{
    ChecklistTask, EventDetails, EventDetailsSource, NoticeSink, Notifier, Session, SessionSource,
    SettingsSource, Storage, TaskSource,
};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

/// Route engine logs through the test harness so failing tests show them.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, minute, 0).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Key-value store backed by a plain map.
#[derive(Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, String>>,
    fail_sets: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    pub fn seed(&self, key: &str, value: &str) {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn get_sync(&self, key: &str) -> Option<String> {
        self.data.lock().unwrap().get(key).cloned()
    }

    /// Make every subsequent write fail.
    pub fn fail_sets(&self, fail: bool) {
        self.fail_sets.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_sync(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_sets.load(Ordering::SeqCst) {
            bail!("storage write refused");
        }
        self.seed(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.data.lock().unwrap().remove(key);
        Ok(())
    }
}

/// One notification as the fake platform holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledNotification {
    pub handle: NotificationHandle,
    pub request: NotificationRequest,
    pub at: NaiveDateTime,
}

/// Notifier that keeps scheduled notifications in memory.
#[derive(Default)]
pub struct RecordingNotifier {
    live: Mutex<Vec<ScheduledNotification>>,
    cancelled: Mutex<Vec<NotificationHandle>>,
    next_id: AtomicU32,
    fail_schedules: AtomicU32,
    fail_cancels: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        RecordingNotifier::default()
    }

    /// Refuse the next `count` schedule calls.
    pub fn fail_next_schedules(&self, count: u32) {
        self.fail_schedules.store(count, Ordering::SeqCst);
    }

    /// Refuse every cancel call, leaving notifications live.
    pub fn fail_cancels(&self, fail: bool) {
        self.fail_cancels.store(fail, Ordering::SeqCst);
    }

    pub fn live(&self) -> Vec<ScheduledNotification> {
        self.live.lock().unwrap().clone()
    }

    pub fn live_handles(&self) -> Vec<NotificationHandle> {
        self.live
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.handle.clone())
            .collect()
    }

    /// Handles cancelled so far, in cancellation order.
    pub fn cancelled(&self) -> Vec<NotificationHandle> {
        self.cancelled.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn schedule_at(
        &self,
        request: NotificationRequest,
        at: NaiveDateTime,
    ) -> Result<NotificationHandle> {
        let remaining = self.fail_schedules.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_schedules.store(remaining - 1, Ordering::SeqCst);
            bail!("scheduling refused");
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = NotificationHandle::new(format!("ntf-{}", id));
        self.live.lock().unwrap().push(ScheduledNotification {
            handle: handle.clone(),
            request,
            at,
        });
        Ok(handle)
    }

    async fn cancel(&self, handle: &NotificationHandle) -> Result<()> {
        if self.fail_cancels.load(Ordering::SeqCst) {
            bail!("cancel refused");
        }
        self.live.lock().unwrap().retain(|n| &n.handle != handle);
        self.cancelled.lock().unwrap().push(handle.clone());
        Ok(())
    }

    async fn cancel_all(&self) -> Result<()> {
        let mut live = self.live.lock().unwrap();
        let mut cancelled = self.cancelled.lock().unwrap();
        cancelled.extend(live.drain(..).map(|n| n.handle));
        Ok(())
    }

    async fn list_scheduled(&self) -> Result<Vec<NotificationHandle>> {
        Ok(self.live_handles())
    }
}

/// Settings source that replays a scripted sequence of responses, then
/// serves empty maps.
#[derive(Default)]
pub struct ScriptedSettings {
    responses: Mutex<VecDeque<Result<HashMap<String, String>, String>>>,
    calls: AtomicU32,
}

impl ScriptedSettings {
    pub fn new() -> Self {
        ScriptedSettings::default()
    }

    pub fn push_ok(&self, pairs: &[(&str, &str)]) {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.responses.lock().unwrap().push_back(Ok(map));
    }

    pub fn push_err(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsSource for ScriptedSettings {
    async fn app_settings(&self) -> Result<HashMap<String, String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(map)) => Ok(map),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(HashMap::new()),
        }
    }
}

/// Task source serving a fixed list, recording the token it was asked
/// with.
pub struct StaticTasks {
    tasks: Mutex<Vec<ChecklistTask>>,
    fail: AtomicBool,
    last_token: Mutex<Option<String>>,
}

impl StaticTasks {
    pub fn new(tasks: Vec<ChecklistTask>) -> Self {
        StaticTasks {
            tasks: Mutex::new(tasks),
            fail: AtomicBool::new(false),
            last_token: Mutex::new(None),
        }
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskSource for StaticTasks {
    async fn tasks(&self, auth_token: &str) -> Result<Vec<ChecklistTask>> {
        *self.last_token.lock().unwrap() = Some(auth_token.to_string());
        if self.fail.load(Ordering::SeqCst) {
            bail!("checklist fetch refused");
        }
        Ok(self.tasks.lock().unwrap().clone())
    }
}

/// Session source holding a settable session.
pub struct StaticSession {
    session: Mutex<Option<Session>>,
}

impl StaticSession {
    pub fn new(token: Option<&str>) -> Self {
        let session = StaticSession {
            session: Mutex::new(None),
        };
        session.set(token);
        session
    }

    pub fn set(&self, token: Option<&str>) {
        *self.session.lock().unwrap() = token.map(|token| Session {
            token: token.to_string(),
        });
    }
}

#[async_trait]
impl SessionSource for StaticSession {
    async fn session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }
}

/// Event details source holding a settable raw date string.
pub struct StaticEventDetails {
    details: Mutex<Option<EventDetails>>,
}

impl StaticEventDetails {
    pub fn new(event_date: Option<&str>) -> Self {
        let details = StaticEventDetails {
            details: Mutex::new(None),
        };
        details.set(event_date);
        details
    }

    pub fn set(&self, event_date: Option<&str>) {
        *self.details.lock().unwrap() = event_date.map(|raw| EventDetails {
            event_date: raw.to_string(),
        });
    }
}

#[async_trait]
impl EventDetailsSource for StaticEventDetails {
    async fn event_details(&self) -> Option<EventDetails> {
        self.details.lock().unwrap().clone()
    }
}

/// Clock pinned to an instant tests move by hand.
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn at(now: NaiveDateTime) -> Self {
        FixedClock {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

/// Notice sink collecting shown messages.
#[derive(Default)]
pub struct RecordingNotices {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotices {
    pub fn new() -> Self {
        RecordingNotices::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl NoticeSink for RecordingNotices {
    fn show(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
