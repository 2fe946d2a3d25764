//! Injectable time source.
//!
//! Every "is this instant still in the future" decision and the settings
//! cache TTL go through [`Clock`], so tests can pin the wall clock instead
//! of racing the real one.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Production clock backed by the device's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// `date` at `hour:00:00` local wall time.
pub(crate) fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, 0, 0)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}
