//! TTL cache over the remote app-settings map.

use crate::core::Clock;
use crate::platform::SettingsSource;
use chrono::{Duration, NaiveDateTime};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

struct CacheState {
    map: HashMap<String, String>,
    fetched_at: Option<NaiveDateTime>,
}

/// Cached view of the remote app settings.
///
/// At most one fetch per TTL window; a failed refresh serves the previous
/// map, or an empty one if nothing was ever fetched, so copy resolution
/// never depends on the network being up.
pub struct SettingsCache {
    source: Arc<dyn SettingsSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl SettingsCache {
    /// Default refresh window, matching the app's query staleness.
    pub const DEFAULT_TTL_SECONDS: i64 = 5 * 60;

    pub fn new(source: Arc<dyn SettingsSource>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        SettingsCache {
            source,
            clock,
            ttl,
            state: RwLock::new(CacheState {
                map: HashMap::new(),
                fetched_at: None,
            }),
        }
    }

    pub fn with_default_ttl(source: Arc<dyn SettingsSource>, clock: Arc<dyn Clock>) -> Self {
        Self::new(source, clock, Duration::seconds(Self::DEFAULT_TTL_SECONDS))
    }

    /// Current settings map. Served from cache while fresh, refetched
    /// afterwards; a failed refetch returns the previous map unchanged.
    pub async fn get_map(&self) -> HashMap<String, String> {
        {
            let state = self.state.read().await;
            if self.is_fresh(state.fetched_at) {
                return state.map.clone();
            }
        }

        let mut state = self.state.write().await;
        // Another caller may have refreshed while we waited on the lock.
        if self.is_fresh(state.fetched_at) {
            return state.map.clone();
        }

        match self.source.app_settings().await {
            Ok(map) => {
                debug!("Refreshed app settings ({} keys)", map.len());
                state.map = map;
                state.fetched_at = Some(self.clock.now());
            }
            Err(e) => {
                warn!("App settings fetch failed, serving cached copy: {}", e);
            }
        }
        state.map.clone()
    }

    fn is_fresh(&self, fetched_at: Option<NaiveDateTime>) -> bool {
        match fetched_at {
            Some(at) => self.clock.now().signed_duration_since(at) < self.ttl,
            None => false,
        }
    }
}
