//! Last fetched payload per source, used to serve stale data and to report
//! [`LoadState::cache_age`](crate::load_state::LoadState::cache_age).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use satreg_core::store::{get_json, set_json};
use satreg_core::{KvStore, StoreError};
use serde::{Deserialize, Serialize};

use crate::keys;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedPayload {
    pub fetched_at: DateTime<Utc>,
    pub text: String,
}

impl CachedPayload {
    /// Whole seconds between the fetch and `now`, clamped at zero.
    pub fn age_secs(&self, now: DateTime<Utc>) -> u64 {
        (now - self.fetched_at).num_seconds().max(0) as u64
    }
}

/// Read/write access to the per-source fetch cache.
#[derive(Clone)]
pub struct SourceCache {
    store: Arc<dyn KvStore>,
}

impl SourceCache {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Store a freshly fetched payload.
    pub fn write(&self, id: &str, text: &str, fetched_at: DateTime<Utc>) -> Result<(), StoreError> {
        let payload = CachedPayload {
            fetched_at,
            text: text.to_string(),
        };
        set_json(self.store.as_ref(), &keys::fetch_cache(id), &payload)
    }

    /// The cached payload, if present and readable.
    pub fn read(&self, id: &str) -> Option<CachedPayload> {
        get_json(self.store.as_ref(), &keys::fetch_cache(id))
    }

    pub fn invalidate(&self, id: &str) {
        self.store.remove(&keys::fetch_cache(id));
    }
}
