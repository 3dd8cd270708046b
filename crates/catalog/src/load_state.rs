//! Per-source fetch status, reported by the external fetch pipeline.
//!
//! The tracker does no I/O and no retries. It only remembers the last state
//! reported for each source id. Entries are never persisted.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// No fetch attempted yet.
    Idle,
    Loading,
    Loaded,
    Error,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Loaded => "loaded",
            LoadStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Last reported state of one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadState {
    pub status: LoadStatus,
    /// Objects parsed from the source. Meaningful when `Loaded`, or carried
    /// over from the last success when `Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat_count: Option<usize>,
    /// Seconds since the data was fetched, when it came from a cache.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_age: Option<u64>,
    /// Human-readable cause; only set when `Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoadState {
    pub fn idle() -> Self {
        Self {
            status: LoadStatus::Idle,
            sat_count: None,
            cache_age: None,
            error: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            status: LoadStatus::Loading,
            ..Self::idle()
        }
    }

    pub fn loaded(sat_count: usize, cache_age: Option<u64>) -> Self {
        Self {
            status: LoadStatus::Loaded,
            sat_count: Some(sat_count),
            cache_age,
            error: None,
        }
    }

    /// An error state that keeps the count and cache age of `previous` if it
    /// was a successful load (or itself carried them over).
    pub fn failed(previous: Option<&LoadState>, message: impl Into<String>) -> Self {
        let (sat_count, cache_age) = previous
            .filter(|p| matches!(p.status, LoadStatus::Loaded | LoadStatus::Error))
            .map(|p| (p.sat_count, p.cache_age))
            .unwrap_or((None, None));
        Self {
            status: LoadStatus::Error,
            sat_count,
            cache_age,
            error: Some(message.into()),
        }
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Map of source id to last reported [`LoadState`].
///
/// Shared between the registry and fetch tasks behind an `Arc`. Each id is
/// independent; concurrent reports for different ids do not interact and
/// reports for the same id are last-write-wins.
#[derive(Debug, Default)]
pub struct LoadStateTracker {
    states: RwLock<HashMap<String, LoadState>>,
}

impl LoadStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the state recorded for `id`.
    pub fn set(&self, id: &str, state: LoadState) {
        self.states
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.to_string(), state);
    }

    /// Last reported state, or `None` if nothing was ever reported.
    pub fn get(&self, id: &str) -> Option<LoadState> {
        self.states
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    /// Last reported state, defaulting to `Idle`.
    pub fn get_or_idle(&self, id: &str) -> LoadState {
        self.get(id).unwrap_or_default()
    }

    pub fn remove(&self, id: &str) -> Option<LoadState> {
        self.states
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
    }

    /// All entries, sorted by id.
    pub fn snapshot(&self) -> Vec<(String, LoadState)> {
        let map = self.states.read().unwrap_or_else(|e| e.into_inner());
        let mut entries: Vec<(String, LoadState)> =
            map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
