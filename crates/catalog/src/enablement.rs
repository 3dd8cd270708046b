//! The set of source ids currently contributing to the merged view.

use std::collections::BTreeSet;
use std::sync::Arc;

use satreg_core::store::{get_json, set_json};
use satreg_core::KvStore;
use tracing::{info, warn};

use crate::builtin::{builtin_id, CUSTOM_GROUP, NONE_GROUP};
use crate::keys;

/// Where the set came from on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    /// A previously saved set was adopted verbatim.
    Stored,
    /// A legacy single-group selection was converted.
    Migrated { group: String },
    /// Nothing usable was stored; the default source was enabled.
    Default,
}

/// Enabled source ids, persisted as a JSON array under
/// [`keys::ENABLED_SOURCES`].
///
/// Ids need not reference a catalog entry. Unknown ids are kept and simply
/// match nothing.
pub struct EnablementSet {
    store: Arc<dyn KvStore>,
    ids: BTreeSet<String>,
    origin: LoadOrigin,
}

impl EnablementSet {
    /// Load the saved set, migrating the legacy single-group key if needed.
    ///
    /// Order of precedence:
    /// 1. a parseable saved set is adopted as-is;
    /// 2. a concrete legacy group `g` becomes `{"celestrak:g"}`;
    /// 3. otherwise `{default_id}`.
    ///
    /// Cases 2 and 3 persist the new set. The legacy key is deleted whenever
    /// it is found, so migration happens at most once.
    pub fn load(store: Arc<dyn KvStore>, default_id: &str) -> Self {
        let legacy = store.get(keys::LEGACY_GROUP);

        if let Some(ids) = get_json::<Vec<String>>(store.as_ref(), keys::ENABLED_SOURCES) {
            if legacy.is_some() {
                store.remove(keys::LEGACY_GROUP);
            }
            info!(count = ids.len(), "Loaded enabled sources");
            return Self {
                store,
                ids: ids.into_iter().collect(),
                origin: LoadOrigin::Stored,
            };
        }

        let migrated = legacy.as_deref().and_then(legacy_group);
        if legacy.is_some() {
            store.remove(keys::LEGACY_GROUP);
        }

        let (ids, origin) = match migrated {
            Some(group) => {
                info!(group = %group, "Migrated legacy group selection to enabled sources");
                (
                    BTreeSet::from([builtin_id(&group)]),
                    LoadOrigin::Migrated { group },
                )
            }
            None => {
                info!(id = %default_id, "No saved sources, enabling default");
                (BTreeSet::from([default_id.to_string()]), LoadOrigin::Default)
            }
        };

        let set = Self { store, ids, origin };
        set.persist();
        set
    }

    pub fn origin(&self) -> &LoadOrigin {
        &self.origin
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Enabled ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip membership of `id` and persist. Returns the new membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        let enabled = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };
        self.persist();
        enabled
    }

    /// Enable `id` and persist. Returns `false` if it was already enabled.
    pub fn insert(&mut self, id: &str) -> bool {
        let inserted = self.ids.insert(id.to_string());
        if inserted {
            self.persist();
        }
        inserted
    }

    /// Disable `id` and persist. Returns `false` if it was not enabled.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.ids.remove(id);
        if removed {
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        let ids: Vec<&str> = self.ids().collect();
        if let Err(e) = set_json(self.store.as_ref(), keys::ENABLED_SOURCES, &ids) {
            warn!(error = %e, "failed to persist enabled sources");
        }
    }
}

/// Extract a concrete group from a legacy selection value.
///
/// The value may have been written raw (`visual`) or JSON-quoted
/// (`"visual"`). The "none" and "custom" sentinels carry no group.
fn legacy_group(raw: &str) -> Option<String> {
    let group = raw.trim().trim_matches('"').trim();
    if group.is_empty() || group == NONE_GROUP || group == CUSTOM_GROUP {
        return None;
    }
    Some(group.to_string())
}
