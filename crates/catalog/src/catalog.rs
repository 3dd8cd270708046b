use std::collections::HashSet;
use std::sync::Arc;

use satreg_core::store::{get_json, set_json};
use satreg_core::{IdGenerator, KvStore};
use tracing::{debug, info, warn};

use crate::builtin::{BuiltinDefinition, BUILTIN_SOURCES, CUSTOM_PREFIX, NONE_GROUP};
use crate::keys;
use crate::source::{CustomRecord, SourceDescriptor, SourceKind};

/// All known sources: built-ins first (static order), then custom sources in
/// the order they were added.
///
/// Only the custom subset is persisted (under [`keys::CUSTOM_SOURCES`]);
/// built-ins are rebuilt from static definitions on every load.
pub struct SourceCatalog {
    store: Arc<dyn KvStore>,
    sources: Vec<SourceDescriptor>,
}

impl SourceCatalog {
    /// Build the catalog from the stock built-in definitions plus whatever
    /// custom sources the store holds.
    pub fn load(store: Arc<dyn KvStore>) -> Self {
        Self::load_with(store, BUILTIN_SOURCES)
    }

    /// Build the catalog from explicit built-in definitions.
    ///
    /// Missing or malformed custom data yields no custom sources.
    pub fn load_with(store: Arc<dyn KvStore>, definitions: &[BuiltinDefinition]) -> Self {
        let mut sources: Vec<SourceDescriptor> = Vec::with_capacity(definitions.len());
        let mut seen = HashSet::new();

        for def in definitions.iter().filter(|d| d.group != NONE_GROUP) {
            let descriptor = SourceDescriptor::from_builtin(def);
            if seen.insert(descriptor.id.clone()) {
                sources.push(descriptor);
            }
        }
        let builtin_count = sources.len();

        let records: Vec<CustomRecord> =
            get_json(store.as_ref(), keys::CUSTOM_SOURCES).unwrap_or_default();
        for record in records {
            if !record.id.starts_with(CUSTOM_PREFIX) {
                warn!(id = %record.id, "skipping stored custom source outside custom namespace");
                continue;
            }
            if !seen.insert(record.id.clone()) {
                warn!(id = %record.id, "skipping duplicate stored custom source");
                continue;
            }
            sources.push(SourceDescriptor::from_record(record));
        }

        info!(
            "Source catalog loaded: {} built-in, {} custom",
            builtin_count,
            sources.len() - builtin_count
        );

        Self { store, sources }
    }

    /// All descriptors in catalog order.
    pub fn descriptors(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    pub fn get(&self, id: &str) -> Option<&SourceDescriptor> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// User-added sources, in insertion order.
    pub fn custom(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.sources.iter().filter(|s| !s.builtin)
    }

    /// Allocate a `custom:` id not used by any catalog entry.
    pub fn allocate_id(&self, ids: &dyn IdGenerator) -> String {
        loop {
            let id = format!("{CUSTOM_PREFIX}{}", ids.next_id());
            if !self.contains(&id) {
                return id;
            }
            debug!(id = %id, "generated id already in use, retrying");
        }
    }

    /// Append a REMOTE_URL source under a pre-allocated id.
    pub fn add_url(&mut self, id: String, name: &str, url: &str) {
        self.sources.push(SourceDescriptor {
            id,
            name: name.to_string(),
            kind: SourceKind::RemoteUrl,
            locator: Some(url.to_string()),
            builtin: false,
        });
        self.persist();
    }

    /// Append a PASTED_TEXT source under a pre-allocated id, storing the raw
    /// text verbatim.
    ///
    /// If the store rejects the text the descriptor is still added; reading
    /// its text later yields an empty string.
    /// The record is persisted before the text, so a payload never outlives
    /// its descriptor across a restart.
    pub fn add_text(&mut self, id: String, name: &str, raw_text: &str) {
        let text_key = keys::stored_text(&id);
        self.sources.push(SourceDescriptor {
            id,
            name: name.to_string(),
            kind: SourceKind::PastedText,
            locator: None,
            builtin: false,
        });
        self.persist();
        if let Err(e) = self.store.set(&text_key, raw_text) {
            warn!(key = %text_key, error = %e, "failed to store pasted text; source will read as empty");
        }
    }

    /// Remove a custom source and purge every key holding its data.
    ///
    /// Returns the removed descriptor, or `None` if `id` is built-in or
    /// unknown. For an unknown `custom:` id, leftover per-source keys whose
    /// record was never persisted are still purged; the catalog itself does
    /// not change.
    pub fn remove_custom(&mut self, id: &str) -> Option<SourceDescriptor> {
        let Some(pos) = self.sources.iter().position(|s| s.id == id && !s.builtin) else {
            if id.starts_with(CUSTOM_PREFIX) && !self.contains(id) {
                self.purge_keys(id);
            }
            return None;
        };
        let removed = self.sources.remove(pos);
        self.purge_keys(id);
        self.persist();
        Some(removed)
    }

    /// Rename a custom source. Returns `false` if `id` is built-in or unknown.
    pub fn rename_custom(&mut self, id: &str, new_name: &str) -> bool {
        let Some(source) = self.sources.iter_mut().find(|s| s.id == id && !s.builtin) else {
            return false;
        };
        source.name = new_name.to_string();
        self.persist();
        true
    }

    /// Stored payload of a PASTED_TEXT source, or empty if absent/unreadable.
    pub fn stored_text(&self, id: &str) -> String {
        self.store.get(&keys::stored_text(id)).unwrap_or_default()
    }

    fn purge_keys(&self, id: &str) {
        for key in keys::per_source_keys(id) {
            self.store.remove(&key);
        }
    }

    /// Write the custom subset. Failures are logged, never returned.
    fn persist(&self) {
        let records: Vec<CustomRecord> = self.custom().map(SourceDescriptor::to_record).collect();
        if let Err(e) = set_json(self.store.as_ref(), keys::CUSTOM_SOURCES, &records) {
            warn!(error = %e, "failed to persist custom sources");
        }
    }
}
