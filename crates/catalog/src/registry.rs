//! [`SourceRegistry`]: the catalog, enablement set, load-state tracker and
//! reconcile hook behind one handle.
//!
//! Mutators take `&mut self` and are meant to be driven from a single event
//! loop. Fetch tasks running elsewhere report progress through the shared
//! tracker returned by [`SourceRegistry::load_states`].

mod report;

pub use report::SourceStatus;

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use satreg_core::config::DEFAULT_SOURCE_ID;
use satreg_core::{IdGenerator, KvStore, UuidGenerator};
use tracing::{debug, info};

use crate::aggregate::{merge, Merged};
use crate::builtin::{BuiltinDefinition, BUILTIN_SOURCES};
use crate::cache::SourceCache;
use crate::catalog::SourceCatalog;
use crate::enablement::{EnablementSet, LoadOrigin};
use crate::load_state::{LoadState, LoadStateTracker, LoadStatus};
use crate::source::SourceDescriptor;
use crate::trigger::{ReconcileEvent, ReconcileReason, ReconcileTrigger};

/// Multi-source registry.
pub struct SourceRegistry {
    store: Arc<dyn KvStore>,
    ids: Arc<dyn IdGenerator>,
    catalog: SourceCatalog,
    enabled: EnablementSet,
    load_states: Arc<LoadStateTracker>,
    trigger: ReconcileTrigger,
}

/// Builder for [`SourceRegistry`].
pub struct RegistryBuilder {
    store: Arc<dyn KvStore>,
    definitions: Vec<BuiltinDefinition>,
    ids: Arc<dyn IdGenerator>,
    default_source: String,
}

impl RegistryBuilder {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            definitions: BUILTIN_SOURCES.to_vec(),
            ids: Arc::new(UuidGenerator),
            default_source: DEFAULT_SOURCE_ID.to_string(),
        }
    }

    /// Replace the stock built-in definitions.
    pub fn definitions(mut self, definitions: &[BuiltinDefinition]) -> Self {
        self.definitions = definitions.to_vec();
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Source enabled on a fresh install.
    pub fn default_source(mut self, id: impl Into<String>) -> Self {
        self.default_source = id.into();
        self
    }

    /// Load catalog and enablement state from the store.
    pub fn build(self) -> SourceRegistry {
        let catalog = SourceCatalog::load_with(self.store.clone(), &self.definitions);
        let enabled = EnablementSet::load(self.store.clone(), &self.default_source);

        info!(
            sources = catalog.len(),
            enabled = enabled.len(),
            origin = ?enabled.origin(),
            "Source registry ready"
        );

        SourceRegistry {
            store: self.store,
            ids: self.ids,
            catalog,
            enabled,
            load_states: Arc::new(LoadStateTracker::new()),
            trigger: ReconcileTrigger::new(),
        }
    }
}

impl SourceRegistry {
    /// Open a registry with stock built-ins, random ids and the default
    /// source.
    pub fn open(store: Arc<dyn KvStore>) -> Self {
        RegistryBuilder::new(store).build()
    }

    pub fn builder(store: Arc<dyn KvStore>) -> RegistryBuilder {
        RegistryBuilder::new(store)
    }

    // ── Catalog ─────────────────────────────────────────────────

    /// All sources in catalog order.
    pub fn descriptors(&self) -> &[SourceDescriptor] {
        self.catalog.descriptors()
    }

    pub fn descriptor(&self, id: &str) -> Option<&SourceDescriptor> {
        self.catalog.get(id)
    }

    /// Add a source fetched from `url`. The new source is enabled.
    pub fn add_url_source(&mut self, name: &str, url: &str) -> String {
        let id = self.catalog.allocate_id(self.ids.as_ref());
        self.catalog.add_url(id.clone(), name, url);
        self.enabled.insert(&id);
        info!(id = %id, name, url, "Added URL source");
        self.reconcile(ReconcileReason::Added, &id);
        id
    }

    /// Add a source backed by pasted text. The new source is enabled.
    ///
    /// If the store cannot hold the text the source is still added and its
    /// text reads back empty.
    pub fn add_text_source(&mut self, name: &str, raw_text: &str) -> String {
        let id = self.catalog.allocate_id(self.ids.as_ref());
        self.catalog.add_text(id.clone(), name, raw_text);
        self.enabled.insert(&id);
        info!(id = %id, name, bytes = raw_text.len(), "Added text source");
        self.reconcile(ReconcileReason::Added, &id);
        id
    }

    /// Remove a user-added source with its payload, cache, enablement and
    /// load state. Built-in and unknown ids are ignored (returns `false`).
    pub fn remove_custom_source(&mut self, id: &str) -> bool {
        let Some(removed) = self.catalog.remove_custom(id) else {
            debug!(id, "remove ignored: not a custom source");
            return false;
        };
        self.enabled.remove(id);
        self.load_states.remove(id);
        info!(id, name = %removed.name, "Removed custom source");
        self.reconcile(ReconcileReason::Removed, id);
        true
    }

    /// Rename a user-added source. Built-in and unknown ids are ignored
    /// (returns `false`). Does not trigger reconciliation.
    pub fn rename_custom_source(&mut self, id: &str, new_name: &str) -> bool {
        let renamed = self.catalog.rename_custom(id, new_name);
        if renamed {
            info!(id, name = new_name, "Renamed custom source");
        } else {
            debug!(id, "rename ignored: not a custom source");
        }
        renamed
    }

    /// Stored text of a PASTED_TEXT source; empty if absent.
    pub fn get_stored_text(&self, id: &str) -> String {
        self.catalog.stored_text(id)
    }

    // ── Enablement ──────────────────────────────────────────────

    /// Flip whether `id` contributes to the merged view. Returns the new
    /// membership. Ids not in the catalog may be toggled too.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.catalog.contains(id) {
            debug!(id, "toggling id with no catalog entry");
        }
        let enabled = self.enabled.toggle(id);
        info!(id, enabled, "Toggled source");
        self.reconcile(ReconcileReason::Toggled, id);
        enabled
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.contains(id)
    }

    /// Enabled ids, sorted. May include ids with no catalog entry.
    pub fn enabled_ids(&self) -> Vec<String> {
        self.enabled.ids().map(str::to_string).collect()
    }

    /// Descriptors of enabled sources, in catalog order.
    pub fn enabled_descriptors(&self) -> Vec<&SourceDescriptor> {
        self.catalog
            .descriptors()
            .iter()
            .filter(|s| self.enabled.contains(&s.id))
            .collect()
    }

    /// How the enabled set was obtained at startup.
    pub fn enablement_origin(&self) -> &LoadOrigin {
        self.enabled.origin()
    }

    // ── Load state ──────────────────────────────────────────────

    /// Record the state reported by the fetch pipeline for `id`.
    pub fn set_load_state(&self, id: &str, state: LoadState) {
        self.load_states.set(id, state);
    }

    /// Last reported state for `id`, `Idle` if none.
    pub fn load_state(&self, id: &str) -> LoadState {
        self.load_states.get_or_idle(id)
    }

    /// Shared tracker for fetch tasks running off the event loop.
    pub fn load_states(&self) -> Arc<LoadStateTracker> {
        self.load_states.clone()
    }

    pub fn cache(&self) -> SourceCache {
        SourceCache::new(self.store.clone())
    }

    // ── Reconciliation ──────────────────────────────────────────

    /// Install the hook run after every toggle, add and remove.
    ///
    /// The hook receives the enabled descriptors in the event and must not
    /// panic.
    pub fn set_reconcile_hook<F>(&mut self, hook: F)
    where
        F: Fn(&ReconcileEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.trigger.set(hook);
    }

    pub fn clear_reconcile_hook(&mut self) {
        self.trigger.clear();
    }

    fn reconcile(&self, reason: ReconcileReason, source_id: &str) {
        if !self.trigger.is_set() {
            debug!(?reason, source_id, "no reconcile hook installed");
            return;
        }
        let event = ReconcileEvent {
            reason,
            source_id: source_id.to_string(),
            enabled: self.enabled_descriptors().into_iter().cloned().collect(),
        };
        self.trigger.fire(&event);
    }

    /// Merge the objects of enabled, loaded sources.
    ///
    /// `contributions` maps source id to that source's parsed objects.
    /// Sources that are disabled, not `Loaded`, or absent from the map
    /// contribute nothing. Sources are visited in catalog order.
    pub fn aggregate<T, K, F>(&self, contributions: &HashMap<String, Vec<T>>, key_fn: F) -> Merged<T>
    where
        T: Clone,
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        let lists = self
            .enabled_descriptors()
            .into_iter()
            .filter(|s| self.load_states.get_or_idle(&s.id).status == LoadStatus::Loaded)
            .filter_map(|s| contributions.get(&s.id))
            .map(Vec::as_slice);
        merge(lists, key_fn)
    }

    /// One row per catalog source, for display.
    pub fn status_report(&self) -> Vec<SourceStatus> {
        self.catalog
            .descriptors()
            .iter()
            .map(|s| SourceStatus {
                descriptor: s.clone(),
                enabled: self.enabled.contains(&s.id),
                load_state: self.load_states.get_or_idle(&s.id),
            })
            .collect()
    }
}
