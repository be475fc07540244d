//! The filter session — live set, preset store, and baseline in one hub.
//!
//! Both surfaces go through this: the panel mutates the set directly via
//! [`FilterSession::set_mut`], the assistant synchronizer applies its
//! directives through the same operations, and the preset flows
//! (load / save / delete / new-filter) keep the baseline and loaded-name
//! bookkeeping consistent so dirty detection never drifts.

use crate::dirty::{self, Baseline};
use crate::filter_set::FilterSet;
use crate::preset::{PresetError, PresetStore, SaveOutcome};
use crate::storage::StoragePort;
use crate::types::SearchQuery;

pub struct FilterSession {
    set: FilterSet,
    store: PresetStore,
    baseline: Option<Baseline>,
    loaded: Option<String>,
}

impl FilterSession {
    /// Start a session with an empty "New Filter" state over the given
    /// storage port (presets load eagerly, seeding on first run).
    pub fn open(port: Box<dyn StoragePort>) -> Self {
        Self {
            set: FilterSet::new(),
            store: PresetStore::open(port),
            baseline: None,
            loaded: None,
        }
    }

    // -- the shared filter set ----------------------------------------------

    pub fn set(&self) -> &FilterSet {
        &self.set
    }

    /// The single mutation path. Panel edits and assistant directives
    /// both land here; there is no assistant-only side door.
    pub fn set_mut(&mut self) -> &mut FilterSet {
        &mut self.set
    }

    // -- presets ------------------------------------------------------------

    pub fn store(&self) -> &PresetStore {
        &self.store
    }

    /// The name of the currently loaded preset, if any.
    pub fn loaded_name(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    /// Load a preset into the live set and re-baseline against it.
    /// Returns `false` (state untouched) when no such preset exists.
    pub fn load_preset(&mut self, name: &str) -> bool {
        let Some((order, values)) = self.store.load(name) else {
            return false;
        };
        self.set = FilterSet::from_snapshot(order, values);
        self.baseline = Some(Baseline::capture(&self.set));
        self.loaded = Some(name.to_string());
        true
    }

    /// Save the live set under `name` (create / update / rename per the
    /// store's loaded-name-aware semantics). On success the saved state
    /// becomes the new baseline and `name` the loaded preset.
    pub fn save_preset(&mut self, name: &str) -> Result<SaveOutcome, PresetError> {
        let (order, values) = self.set.snapshot();
        let outcome = self
            .store
            .save(self.loaded.as_deref(), name, order, values)?;
        self.loaded = Some(name.trim().to_string());
        self.baseline = Some(Baseline::capture(&self.set));
        Ok(outcome)
    }

    /// Delete a preset. Deleting the currently loaded one also resets
    /// the live set and clears the baseline (the save affordance hides).
    pub fn delete_preset(&mut self, name: &str) -> Result<bool, PresetError> {
        let deleted = self.store.delete(name)?;
        if deleted && self.loaded.as_deref() == Some(name) {
            self.set.reset();
            self.baseline = None;
            self.loaded = None;
        }
        Ok(deleted)
    }

    /// Explicitly start over: empty set, no baseline, nothing loaded.
    pub fn new_filter(&mut self) {
        self.set.reset();
        self.baseline = None;
        self.loaded = None;
    }

    // -- dirty state --------------------------------------------------------

    pub fn is_modified(&self) -> bool {
        dirty::is_modified(&self.set, self.baseline.as_ref())
    }

    pub fn show_save_control(&self) -> bool {
        dirty::show_save_control(&self.set, self.baseline.as_ref())
    }

    // -- handoff ------------------------------------------------------------

    /// Finalize the current filter for the external results view.
    pub fn search(&self) -> SearchQuery {
        self.set.to_query()
    }
}
