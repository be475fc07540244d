//! Named filter presets — durable `{name, order, values}` snapshots.
//!
//! The whole collection is one durable record (`presets` key) on the
//! injected storage port. Loaded eagerly on open; a missing or malformed
//! record seeds the documented starter presets exactly once. Save is
//! loaded-name aware: create, overwrite-in-place, or rename-and-update,
//! with duplicate-name collisions rejected before any mutation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{catalog, TAGS_FIELD};
use crate::storage::{StorageError, StoragePort};
use crate::types::FieldValue;

/// Durable record key for the preset collection.
pub const PRESETS_KEY: &str = "presets";

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum PresetError {
    /// Preset names must be non-empty.
    EmptyName,
    /// The requested name belongs to a different existing preset. The
    /// triggering save performed no mutation.
    DuplicateName(String),
    Storage(StorageError),
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "preset name must not be empty"),
            Self::DuplicateName(name) => {
                write!(f, "a preset named '{}' already exists", name)
            }
            Self::Storage(err) => write!(f, "storage: {err}"),
        }
    }
}

impl std::error::Error for PresetError {}

impl From<StorageError> for PresetError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

/// What a successful save did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new preset was created.
    Saved,
    /// The loaded preset was overwritten in place.
    Updated,
    /// The loaded preset was replaced under a new name.
    Renamed,
}

impl SaveOutcome {
    /// The user-facing confirmation word.
    pub fn message(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Updated => "updated",
            Self::Renamed => "renamed",
        }
    }
}

// ---------------------------------------------------------------------------
// Preset
// ---------------------------------------------------------------------------

/// One named filter snapshot. Durable schema (JSON): a `Vec<Preset>`
/// under the `presets` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub order: Vec<String>,
    pub values: BTreeMap<String, FieldValue>,
}

// ---------------------------------------------------------------------------
// PresetStore
// ---------------------------------------------------------------------------

pub struct PresetStore {
    port: Box<dyn StoragePort>,
    presets: Vec<Preset>,
}

impl fmt::Debug for PresetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresetStore")
            .field("presets", &self.presets)
            .finish()
    }
}

impl PresetStore {
    /// Open the store, eagerly loading the durable record. Absent or
    /// malformed data falls back to the seeded starter presets (which
    /// are persisted, so seeding happens exactly once).
    pub fn open(port: Box<dyn StoragePort>) -> Self {
        let mut store = Self {
            port,
            presets: Vec::new(),
        };

        let record = match store.port.read(PRESETS_KEY) {
            Ok(record) => record,
            Err(err) => {
                eprintln!("WARN: failed to read presets record ({}), reseeding", err);
                None
            }
        };

        match record {
            Some(text) => match serde_json::from_str::<Vec<Preset>>(&text) {
                Ok(presets) => store.presets = presets,
                Err(err) => {
                    eprintln!("WARN: malformed presets record ({}), reseeding", err);
                    store.seed();
                }
            },
            None => store.seed(),
        }

        store
    }

    fn seed(&mut self) {
        self.presets = default_presets();
        if let Err(err) = self.persist() {
            eprintln!("WARN: failed to persist seeded presets ({})", err);
        }
    }

    fn persist(&mut self) -> Result<(), PresetError> {
        let text = serde_json::to_string_pretty(&self.presets)
            .map_err(|err| StorageError::Io(err.into()))?;
        self.port.write(PRESETS_KEY, &text)?;
        Ok(())
    }

    // -- read side ----------------------------------------------------------

    /// All presets; order is stable across calls within a session.
    pub fn list(&self) -> &[Preset] {
        &self.presets
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.presets.iter().position(|p| p.name == name)
    }

    /// A defensive snapshot of a preset: every id in `order` gets a value
    /// (missing keys become the kind's empty value), orphan values are
    /// dropped, and duplicate order entries collapse to the first. A
    /// partially-specified saved preset never produces missing reads
    /// downstream.
    #[allow(clippy::type_complexity)]
    pub fn load(&self, name: &str) -> Option<(Vec<String>, BTreeMap<String, FieldValue>)> {
        let preset = self.get(name)?;
        let mut order = Vec::with_capacity(preset.order.len());
        let mut values = BTreeMap::new();
        for id in &preset.order {
            if order.iter().any(|seen| seen == id) {
                continue;
            }
            let value = preset.values.get(id).cloned().unwrap_or_else(|| {
                let kind = catalog()
                    .kind_of(id)
                    .unwrap_or(crate::types::FieldKind::Text);
                FieldValue::empty_for(kind)
            });
            order.push(id.clone());
            values.insert(id.clone(), value);
        }
        Some((order, values))
    }

    // -- mutations ----------------------------------------------------------

    /// Save a snapshot under `name`, aware of which preset (if any) is
    /// currently loaded:
    ///
    /// - no collision, nothing loaded under another name → create;
    /// - `name` equals the loaded preset's name → overwrite in place;
    /// - `name` differs from the loaded name and is free → the loaded
    ///   entry is replaced under the new name (rename-and-update);
    /// - `name` belongs to a *different* existing preset → rejected, no
    ///   mutation.
    pub fn save(
        &mut self,
        loaded: Option<&str>,
        name: &str,
        order: Vec<String>,
        values: BTreeMap<String, FieldValue>,
    ) -> Result<SaveOutcome, PresetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PresetError::EmptyName);
        }

        let loaded_at = loaded.and_then(|loaded| self.position(loaded));
        let existing_at = self.position(name);

        let outcome = match (loaded_at, existing_at) {
            // Saving the loaded preset under its own name.
            (Some(i), Some(j)) if i == j => {
                self.presets[i].order = order;
                self.presets[i].values = values;
                SaveOutcome::Updated
            }
            // Renaming onto a different existing preset: rejected whole.
            (_, Some(_)) => return Err(PresetError::DuplicateName(name.to_string())),
            // Renaming the loaded preset to a free name.
            (Some(i), None) => {
                self.presets[i] = Preset {
                    name: name.to_string(),
                    order,
                    values,
                };
                SaveOutcome::Renamed
            }
            // Fresh save.
            (None, None) => {
                self.presets.push(Preset {
                    name: name.to_string(),
                    order,
                    values,
                });
                SaveOutcome::Saved
            }
        };

        self.persist()?;
        Ok(outcome)
    }

    /// Remove a preset. Returns `false` when no preset had that name.
    /// (The caller handles the loaded-preset reset side effect.)
    pub fn delete(&mut self, name: &str) -> Result<bool, PresetError> {
        let Some(index) = self.position(name) else {
            return Ok(false);
        };
        self.presets.remove(index);
        self.persist()?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// The fixed starter presets written on first-ever initialization.
pub fn default_presets() -> Vec<Preset> {
    fn tagged(name: &str, tag: &str) -> Preset {
        Preset {
            name: name.to_string(),
            order: vec![TAGS_FIELD.to_string()],
            values: BTreeMap::from([(
                TAGS_FIELD.to_string(),
                FieldValue::Tags(tag.to_string()),
            )]),
        }
    }

    vec![
        tagged("Chromatography Runs", "Chromatography"),
        tagged("Proteomics Runs", "Proteomics"),
        Preset {
            name: "Recent Uploads".to_string(),
            order: vec!["file_name".to_string(), "created_between".to_string()],
            values: BTreeMap::from([
                (
                    "file_name".to_string(),
                    FieldValue::Text(String::new()),
                ),
                (
                    "created_between".to_string(),
                    FieldValue::empty_for(crate::types::FieldKind::DateRange),
                ),
            ]),
        },
    ]
}
