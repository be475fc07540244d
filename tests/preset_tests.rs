//! Preset store and session tests: round-trips, the four-way save
//! semantics, dirty-state tracking, seeding, and recovery from bad
//! durable data.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use sift::preset::{default_presets, Preset, PresetError, SaveOutcome, PRESETS_KEY};
use sift::session::FilterSession;
use sift::storage::{MemoryStorage, StorageError, StoragePort};
use sift::types::FieldValue;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Storage whose records outlive the session, to simulate restarts.
#[derive(Clone, Default)]
struct SharedStorage(Rc<RefCell<HashMap<String, String>>>);

impl SharedStorage {
    fn record(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.into(), value.into());
    }
}

impl StoragePort for SharedStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.0.borrow().get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().insert(key.into(), value.into());
        Ok(())
    }
}

fn fresh_session() -> FilterSession {
    FilterSession::open(Box::new(MemoryStorage::new()))
}

/// A session with a filter worth saving: file name + tags.
fn session_with_filter() -> FilterSession {
    let mut session = fresh_session();
    session.set_mut().add_field("file_name");
    session.set_mut().add_field("tags");
    session
        .set_mut()
        .set_value("tags", FieldValue::Tags("QC".into()))
        .unwrap();
    session
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[test]
fn first_run_seeds_default_presets() {
    let session = fresh_session();
    let names: Vec<_> = session.store().list().iter().map(|p| &p.name).collect();
    assert_eq!(names, ["Chromatography Runs", "Proteomics Runs", "Recent Uploads"]);
}

#[test]
fn seeding_happens_exactly_once() {
    let storage = SharedStorage::default();
    {
        let mut session = FilterSession::open(Box::new(storage.clone()));
        session.delete_preset("Recent Uploads").unwrap();
    }
    // "Restart": the deleted seed must not come back.
    let session = FilterSession::open(Box::new(storage));
    assert!(session.store().get("Recent Uploads").is_none());
    assert!(session.store().get("Proteomics Runs").is_some());
}

#[test]
fn malformed_presets_record_reseeds() {
    let storage = SharedStorage::default();
    storage.put(PRESETS_KEY, "this is not json");
    let session = FilterSession::open(Box::new(storage.clone()));
    assert_eq!(session.store().list(), default_presets().as_slice());
    // And the repaired record was written back.
    let repaired: Vec<Preset> =
        serde_json::from_str(&storage.record(PRESETS_KEY).unwrap()).unwrap();
    assert_eq!(repaired, default_presets());
}

// ---------------------------------------------------------------------------
// Save semantics
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_round_trips() {
    let storage = SharedStorage::default();
    let snapshot = {
        let mut session = FilterSession::open(Box::new(storage.clone()));
        session.set_mut().add_field("file_name");
        session
            .set_mut()
            .set_value("file_name", FieldValue::Text("2026_08_run".into()))
            .unwrap();
        assert_eq!(session.save_preset("My Runs").unwrap(), SaveOutcome::Saved);
        session.set().snapshot()
    };

    // Survives a restart.
    let mut session = FilterSession::open(Box::new(storage));
    assert!(session.load_preset("My Runs"));
    assert_eq!(session.set().snapshot(), snapshot);
    assert_eq!(session.loaded_name(), Some("My Runs"));
}

#[test]
fn resaving_the_loaded_preset_updates_in_place() {
    let mut session = session_with_filter();
    session.save_preset("A").unwrap();
    session
        .set_mut()
        .set_value("file_name", FieldValue::Text("changed".into()))
        .unwrap();
    assert_eq!(session.save_preset("A").unwrap(), SaveOutcome::Updated);

    let preset = session.store().get("A").unwrap();
    assert_eq!(
        preset.values.get("file_name"),
        Some(&FieldValue::Text("changed".into()))
    );
}

#[test]
fn saving_under_a_new_name_renames_the_loaded_preset() {
    let mut session = session_with_filter();
    session.save_preset("Old Name").unwrap();
    assert_eq!(session.save_preset("New Name").unwrap(), SaveOutcome::Renamed);
    assert!(session.store().get("Old Name").is_none());
    assert!(session.store().get("New Name").is_some());
    assert_eq!(session.loaded_name(), Some("New Name"));
}

#[test]
fn renaming_onto_another_preset_is_rejected_without_mutation() {
    let mut session = session_with_filter();
    session.save_preset("A").unwrap();
    session.new_filter();
    session.set_mut().add_field("instrument");
    session.save_preset("B").unwrap();

    session.load_preset("A");
    let before: Vec<Preset> = session.store().list().to_vec();

    let err = session.save_preset("B").unwrap_err();
    assert!(matches!(err, PresetError::DuplicateName(name) if name == "B"));
    assert_eq!(session.store().list(), before.as_slice(), "no partial rename");
    assert_eq!(session.loaded_name(), Some("A"));
}

#[test]
fn fresh_save_colliding_with_an_existing_preset_is_rejected() {
    let mut session = session_with_filter();
    session.save_preset("A").unwrap();
    session.new_filter();
    session.set_mut().add_field("tags");
    let err = session.save_preset("A").unwrap_err();
    assert!(matches!(err, PresetError::DuplicateName(_)));
}

#[test]
fn empty_names_are_rejected() {
    let mut session = session_with_filter();
    assert!(matches!(
        session.save_preset("   "),
        Err(PresetError::EmptyName)
    ));
}

// ---------------------------------------------------------------------------
// Defensive load
// ---------------------------------------------------------------------------

#[test]
fn loading_a_partially_specified_preset_defaults_missing_values() {
    let storage = SharedStorage::default();
    // Hand-crafted record: order mentions tags, values omit it.
    storage.put(
        PRESETS_KEY,
        r#"[{"name": "Sparse", "order": ["file_name", "tags"], "values": {
            "file_name": {"kind": "text", "value": "x"}}}]"#,
    );
    let mut session = FilterSession::open(Box::new(storage));
    assert!(session.load_preset("Sparse"));
    assert_eq!(
        session.set().value_of("tags"),
        Some(&FieldValue::Tags(String::new()))
    );
    // Defaulting does not count as a modification.
    assert!(!session.is_modified());
}

// ---------------------------------------------------------------------------
// Dirty-state lifecycle
// ---------------------------------------------------------------------------

#[test]
fn loaded_preset_is_clean_until_mutated() {
    let mut session = session_with_filter();
    session.save_preset("A").unwrap();
    assert!(!session.is_modified());
    assert!(!session.show_save_control());

    session
        .set_mut()
        .set_value("file_name", FieldValue::Text("dirty".into()))
        .unwrap();
    assert!(session.is_modified());
    assert!(session.show_save_control());

    session.save_preset("A").unwrap();
    assert!(!session.is_modified());
}

#[test]
fn every_mutation_kind_marks_modified() {
    let mutations: [fn(&mut FilterSession); 4] = [
        |s| s.set_mut().add_field("instrument"),
        |s| s.set_mut().remove_field("tags"),
        |s| s.set_mut().reorder("tags", "file_name"),
        |s| {
            s.set_mut()
                .set_value("tags", FieldValue::Tags("edited".into()))
                .unwrap()
        },
    ];
    for mutate in mutations {
        let mut session = session_with_filter();
        session.save_preset("A").unwrap();
        mutate(&mut session);
        assert!(session.is_modified());
    }
}

#[test]
fn unsaved_filter_shows_save_control_without_being_modified() {
    let mut session = fresh_session();
    assert!(!session.show_save_control(), "empty order hides save");
    session.set_mut().add_field("file_name");
    assert!(!session.is_modified(), "no baseline means not modified");
    assert!(session.show_save_control(), "new unsaved filter offers save");
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[test]
fn deleting_the_loaded_preset_resets_everything() {
    let mut session = session_with_filter();
    session.save_preset("A").unwrap();

    assert!(session.delete_preset("A").unwrap());
    assert!(session.set().is_empty());
    assert!(session.loaded_name().is_none());
    assert!(!session.is_modified());
    assert!(!session.show_save_control());
}

#[test]
fn deleting_another_preset_leaves_the_live_filter_alone() {
    let mut session = session_with_filter();
    session.save_preset("A").unwrap();
    assert!(session.delete_preset("Proteomics Runs").unwrap());
    assert_eq!(session.loaded_name(), Some("A"));
    assert!(!session.set().is_empty());
}

#[test]
fn deleting_a_missing_preset_reports_false() {
    let mut session = fresh_session();
    assert!(!session.delete_preset("Nope").unwrap());
}
