//! Synchronizer tests: one shared mutation path for both entry points,
//! single-notice polling idempotence, lifecycle reseeding, and
//! transcript persistence.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use sift::catalog::CREATED_BETWEEN;
use sift::session::FilterSession;
use sift::storage::{MemoryStorage, StorageError, StoragePort};
use sift::sync::Synchronizer;
use sift::transcript::{Role, Transcript, TRANSCRIPT_KEY};
use sift::types::FieldValue;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Storage whose records outlive the session, to simulate restarts.
#[derive(Clone, Default)]
struct SharedStorage(Rc<RefCell<HashMap<String, String>>>);

impl SharedStorage {
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

fn fresh() -> (FilterSession, Synchronizer) {
    let session = FilterSession::open(Box::new(MemoryStorage::new()));
    let mut sync = Synchronizer::new(Transcript::open(Box::new(MemoryStorage::new())));
    sync.open(session.set());
    (session, sync)
}

// ---------------------------------------------------------------------------
// Directive application
// ---------------------------------------------------------------------------

#[test]
fn free_text_mutates_through_the_shared_path() {
    let (mut session, mut sync) = fresh();
    let reply =
        sync.handle_user_text("chromatography data from last week", &mut session);

    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.suggestions, ["Search", "Save filter"]);

    // Fields were added before values, so the tag landed.
    assert_eq!(session.set().active_fields(), [CREATED_BETWEEN, "tags"]);
    assert_eq!(
        session.set().value_of("tags"),
        Some(&FieldValue::Tags("Chromatography".into()))
    );
    assert_eq!(sync.detected_mode(), Some("chromatography"));
}

#[test]
fn transcript_records_both_sides() {
    let (mut session, mut sync) = fresh();
    sync.handle_user_text("proteomics runs", &mut session);

    let messages = sync.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].text, "proteomics runs");
    assert_eq!(messages[1].role, Role::Assistant);
}

#[test]
fn unrecognized_text_gets_help_and_no_mutation() {
    let (mut session, mut sync) = fresh();
    let reply = sync.handle_user_text("asdkjasdj", &mut session);
    assert!(reply.suggestions.is_empty());
    assert!(session.set().is_empty());
}

#[test]
fn suggestion_click_is_the_same_path_as_a_directive() {
    let (mut session, mut sync) = fresh();

    // By display label, as the pill shows it.
    let reply = sync.suggestion_click("File Name", &mut session);
    assert!(reply.text.contains("File Name"));
    assert_eq!(session.set().active_fields(), ["file_name"]);
    assert_eq!(reply.suggestions, ["Search", "Save filter"]);

    // By id works too; unknown names are a silent no-op.
    sync.suggestion_click("instrument", &mut session);
    sync.suggestion_click("flux capacitor", &mut session);
    assert_eq!(session.set().active_fields(), ["file_name", "instrument"]);
}

// ---------------------------------------------------------------------------
// Polled observation
// ---------------------------------------------------------------------------

#[test]
fn removal_produces_exactly_one_notice() {
    let (mut session, mut sync) = fresh();
    session.set_mut().add_field("file_name");
    session.set_mut().add_field("tags");
    sync.open(session.set()); // reseed after direct setup

    session.set_mut().remove_field("tags");

    let before = sync.transcript().messages().len();
    let notice = sync.poll_tick(session.set()).cloned();
    let notice = notice.expect("first tick notices the removal");
    assert!(notice.text.contains("Tags"));
    assert!(
        notice.suggestions.iter().any(|s| s == "Tags"),
        "removed field is re-offered"
    );

    // Two more ticks with no further mutation: silence.
    assert!(sync.poll_tick(session.set()).is_none());
    assert!(sync.poll_tick(session.set()).is_none());
    assert_eq!(sync.transcript().messages().len(), before + 1);
}

#[test]
fn assistant_driven_adds_do_not_read_as_user_edits() {
    let (mut session, mut sync) = fresh();
    sync.handle_user_text("files created this week", &mut session);
    assert!(sync.poll_tick(session.set()).is_none());
}

#[test]
fn closed_assistant_never_polls() {
    let (mut session, mut sync) = fresh();
    session.set_mut().add_field("tags");
    sync.open(session.set());
    sync.close();

    session.set_mut().remove_field("tags");
    assert!(sync.poll_tick(session.set()).is_none());
}

#[test]
fn reopening_reseeds_the_poll_sample() {
    let (mut session, mut sync) = fresh();
    session.set_mut().add_field("tags");
    sync.open(session.set());
    sync.close();

    // Removed while the assistant was closed: old news on reopen.
    session.set_mut().remove_field("tags");
    sync.open(session.set());
    assert!(sync.poll_tick(session.set()).is_none());
}

#[test]
fn add_and_remove_between_ticks_is_net_silent() {
    let (mut session, mut sync) = fresh();
    sync.open(session.set());
    session.set_mut().add_field("operator");
    session.set_mut().remove_field("operator");
    // Only the net effect at sample time is observed.
    assert!(sync.poll_tick(session.set()).is_none());
}

// ---------------------------------------------------------------------------
// Transcript persistence
// ---------------------------------------------------------------------------

#[test]
fn transcript_survives_a_restart() {
    let storage = SharedStorage::default();
    {
        let mut session = FilterSession::open(Box::new(MemoryStorage::new()));
        let mut sync = Synchronizer::new(Transcript::open(Box::new(storage.clone())));
        sync.open(session.set());
        sync.handle_user_text("proteomics runs from last month", &mut session);
    }

    let transcript = Transcript::open(Box::new(storage));
    assert_eq!(transcript.messages().len(), 2);
    assert_eq!(
        transcript.messages()[0].text,
        "proteomics runs from last month"
    );
}

#[test]
fn new_messages_continue_the_id_sequence_after_restart() {
    let storage = SharedStorage::default();
    {
        let mut transcript = Transcript::open(Box::new(storage.clone()));
        transcript.push(Role::User, "first".into(), Vec::new());
    }
    let mut transcript = Transcript::open(Box::new(storage));
    let next_id = transcript.push(Role::User, "second".into(), Vec::new()).id;
    assert!(next_id > transcript.messages()[0].id);
}

#[test]
fn corrupt_transcript_resets_to_empty() {
    let storage = SharedStorage::default();
    storage.put(TRANSCRIPT_KEY, "{ definitely not a message list");
    let transcript = Transcript::open(Box::new(storage));
    assert!(transcript.messages().is_empty());
}
