//! Assistant↔panel synchronizer — one mutation path, polled observation.
//!
//! Bridges interpreter directives (and suggestion-pill clicks, which are
//! the same thing with one field) into filter-set mutations, and watches
//! the filter set for user-driven edits by sampling its active-field
//! list. Polling is level-triggered: the tick is an explicit call with
//! no real timer behind it, so tests single-step it deterministically
//! and closing the assistant stops observation outright.
//!
//! Per open session: a directive batch or pill click mutates then
//! returns to idle; orthogonally, a poll tick that finds a previously
//! seen field gone emits exactly one removal notice re-offering the
//! now-available fields. Sampling an unchanged set never repeats the
//! notice, and reopening reseeds the sample from live state so fields
//! that disappeared while the assistant was closed stay quiet.

use crate::catalog::catalog;
use crate::filter_set::FilterSet;
use crate::nl::{self, DirectiveBatch};
use crate::session::FilterSession;
use crate::transcript::{Message, Role, Transcript};

/// The follow-up pills offered after a successful mutation.
const FOLLOW_UPS: [&str; 2] = ["Search", "Save filter"];

pub struct Synchronizer {
    transcript: Transcript,
    /// Active-field sample from the previous poll tick.
    last_seen: Vec<String>,
    open: bool,
    detected_mode: Option<String>,
}

impl Synchronizer {
    /// Create a closed synchronizer over a (possibly pre-existing)
    /// transcript. Call [`open`](Self::open) to start observing.
    pub fn new(transcript: Transcript) -> Self {
        Self {
            transcript,
            last_seen: Vec::new(),
            open: false,
            detected_mode: None,
        }
    }

    // -- lifecycle ----------------------------------------------------------

    /// Open the assistant surface. The poll sample is seeded from the
    /// current live state so reopening never produces spurious removal
    /// notices for fields that were already gone.
    pub fn open(&mut self, set: &FilterSet) {
        self.last_seen = set.active_fields().to_vec();
        self.open = true;
    }

    /// Close the assistant surface: observation stops, the transcript is
    /// retained (and already persisted) for redisplay on reopen.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    // -- read side ----------------------------------------------------------

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The most recently detected results-view mode, if any.
    pub fn detected_mode(&self) -> Option<&str> {
        self.detected_mode.as_deref()
    }

    // -- the mutation path --------------------------------------------------

    /// Process one user utterance: log it, interpret it, apply any
    /// directives through the shared mutation path, and reply. Returns
    /// the assistant's message.
    pub fn handle_user_text(&mut self, text: &str, session: &mut FilterSession) -> &Message {
        self.transcript
            .push(Role::User, text.to_string(), Vec::new());
        let batch = nl::interpret(text);
        self.apply(batch, session)
    }

    /// A suggestion-pill click for a field name (id or display label).
    /// Deliberately the same path as a one-field directive batch, so the
    /// two entry points cannot drift apart.
    pub fn suggestion_click(&mut self, field: &str, session: &mut FilterSession) -> &Message {
        let id = resolve_field(field);
        let acknowledgment = format!("Added {} to your filter.", catalog().label_of(&id));
        let batch = DirectiveBatch {
            fields_to_add: vec![id],
            values_to_set: Vec::new(),
            detected_mode: None,
            acknowledgment,
        };
        self.apply(batch, session)
    }

    fn apply(&mut self, batch: DirectiveBatch, session: &mut FilterSession) -> &Message {
        if batch.is_empty() {
            return self
                .transcript
                .push(Role::Assistant, batch.acknowledgment, Vec::new());
        }

        // Fields before values, so set_value never hits an inactive field.
        for id in &batch.fields_to_add {
            session.set_mut().add_field(id);
        }
        for (id, value) in batch.values_to_set {
            // Cannot fail: the field was added above and the interpreter
            // emits kind-correct values. Treated as a no-op if it ever does.
            let _ = session.set_mut().set_value(&id, value);
        }
        if batch.detected_mode.is_some() {
            self.detected_mode = batch.detected_mode;
        }

        // Keep the poll sample current so our own adds never read as
        // user-driven edits.
        self.last_seen = session.set().active_fields().to_vec();

        let suggestions = FOLLOW_UPS.iter().map(|s| s.to_string()).collect();
        self.transcript
            .push(Role::Assistant, batch.acknowledgment, suggestions)
    }

    // -- polled observation -------------------------------------------------

    /// One poll tick: sample the active-field list and diff it against
    /// the previous sample. A field present before and absent now (a
    /// direct panel removal) produces exactly one removal notice
    /// re-offering the now-available fields. Unchanged samples return
    /// `None` and never duplicate a notice.
    pub fn poll_tick(&mut self, set: &FilterSet) -> Option<&Message> {
        if !self.open {
            return None;
        }

        let current = set.active_fields().to_vec();
        let removed: Vec<&str> = self
            .last_seen
            .iter()
            .filter(|id| !current.iter().any(|c| c == *id))
            .map(String::as_str)
            .collect();

        if removed.is_empty() {
            self.last_seen = current;
            return None;
        }

        let removed_labels = removed
            .iter()
            .map(|id| catalog().label_of(id))
            .collect::<Vec<_>>()
            .join(", ");
        let available: Vec<String> = set
            .available_fields()
            .iter()
            .map(|f| f.label.clone())
            .collect();
        let text = format!(
            "I see you removed {}. Let me know if you want another field added back.",
            removed_labels
        );

        self.last_seen = current;
        Some(self.transcript.push(Role::Assistant, text, available))
    }
}

/// Resolve a suggestion string to a field id: exact id first, then
/// display label. Unknown names pass through (the filter set ignores
/// them as a no-op).
fn resolve_field(field: &str) -> String {
    if catalog().contains(field) {
        return field.to_string();
    }
    catalog()
        .iter()
        .find(|f| f.label.eq_ignore_ascii_case(field))
        .map(|f| f.id.clone())
        .unwrap_or_else(|| field.to_string())
}
