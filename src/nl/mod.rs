//! NL directive interpreter — free text in, filter directives out.
//!
//! A deterministic, rule-based classifier (no ML): the same input always
//! yields the same [`DirectiveBatch`]. Pipeline:
//!
//! 1. **Normalization** — case fold, punctuation strip (`normalize`)
//! 2. **Temporal scan** — closed phrase table, longest match first
//!    (`temporal`); emits one date-shortcut add directive
//! 3. **Domain scan** — YAML vocabulary groups, first match wins
//!    (`vocab`); emits a tags-field add + set-value and the detected mode
//! 4. **Acknowledgment** — templated confirmation naming what was added,
//!    or a help-style fallback with zero directives
//!
//! The interpreter only produces directives; applying them to the filter
//! set is the synchronizer's job (`crate::sync`).

pub mod normalize;
pub mod temporal;
pub mod vocab;

use crate::catalog::TAGS_FIELD;
use crate::types::FieldValue;

// ---------------------------------------------------------------------------
// DirectiveBatch — the output of one interpreted utterance
// ---------------------------------------------------------------------------

/// Ephemeral result of interpreting one user utterance. Consumed
/// immediately by the synchronizer; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveBatch {
    /// Field ids to add, in order (fields always precede their values).
    pub fields_to_add: Vec<String>,
    /// Values to set after the adds, as `(field_id, value)` pairs.
    pub values_to_set: Vec<(String, FieldValue)>,
    /// Detected results-view mode, e.g. "chromatography".
    pub detected_mode: Option<String>,
    /// Human-readable confirmation (or the no-match help text).
    pub acknowledgment: String,
}

impl DirectiveBatch {
    /// `true` when nothing was recognized (help-style acknowledgment
    /// only).
    pub fn is_empty(&self) -> bool {
        self.fields_to_add.is_empty() && self.values_to_set.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Public API — the main entry point
// ---------------------------------------------------------------------------

/// Interpret free text into filter directives.
pub fn interpret(text: &str) -> DirectiveBatch {
    let normalized = normalize::normalize(text);

    let mut fields_to_add = Vec::new();
    let mut values_to_set = Vec::new();
    let mut detected_mode = None;
    let mut added_names: Vec<String> = Vec::new();

    // Temporal phrase: one date-shortcut add directive.
    if let Some(shortcut) = temporal::match_shortcut(&normalized) {
        fields_to_add.push(shortcut.field_id().to_string());
        added_names.push(shortcut.label().to_string());
    }

    // Domain group: tags field + canonical value + detected mode.
    let mut tag_name = None;
    if let Some(group) = vocab::vocab().match_group(&normalized) {
        fields_to_add.push(TAGS_FIELD.to_string());
        values_to_set.push((TAGS_FIELD.to_string(), FieldValue::Tags(group.tag.clone())));
        detected_mode = group.mode.clone();
        tag_name = Some(group.tag.clone());
    }

    let acknowledgment = build_acknowledgment(&added_names, tag_name.as_deref());

    DirectiveBatch {
        fields_to_add,
        values_to_set,
        detected_mode,
        acknowledgment,
    }
}

// ---------------------------------------------------------------------------
// Acknowledgment templates
// ---------------------------------------------------------------------------

fn build_acknowledgment(added: &[String], tag: Option<&str>) -> String {
    match (added.first(), tag) {
        (Some(label), Some(tag)) => {
            format!("Added {} and tagged it {}.", label, tag)
        }
        (Some(label), None) => format!("Added {} to your filter.", label),
        (None, Some(tag)) => format!("Tagged your filter {}.", tag),
        (None, None) => {
            let example = vocab::vocab()
                .examples
                .first()
                .map(String::as_str)
                .unwrap_or("files created this week");
            format!(
                "I couldn't find a filter in that. Try phrasing like \"{}\".",
                example
            )
        }
    }
}
