//! Dirty-state detection — is the live filter ahead of its baseline?
//!
//! The baseline is a `{order, values}` copy taken whenever a preset is
//! loaded or saved, replaced wholesale each time and cleared for a new,
//! unsaved filter. Comparison is structural deep equality, order-sensitive
//! for `order`. Pure predicates; the UI polls these, nothing pushes.

use std::collections::BTreeMap;

use crate::filter_set::FilterSet;
use crate::types::FieldValue;

/// The snapshot a live filter is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub order: Vec<String>,
    pub values: BTreeMap<String, FieldValue>,
}

impl Baseline {
    /// Capture the current live state as the new baseline.
    pub fn capture(set: &FilterSet) -> Self {
        let (order, values) = set.snapshot();
        Self { order, values }
    }
}

/// `false` with no baseline (a new filter is not "modified", it is
/// unsaved); otherwise any difference in order or values counts.
pub fn is_modified(set: &FilterSet, baseline: Option<&Baseline>) -> bool {
    match baseline {
        None => false,
        Some(baseline) => {
            let (order, values) = set.snapshot();
            order != baseline.order || values != baseline.values
        }
    }
}

/// Whether the save affordance should be shown: there is something to
/// save (non-empty order) and it is either modified or never saved.
pub fn show_save_control(set: &FilterSet, baseline: Option<&Baseline>) -> bool {
    !set.is_empty() && (baseline.is_none() || is_modified(set, baseline))
}
