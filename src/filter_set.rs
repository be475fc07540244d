//! The live filter set — single source of truth for both surfaces.
//!
//! Owns the *ordered* list of active field ids plus a value bag keyed by
//! field id. Both the direct-edit panel and the assistant synchronizer
//! mutate it through the same operation set; there is no assistant-only
//! mutation path. Invariants:
//!
//! - `order` holds no duplicates;
//! - `order` and the value bag cover exactly the same ids (an active
//!   field always holds at least its kind's empty value, and removing a
//!   field clears its value);
//! - adding a date shortcut normalizes into `created_between` with a
//!   resolved range, so the panel never shows two representations of the
//!   same "created between" filter.
//!
//! Every mutation bumps `revision`, which is what the polling observers
//! compare against.

use std::collections::BTreeMap;
use std::fmt;

use time::Date;

use crate::catalog::{catalog, FieldDefinition, CREATED_BETWEEN};
use crate::date_range::{today_utc, DateShortcut};
use crate::types::{FieldValue, SearchQuery};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// `set_value` on a field that is not currently active. The caller
    /// must add the field first.
    FieldNotActive(String),
    /// The value's variant does not match the field's declared kind.
    KindMismatch { field: String, expected: String },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNotActive(id) => write!(f, "field '{}' is not active", id),
            Self::KindMismatch { field, expected } => {
                write!(f, "field '{}' expects a {} value", field, expected)
            }
        }
    }
}

impl std::error::Error for FilterError {}

// ---------------------------------------------------------------------------
// FilterSet
// ---------------------------------------------------------------------------

/// The live, mutable filter state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    order: Vec<String>,
    values: BTreeMap<String, FieldValue>,
    revision: u64,
}

impl FilterSet {
    /// Empty "New Filter" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a preset snapshot (order + values), e.g. on load.
    pub fn from_snapshot(order: Vec<String>, values: BTreeMap<String, FieldValue>) -> Self {
        Self {
            order,
            values,
            revision: 0,
        }
    }

    // -- read side ----------------------------------------------------------

    pub fn active_fields(&self) -> &[String] {
        &self.order
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.order.iter().any(|f| f == id)
    }

    pub fn value_of(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Monotonic mutation counter for polling observers.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Catalog minus active fields. Date shortcuts are suppressed while
    /// the canonical range field is active — they are mutually exclusive
    /// presentations of the same underlying filter.
    pub fn available_fields(&self) -> Vec<&'static FieldDefinition> {
        let range_active = self.is_active(CREATED_BETWEEN);
        catalog()
            .iter()
            .filter(|f| !self.is_active(&f.id))
            .filter(|f| !(f.shortcut && range_active))
            .collect()
    }

    /// A deep copy of `(order, values)` for baselines and preset saves.
    pub fn snapshot(&self) -> (Vec<String>, BTreeMap<String, FieldValue>) {
        (self.order.clone(), self.values.clone())
    }

    /// The finalized query handed off on "Search".
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            order: self.order.clone(),
            values: self.values.clone(),
        }
    }

    // -- mutations ----------------------------------------------------------

    /// Add a field to the end of the order. Silently a no-op when the id
    /// is unknown or already active. Date shortcuts normalize into the
    /// canonical range field with a resolved `{start, end}` and label.
    pub fn add_field(&mut self, id: &str) {
        self.add_field_on(id, today_utc());
    }

    /// [`add_field`] with an injected `today` for deterministic shortcut
    /// resolution.
    pub fn add_field_on(&mut self, id: &str, today: Date) {
        if let Some(shortcut) = DateShortcut::from_field_id(id) {
            let value = shortcut.resolve(today).into_value();
            if !self.is_active(CREATED_BETWEEN) {
                self.order.push(CREATED_BETWEEN.to_string());
            }
            self.values.insert(CREATED_BETWEEN.to_string(), value);
            self.revision += 1;
            return;
        }

        let Some(def) = catalog().get(id) else {
            return;
        };
        if self.is_active(id) {
            return;
        }
        self.order.push(id.to_string());
        self.values
            .insert(id.to_string(), FieldValue::empty_for(def.kind));
        self.revision += 1;
    }

    /// Remove a field and clear its value. Silently a no-op if absent.
    pub fn remove_field(&mut self, id: &str) {
        let Some(index) = self.order.iter().position(|f| f == id) else {
            return;
        };
        self.order.remove(index);
        self.values.remove(id);
        self.revision += 1;
    }

    /// Move `dragged` to occupy `target`'s prior position (list-splice
    /// semantics). No-op when either id is absent or they are equal.
    pub fn reorder(&mut self, dragged: &str, target: &str) {
        if dragged == target {
            return;
        }
        let Some(from) = self.order.iter().position(|f| f == dragged) else {
            return;
        };
        let Some(to) = self.order.iter().position(|f| f == target) else {
            return;
        };
        let id = self.order.remove(from);
        self.order.insert(to, id);
        self.revision += 1;
    }

    /// Set an active field's value. Fails (state unchanged) when the
    /// field is not active or the value shape does not match its kind.
    pub fn set_value(&mut self, id: &str, value: FieldValue) -> Result<(), FilterError> {
        if !self.is_active(id) {
            return Err(FilterError::FieldNotActive(id.to_string()));
        }
        if let Some(kind) = catalog().kind_of(id) {
            if value.kind() != kind {
                return Err(FilterError::KindMismatch {
                    field: id.to_string(),
                    expected: kind.to_string(),
                });
            }
        }
        self.values.insert(id.to_string(), value);
        self.revision += 1;
        Ok(())
    }

    /// Clear everything back to the "New Filter" state.
    pub fn reset(&mut self) {
        if self.order.is_empty() && self.values.is_empty() {
            return;
        }
        self.order.clear();
        self.values.clear();
        self.revision += 1;
    }
}
