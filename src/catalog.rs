//! Filter-field catalog — the fixed registry of filterable fields.
//!
//! Loaded from `data/fields.yaml` using the standard disk-first +
//! `include_str!` fallback pattern. The catalog is immutable after load;
//! field ids are validated unique. Date-shortcut entries are part of the
//! catalog (so the panel can offer them) but are flagged: adding one
//! normalizes into the canonical `created_between` range field instead of
//! becoming an active field of its own.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::types::FieldKind;

/// The canonical date-range field every date shortcut collapses into.
pub const CREATED_BETWEEN: &str = "created_between";
/// The free-tag field the NL layer sets domain tags on.
pub const TAGS_FIELD: &str = "tags";

// ---------------------------------------------------------------------------
// Embedded fallback
// ---------------------------------------------------------------------------

const EMBEDDED_FIELDS: &str = include_str!("../data/fields.yaml");

// ---------------------------------------------------------------------------
// YAML schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CatalogYaml {
    fields: Vec<FieldEntry>,
    shortcuts: Vec<ShortcutEntry>,
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
    id: String,
    label: String,
    kind: FieldKind,
    #[serde(default)]
    options: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ShortcutEntry {
    id: String,
    label: String,
}

// ---------------------------------------------------------------------------
// Runtime catalog
// ---------------------------------------------------------------------------

/// One filterable field: id, display label, value shape, and (for
/// single-select fields) the option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub options: Vec<String>,
    /// Preset date convenience — expands into `created_between` on add.
    pub shortcut: bool,
}

/// The loaded, indexed field registry. Iteration preserves file order so
/// the panel's "add field" menu is stable.
#[derive(Debug)]
pub struct Catalog {
    fields: Vec<FieldDefinition>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn get(&self, id: &str) -> Option<&FieldDefinition> {
        self.by_id.get(id).map(|&i| &self.fields[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// The kind of a field, defaulting shortcuts to their range shape.
    pub fn kind_of(&self, id: &str) -> Option<FieldKind> {
        self.get(id).map(|f| f.kind)
    }

    /// All fields in file order (shortcuts included).
    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    /// Display label for an id; falls back to the id itself so message
    /// templating never produces an empty hole.
    pub fn label_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|f| f.label.as_str()).unwrap_or(id)
    }
}

// ---------------------------------------------------------------------------
// Singleton
// ---------------------------------------------------------------------------

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// Get the field catalog (singleton, loaded on first call).
pub fn catalog() -> &'static Catalog {
    CATALOG.get_or_init(load_catalog)
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

fn load_catalog() -> Catalog {
    let yaml_str = std::fs::read_to_string("data/fields.yaml")
        .ok()
        .unwrap_or_else(|| EMBEDDED_FIELDS.to_string());

    parse_catalog(&yaml_str).unwrap_or_else(|e| {
        eprintln!("WARN: failed to parse fields.yaml from disk ({}), using embedded", e);
        parse_catalog(EMBEDDED_FIELDS).expect("embedded fields.yaml must parse")
    })
}

fn parse_catalog(yaml_str: &str) -> Result<Catalog, String> {
    let raw: CatalogYaml =
        serde_yaml::from_str(yaml_str).map_err(|e| format!("YAML parse error: {}", e))?;

    let mut fields = Vec::with_capacity(raw.fields.len() + raw.shortcuts.len());
    for entry in raw.fields {
        fields.push(FieldDefinition {
            id: entry.id,
            label: entry.label,
            kind: entry.kind,
            options: entry.options,
            shortcut: false,
        });
    }
    for entry in raw.shortcuts {
        fields.push(FieldDefinition {
            id: entry.id,
            label: entry.label,
            kind: FieldKind::DateRange,
            options: Vec::new(),
            shortcut: true,
        });
    }

    let mut by_id = HashMap::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        if field.id.is_empty() {
            return Err("field with empty id".into());
        }
        if by_id.insert(field.id.clone(), i).is_some() {
            return Err(format!("duplicate field id '{}'", field.id));
        }
    }

    if !by_id.contains_key(CREATED_BETWEEN) {
        return Err(format!("catalog must define '{}'", CREATED_BETWEEN));
    }
    if !by_id.contains_key(TAGS_FIELD) {
        return Err(format!("catalog must define '{}'", TAGS_FIELD));
    }

    Ok(Catalog { fields, by_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses_and_indexes() {
        let cat = catalog();
        assert!(cat.contains("file_name"));
        assert!(cat.contains(CREATED_BETWEEN));
        assert!(cat.contains(TAGS_FIELD));
        assert_eq!(cat.kind_of("instrument"), Some(FieldKind::SingleSelect));
        assert!(!cat.get("instrument").unwrap().options.is_empty());
    }

    #[test]
    fn shortcuts_are_flagged_range_fields() {
        let cat = catalog();
        let f = cat.get("created_this_week").unwrap();
        assert!(f.shortcut);
        assert_eq!(f.kind, FieldKind::DateRange);
        assert!(!cat.get(CREATED_BETWEEN).unwrap().shortcut);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let bad = "fields:\n  - {id: a, label: A, kind: text}\n  - {id: a, label: B, kind: text}\nshortcuts: []\n";
        assert!(parse_catalog(bad).is_err());
    }

    #[test]
    fn label_of_known_and_unknown_ids() {
        // The fallback arm hands the caller's id back, so both borrows
        // must coexist in one return lifetime.
        let id = String::from("file_name");
        assert_eq!(catalog().label_of(&id), "File Name");
        assert_eq!(catalog().label_of("nope"), "nope");
    }
}
