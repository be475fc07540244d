use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Field kinds — the shape vocabulary of the filter panel
// ---------------------------------------------------------------------------

/// The value shape (and UI affordance) of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text (e.g. file name substring).
    Text,
    /// A single ISO `yyyy-mm-dd` date.
    Date,
    /// A `{start, end}` date pair with an optional human-readable label.
    DateRange,
    /// One option chosen from the field's `options` list.
    SingleSelect,
    /// A free-form tag string.
    Tags,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Date => write!(f, "date"),
            Self::DateRange => write!(f, "date range"),
            Self::SingleSelect => write!(f, "select"),
            Self::Tags => write!(f, "tags"),
        }
    }
}

// ---------------------------------------------------------------------------
// Field values — one typed variant per kind
// ---------------------------------------------------------------------------

/// A field's current value. The variant is fixed by the field's
/// [`FieldKind`], so an invalid shape is unrepresentable rather than a
/// runtime surprise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    /// ISO `yyyy-mm-dd`.
    Date(String),
    Range {
        /// ISO `yyyy-mm-dd`, inclusive.
        start: String,
        /// ISO `yyyy-mm-dd`, inclusive.
        end: String,
        /// Human-readable label, e.g. "Created This Week".
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Selection(String),
    Tags(String),
}

impl FieldValue {
    /// The empty value for a field kind. Used when a field is added with
    /// no value yet, and to default missing keys when loading a preset.
    pub fn empty_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Text(String::new()),
            FieldKind::Date => Self::Date(String::new()),
            FieldKind::DateRange => Self::Range {
                start: String::new(),
                end: String::new(),
                label: None,
            },
            FieldKind::SingleSelect => Self::Selection(String::new()),
            FieldKind::Tags => Self::Tags(String::new()),
        }
    }

    /// `true` when the value carries no user input.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) | Self::Date(s) | Self::Selection(s) | Self::Tags(s) => s.is_empty(),
            Self::Range { start, end, .. } => start.is_empty() && end.is_empty(),
        }
    }

    /// The kind this value belongs to.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Date(_) => FieldKind::Date,
            Self::Range { .. } => FieldKind::DateRange,
            Self::Selection(_) => FieldKind::SingleSelect,
            Self::Tags(_) => FieldKind::Tags,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Date(s) | Self::Selection(s) | Self::Tags(s) => write!(f, "{s}"),
            Self::Range { start, end, label } => match label {
                Some(label) => write!(f, "{label} ({start} – {end})"),
                None => write!(f, "{start} – {end}"),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Query handoff — what "Search" emits to the results view
// ---------------------------------------------------------------------------

/// The finalized filter specification handed to the (external) results
/// view. Only the shape is contractual; the transport is an integration
/// detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub order: Vec<String>,
    pub values: BTreeMap<String, FieldValue>,
}
