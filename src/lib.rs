//! sift — a filter composition engine for lab-data search.
//!
//! Two interaction surfaces build the same structured search filter: a
//! panel the user edits directly (add / remove / reorder / set values)
//! and a conversational assistant that translates free text into the
//! same operations. The crate keeps them consistent against one shared,
//! ordered, persistable filter state:
//!
//! - [`catalog`] — the fixed registry of filterable fields
//! - [`filter_set`] — the ordered live state and its mutation operations
//! - [`date_range`] — "this week"-style shortcuts as concrete ranges
//! - [`preset`] — named, durable filter snapshots with seeded defaults
//! - [`dirty`] — baseline comparison driving the save affordance
//! - [`session`] — the composition root both surfaces mutate through
//! - [`nl`] — the deterministic free-text → directive interpreter
//! - [`sync`] — the assistant↔panel synchronizer and its poll loop
//! - [`transcript`] — the persisted assistant message log
//! - [`storage`] — the injected persistence port (file or in-memory)

pub mod catalog;
pub mod date_range;
pub mod dirty;
pub mod filter_set;
pub mod line_editor;
pub mod nl;
pub mod preset;
pub mod session;
pub mod storage;
pub mod sync;
pub mod transcript;
pub mod types;
pub mod ui;
