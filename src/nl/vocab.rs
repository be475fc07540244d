//! Domain vocabulary loader — trigger phrases → canonical tags + modes.
//!
//! Loads `data/nl/vocab.yaml` using the standard disk-first +
//! `include_str!` fallback pattern. Group order in the file is match
//! priority: the first group with any trigger contained in the
//! normalized input wins.

use serde::Deserialize;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Embedded fallback
// ---------------------------------------------------------------------------

const EMBEDDED_VOCAB: &str = include_str!("../../data/nl/vocab.yaml");

// ---------------------------------------------------------------------------
// YAML schema / runtime form (identical here — the file is already the
// indexed shape)
// ---------------------------------------------------------------------------

/// One domain group: trigger phrases, the canonical tag value they set,
/// and an optional detected mode for the results view.
#[derive(Debug, Clone, Deserialize)]
pub struct VocabGroup {
    pub triggers: Vec<String>,
    pub tag: String,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NlVocab {
    pub groups: Vec<VocabGroup>,
    /// Phrasings quoted by the no-match fallback message.
    pub examples: Vec<String>,
}

impl NlVocab {
    /// First group with any trigger contained in the normalized input.
    pub fn match_group(&self, normalized: &str) -> Option<&VocabGroup> {
        self.groups
            .iter()
            .find(|g| g.triggers.iter().any(|t| normalized.contains(t.as_str())))
    }
}

// ---------------------------------------------------------------------------
// Singleton
// ---------------------------------------------------------------------------

static VOCAB: OnceLock<NlVocab> = OnceLock::new();

/// Get the loaded domain vocabulary (singleton, loaded on first call).
pub fn vocab() -> &'static NlVocab {
    VOCAB.get_or_init(load_vocab)
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

fn load_vocab() -> NlVocab {
    let yaml_str = std::fs::read_to_string("data/nl/vocab.yaml")
        .ok()
        .unwrap_or_else(|| EMBEDDED_VOCAB.to_string());

    parse_vocab(&yaml_str).unwrap_or_else(|e| {
        eprintln!("WARN: failed to parse nl vocab.yaml from disk ({}), using embedded", e);
        parse_vocab(EMBEDDED_VOCAB).expect("embedded vocab.yaml must parse")
    })
}

fn parse_vocab(yaml_str: &str) -> Result<NlVocab, String> {
    let vocab: NlVocab =
        serde_yaml::from_str(yaml_str).map_err(|e| format!("YAML parse error: {}", e))?;
    if vocab.groups.is_empty() {
        return Err("vocabulary has no groups".into());
    }
    if vocab.examples.is_empty() {
        return Err("vocabulary has no fallback examples".into());
    }
    Ok(vocab)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_vocab_parses() {
        let v = vocab();
        assert!(!v.groups.is_empty());
        assert!(!v.examples.is_empty());
    }

    #[test]
    fn first_matching_group_wins() {
        let v = vocab();
        let g = v.match_group("all my chromatography data").unwrap();
        assert_eq!(g.tag, "Chromatography");
        assert_eq!(g.mode.as_deref(), Some("chromatography"));
    }

    #[test]
    fn no_group_for_noise() {
        assert!(vocab().match_group("asdkjasdj").is_none());
    }
}
