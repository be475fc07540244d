//! Input normalization — case fold, punctuation strip, whitespace collapse.
//!
//! The interpreter matches closed phrase sets as substrings of this
//! canonical form, so normalization is the only text processing that
//! happens. Hyphens and slashes survive (trigger phrases like "lc-ms"
//! and "ms/ms" need them).

/// Normalize user input for phrase matching.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    for ch in input.chars() {
        let keep = ch.is_alphanumeric() || matches!(ch, '-' | '/');
        if keep {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_space = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_collapses_whitespace() {
        assert_eq!(normalize("  Show Me   ALL  "), "show me all");
    }

    #[test]
    fn strips_punctuation_but_keeps_hyphen_slash() {
        assert_eq!(normalize("LC-MS, please! (MS/MS)"), "lc-ms please ms/ms");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize("?!"), "");
    }
}
