//! Temporal phrase matching — a closed table, longest phrase first.
//!
//! Maps phrases like "last 2 weeks" to their [`DateShortcut`]. The table
//! is scanned most-specific-first so "last 2 weeks" can never lose to
//! "last week". Matching is substring containment over the normalized
//! input; the table is code (not data) because each entry is welded to a
//! `DateShortcut` variant.

use crate::date_range::DateShortcut;

/// Phrase table, sorted longest-first at rest. Kept in one place so a
/// new phrasing is a one-line edit.
const PHRASES: &[(&str, DateShortcut)] = &[
    ("last two weeks", DateShortcut::Last2Weeks),
    ("past two weeks", DateShortcut::Last2Weeks),
    ("last fortnight", DateShortcut::Last2Weeks),
    ("last 2 weeks", DateShortcut::Last2Weeks),
    ("past 2 weeks", DateShortcut::Last2Weeks),
    ("this month", DateShortcut::ThisMonth),
    ("last month", DateShortcut::LastMonth),
    ("this week", DateShortcut::ThisWeek),
    ("last week", DateShortcut::LastWeek),
    ("this year", DateShortcut::ThisYear),
    ("last year", DateShortcut::LastYear),
    ("today", DateShortcut::Today),
];

/// First (most specific) temporal phrase contained in the normalized
/// input, if any.
pub fn match_shortcut(normalized: &str) -> Option<DateShortcut> {
    PHRASES
        .iter()
        .find(|(phrase, _)| normalized.contains(phrase))
        .map(|&(_, shortcut)| shortcut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_longest_first() {
        for pair in PHRASES.windows(2) {
            assert!(
                pair[0].0.len() >= pair[1].0.len(),
                "'{}' listed after shorter '{}'",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn two_weeks_beats_one() {
        assert_eq!(
            match_shortcut("data for the last 2 weeks"),
            Some(DateShortcut::Last2Weeks)
        );
        assert_eq!(
            match_shortcut("data for the last two weeks"),
            Some(DateShortcut::Last2Weeks)
        );
        assert_eq!(match_shortcut("last week"), Some(DateShortcut::LastWeek));
    }

    #[test]
    fn no_temporal_phrase() {
        assert_eq!(match_shortcut("chromatography runs"), None);
    }
}
