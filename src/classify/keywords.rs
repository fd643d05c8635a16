//! Canonical keyword sets for record field classification.
//!
//! One lowercase set per category; every label is normalized once with
//! [`normalize_label`] before lookup, so singular/plural variants are the
//! only spellings a set needs to carry.

use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Field labels naming the record's total-citation count.
    pub static ref CITATION_LABELS: HashSet<&'static str> =
        ["total citations", "total citation"].into_iter().collect();

    /// Field labels carrying no category signal at all.
    pub static ref IGNORED_LABELS: HashSet<&'static str> = [
        "publication date",
        "publication dates",
        "author",
        "authors",
        "description",
        "descriptions",
        "scholar articles",
        "publisher",
        "publishers",
        "volume",
        "volumes",
        "page",
        "pages",
        "issue",
        "issues",
    ]
    .into_iter()
    .collect();

    pub static ref CONFERENCE_KEYWORDS: HashSet<&'static str> = [
        "conference",
        "conferences",
        "proceeding",
        "proceedings",
        "workshop",
        "workshops",
        "meeting",
        "meetings",
    ]
    .into_iter()
    .collect();

    pub static ref PREPRINT_KEYWORDS: HashSet<&'static str> =
        ["preprint", "preprints", "arxiv", "biorxiv", "medrxiv"]
            .into_iter()
            .collect();

    pub static ref JOURNAL_LABELS: HashSet<&'static str> =
        ["journal", "journals"].into_iter().collect();

    pub static ref BOOK_LABELS: HashSet<&'static str> =
        ["book", "books"].into_iter().collect();

    pub static ref BOOK_CHAPTER_LABELS: HashSet<&'static str> =
        ["book chapter", "book chapters", "book page", "book pages"]
            .into_iter()
            .collect();

    pub static ref PATENT_LABELS: HashSet<&'static str> =
        ["patent", "patents"].into_iter().collect();
}

/// Normalize a field label for exact set lookup.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// True for the (already normalized) label of the field the walker reads
/// the record's date from.
pub fn is_publication_date_label(label_norm: &str) -> bool {
    label_norm == "publication date" || label_norm == "publication dates"
}

/// True when the lowercased value contains any keyword from the set.
pub fn value_contains_any(value_lower: &str, keywords: &HashSet<&'static str>) -> bool {
    keywords.iter().any(|kw| value_lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Publication Date "), "publication date");
        assert_eq!(normalize_label("JOURNAL"), "journal");
    }

    #[test]
    fn test_label_sets_are_lowercase() {
        for set in [
            &*CITATION_LABELS,
            &*IGNORED_LABELS,
            &*CONFERENCE_KEYWORDS,
            &*PREPRINT_KEYWORDS,
            &*JOURNAL_LABELS,
            &*BOOK_LABELS,
            &*BOOK_CHAPTER_LABELS,
            &*PATENT_LABELS,
        ] {
            for kw in set.iter() {
                assert_eq!(*kw, kw.to_lowercase());
            }
        }
    }

    #[test]
    fn test_value_contains_any() {
        assert!(value_contains_any(
            "arxiv preprint arxiv:2403.03542",
            &PREPRINT_KEYWORDS
        ));
        assert!(!value_contains_any("nature physics", &PREPRINT_KEYWORDS));
    }
}
