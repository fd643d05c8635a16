//! Maps one record's field/value pairs to category and citation deltas.
//!
//! Fields are tested against an ordered rule list; the first rule that
//! matches wins and the field is never re-tested, so each field contributes
//! to at most one category. The citation-total field is category-neutral and
//! always feeds the citation delta.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::classify::keywords::{
    normalize_label, value_contains_any, BOOK_CHAPTER_LABELS, BOOK_LABELS, CITATION_LABELS,
    CONFERENCE_KEYWORDS, IGNORED_LABELS, JOURNAL_LABELS, PATENT_LABELS, PREPRINT_KEYWORDS,
};
use crate::common::{ClassifiedRecord, FieldValuePair};

lazy_static! {
    static ref CITED_BY_PATTERN: Regex = Regex::new(r"(?i)cited\s+by\s+(\d+)").unwrap();
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("citation field has no 'cited by N' count: {value:?}")]
    CitationUnparseable { value: String },

    /// The whole record is discarded when any field is unrecognized.
    #[error("unrecognized field {label:?} = {value:?}")]
    UnrecognizedField { label: String, value: String },
}

/// Classify one record's ordered field list into category/citation deltas.
pub fn classify_record(pairs: &[FieldValuePair]) -> Result<ClassifiedRecord, ClassifyError> {
    let mut rec = ClassifiedRecord::default();

    let mut i = 0;
    while i < pairs.len() {
        let pair = &pairs[i];
        let label = normalize_label(&pair.label);
        let value = pair.value.to_lowercase();

        if CITATION_LABELS.contains(label.as_str()) {
            rec.citations += parse_cited_by(&pair.value)?;
        } else if IGNORED_LABELS.contains(label.as_str()) {
            // No category signal.
        } else if CONFERENCE_KEYWORDS.contains(label.as_str())
            || value_contains_any(&value, &CONFERENCE_KEYWORDS)
        {
            rec.categories.conference_papers += 1;
            rec.matched_fields += 1;
        } else if value_contains_any(&value, &PREPRINT_KEYWORDS) {
            rec.categories.preprints += 1;
            rec.matched_fields += 1;
        } else if JOURNAL_LABELS.contains(label.as_str())
            && !value_contains_any(&value, &PREPRINT_KEYWORDS)
        {
            rec.categories.peer_reviewed += 1;
            rec.matched_fields += 1;
        } else if BOOK_LABELS.contains(label.as_str()) {
            rec.categories.books += 1;
            rec.matched_fields += 1;
            // A chapter continuation is recognized only through the field
            // that immediately follows, a known ordering dependency on the
            // document model's field order.
            if let Some(next) = pairs.get(i + 1) {
                if BOOK_CHAPTER_LABELS.contains(normalize_label(&next.label).as_str())
                    && !next.value.trim().is_empty()
                {
                    rec.categories.books -= 1;
                    rec.categories.book_chapters += 1;
                    i += 1;
                }
            }
        } else if BOOK_CHAPTER_LABELS.contains(label.as_str()) {
            // Chapter field with no preceding book field; an empty value
            // carries no chapter and is skipped.
            if !pair.value.trim().is_empty() {
                rec.categories.book_chapters += 1;
                rec.matched_fields += 1;
            }
        } else if PATENT_LABELS.contains(label.as_str()) {
            rec.categories.patents += 1;
            rec.matched_fields += 1;
        } else {
            return Err(ClassifyError::UnrecognizedField {
                label: pair.label.clone(),
                value: pair.value.clone(),
            });
        }

        i += 1;
    }

    Ok(rec)
}

fn parse_cited_by(value: &str) -> Result<u64, ClassifyError> {
    let caps = CITED_BY_PATTERN
        .captures(value)
        .ok_or_else(|| ClassifyError::CitationUnparseable {
            value: value.to_string(),
        })?;
    caps[1]
        .parse()
        .map_err(|_| ClassifyError::CitationUnparseable {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CategoryCounters;

    fn pair(label: &str, value: &str) -> FieldValuePair {
        FieldValuePair::new(label, value)
    }

    #[test]
    fn test_journal_record() {
        let rec = classify_record(&[
            pair("Authors", "A Researcher"),
            pair("Publication date", "2023/06/15"),
            pair("Journal", "Nature Physics"),
        ])
        .unwrap();
        assert_eq!(
            rec.categories,
            CategoryCounters {
                peer_reviewed: 1,
                ..Default::default()
            }
        );
        assert_eq!(rec.matched_fields, 1);
    }

    #[test]
    fn test_preprint_wins_over_journal_label() {
        let rec = classify_record(&[pair("Journal", "arXiv preprint arXiv:2403.03542")]).unwrap();
        assert_eq!(rec.categories.preprints, 1);
        assert_eq!(rec.categories.peer_reviewed, 0);
    }

    #[test]
    fn test_conference_matched_by_value() {
        let rec = classify_record(&[pair("Source", "Proceedings of the 12th Workshop")]).unwrap();
        assert_eq!(rec.categories.conference_papers, 1);
    }

    #[test]
    fn test_conference_wins_over_preprint_value() {
        // Rule order: a conference keyword in the value beats a preprint one.
        let rec = classify_record(&[pair("Source", "Workshop paper, also on arXiv")]).unwrap();
        assert_eq!(rec.categories.conference_papers, 1);
        assert_eq!(rec.categories.preprints, 0);
    }

    #[test]
    fn test_book_chapter_merge() {
        let rec = classify_record(&[
            pair("Book", "Handbook of Metrics"),
            pair("Book Chapter", "Chapter 4: Counting"),
        ])
        .unwrap();
        assert_eq!(
            rec.categories,
            CategoryCounters {
                books: 0,
                book_chapters: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_book_without_chapter() {
        let rec = classify_record(&[pair("Book", "Handbook of Metrics")]).unwrap();
        assert_eq!(rec.categories.books, 1);
        assert_eq!(rec.categories.book_chapters, 0);
    }

    #[test]
    fn test_book_with_empty_chapter_value_stays_book() {
        let rec = classify_record(&[pair("Book", "Handbook of Metrics"), pair("Book Chapter", "  ")])
            .unwrap();
        assert_eq!(rec.categories.books, 1);
        assert_eq!(rec.categories.book_chapters, 0);
    }

    #[test]
    fn test_standalone_book_chapter() {
        let rec = classify_record(&[pair("Book Chapters", "Chapter 2")]).unwrap();
        assert_eq!(rec.categories.book_chapters, 1);
        assert_eq!(rec.categories.books, 0);
    }

    #[test]
    fn test_patent_record() {
        let rec = classify_record(&[pair("Patent", "US1234567B2")]).unwrap();
        assert_eq!(rec.categories.patents, 1);
    }

    #[test]
    fn test_citations_extracted_alongside_category() {
        let rec = classify_record(&[
            pair("Journal", "Journal of Results"),
            pair("Total citations", "Cited by 42"),
        ])
        .unwrap();
        assert_eq!(rec.citations, 42);
        assert_eq!(rec.categories.peer_reviewed, 1);
    }

    #[test]
    fn test_citation_unparseable() {
        let err = classify_record(&[pair("Total citations", "see graph")]).unwrap_err();
        assert!(matches!(err, ClassifyError::CitationUnparseable { .. }));
    }

    #[test]
    fn test_unrecognized_field_discards_record() {
        let err = classify_record(&[
            pair("Journal", "Journal of Results"),
            pair("Funding source", "Agency X"),
        ])
        .unwrap_err();
        assert!(matches!(err, ClassifyError::UnrecognizedField { .. }));
    }

    #[test]
    fn test_no_category_fields_is_not_an_error() {
        let rec = classify_record(&[
            pair("Authors", "A Researcher"),
            pair("Publication date", "2023/06"),
            pair("Total citations", "Cited by 7"),
        ])
        .unwrap();
        assert!(rec.categories.is_empty());
        assert_eq!(rec.matched_fields, 0);
        assert_eq!(rec.citations, 7);
    }

    #[test]
    fn test_labels_match_case_insensitively() {
        let rec = classify_record(&[pair("JOURNAL", "Annals of Testing")]).unwrap();
        assert_eq!(rec.categories.peer_reviewed, 1);
    }
}
