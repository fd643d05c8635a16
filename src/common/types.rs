use serde::Serialize;
use std::fmt;

/// One labeled attribute extracted from a record's detail page.
///
/// Labels are matched case-insensitively by the classifier; values are
/// treated as opaque text and only ever substring-matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValuePair {
    pub label: String,
    pub value: String,
}

impl FieldValuePair {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A link from a profile's publication list to one record's detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    pub title: String,
    pub url: String,
}

/// Per-category publication counts for one profile.
///
/// Counters move by value: merging produces a new set, so an outcome that
/// must not commit simply never merges its deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounters {
    pub peer_reviewed: u32,
    pub preprints: u32,
    pub books: u32,
    pub book_chapters: u32,
    pub conference_papers: u32,
    pub patents: u32,
}

impl CategoryCounters {
    pub fn merge(self, delta: CategoryCounters) -> CategoryCounters {
        CategoryCounters {
            peer_reviewed: self.peer_reviewed + delta.peer_reviewed,
            preprints: self.preprints + delta.preprints,
            books: self.books + delta.books,
            book_chapters: self.book_chapters + delta.book_chapters,
            conference_papers: self.conference_papers + delta.conference_papers,
            patents: self.patents + delta.patents,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CategoryCounters::default()
    }
}

/// Classification result for a single accepted record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub categories: CategoryCounters,
    /// Citation delta taken from the record's "Total citations" field.
    pub citations: u64,
    /// Number of fields that matched a category rule. Zero with empty
    /// categories means the record carried only ignored/citation fields.
    pub matched_fields: usize,
}

/// The single outcome produced for each examined record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Accepted(ClassifiedRecord),
    BeforeWindow,
    AfterWindow,
    DateUnparseable,
    FetchFailed,
    UnrecognizedField,
    CitationUnparseable,
}

/// Kinds of conditions flagged for manual inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    InvalidReference,
    DateUnparseable,
    CitationUnparseable,
    UnrecognizedField,
    FetchFailed,
    PaginationCapExceeded,
    NoCategoryMatched,
    ProfileUnavailable,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::InvalidReference => "invalid reference",
            DiagnosticKind::DateUnparseable => "unparseable publication date",
            DiagnosticKind::CitationUnparseable => "unparseable citation count",
            DiagnosticKind::UnrecognizedField => "unrecognized field",
            DiagnosticKind::FetchFailed => "fetch failed",
            DiagnosticKind::PaginationCapExceeded => "record cap exceeded",
            DiagnosticKind::NoCategoryMatched => "no category matched",
            DiagnosticKind::ProfileUnavailable => "profile unavailable",
        };
        f.write_str(s)
    }
}

/// A non-fatal condition requiring manual inspection, tied to the reference
/// (profile or record URL) that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub reference: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, reference: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            reference: reference.into(),
            detail: detail.into(),
        }
    }
}

/// Identity fields read off a profile's landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileIdentity {
    pub name: String,
    pub h_index_all: u32,
    pub h_index_since: u32,
    pub citations_all: u64,
    /// Citation count for the window year from the per-year graph, when the
    /// graph has a bar for that year.
    pub year_citations: Option<u64>,
}

/// Final per-profile row: identity plus classified counters.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResult {
    pub name: String,
    /// The reference exactly as given in the input list.
    pub reference: String,
    pub year_citations: u64,
    pub h_index_since: u32,
    pub h_index_all: u32,
    pub categories: CategoryCounters,
    pub total_citations: u64,
}

/// Cross-profile totals and averages, finalized after the last profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryResult {
    pub profiles: usize,
    pub total_citations: u64,
    pub avg_year_citations: f64,
    pub avg_h_index_since: f64,
    pub avg_h_index_all: f64,
    pub total_peer_reviewed: u64,
    pub avg_peer_reviewed: f64,
    pub total_conference_papers: u64,
}

/// Statistics from a scrape run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub profiles_listed: usize,
    pub profiles_completed: usize,
    pub profiles_skipped: usize,
    pub records_examined: usize,
    pub records_accepted: usize,
    pub diagnostics: usize,
}
