//! Walks one profile's record list, turning each record into a
//! [`RecordOutcome`] and folding accepted deltas into the profile's counters.
//!
//! Counters are passed and returned by value: an outcome that must not
//! commit simply never merges, so a revert is structural rather than an
//! after-the-fact undo.

use async_trait::async_trait;
use log::debug;

use crate::classify::keywords::{is_publication_date_label, normalize_label};
use crate::classify::{classify_record, parse_record_date, window_position, ClassifyError, DateWindow};
use crate::common::{
    CategoryCounters, Diagnostic, DiagnosticKind, FieldValuePair, RecordOutcome, RecordRef,
};
use crate::fetch::FetchError;

/// Hard cap on records examined per profile; the listing page shows at most
/// this many entries and anything past it is flagged, not processed.
pub const MAX_RECORDS_PER_PROFILE: usize = 20;

/// Seam between the walker and the network: returns the already-extracted
/// field/value pairs of one record's detail page.
#[async_trait]
pub trait RecordFetcher {
    async fn fetch_record(&self, record: &RecordRef) -> Result<Vec<FieldValuePair>, FetchError>;
}

/// Everything a profile traversal produced.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub categories: CategoryCounters,
    /// Sum of per-record citation counts over accepted records.
    pub citations: u64,
    pub records_examined: usize,
    pub records_accepted: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Counters after one outcome has been applied, with the walker's next move.
#[derive(Debug)]
pub struct OutcomeApplied {
    pub categories: CategoryCounters,
    pub citations: u64,
    pub stop: bool,
    pub flag: Option<DiagnosticKind>,
}

/// The outcome controller: maps a record's outcome to a counter update and
/// a walker action. Only `Accepted` commits; every other variant returns
/// the counters untouched.
pub fn apply_outcome(
    outcome: RecordOutcome,
    categories: CategoryCounters,
    citations: u64,
) -> OutcomeApplied {
    match outcome {
        RecordOutcome::Accepted(rec) => {
            let flag = (rec.matched_fields == 0 && rec.categories.is_empty())
                .then_some(DiagnosticKind::NoCategoryMatched);
            OutcomeApplied {
                categories: categories.merge(rec.categories),
                citations: citations + rec.citations,
                stop: false,
                flag,
            }
        }
        RecordOutcome::BeforeWindow => OutcomeApplied {
            categories,
            citations,
            stop: true,
            flag: None,
        },
        RecordOutcome::AfterWindow => OutcomeApplied {
            categories,
            citations,
            stop: false,
            flag: None,
        },
        RecordOutcome::DateUnparseable => flagged(categories, citations, DiagnosticKind::DateUnparseable),
        RecordOutcome::FetchFailed => flagged(categories, citations, DiagnosticKind::FetchFailed),
        RecordOutcome::UnrecognizedField => {
            flagged(categories, citations, DiagnosticKind::UnrecognizedField)
        }
        RecordOutcome::CitationUnparseable => {
            flagged(categories, citations, DiagnosticKind::CitationUnparseable)
        }
    }
}

fn flagged(categories: CategoryCounters, citations: u64, kind: DiagnosticKind) -> OutcomeApplied {
    OutcomeApplied {
        categories,
        citations,
        stop: false,
        flag: Some(kind),
    }
}

/// Examine up to [`MAX_RECORDS_PER_PROFILE`] records in listing order.
///
/// Records are assumed sorted by descending publication date; a record that
/// predates the window ends the traversal, one past the window is skipped.
pub async fn walk_records(
    fetcher: &dyn RecordFetcher,
    records: &[RecordRef],
    window_year: i32,
) -> WalkOutcome {
    let mut out = WalkOutcome::default();
    let mut categories = CategoryCounters::default();
    let mut citations = 0u64;

    for (index, record) in records.iter().enumerate() {
        if index >= MAX_RECORDS_PER_PROFILE {
            out.diagnostics.push(Diagnostic::new(
                DiagnosticKind::PaginationCapExceeded,
                &record.url,
                format!(
                    "{} records listed, stopped after {}",
                    records.len(),
                    MAX_RECORDS_PER_PROFILE
                ),
            ));
            break;
        }

        out.records_examined += 1;
        let (outcome, detail) = examine_record(fetcher, record, window_year).await;
        debug!("record {:?}: {:?}", record.title, outcome);

        let accepted = matches!(outcome, RecordOutcome::Accepted(_));
        let applied = apply_outcome(outcome, categories, citations);
        categories = applied.categories;
        citations = applied.citations;

        if accepted {
            out.records_accepted += 1;
        }
        if let Some(kind) = applied.flag {
            let detail = if detail.is_empty() {
                "manual inspection required".to_string()
            } else {
                detail
            };
            out.diagnostics.push(Diagnostic::new(kind, &record.url, detail));
        }
        if applied.stop {
            break;
        }
    }

    out.categories = categories;
    out.citations = citations;
    out
}

/// Fetch and judge one record. The classifier only runs for in-window
/// records with a parseable date.
async fn examine_record(
    fetcher: &dyn RecordFetcher,
    record: &RecordRef,
    window_year: i32,
) -> (RecordOutcome, String) {
    let pairs = match fetcher.fetch_record(record).await {
        Ok(pairs) => pairs,
        Err(e) => return (RecordOutcome::FetchFailed, e.to_string()),
    };

    let date_field = pairs
        .iter()
        .find(|p| is_publication_date_label(&normalize_label(&p.label)));
    let raw_date = match date_field {
        Some(pair) => pair.value.as_str(),
        None => {
            return (
                RecordOutcome::DateUnparseable,
                "record has no publication date field".to_string(),
            )
        }
    };
    let (year, month) = match parse_record_date(raw_date) {
        Some(parsed) => parsed,
        None => {
            return (
                RecordOutcome::DateUnparseable,
                format!("unparseable publication date {:?}", raw_date),
            )
        }
    };

    match window_position(year, month, window_year) {
        DateWindow::Before => (RecordOutcome::BeforeWindow, String::new()),
        DateWindow::After => (RecordOutcome::AfterWindow, String::new()),
        DateWindow::In => match classify_record(&pairs) {
            Ok(rec) => (RecordOutcome::Accepted(rec), String::new()),
            Err(e @ ClassifyError::CitationUnparseable { .. }) => {
                (RecordOutcome::CitationUnparseable, e.to_string())
            }
            Err(e @ ClassifyError::UnrecognizedField { .. }) => {
                (RecordOutcome::UnrecognizedField, e.to_string())
            }
        },
    }
}
