use anyhow::{Context, Result};
use csv::Writer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::common::types::{Diagnostic, ProfileResult, SummaryResult};

/// Presence column value for every emitted row; profiles that could not be
/// fetched get no row at all.
const PRESENCE_FLAG: &str = "Yes";

/// Write the per-profile table. Header names interpolate the window year,
/// matching the legacy spreadsheet layout.
pub fn write_profile_table(
    path: impl AsRef<Path>,
    window_year: i32,
    profiles: &[ProfileResult],
) -> Result<()> {
    let path = path.as_ref();
    let since_year = window_year - 4;
    let mut writer =
        Writer::from_path(path).with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record([
        "Full Name".to_string(),
        "Link".to_string(),
        "Google Scholar".to_string(),
        format!("Citation Count {}", window_year),
        format!("H-Index Since {}", since_year),
        "H-Index Overall".to_string(),
        format!("Peer Reviewed Articles {}", window_year),
        format!("arXiv Preprint {}", window_year),
        format!("Books {}", window_year),
        format!("Book Chapters {}", window_year),
        format!("Conference Papers {}", window_year),
        format!("Patent {}", window_year),
        "Total Citations".to_string(),
    ])?;

    for profile in profiles {
        writer.write_record([
            profile.name.clone(),
            profile.reference.clone(),
            PRESENCE_FLAG.to_string(),
            profile.year_citations.to_string(),
            profile.h_index_since.to_string(),
            profile.h_index_all.to_string(),
            profile.categories.peer_reviewed.to_string(),
            profile.categories.preprints.to_string(),
            profile.categories.books.to_string(),
            profile.categories.book_chapters.to_string(),
            profile.categories.conference_papers.to_string(),
            profile.categories.patents.to_string(),
            profile.total_citations.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the cross-profile summary table.
pub fn write_summary_table(
    path: impl AsRef<Path>,
    window_year: i32,
    summary: &SummaryResult,
) -> Result<()> {
    let path = path.as_ref();
    let since_year = window_year - 4;
    let mut writer =
        Writer::from_path(path).with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record([
        "Total Citations".to_string(),
        format!("Average Citations per Researcher in {}", window_year),
        format!("Average H-Index Since {} per Researcher", since_year),
        "Average Overall H-Index".to_string(),
        "Total Peer Reviewed Articles".to_string(),
        "Average Peer Reviewed Publications per Researcher".to_string(),
        "Total Conference Papers".to_string(),
    ])?;

    writer.write_record([
        summary.total_citations.to_string(),
        format!("{:.2}", summary.avg_year_citations),
        format!("{:.2}", summary.avg_h_index_since),
        format!("{:.2}", summary.avg_h_index_all),
        summary.total_peer_reviewed.to_string(),
        format!("{:.2}", summary.avg_peer_reviewed),
        summary.total_conference_papers.to_string(),
    ])?;

    writer.flush()?;
    Ok(())
}

/// Write diagnostics as JSONL, one object per flagged condition.
pub fn write_diagnostics(path: impl AsRef<Path>, diagnostics: &[Diagnostic]) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for diagnostic in diagnostics {
        let line = serde_json::to_string(diagnostic)?;
        writeln!(writer, "{}", line)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{CategoryCounters, DiagnosticKind};
    use tempfile::tempdir;

    fn sample_profile() -> ProfileResult {
        ProfileResult {
            name: "Ada Lovelace".to_string(),
            reference: "https://scholar.google.com/citations?user=x".to_string(),
            year_citations: 85,
            h_index_since: 9,
            h_index_all: 18,
            categories: CategoryCounters {
                peer_reviewed: 3,
                preprints: 1,
                ..Default::default()
            },
            total_citations: 1234,
        }
    }

    #[test]
    fn test_profile_table_headers_and_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles.csv");
        write_profile_table(&path, 2023, &[sample_profile()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("Citation Count 2023"));
        assert!(header.contains("H-Index Since 2019"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("Ada Lovelace,"));
        assert!(row.contains(",Yes,85,9,18,3,1,0,0,0,0,1234"));
    }

    #[test]
    fn test_summary_table_zero_profiles() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary_table(&path, 2023, &SummaryResult::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(row, "0,0.00,0.00,0.00,0,0.00,0");
    }

    #[test]
    fn test_diagnostics_jsonl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diagnostics.jsonl");
        write_diagnostics(
            &path,
            &[Diagnostic::new(
                DiagnosticKind::DateUnparseable,
                "r1",
                "unparseable publication date \"soon\"",
            )],
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(value["kind"], "date_unparseable");
        assert_eq!(value["reference"], "r1");
    }
}
