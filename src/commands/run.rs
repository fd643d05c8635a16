use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::fs;
use std::time::Instant;

use crate::cli::RunArgs;
use crate::common::{
    create_count_progress_bar, format_elapsed, setup_logging, write_diagnostics,
    write_profile_table, write_summary_table, Diagnostic, DiagnosticKind, ProfileResult, RunStats,
};
use crate::document;
use crate::fetch::{DocumentFetcher, PacingBounds};
use crate::profile::{assemble_profile, canonicalize, walk_records, SummaryAccumulator};

/// Everything the pipeline needs, built once from the CLI arguments.
pub struct RunConfig {
    pub window_year: i32,
    pub pacing: PacingBounds,
    pub timeout_secs: u64,
}

impl RunConfig {
    fn from_args(args: &RunArgs) -> Self {
        Self {
            window_year: args.year,
            pacing: PacingBounds {
                min_secs: args.delay_min,
                max_secs: args.delay_max,
            },
            timeout_secs: args.timeout,
        }
    }
}

/// Outcome of one profile: a row when the profile completed, plus whatever
/// was flagged along the way.
struct ProfileProcessed {
    result: Option<ProfileResult>,
    diagnostics: Vec<Diagnostic>,
    records_examined: usize,
    records_accepted: usize,
}

pub fn run_scrape(args: RunArgs) -> Result<RunStats> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_scrape_async(args))
}

pub async fn run_scrape_async(args: RunArgs) -> Result<RunStats> {
    let start_time = Instant::now();

    setup_logging(&args.log_level)?;

    info!("Starting Scholar profile metrics run");
    info!("Input: {}", args.input);
    info!(
        "Window: May {} - April {}",
        args.year,
        args.year + 1
    );
    info!("Output: {} / {}", args.output, args.summary);

    // Missing or empty input is the only fatal condition; it halts the run
    // before any processing.
    let references = read_reference_list(&args.input)?;

    let config = RunConfig::from_args(&args);
    let fetcher = DocumentFetcher::new(config.pacing, config.timeout_secs)
        .context("Failed to build HTTP client")?;

    let mut stats = RunStats {
        profiles_listed: references.len(),
        ..Default::default()
    };
    let mut results: Vec<ProfileResult> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut summary_acc = SummaryAccumulator::default();

    let pb = create_count_progress_bar(references.len() as u64);
    for reference in &references {
        pb.set_message(reference.clone());

        let processed = process_profile(&fetcher, reference, config.window_year).await;
        stats.records_examined += processed.records_examined;
        stats.records_accepted += processed.records_accepted;

        for diagnostic in &processed.diagnostics {
            warn!(
                "{}: {} ({}); manual inspection required",
                diagnostic.kind, diagnostic.reference, diagnostic.detail
            );
        }
        diagnostics.extend(processed.diagnostics);

        match processed.result {
            Some(result) => {
                summary_acc.fold(&result);
                results.push(result);
                stats.profiles_completed += 1;
            }
            None => {
                stats.profiles_skipped += 1;
            }
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    stats.diagnostics = diagnostics.len();
    let summary = summary_acc.finalize();

    // Both tables are always written, covering whatever subset completed.
    write_profile_table(&args.output, config.window_year, &results)?;
    write_summary_table(&args.summary, config.window_year, &summary)?;
    if let Some(path) = &args.diagnostics {
        write_diagnostics(path, &diagnostics)?;
    }

    info!(
        "Done in {}: {} profiles completed, {} skipped, {} records examined ({} accepted), {} flagged",
        format_elapsed(start_time.elapsed()),
        stats.profiles_completed,
        stats.profiles_skipped,
        stats.records_examined,
        stats.records_accepted,
        stats.diagnostics,
    );

    Ok(stats)
}

/// Canonicalize, fetch, and traverse one profile. Every failure is local:
/// it produces diagnostics and an absent result, never an error.
async fn process_profile(
    fetcher: &DocumentFetcher,
    reference: &str,
    window_year: i32,
) -> ProfileProcessed {
    let mut processed = ProfileProcessed {
        result: None,
        diagnostics: Vec::new(),
        records_examined: 0,
        records_accepted: 0,
    };

    let canonical = match canonicalize(reference) {
        Ok(url) => url,
        Err(e) => {
            processed.diagnostics.push(Diagnostic::new(
                DiagnosticKind::InvalidReference,
                reference,
                e.to_string(),
            ));
            return processed;
        }
    };

    // A moved profile advertises its new home; re-canonicalize it so the
    // listing request form is preserved.
    let resolved = fetcher.resolve_updated_url(&canonical).await;
    let listing_url = if resolved == canonical {
        canonical
    } else {
        canonicalize(&resolved).unwrap_or(resolved)
    };

    let html = match fetcher.fetch_html(&listing_url).await {
        Ok(html) => html,
        Err(e) => {
            processed.diagnostics.push(Diagnostic::new(
                DiagnosticKind::ProfileUnavailable,
                reference,
                e.to_string(),
            ));
            return processed;
        }
    };

    let page = match document::parse_profile_page(&html, window_year) {
        Some(page) => page,
        None => {
            processed.diagnostics.push(Diagnostic::new(
                DiagnosticKind::ProfileUnavailable,
                reference,
                "page carries no profile container",
            ));
            return processed;
        }
    };

    info!(
        "{}: {} records listed",
        page.identity.name,
        page.records.len()
    );

    let walk = walk_records(fetcher, &page.records, window_year).await;
    processed.records_examined = walk.records_examined;
    processed.records_accepted = walk.records_accepted;
    processed.result = Some(assemble_profile(reference, &page.identity, &walk));
    processed.diagnostics.extend(walk.diagnostics);
    processed
}

/// Read the newline-delimited reference list, dropping blank lines.
pub(crate) fn read_reference_list(path: &str) -> Result<Vec<String>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path))?;

    let references: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if references.is_empty() {
        bail!("Input file {} contains no profile references", path);
    }

    Ok(references)
}
