//! Assembles per-profile rows and folds them into the cross-profile summary.

use crate::common::{ProfileIdentity, ProfileResult, SummaryResult};
use crate::profile::walker::WalkOutcome;

/// Combine a profile's identity fields with its traversal counters.
///
/// The year-period citation count prefers the profile's per-year citation
/// graph; when the graph has no bar for the window year the walker's
/// accumulated per-record sum stands in.
pub fn assemble_profile(
    reference: &str,
    identity: &ProfileIdentity,
    walk: &WalkOutcome,
) -> ProfileResult {
    ProfileResult {
        name: identity.name.clone(),
        reference: reference.to_string(),
        year_citations: identity.year_citations.unwrap_or(walk.citations),
        h_index_since: identity.h_index_since,
        h_index_all: identity.h_index_all,
        categories: walk.categories,
        total_citations: identity.citations_all,
    }
}

/// Running cross-profile sums; finalized once after the last profile.
#[derive(Debug, Default)]
pub struct SummaryAccumulator {
    profiles: usize,
    total_citations: u64,
    year_citations: u64,
    h_index_since: u64,
    h_index_all: u64,
    peer_reviewed: u64,
    conference_papers: u64,
}

impl SummaryAccumulator {
    pub fn fold(&mut self, profile: &ProfileResult) {
        self.profiles += 1;
        self.total_citations += profile.total_citations;
        self.year_citations += profile.year_citations;
        self.h_index_since += u64::from(profile.h_index_since);
        self.h_index_all += u64::from(profile.h_index_all);
        self.peer_reviewed += u64::from(profile.categories.peer_reviewed);
        self.conference_papers += u64::from(profile.categories.conference_papers);
    }

    /// Derive averages; zero completed profiles yields all-zero averages.
    pub fn finalize(self) -> SummaryResult {
        SummaryResult {
            profiles: self.profiles,
            total_citations: self.total_citations,
            avg_year_citations: average(self.year_citations, self.profiles),
            avg_h_index_since: average(self.h_index_since, self.profiles),
            avg_h_index_all: average(self.h_index_all, self.profiles),
            total_peer_reviewed: self.peer_reviewed,
            avg_peer_reviewed: average(self.peer_reviewed, self.profiles),
            total_conference_papers: self.conference_papers,
        }
    }
}

fn average(sum: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
