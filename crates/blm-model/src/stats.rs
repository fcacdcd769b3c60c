use serde::Serialize;

use crate::canonical::CanonicalStats;

/// Counters collected over one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub source_rows: usize,
    pub target_rows: usize,
    /// Source rows with a usable identifier.
    pub keyed_source_rows: usize,
    /// Source rows set aside for name matching.
    pub unkeyed_source_rows: usize,
    pub exact_matches: usize,
    pub fuzzy_matches: usize,
    /// Unkeyed source rows whose name was unmatchable.
    pub skipped_unmatchable: usize,
    /// Unkeyed source rows whose best candidate scored below the threshold.
    pub rejected_below_threshold: usize,
    pub source_names: CanonicalStats,
    pub target_names: CanonicalStats,
}

impl RunStats {
    pub fn total_matches(&self) -> usize {
        self.exact_matches + self.fuzzy_matches
    }
}
