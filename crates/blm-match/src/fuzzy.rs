//! Fuzzy name matching.
//!
//! Each source row's canonical name is scored against every target name
//! through a [`CandidateIndex`]. The best candidate is accepted when its
//! score reaches the threshold. Source rows are processed in batches of
//! `batch_size`; rows inside a batch are scored on the rayon pool, and the
//! cancellation token is checked before each row.

use blm_common::has_column;
use blm_model::{
    CanonicalName, CanonicalStats, MatchError, MatchOptions, MatchType, Result, Side, TiePolicy,
};
use blm_normalization::NameCanonicalizer;
use polars::prelude::*;
use rayon::prelude::*;

use crate::assemble::{RowPairs, assemble_matches};
use crate::cancel::CancellationToken;
use crate::index::{BruteForceIndex, CandidateIndex};

/// Name of the derived source column holding the canonical name, before
/// prefixing.
pub const CANONICAL_NAME_COLUMN: &str = "canonical_name";

/// Receives `(rows_done, rows_total)` after each batch.
pub type ProgressFn<'a> = &'a (dyn Fn(usize, usize) + Sync);

/// Name matches plus the counters the run summary reports.
#[derive(Debug, Clone)]
pub struct FuzzyOutcome {
    pub table: DataFrame,
    /// Source rows with an accepted candidate.
    pub matched_rows: usize,
    pub skipped_unmatchable: usize,
    /// Source rows whose best score was under the threshold, or that had no
    /// candidate at all.
    pub rejected_below_threshold: usize,
    pub source_names: CanonicalStats,
    pub target_names: CanonicalStats,
}

#[derive(Debug)]
enum RowOutcome {
    Unmatchable,
    Rejected,
    Accepted { score: f64, rows: Vec<u32> },
    Cancelled,
}

/// Scores unkeyed source rows against the target by canonical name.
pub struct FuzzyMatcher<'a> {
    options: &'a MatchOptions,
    cancel: CancellationToken,
    progress: Option<ProgressFn<'a>>,
}

impl<'a> FuzzyMatcher<'a> {
    pub fn new(options: &'a MatchOptions) -> Self {
        Self {
            options,
            cancel: CancellationToken::default(),
            progress: None,
        }
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ProgressFn<'a>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Canonicalizes both name columns, builds a [`BruteForceIndex`] over the
    /// target and matches every source row.
    pub fn run(
        &self,
        source: &DataFrame,
        target: &DataFrame,
        source_name: &str,
        target_name: &str,
    ) -> Result<FuzzyOutcome> {
        for (side, df, column) in [
            (Side::Source, source, source_name),
            (Side::Target, target, target_name),
        ] {
            if !has_column(df, column) {
                return Err(MatchError::MissingColumn {
                    side,
                    column: column.to_string(),
                });
            }
        }

        let abbreviations = &self.options.abbreviations;
        let (source_names, source_stats) =
            NameCanonicalizer::new(self.options.script(Side::Source), abbreviations)
                .canonicalize_column(source.column(source_name)?)?;

        // Nothing to score: skip canonicalizing the whole ledger.
        if source_names.iter().all(|name| !name.is_matchable()) {
            let mut outcome = self.match_rows(
                source,
                target,
                &source_names,
                &BruteForceIndex::new(&[]),
            )?;
            outcome.source_names = source_stats;
            return Ok(outcome);
        }

        let (target_names, target_stats) =
            NameCanonicalizer::new(self.options.script(Side::Target), abbreviations)
                .canonicalize_column(target.column(target_name)?)?;
        let index = BruteForceIndex::new(&target_names);

        let mut outcome = self.match_rows(source, target, &source_names, &index)?;
        outcome.source_names = source_stats;
        outcome.target_names = target_stats;
        Ok(outcome)
    }

    /// Matches pre-canonicalized source names against any candidate index.
    ///
    /// `source_names` must have one entry per source row. The returned
    /// outcome carries empty name statistics.
    pub fn match_rows<I: CandidateIndex>(
        &self,
        source: &DataFrame,
        target: &DataFrame,
        source_names: &[CanonicalName],
        index: &I,
    ) -> Result<FuzzyOutcome> {
        let total = source_names.len();
        let batch_size = self.options.batch_size.max(1);
        let threshold = self.options.threshold;

        let mut pairs = RowPairs::default();
        let mut scores = Vec::new();
        let mut canonical = Vec::new();
        let mut matched_rows = 0usize;
        let mut skipped_unmatchable = 0usize;
        let mut rejected_below_threshold = 0usize;

        for (batch, start) in (0..total).step_by(batch_size).enumerate() {
            let end = (start + batch_size).min(total);
            let outcomes: Vec<RowOutcome> = source_names[start..end]
                .par_iter()
                .map(|name| {
                    if self.cancel.is_cancelled() {
                        return RowOutcome::Cancelled;
                    }
                    if !name.is_matchable() {
                        return RowOutcome::Unmatchable;
                    }
                    match index.best_candidates(name.as_str()) {
                        Some(best) if threshold.accepts(best.score) => RowOutcome::Accepted {
                            score: best.score,
                            rows: best.rows,
                        },
                        _ => RowOutcome::Rejected,
                    }
                })
                .collect();

            if let Some(pos) = outcomes
                .iter()
                .position(|outcome| matches!(outcome, RowOutcome::Cancelled))
            {
                tracing::warn!(processed = start + pos, total, "fuzzy matching cancelled");
                return Err(MatchError::Cancelled {
                    processed: start + pos,
                    total,
                });
            }

            let batch_matches = matched_rows;
            for (offset, outcome) in outcomes.into_iter().enumerate() {
                let row = start + offset;
                match outcome {
                    RowOutcome::Unmatchable => skipped_unmatchable += 1,
                    RowOutcome::Rejected => rejected_below_threshold += 1,
                    RowOutcome::Accepted { score, rows } => {
                        matched_rows += 1;
                        let chosen = match self.options.tie_policy {
                            TiePolicy::First => &rows[..rows.len().min(1)],
                            TiePolicy::All => &rows[..],
                        };
                        for &target_row in chosen {
                            pairs.push(row as u32, target_row);
                            scores.push(score);
                            canonical.push(source_names[row].as_str().to_string());
                        }
                    }
                    RowOutcome::Cancelled => {}
                }
            }

            tracing::debug!(
                batch,
                rows = end - start,
                matched = matched_rows - batch_matches,
                "scored batch"
            );
            if let Some(progress) = self.progress {
                progress(end, total);
            }
        }

        let derived = vec![Series::new(CANONICAL_NAME_COLUMN.into(), canonical).into_column()];
        let table = assemble_matches(
            source,
            target,
            &pairs,
            derived,
            Some(scores),
            MatchType::NameMatch,
            self.options,
        )?;

        tracing::info!(
            source_rows = total,
            target_rows = index.len(),
            matched_rows,
            output_rows = table.height(),
            skipped_unmatchable,
            rejected_below_threshold,
            "fuzzy name matching finished"
        );

        Ok(FuzzyOutcome {
            table,
            matched_rows,
            skipped_unmatchable,
            rejected_below_threshold,
            source_names: CanonicalStats::default(),
            target_names: CanonicalStats::default(),
        })
    }
}

/// Fuzzy-matches `source` against `target` with default run control.
pub fn fuzzy_match(
    source: &DataFrame,
    target: &DataFrame,
    source_name: &str,
    target_name: &str,
    options: &MatchOptions,
) -> Result<FuzzyOutcome> {
    FuzzyMatcher::new(options).run(source, target, source_name, target_name)
}
