//! End-to-end reconciliation.

use blm_common::has_column;
use blm_model::{ColumnSelection, MatchError, MatchOptions, Result, RunStats, Side};
use blm_normalization::{clean_key_column, normalize_digits};
use polars::prelude::*;
use tracing::info_span;

use crate::cancel::CancellationToken;
use crate::exact::exact_match;
use crate::fuzzy::{FuzzyMatcher, ProgressFn};
use crate::partition::partition_by_key;

/// The two result tables of a run.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// `CitizenshipMatch` rows.
    pub exact: DataFrame,
    /// `NameMatch` rows.
    pub fuzzy: DataFrame,
    pub stats: RunStats,
}

impl Reconciliation {
    pub fn total_matches(&self) -> usize {
        self.exact.height() + self.fuzzy.height()
    }
}

/// Runs the full pipeline: digit normalization on both tables, key
/// cleaning, the keyed/unkeyed split, exact matching of keyed rows and fuzzy
/// matching of unkeyed rows.
pub struct Reconciler<'a> {
    columns: &'a ColumnSelection,
    options: &'a MatchOptions,
    cancel: CancellationToken,
    progress: Option<ProgressFn<'a>>,
}

impl<'a> Reconciler<'a> {
    pub fn new(columns: &'a ColumnSelection, options: &'a MatchOptions) -> Self {
        Self {
            columns,
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

    pub fn run(&self, source: &DataFrame, target: &DataFrame) -> Result<Reconciliation> {
        self.columns.validate()?;
        self.options.validate()?;
        self.check_columns(source, Side::Source)?;
        self.check_columns(target, Side::Target)?;

        let columns = self.columns;
        let (source, target) = {
            let _span = info_span!("normalize").entered();
            (normalize_digits(source)?, normalize_digits(target)?)
        };

        let (source, target) = {
            let _span = info_span!("clean").entered();
            (
                clean_key_column(&source, &columns.source_id, Side::Source)?,
                clean_key_column(&target, &columns.target_id, Side::Target)?,
            )
        };

        let partition = partition_by_key(&source, &columns.source_id, Side::Source)?;
        if partition.unkeyed.height() > 0 {
            tracing::info!(
                unkeyed = partition.unkeyed.height(),
                "source rows without an identifier set aside for name matching"
            );
        }

        let exact = {
            let _span = info_span!("exact").entered();
            exact_match(
                &partition.keyed,
                &target,
                &columns.source_id,
                &columns.target_id,
                self.options,
            )?
        };

        let fuzzy = {
            let _span = info_span!("fuzzy").entered();
            let mut matcher =
                FuzzyMatcher::new(self.options).with_cancellation(self.cancel.clone());
            if let Some(progress) = self.progress {
                matcher = matcher.with_progress(progress);
            }
            matcher.run(
                &partition.unkeyed,
                &target,
                &columns.source_name,
                &columns.target_name,
            )?
        };

        let _span = info_span!("assemble").entered();
        let stats = RunStats {
            source_rows: source.height(),
            target_rows: target.height(),
            keyed_source_rows: partition.keyed.height(),
            unkeyed_source_rows: partition.unkeyed.height(),
            exact_matches: exact.height(),
            fuzzy_matches: fuzzy.table.height(),
            skipped_unmatchable: fuzzy.skipped_unmatchable,
            rejected_below_threshold: fuzzy.rejected_below_threshold,
            source_names: fuzzy.source_names,
            target_names: fuzzy.target_names,
        };

        tracing::info!(
            source_rows = stats.source_rows,
            target_rows = stats.target_rows,
            exact_matches = stats.exact_matches,
            fuzzy_matches = stats.fuzzy_matches,
            total_matches = stats.total_matches(),
            "reconciliation finished"
        );

        Ok(Reconciliation {
            exact,
            fuzzy: fuzzy.table,
            stats,
        })
    }

    fn check_columns(&self, df: &DataFrame, side: Side) -> Result<()> {
        for column in [self.columns.id(side), self.columns.name(side)] {
            if !has_column(df, column) {
                return Err(MatchError::MissingColumn {
                    side,
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Reconciles `source` against `target` without cancellation or progress.
pub fn reconcile(
    source: &DataFrame,
    target: &DataFrame,
    columns: &ColumnSelection,
    options: &MatchOptions,
) -> Result<Reconciliation> {
    Reconciler::new(columns, options).run(source, target)
}
