//! Result table assembly.
//!
//! A match table row is one source row followed by one target row, every
//! column renamed with its side's prefix, then `match_type` and, for name
//! matches, `match_score`. Column names that would collide after prefixing
//! get a numeric suffix instead of failing the run.

use std::collections::HashSet;

use blm_model::{MATCH_SCORE_COLUMN, MATCH_TYPE_COLUMN, MatchOptions, MatchType, Result, Side};
use polars::prelude::*;

/// Row pairs, one source and one target index per output row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowPairs {
    pub source: Vec<u32>,
    pub target: Vec<u32>,
}

impl RowPairs {
    pub fn push(&mut self, source: u32, target: u32) {
        self.source.push(source);
        self.target.push(target);
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

/// Builds a match table from row pairs.
///
/// `derived` holds extra source-side columns already aligned with `pairs`
/// (one value per output row); they are prefixed like source columns and
/// placed after them. `scores`, when given, must also be aligned with `pairs`.
pub fn assemble_matches(
    source: &DataFrame,
    target: &DataFrame,
    pairs: &RowPairs,
    derived: Vec<Column>,
    scores: Option<Vec<f64>>,
    match_type: MatchType,
    options: &MatchOptions,
) -> Result<DataFrame> {
    let source_rows = source.take(&row_indices(&pairs.source))?;
    let target_rows = target.take(&row_indices(&pairs.target))?;

    let mut names = UniqueNames::default();
    let mut columns = Vec::with_capacity(source.width() + target.width() + derived.len() + 2);

    let source_prefix = options.prefix(Side::Source);
    for column in source_rows.get_columns().iter().chain(derived.iter()) {
        let name = names.claim(format!("{source_prefix}{}", column.name()));
        columns.push(column.clone().with_name(name.into()));
    }

    let target_prefix = options.prefix(Side::Target);
    for column in target_rows.get_columns() {
        let name = names.claim(format!("{target_prefix}{}", column.name()));
        columns.push(column.clone().with_name(name.into()));
    }

    let type_name = names.claim(MATCH_TYPE_COLUMN.to_string());
    columns.push(
        Series::new(type_name.into(), vec![match_type.as_str(); pairs.len()]).into_column(),
    );

    if let Some(scores) = scores {
        let score_name = names.claim(MATCH_SCORE_COLUMN.to_string());
        columns.push(Series::new(score_name.into(), scores).into_column());
    }

    Ok(DataFrame::new(columns)?)
}

fn row_indices(rows: &[u32]) -> IdxCa {
    IdxCa::from_vec("idx".into(), rows.to_vec())
}

#[derive(Debug, Default)]
struct UniqueNames(HashSet<String>);

impl UniqueNames {
    /// Returns `name`, or `name_N` for the smallest N not yet taken.
    fn claim(&mut self, name: String) -> String {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while self.0.contains(&candidate) {
            candidate = format!("{name}_{suffix}");
            suffix += 1;
        }
        self.0.insert(candidate.clone());
        candidate
    }
}
