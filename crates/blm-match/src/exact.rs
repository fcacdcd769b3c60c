//! Exact-key matching.

use std::collections::HashMap;

use blm_common::{column_text_values, has_column};
use blm_model::{MatchError, MatchOptions, MatchType, Result, Side};
use polars::prelude::*;

use crate::assemble::{RowPairs, assemble_matches};

/// Inner join of `source` and `target` on string equality of their cleaned
/// key columns.
///
/// Null keys never match. A key present several times on either side yields
/// the full cross-product. Output rows follow source order, then target order
/// within a key. Rows are tagged `CitizenshipMatch` and carry no score.
pub fn exact_match(
    source: &DataFrame,
    target: &DataFrame,
    source_key: &str,
    target_key: &str,
    options: &MatchOptions,
) -> Result<DataFrame> {
    for (side, df, key) in [
        (Side::Source, source, source_key),
        (Side::Target, target, target_key),
    ] {
        if !has_column(df, key) {
            return Err(MatchError::MissingColumn {
                side,
                column: key.to_string(),
            });
        }
    }

    let target_keys = column_text_values(target.column(target_key)?)?;
    let mut by_key: HashMap<&str, Vec<u32>> = HashMap::new();
    for (row, key) in target_keys.iter().enumerate() {
        if let Some(key) = key {
            by_key.entry(key.as_str()).or_default().push(row as u32);
        }
    }

    let source_keys = column_text_values(source.column(source_key)?)?;
    let mut pairs = RowPairs::default();
    for (row, key) in source_keys.iter().enumerate() {
        let Some(rows) = key.as_deref().and_then(|key| by_key.get(key)) else {
            continue;
        };
        for &target_row in rows {
            pairs.push(row as u32, target_row);
        }
    }

    tracing::info!(
        source_rows = source.height(),
        target_rows = target.height(),
        matches = pairs.len(),
        "exact-key matching finished"
    );

    assemble_matches(
        source,
        target,
        &pairs,
        Vec::new(),
        None,
        MatchType::CitizenshipMatch,
        options,
    )
}
