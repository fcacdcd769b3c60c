use blm_common::has_column;
use blm_model::{MatchError, Result, Side};
use polars::prelude::*;

/// Source rows split by whether their identifier is present.
///
/// Every input row lands in exactly one half, and each half keeps the input
/// row order.
#[derive(Debug, Clone)]
pub struct KeyPartition {
    pub keyed: DataFrame,
    pub unkeyed: DataFrame,
}

/// Splits `df` on nulls in the (already cleaned) `key` column.
pub fn partition_by_key(df: &DataFrame, key: &str, side: Side) -> Result<KeyPartition> {
    if !has_column(df, key) {
        return Err(MatchError::MissingColumn {
            side,
            column: key.to_string(),
        });
    }
    let column = df.column(key)?;
    let keyed = df.filter(&column.is_not_null())?;
    let unkeyed = df.filter(&column.is_null())?;

    tracing::debug!(
        %side,
        keyed = keyed.height(),
        unkeyed = unkeyed.height(),
        "partitioned rows by identifier"
    );

    Ok(KeyPartition { keyed, unkeyed })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_null_keys() {
        let df = DataFrame::new(vec![
            Series::new("id".into(), [Some("1"), None, Some("3"), None]).into_column(),
            Series::new("name".into(), ["a", "b", "c", "d"]).into_column(),
        ])
        .unwrap();
        let parts = partition_by_key(&df, "id", Side::Source).unwrap();

        let keyed = parts.keyed.column("name").unwrap().str().unwrap();
        assert_eq!(keyed.iter().collect::<Vec<_>>(), vec![Some("a"), Some("c")]);
        let unkeyed = parts.unkeyed.column("name").unwrap().str().unwrap();
        assert_eq!(unkeyed.iter().collect::<Vec<_>>(), vec![Some("b"), Some("d")]);
    }

    #[test]
    fn missing_key_column_is_an_error() {
        let df = DataFrame::new(vec![Series::new("name".into(), ["a"]).into_column()]).unwrap();
        assert!(matches!(
            partition_by_key(&df, "id", Side::Source),
            Err(MatchError::MissingColumn { .. })
        ));
    }
}
