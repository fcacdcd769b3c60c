//! Identifier column cleaning.

use blm_common::{column_text_values, has_column, string_column};
use blm_model::{MatchError, Result, Side};
use polars::prelude::*;

/// Cell text that means "no identifier" once trimmed.
const MISSING_SENTINELS: [&str; 2] = ["", "nan"];

/// Trims `value` and returns `None` when nothing usable is left.
///
/// ```
/// use blm_normalization::clean_key;
///
/// assert_eq!(clean_key(" 123456 "), Some("123456"));
/// assert_eq!(clean_key("nan"), None);
/// assert_eq!(clean_key("   "), None);
/// ```
pub fn clean_key(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if MISSING_SENTINELS.contains(&trimmed) {
        None
    } else {
        Some(trimmed)
    }
}

/// Returns a copy of `df` with `column` rendered as trimmed text and blank
/// or `nan` cells set to null.
///
/// Fails with [`MatchError::MissingColumn`] when `column` is absent.
pub fn clean_key_column(df: &DataFrame, column: &str, side: Side) -> Result<DataFrame> {
    if !has_column(df, column) {
        return Err(MatchError::MissingColumn {
            side,
            column: column.to_string(),
        });
    }

    let raw = column_text_values(df.column(column)?)?;
    let mut nulled = 0usize;
    let cleaned: Vec<Option<String>> = raw
        .iter()
        .map(|value| {
            let key = value.as_deref().and_then(clean_key).map(str::to_string);
            if value.is_some() && key.is_none() {
                nulled += 1;
            }
            key
        })
        .collect();

    tracing::debug!(%side, nulled, "cleaned identifier column");

    let mut out = df.clone();
    out.with_column(string_column(column, cleaned))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(values: &[Option<&str>]) -> DataFrame {
        DataFrame::new(vec![
            Series::new("citizenship_number".into(), values).into_column(),
            Series::new("name".into(), vec!["x"; values.len()]).into_column(),
        ])
        .unwrap()
    }

    fn keys(df: &DataFrame) -> Vec<Option<String>> {
        column_text_values(df.column("citizenship_number").unwrap()).unwrap()
    }

    #[test]
    fn sentinels_become_null() {
        let df = frame(&[Some(""), Some(" "), Some("nan"), Some(" 12 "), None]);
        let out = clean_key_column(&df, "citizenship_number", Side::Source).unwrap();
        assert_eq!(
            keys(&out),
            vec![None, None, None, Some("12".to_string()), None]
        );
        assert_eq!(out.width(), 2);
    }

    #[test]
    fn other_spellings_are_kept() {
        let df = frame(&[Some("NaN"), Some("0")]);
        let out = clean_key_column(&df, "citizenship_number", Side::Source).unwrap();
        assert_eq!(
            keys(&out),
            vec![Some("NaN".to_string()), Some("0".to_string())]
        );
    }

    #[test]
    fn numeric_keys_are_cast_to_text() {
        let df = DataFrame::new(vec![
            Series::new("CUS_LEG_ID".into(), [Some(123_456_i64), None]).into_column(),
        ])
        .unwrap();
        let out = clean_key_column(&df, "CUS_LEG_ID", Side::Target).unwrap();
        assert_eq!(out.column("CUS_LEG_ID").unwrap().dtype(), &DataType::String);
        assert_eq!(
            column_text_values(out.column("CUS_LEG_ID").unwrap()).unwrap(),
            vec![Some("123456".to_string()), None]
        );
    }

    #[test]
    fn missing_column_is_reported_with_side() {
        let df = frame(&[Some("1")]);
        let err = clean_key_column(&df, "CUS_LEG_ID", Side::Target).unwrap_err();
        assert_eq!(err.to_string(), "target table has no column 'CUS_LEG_ID'");
    }

    #[test]
    fn cleaning_twice_changes_nothing() {
        let df = frame(&[Some(" a "), Some("nan"), Some("b")]);
        let once = clean_key_column(&df, "citizenship_number", Side::Source).unwrap();
        let twice = clean_key_column(&once, "citizenship_number", Side::Source).unwrap();
        assert!(once.equals_missing(&twice));
    }
}
