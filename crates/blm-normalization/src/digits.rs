//! Devanagari digit normalization.

use std::borrow::Cow;

use blm_common::string_column;
use blm_model::Result;
use polars::prelude::*;

const DEVANAGARI_ZERO: u32 = 0x0966;
const DEVANAGARI_NINE: u32 = 0x096F;

fn ascii_digit(c: char) -> Option<char> {
    let code = u32::from(c);
    if (DEVANAGARI_ZERO..=DEVANAGARI_NINE).contains(&code) {
        char::from_digit(code - DEVANAGARI_ZERO, 10)
    } else {
        None
    }
}

/// Replaces each Devanagari digit (०-९) with its ASCII counterpart.
///
/// Borrows the input when it contains no Devanagari digit.
///
/// ```
/// use blm_normalization::normalize_digits_str;
///
/// assert_eq!(normalize_digits_str("१२३"), "123");
/// assert_eq!(normalize_digits_str("वडा नं. ४"), "वडा नं. 4");
/// assert_eq!(normalize_digits_str("abc"), "abc");
/// ```
pub fn normalize_digits_str(value: &str) -> Cow<'_, str> {
    if !value.chars().any(|c| ascii_digit(c).is_some()) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.chars().map(|c| ascii_digit(c).unwrap_or(c)).collect())
}

/// Normalizes digits in every string column of `df`.
///
/// Non-string columns are returned untouched and null cells stay null.
/// Column order and names are preserved.
pub fn normalize_digits(df: &DataFrame) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(df.width());
    let mut changed_cells = 0usize;

    for column in df.get_columns() {
        if column.dtype() != &DataType::String {
            columns.push(column.clone());
            continue;
        }
        let chunked = column.str()?;
        let mut column_changed = false;
        let values: Vec<Option<String>> = chunked
            .iter()
            .map(|value| {
                value.map(|text| match normalize_digits_str(text) {
                    Cow::Borrowed(unchanged) => unchanged.to_string(),
                    Cow::Owned(converted) => {
                        column_changed = true;
                        changed_cells += 1;
                        converted
                    }
                })
            })
            .collect();
        if column_changed {
            columns.push(string_column(column.name().as_str(), values));
        } else {
            columns.push(column.clone());
        }
    }

    tracing::debug!(changed_cells, "normalized devanagari digits");
    Ok(DataFrame::new(columns)?)
}
