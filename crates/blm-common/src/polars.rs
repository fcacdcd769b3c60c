//! Polars cell and column helpers.
//!
//! Registries arrive with arbitrary column types: identifiers parsed as
//! integers, names stored as text, empty cells as nulls. These helpers render
//! any of those as text the same way everywhere.

use polars::prelude::*;

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats without trailing zeros
/// so that an identifier read as `123456.0` renders as `123456`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use blm_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int64(42)), "42");
/// assert_eq!(any_to_string(AnyValue::Float64(123456.0)), "123456");
/// assert_eq!(any_to_string(AnyValue::String("राम")), "राम");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts an `AnyValue` to text, keeping nulls as `None`.
///
/// Unlike [`any_to_string`] this does not collapse a missing cell into an
/// empty string, so callers can tell "no value" apart from "blank value".
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        other => Some(any_to_string(other)),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use blm_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Reads a column as optional text values, one per row.
///
/// String columns are read directly; every other type goes through
/// [`any_to_text`].
pub fn column_text_values(column: &Column) -> PolarsResult<Vec<Option<String>>> {
    if column.dtype() == &DataType::String {
        let chunked = column.str()?;
        return Ok(chunked
            .iter()
            .map(|value| value.map(str::to_string))
            .collect());
    }
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        values.push(any_to_text(column.get(idx)?));
    }
    Ok(values)
}

/// Builds a string column from optional values.
pub fn string_column(name: &str, values: Vec<Option<String>>) -> Column {
    Series::new(name.into(), values).into_column()
}

/// Returns true if `df` has a column with exactly this name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names()
        .iter()
        .any(|column| column.as_str() == name)
}
