//! Excel workbook reading.
//!
//! Only the first worksheet is read. Its first row is the header. Cells are
//! rendered as text the way the CSV path leaves them: numbers without a
//! trailing `.0`, empty and error cells as null.

use std::io::Cursor;
use std::path::Path;

use blm_common::format_numeric;
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use polars::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::{IngestError, Result};
use crate::reader::{LoadedTable, check_file_size, read_error};

/// Extensions read as workbooks, compared case-insensitively.
pub const EXCEL_EXTENSIONS: [&str; 3] = ["xlsx", "xlsm", "xls"];

pub fn is_excel_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXCEL_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// Reads the first worksheet of a workbook into a DataFrame of string
/// columns.
pub fn read_excel_table(path: &Path) -> Result<LoadedTable> {
    check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
    let sha256 = hex::encode(Sha256::digest(&bytes));
    let frame = parse_excel_bytes(bytes, path)?;

    tracing::info!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "loaded workbook"
    );

    Ok(LoadedTable {
        path: path.to_path_buf(),
        frame,
        sha256,
    })
}

/// Parses workbook bytes (any format calamine detects). `path` is only used
/// in error messages.
pub fn parse_excel_bytes(bytes: Vec<u8>, path: &Path) -> Result<DataFrame> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| workbook_error(e.to_string()))?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Err(IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        });
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| workbook_error(e.to_string()))?;

    frame_from_range(&range, path)
}

fn frame_from_range(range: &Range<Data>, path: &Path) -> Result<DataFrame> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        });
    };

    let names: Vec<String> = header
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();
    if names.iter().any(|name| name.trim().is_empty()) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }

    let capacity = range.height().saturating_sub(1);
    let mut values: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(capacity); names.len()];
    let mut blank_rows = 0usize;
    for row in rows {
        let cells: Vec<Option<String>> = row.iter().map(cell_text).collect();
        // Formatted but empty rows at the end of a sheet are part of the range.
        if cells.iter().all(Option::is_none) {
            blank_rows += 1;
            continue;
        }
        for (column, cell) in values.iter_mut().zip(cells) {
            column.push(cell);
        }
    }
    if blank_rows > 0 {
        tracing::debug!(path = %path.display(), blank_rows, "skipped blank worksheet rows");
    }

    let columns = names
        .iter()
        .zip(values)
        .map(|(name, values)| Series::new(name.as_str().into(), values).into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            (!s.is_empty()).then(|| s.clone())
        }
        Data::Float(v) => Some(format_numeric(*v)),
        Data::Int(v) => Some(v.to_string()),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Serial day number; dates are not meaningful keys or names here.
        Data::DateTime(dt) => Some(format_numeric(dt.as_f64())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excel_extensions_ignore_case() {
        assert!(is_excel_path(Path::new("blocklist.XLSX")));
        assert!(is_excel_path(Path::new("data/ledger.xls")));
        assert!(!is_excel_path(Path::new("ledger.csv")));
        assert!(!is_excel_path(Path::new("xlsx")));
    }

    #[test]
    fn cells_render_like_csv_text() {
        assert_eq!(cell_text(&Data::Float(123_456.0)), Some("123456".to_string()));
        assert_eq!(cell_text(&Data::Float(12.5)), Some("12.5".to_string()));
        assert_eq!(cell_text(&Data::Int(7)), Some("7".to_string()));
        assert_eq!(cell_text(&Data::String(String::new())), None);
        assert_eq!(cell_text(&Data::Empty), None);
    }

    #[test]
    fn non_workbook_bytes_are_rejected() {
        let err = parse_excel_bytes(b"name\nRam\n".to_vec(), Path::new("blocklist.xlsx"))
            .unwrap_err();
        assert!(matches!(err, IngestError::Workbook { .. }));
    }
}
