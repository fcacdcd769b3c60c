//! CSV file reading.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use polars::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::{IngestError, Result};
use crate::excel::{is_excel_path, read_excel_table};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// A table read from disk, with the SHA-256 of the raw bytes.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub frame: DataFrame,
    /// Lowercase hex digest of the file as read, BOM included.
    pub sha256: String,
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| read_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads a CSV or Excel table, chosen by file extension. `.xlsx`, `.xlsm`
/// and `.xls` go through [`read_excel_table`]; anything else is read as CSV.
pub fn read_table(path: &Path) -> Result<LoadedTable> {
    if is_excel_path(path) {
        read_excel_table(path)
    } else {
        read_csv_table(path)
    }
}

/// Reads a CSV file with a single header row into a DataFrame of string
/// columns.
pub fn read_csv_table(path: &Path) -> Result<LoadedTable> {
    check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
    let sha256 = hex::encode(Sha256::digest(&bytes));
    let frame = parse_csv_bytes(&bytes, path)?;

    tracing::info!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "loaded table"
    );

    Ok(LoadedTable {
        path: path.to_path_buf(),
        frame,
        sha256,
    })
}

/// Parses CSV bytes. `path` is only used in error messages.
pub fn parse_csv_bytes(bytes: &[u8], path: &Path) -> Result<DataFrame> {
    let body = strip_utf8_bom(bytes, path)?;

    let valid_up_to = Encoding::utf8_valid_up_to(body);
    if valid_up_to < body.len() {
        return Err(IngestError::InvalidUtf8 {
            path: path.to_path_buf(),
            offset: valid_up_to + (bytes.len() - body.len()),
        });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let parse_error = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    // Schema inference is disabled so every column arrives as String.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(body.to_vec()))
        .finish()
        .map_err(parse_error)?;

    validate_header(&df, path)?;
    Ok(df)
}

/// Rejects non UTF-8 byte order marks and returns the bytes after a UTF-8 BOM.
fn strip_utf8_bom<'a>(bytes: &'a [u8], path: &Path) -> Result<&'a [u8]> {
    match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) if encoding == UTF_8 => Ok(&bytes[bom_len..]),
        Some((encoding, _)) => Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        }),
        None => Ok(bytes),
    }
}

fn validate_header(df: &DataFrame, path: &Path) -> Result<()> {
    if df.width() > 500 {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "table has more than 500 columns"
        );
    }

    if df
        .get_column_names()
        .iter()
        .any(|name| name.trim().is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

pub(crate) fn read_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}
