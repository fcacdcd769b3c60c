//! Error types for registry ingestion.

use std::path::PathBuf;

use blm_model::ErrorKind;
use thiserror::Error;

/// Errors that can occur while loading an input table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Encoding Errors ===
    /// File starts with a byte order mark for a non UTF-8 encoding.
    #[error("{path} is encoded as {encoding}; save it as UTF-8 and retry")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// File contains bytes that are not valid UTF-8.
    #[error("{path} is not valid UTF-8 (first invalid byte at offset {offset}); save it as UTF-8 and retry")]
    InvalidUtf8 { path: PathBuf, offset: usize },

    // === CSV Parsing Errors ===
    /// CSV file has no header.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A header cell is blank.
    #[error("{path} has an empty column name")]
    EmptyColumnName { path: PathBuf },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === Excel Errors ===
    /// The workbook could not be opened or its first sheet read.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// The workbook has no sheets, or its first sheet has no header row.
    #[error("workbook {path} has no data on its first sheet")]
    EmptyWorkbook { path: PathBuf },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } | Self::FileRead { .. } | Self::FileTooLarge { .. } => {
                ErrorKind::Io
            }
            Self::UnsupportedEncoding { .. } | Self::InvalidUtf8 { .. } => ErrorKind::Encoding,
            Self::EmptyCsv { .. }
            | Self::EmptyColumnName { .. }
            | Self::CsvParse { .. }
            | Self::Workbook { .. }
            | Self::EmptyWorkbook { .. }
            | Self::DataFrame { .. } => ErrorKind::Data,
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/blocklist.csv"),
        };
        assert_eq!(err.to_string(), "input file not found: /path/to/blocklist.csv");
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_encoding_errors_have_encoding_kind() {
        let err = IngestError::UnsupportedEncoding {
            path: PathBuf::from("ledger.csv"),
            encoding: "UTF-16LE",
        };
        assert_eq!(err.kind(), ErrorKind::Encoding);
        assert!(err.to_string().contains("UTF-16LE"));
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
        assert_eq!(ingest_err.kind(), ErrorKind::Data);
    }
}
