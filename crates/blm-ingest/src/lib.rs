//! Registry ingestion.
//!
//! Loads a blocklist or ledger into a Polars DataFrame, from CSV or from the
//! first sheet of an Excel workbook. Every column is read as text so that
//! identifiers keep their leading zeros and a national ID is never silently
//! turned into a float. CSV input must be UTF-8; a UTF-8 BOM is accepted and
//! dropped, UTF-16 files and invalid byte sequences are rejected with an
//! encoding error.

mod error;
mod excel;
mod reader;

pub use error::{IngestError, Result};
pub use excel::{EXCEL_EXTENSIONS, is_excel_path, parse_excel_bytes, read_excel_table};
pub use reader::{
    LoadedTable, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, parse_csv_bytes,
    read_csv_table, read_table,
};
