//! Output generation for reconciliation runs.
//!
//! - **CSV**: one file per match table, optionally with a UTF-8 BOM so that
//!   spreadsheet tools detect the encoding of Devanagari text
//! - **Excel**: one workbook per match table
//! - **Run summary**: JSON record of inputs, options and counts

mod common;
mod csv;
mod summary;
mod xlsx;

pub use common::ensure_parent_dir;
pub use csv::{
    CITIZENSHIP_MATCHES_FILE, CsvOutputOptions, MatchOutputs, NAME_MATCHES_FILE,
    write_match_outputs, write_table_csv,
};
pub use summary::{InputFingerprint, RunSummary, write_run_summary};
pub use xlsx::{
    CITIZENSHIP_MATCHES_WORKBOOK, CITIZENSHIP_SHEET, NAME_MATCHES_WORKBOOK, NAME_SHEET,
    write_match_workbooks, write_table_xlsx,
};
