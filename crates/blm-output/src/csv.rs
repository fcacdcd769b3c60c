//! CSV output.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blm_match::Reconciliation;
use polars::prelude::*;

use crate::common::ensure_parent_dir;

pub const CITIZENSHIP_MATCHES_FILE: &str = "citizenship_matches.csv";
pub const NAME_MATCHES_FILE: &str = "name_matches.csv";

/// Options for CSV output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvOutputOptions {
    /// Prepend a UTF-8 byte order mark.
    pub include_bom: bool,
}

/// Paths written by [`write_match_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutputs {
    pub citizenship: PathBuf,
    pub name: PathBuf,
}

/// Writes one table with a header row.
pub fn write_table_csv(path: &Path, df: &DataFrame, options: CsvOutputOptions) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut frame = df.clone();
    CsvWriter::new(BufWriter::new(file))
        .include_header(true)
        .include_bom(options.include_bom)
        .finish(&mut frame)
        .with_context(|| format!("write {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        rows = frame.height(),
        bom = options.include_bom,
        "wrote csv"
    );
    Ok(())
}

/// Writes `<prefix>citizenship_matches.csv` and `<prefix>name_matches.csv`
/// into `output_dir`. Empty tables are still written with their header.
pub fn write_match_outputs(
    output_dir: &Path,
    file_prefix: &str,
    result: &Reconciliation,
    options: CsvOutputOptions,
) -> Result<MatchOutputs> {
    let citizenship = output_dir.join(format!("{file_prefix}{CITIZENSHIP_MATCHES_FILE}"));
    let name = output_dir.join(format!("{file_prefix}{NAME_MATCHES_FILE}"));

    write_table_csv(&citizenship, &result.exact, options)?;
    write_table_csv(&name, &result.fuzzy, options)?;

    Ok(MatchOutputs { citizenship, name })
}
