//! Excel output.

use std::path::Path;

use anyhow::{Context, Result};
use blm_common::column_text_values;
use blm_match::Reconciliation;
use polars::prelude::*;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};

use crate::common::ensure_parent_dir;
use crate::csv::MatchOutputs;

pub const CITIZENSHIP_MATCHES_WORKBOOK: &str = "citizenship_matches.xlsx";
pub const NAME_MATCHES_WORKBOOK: &str = "name_matches.xlsx";

pub const CITIZENSHIP_SHEET: &str = "Citizenship matches";
pub const NAME_SHEET: &str = "Name matches";

/// Writes one table to a single-sheet workbook with a bold, frozen header
/// row. Float columns are written as numbers, everything else as text so
/// identifiers keep their leading zeros. Null cells stay empty.
pub fn write_table_xlsx(path: &Path, df: &DataFrame, sheet_name: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(sheet_name)
        .with_context(|| format!("name worksheet {sheet_name:?}"))?;
    let header = Format::new().set_bold();

    for (index, column) in df.get_columns().iter().enumerate() {
        let col = ColNum::try_from(index)
            .with_context(|| format!("{} columns do not fit in a worksheet", df.width()))?;
        sheet.write_string_with_format(0, col, column.name().as_str(), &header)?;

        if column.dtype().is_float() {
            let values = column.cast(&DataType::Float64)?;
            for (offset, value) in values.f64()?.iter().enumerate() {
                if let Some(value) = value {
                    sheet.write_number(data_row(offset)?, col, value)?;
                }
            }
        } else {
            for (offset, value) in column_text_values(column)?.into_iter().enumerate() {
                if let Some(value) = value {
                    sheet.write_string(data_row(offset)?, col, &value)?;
                }
            }
        }
    }
    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();

    workbook
        .save(path)
        .with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = df.height(), "wrote workbook");
    Ok(())
}

/// Writes `<prefix>citizenship_matches.xlsx` and `<prefix>name_matches.xlsx`
/// into `output_dir`. Empty tables still get their header row.
pub fn write_match_workbooks(
    output_dir: &Path,
    file_prefix: &str,
    result: &Reconciliation,
) -> Result<MatchOutputs> {
    let citizenship = output_dir.join(format!("{file_prefix}{CITIZENSHIP_MATCHES_WORKBOOK}"));
    let name = output_dir.join(format!("{file_prefix}{NAME_MATCHES_WORKBOOK}"));

    write_table_xlsx(&citizenship, &result.exact, CITIZENSHIP_SHEET)?;
    write_table_xlsx(&name, &result.fuzzy, NAME_SHEET)?;

    Ok(MatchOutputs { citizenship, name })
}

/// Worksheet row for the `offset`-th data row, below the header.
fn data_row(offset: usize) -> Result<RowNum> {
    RowNum::try_from(offset + 1).context("table has more rows than a worksheet holds")
}
