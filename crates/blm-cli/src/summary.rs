use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use blm_model::{RunStats, Threshold};

use crate::types::{DigitsRun, MatchRun};

pub fn print_match_summary(run: &MatchRun) {
    for input in &run.inputs {
        println!(
            "{} input: {} ({} rows, sha256 {})",
            input.side,
            input.path.display(),
            input.rows,
            input.sha256
        );
    }
    for written in &run.outputs {
        println!("Citizenship matches: {}", written.citizenship.display());
        println!("Name matches: {}", written.name.display());
    }
    println!("Run summary: {}", run.summary.display());

    let stats = &run.result.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Blocklist rows"), Cell::new(stats.source_rows)]);
    table.add_row(vec![Cell::new("Ledger rows"), Cell::new(stats.target_rows)]);
    table.add_row(vec![
        dim_cell("  with citizenship number"),
        dim_cell(stats.keyed_source_rows),
    ]);
    table.add_row(vec![
        dim_cell("  without citizenship number"),
        dim_cell(stats.unkeyed_source_rows),
    ]);
    table.add_row(vec![
        Cell::new("Citizenship matches"),
        count_cell(stats.exact_matches),
    ]);
    table.add_row(vec![
        Cell::new(format!("Name matches (>= {})", run.threshold)),
        count_cell(stats.fuzzy_matches),
    ]);
    table.add_row(vec![
        Cell::new("Below threshold"),
        dim_cell(stats.rejected_below_threshold),
    ]);
    table.add_row(vec![
        Cell::new("No usable name"),
        warn_cell(stats.skipped_unmatchable),
    ]);
    table.add_row(vec![
        Cell::new("Names not transliterated"),
        warn_cell(stats.source_names.fallback + stats.target_names.fallback),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.total_matches()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("{}", totals_line(stats, run.threshold));
}

pub fn print_digits_summary(run: &DigitsRun) {
    println!(
        "Normalized digits in {} rows: {} -> {}",
        run.input.display(),
        run.rows,
        run.output.display()
    );
}

/// One-line verdict printed under the table.
pub fn totals_line(stats: &RunStats, threshold: Threshold) -> String {
    match stats.total_matches() {
        0 => format!(
            "No matches in {} blocklist rows (name threshold {threshold})",
            stats.source_rows
        ),
        total => format!(
            "{total} matches for {} blocklist rows: {} by citizenship number, {} by name (threshold {threshold})",
            stats.source_rows, stats.exact_matches, stats.fuzzy_matches
        ),
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(Color::Green)
    }
}

fn warn_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_line_with_matches() {
        let stats = RunStats {
            source_rows: 3,
            exact_matches: 1,
            fuzzy_matches: 1,
            ..RunStats::default()
        };
        insta::assert_snapshot!(
            totals_line(&stats, Threshold::default()),
            @"2 matches for 3 blocklist rows: 1 by citizenship number, 1 by name (threshold 85)"
        );
    }

    #[test]
    fn totals_line_without_matches() {
        let stats = RunStats {
            source_rows: 4,
            ..RunStats::default()
        };
        insta::assert_snapshot!(
            totals_line(&stats, Threshold::default()),
            @"No matches in 4 blocklist rows (name threshold 85)"
        );
    }
}
