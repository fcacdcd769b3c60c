//! Subcommand implementations.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blm_ingest::{is_excel_path, read_table};
use blm_match::{CancellationToken, Reconciler};
use blm_model::{MatchConfig, NameScript, Side, Threshold, TiePolicy};
use blm_normalization::normalize_digits;
use blm_output::{
    CsvOutputOptions, InputFingerprint, RunSummary, write_match_outputs, write_match_workbooks,
    write_run_summary, write_table_csv, write_table_xlsx,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info_span;

use crate::cli::{DigitsArgs, MatchArgs, ScriptArg, TiePolicyArg};
use crate::types::{DigitsRun, MatchRun};

const RUN_SUMMARY_FILE: &str = "run_summary.json";

/// Runs a match. Setting `cancel` stops name matching before the next
/// blocklist row; nothing is written in that case.
pub fn run_match(args: &MatchArgs, cancel: CancellationToken) -> Result<MatchRun> {
    let span = info_span!("match", output_dir = %args.output_dir.display());
    let _enter = span.enter();

    let config = match_config(args)?;
    let (columns, options) = config.into_parts();
    tracing::info!(
        threshold = options.threshold.value(),
        tie_policy = ?options.tie_policy,
        abbreviations = %options.abbreviations.version,
        "configuration resolved"
    );

    let source = read_table(&args.source)
        .with_context(|| format!("load blocklist {}", args.source.display()))?;
    let target = read_table(&args.target)
        .with_context(|| format!("load ledger {}", args.target.display()))?;

    let progress = (!args.no_progress && io::stderr().is_terminal()).then(name_progress_bar);
    let report = |done: usize, total: usize| {
        if let Some(bar) = &progress {
            bar.set_length(total as u64);
            bar.set_position(done as u64);
        }
    };
    let result = Reconciler::new(&columns, &options)
        .with_cancellation(cancel)
        .with_progress(&report)
        .run(&source.frame, &target.frame);
    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }
    let result = result?;

    if result.exact.height() == 0 {
        tracing::warn!("no citizenship matches found");
    }
    if result.fuzzy.height() == 0 {
        tracing::warn!("no name matches found");
    }

    let mut outputs = Vec::new();
    if args.format.includes_csv() {
        outputs.push(write_match_outputs(
            &args.output_dir,
            &args.file_prefix,
            &result,
            CsvOutputOptions {
                include_bom: args.bom,
            },
        )?);
    }
    if args.format.includes_xlsx() {
        outputs.push(write_match_workbooks(
            &args.output_dir,
            &args.file_prefix,
            &result,
        )?);
    }

    let inputs = vec![
        InputFingerprint::from_table(Side::Source, &source),
        InputFingerprint::from_table(Side::Target, &target),
    ];
    let summary_path = args.summary.clone().unwrap_or_else(|| {
        args.output_dir
            .join(format!("{}{RUN_SUMMARY_FILE}", args.file_prefix))
    });
    let summary = RunSummary::new(
        inputs.clone(),
        &columns,
        &options,
        &result,
        outputs
            .iter()
            .flat_map(|written| [written.citizenship.clone(), written.name.clone()])
            .collect(),
    );
    write_run_summary(&summary_path, &summary)?;

    Ok(MatchRun {
        inputs,
        threshold: options.threshold,
        result,
        outputs,
        summary: summary_path,
    })
}

pub fn run_digits(args: &DigitsArgs) -> Result<DigitsRun> {
    let table = read_table(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    let normalized = normalize_digits(&table.frame)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_digits_output(&args.input));
    if has_extension(&output, "xlsx") {
        write_table_xlsx(&output, &normalized, "digits")?;
    } else {
        write_table_csv(
            &output,
            &normalized,
            CsvOutputOptions {
                include_bom: args.bom,
            },
        )?;
    }
    tracing::info!(rows = normalized.height(), output = %output.display(), "digits normalized");
    Ok(DigitsRun {
        input: args.input.clone(),
        output,
        rows: normalized.height(),
    })
}

/// Config file (or defaults) with command-line overrides applied.
fn match_config(args: &MatchArgs) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };

    let columns = &mut config.columns;
    for (slot, value) in [
        (&mut columns.source_id, &args.source_id),
        (&mut columns.source_name, &args.source_name),
        (&mut columns.target_id, &args.target_id),
        (&mut columns.target_name, &args.target_name),
    ] {
        if let Some(value) = value {
            slot.clone_from(value);
        }
    }

    let matching = &mut config.matching;
    if let Some(value) = args.threshold {
        matching.threshold = Threshold::new(value)?;
    }
    if let Some(policy) = args.tie_policy {
        matching.tie_policy = match policy {
            TiePolicyArg::First => TiePolicy::First,
            TiePolicyArg::All => TiePolicy::All,
        };
    }
    if let Some(script) = args.source_script {
        matching.source_script = name_script(script);
    }
    if let Some(script) = args.target_script {
        matching.target_script = name_script(script);
    }
    if let Some(batch_size) = args.batch_size {
        matching.batch_size = batch_size;
    }
    if let Some(prefix) = &args.source_prefix {
        matching.source_prefix.clone_from(prefix);
    }
    if let Some(prefix) = &args.target_prefix {
        matching.target_prefix.clone_from(prefix);
    }

    config.validate()?;
    Ok(config)
}

fn name_script(script: ScriptArg) -> NameScript {
    match script {
        ScriptArg::Latin => NameScript::Latin,
        ScriptArg::Devanagari => NameScript::Devanagari,
    }
}

/// `<stem>_digits.csv` next to the input; workbooks stay workbooks, though
/// `.xls` and `.xlsm` input is written back as `.xlsx`.
fn default_digits_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let extension = if is_excel_path(input) { "xlsx" } else { "csv" };
    input.with_file_name(format!("{stem}_digits.{extension}"))
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}

fn name_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message("Matching names");
    bar
}
