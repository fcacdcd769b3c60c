//! JSON run summary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blm_ingest::LoadedTable;
use blm_match::Reconciliation;
use blm_model::{ColumnSelection, MatchOptions, RunStats, Side, Threshold, TiePolicy};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::common::ensure_parent_dir;

/// Where an input table came from and what it contained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputFingerprint {
    pub side: Side,
    pub path: PathBuf,
    pub sha256: String,
    pub rows: usize,
}

impl InputFingerprint {
    pub fn from_table(side: Side, table: &LoadedTable) -> Self {
        Self {
            side,
            path: table.path.clone(),
            sha256: table.sha256.clone(),
            rows: table.frame.height(),
        }
    }
}

/// Everything needed to reproduce or audit a run. Contains no names or
/// identifiers from the inputs.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool_version: String,
    pub run_at: String,
    pub inputs: Vec<InputFingerprint>,
    pub columns: ColumnSelection,
    pub threshold: Threshold,
    pub tie_policy: TiePolicy,
    pub abbreviation_table: String,
    pub stats: RunStats,
    pub total_matches: usize,
    pub outputs: Vec<PathBuf>,
}

impl RunSummary {
    pub fn new(
        inputs: Vec<InputFingerprint>,
        columns: &ColumnSelection,
        options: &MatchOptions,
        result: &Reconciliation,
        outputs: Vec<PathBuf>,
    ) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            inputs,
            columns: columns.clone(),
            threshold: options.threshold,
            tie_policy: options.tie_policy,
            abbreviation_table: options.abbreviations.version.clone(),
            stats: result.stats,
            total_matches: result.total_matches(),
            outputs,
        }
    }
}

/// Writes `summary` as pretty-printed JSON.
pub fn write_run_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(summary).context("serialize run summary")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
