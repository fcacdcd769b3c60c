use std::path::PathBuf;

use blm_match::Reconciliation;
use blm_model::Threshold;
use blm_output::{InputFingerprint, MatchOutputs};

/// Outcome of a `match` command.
#[derive(Debug)]
pub struct MatchRun {
    pub inputs: Vec<InputFingerprint>,
    pub threshold: Threshold,
    pub result: Reconciliation,
    /// One entry per written format, CSV first.
    pub outputs: Vec<MatchOutputs>,
    pub summary: PathBuf,
}

/// Outcome of a `digits` command.
#[derive(Debug)]
pub struct DigitsRun {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
}
