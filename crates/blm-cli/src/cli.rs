//! CLI argument definitions for the blocklist matcher.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "blm",
    version,
    about = "Blocklist matcher - find blocklisted people in a customer ledger",
    long_about = "Match a credit-information blocklist against a bank customer ledger.\n\n\
                  Rows with a citizenship number are joined on that number; rows without\n\
                  one are matched by transliterated, token-sorted name similarity."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

impl Cli {
    /// Logging configuration from the flags. An explicit `--log-level`
    /// beats `-v/-q`; either one disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let level_filter = match self.log_level {
            Some(LogLevelArg::Error) => LevelFilter::ERROR,
            Some(LogLevelArg::Warn) => LevelFilter::WARN,
            Some(LogLevelArg::Info) => LevelFilter::INFO,
            Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
            Some(LogLevelArg::Trace) => LevelFilter::TRACE,
            None => self.verbosity.tracing_level_filter(),
        };
        let format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter,
            use_env_filter: !(self.verbosity.is_present() || self.log_level.is_some()),
            with_timestamps: self.log_timestamps,
            with_ansi,
            format,
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Match a blocklist against a ledger and write both match tables.
    Match(MatchArgs),

    /// Rewrite Devanagari digits as ASCII digits in every text column.
    Digits(DigitsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    /// Blocklist (the source table), CSV or Excel.
    #[arg(value_name = "BLOCKLIST")]
    pub source: PathBuf,

    /// Customer ledger (the target table), CSV or Excel.
    #[arg(value_name = "LEDGER")]
    pub target: PathBuf,

    /// TOML file with column names, matching options and abbreviations.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Identifier column in the blocklist.
    #[arg(long = "source-id", value_name = "COLUMN")]
    pub source_id: Option<String>,

    /// Name column in the blocklist.
    #[arg(long = "source-name", value_name = "COLUMN")]
    pub source_name: Option<String>,

    /// Identifier column in the ledger.
    #[arg(long = "target-id", value_name = "COLUMN")]
    pub target_id: Option<String>,

    /// Name column in the ledger.
    #[arg(long = "target-name", value_name = "COLUMN")]
    pub target_name: Option<String>,

    /// Minimum name similarity (0-100) for a name match.
    #[arg(long = "threshold", value_name = "SCORE", allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// What to do when several ledger rows share the best score.
    #[arg(long = "tie-policy", value_enum)]
    pub tie_policy: Option<TiePolicyArg>,

    /// Script of the blocklist names.
    #[arg(long = "source-script", value_enum)]
    pub source_script: Option<ScriptArg>,

    /// Script of the ledger names.
    #[arg(long = "target-script", value_enum)]
    pub target_script: Option<ScriptArg>,

    /// Blocklist rows scored per cancellation check.
    #[arg(long = "batch-size", value_name = "ROWS")]
    pub batch_size: Option<usize>,

    /// Column prefix for blocklist columns in the outputs.
    #[arg(long = "source-prefix", value_name = "PREFIX")]
    pub source_prefix: Option<String>,

    /// Column prefix for ledger columns in the outputs.
    #[arg(long = "target-prefix", value_name = "PREFIX")]
    pub target_prefix: Option<String>,

    /// Directory for the match tables and run summary.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Prefix for every output file name.
    #[arg(long = "file-prefix", value_name = "PREFIX", default_value = "")]
    pub file_prefix: String,

    /// File format of the match tables.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormatArg,

    /// Write CSV files with a UTF-8 byte order mark.
    #[arg(long = "bom")]
    pub bom: bool,

    /// Run summary path (default: <OUTPUT_DIR>/<FILE_PREFIX>run_summary.json).
    #[arg(long = "summary", value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Do not draw a progress bar while matching names.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DigitsArgs {
    /// CSV or Excel file to rewrite.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output path; a `.xlsx` extension writes a workbook (default:
    /// <INPUT stem>_digits.csv, or .xlsx for Excel input, next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the CSV with a UTF-8 byte order mark.
    #[arg(long = "bom")]
    pub bom: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Xlsx,
    Both,
}

impl OutputFormatArg {
    pub fn includes_csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }

    pub fn includes_xlsx(self) -> bool {
        matches!(self, Self::Xlsx | Self::Both)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TiePolicyArg {
    /// Keep the first ledger row with the best score.
    First,
    /// Keep every ledger row with the best score.
    All,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ScriptArg {
    Latin,
    Devanagari,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
