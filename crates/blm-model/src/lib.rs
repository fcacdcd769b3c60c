//! Domain model for blocklist-to-ledger record linkage.
//!
//! Everything the matching pipeline passes between its stages lives here:
//! which side of the reconciliation a table belongs to, the column selection
//! and match options, the abbreviation table used before transliteration,
//! the outcome of canonicalizing a name, run statistics and the error
//! taxonomy.

pub mod abbreviation;
pub mod canonical;
pub mod config;
pub mod error;
pub mod options;
pub mod side;
pub mod stats;

pub use abbreviation::{AbbreviationRule, AbbreviationTable};
pub use canonical::{CanonicalName, CanonicalStats};
pub use config::MatchConfig;
pub use error::{ErrorKind, MatchError, Result};
pub use options::{ColumnSelection, MatchOptions, NameScript, Threshold, TiePolicy};
pub use side::{MATCH_SCORE_COLUMN, MATCH_TYPE_COLUMN, MatchType, Side};
pub use stats::RunStats;
