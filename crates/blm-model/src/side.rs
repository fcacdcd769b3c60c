use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the column that tags every result row with its match strategy.
pub const MATCH_TYPE_COLUMN: &str = "match_type";

/// Name of the similarity score column on name matches.
pub const MATCH_SCORE_COLUMN: &str = "match_score";

/// Which registry a table or column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The regulator-supplied blocklist.
    Source,
    /// The bank's customer ledger.
    Target,
}

impl Side {
    /// Column prefix used when no explicit prefix is configured.
    pub fn default_prefix(self) -> &'static str {
        match self {
            Self::Source => "source_",
            Self::Target => "target_",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// How a result row was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// Identical national identifier on both sides.
    CitizenshipMatch,
    /// Canonical names scored at or above the threshold.
    NameMatch,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CitizenshipMatch => "CitizenshipMatch",
            Self::NameMatch => "NameMatch",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
