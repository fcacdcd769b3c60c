//! Column selection and match options.

use serde::{Deserialize, Serialize};

use crate::abbreviation::AbbreviationTable;
use crate::error::{MatchError, Result};
use crate::side::Side;

/// Minimum token-sort similarity (0..=100) for a name match to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Threshold(u8);

impl Threshold {
    pub const DEFAULT: Self = Self(85);

    pub fn new(value: i64) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .map(Self)
            .ok_or(MatchError::InvalidThreshold { value })
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// A score at exactly the threshold is accepted.
    pub fn accepts(self, score: f64) -> bool {
        score >= f64::from(self.0)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Threshold {
    type Error = MatchError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for u8 {
    fn from(value: Threshold) -> Self {
        value.0
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What to do when several target rows share the best score for a source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Keep the tied candidate with the lowest target row index.
    #[default]
    First,
    /// Emit one match row per tied candidate.
    All,
}

/// Script the name column of a side is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameScript {
    /// Already romanized; only case and punctuation are normalized.
    #[default]
    Latin,
    /// Devanagari; abbreviations are expanded and the text is transliterated.
    Devanagari,
}

/// The four columns a run matches on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnSelection {
    pub source_id: String,
    pub source_name: String,
    pub target_id: String,
    pub target_name: String,
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self {
            source_id: "citizenship_number".to_string(),
            source_name: "name".to_string(),
            target_id: "CUS_LEG_ID".to_string(),
            target_name: "name".to_string(),
        }
    }
}

impl ColumnSelection {
    pub fn new(
        source_id: impl Into<String>,
        source_name: impl Into<String>,
        target_id: impl Into<String>,
        target_name: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            source_name: source_name.into(),
            target_id: target_id.into(),
            target_name: target_name.into(),
        }
    }

    pub fn id(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.source_id,
            Side::Target => &self.target_id,
        }
    }

    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.source_name,
            Side::Target => &self.target_name,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("source_id", &self.source_id),
            ("source_name", &self.source_name),
            ("target_id", &self.target_id),
            ("target_name", &self.target_name),
        ] {
            if value.trim().is_empty() {
                return Err(MatchError::invalid_config(format!(
                    "column selection '{label}' is empty"
                )));
            }
        }
        Ok(())
    }
}

/// Tunables for a matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchOptions {
    /// Minimum name similarity for a fuzzy match.
    pub threshold: Threshold,
    /// Behaviour on equally scored best candidates.
    pub tie_policy: TiePolicy,
    /// Prefix for blocklist columns in result tables.
    pub source_prefix: String,
    /// Prefix for ledger columns in result tables.
    pub target_prefix: String,
    /// Source rows scored per fuzzy batch.
    pub batch_size: usize,
    /// Script of the blocklist name column.
    pub source_script: NameScript,
    /// Script of the ledger name column.
    pub target_script: NameScript,
    /// Rewrites applied to non-Latin names before transliteration.
    #[serde(skip)]
    pub abbreviations: AbbreviationTable,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: Threshold::DEFAULT,
            tie_policy: TiePolicy::default(),
            source_prefix: Side::Source.default_prefix().to_string(),
            target_prefix: Side::Target.default_prefix().to_string(),
            batch_size: Self::DEFAULT_BATCH_SIZE,
            source_script: NameScript::Devanagari,
            target_script: NameScript::Latin,
            abbreviations: AbbreviationTable::default(),
        }
    }
}

impl MatchOptions {
    pub const DEFAULT_BATCH_SIZE: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    #[must_use]
    pub fn with_prefixes(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_prefix = source.into();
        self.target_prefix = target.into();
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn with_scripts(mut self, source: NameScript, target: NameScript) -> Self {
        self.source_script = source;
        self.target_script = target;
        self
    }

    #[must_use]
    pub fn with_abbreviations(mut self, abbreviations: AbbreviationTable) -> Self {
        self.abbreviations = abbreviations;
        self
    }

    pub fn prefix(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.source_prefix,
            Side::Target => &self.target_prefix,
        }
    }

    pub fn script(&self, side: Side) -> NameScript {
        match side {
            Side::Source => self.source_script,
            Side::Target => self.target_script,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(MatchError::invalid_config("batch_size must be at least 1"));
        }
        if self.source_prefix.is_empty() || self.target_prefix.is_empty() {
            return Err(MatchError::invalid_config("column prefixes must not be empty"));
        }
        if self.source_prefix == self.target_prefix {
            return Err(MatchError::invalid_config(format!(
                "source and target prefixes are both '{}'",
                self.source_prefix
            )));
        }
        self.abbreviations.validate()
    }
}
