//! TOML run configuration.
//!
//! ```toml
//! [columns]
//! source_id = "citizenship_number"
//! source_name = "name"
//! target_id = "CUS_LEG_ID"
//! target_name = "CUS_NAME"
//!
//! [matching]
//! threshold = 85
//! tie_policy = "first"
//!
//! [abbreviations]
//! version = "nrb-2024.1"
//! rules = [{ pattern = "कु.", replacement = "कुमार" }]
//! ```
//!
//! Every section and key is optional; missing values take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::abbreviation::AbbreviationTable;
use crate::error::{MatchError, Result};
use crate::options::{ColumnSelection, MatchOptions};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Which columns hold identifiers and names.
    pub columns: ColumnSelection,
    /// Threshold, tie policy, prefixes, batch size and scripts.
    pub matching: MatchOptions,
    /// Native-script abbreviation rewrites.
    pub abbreviations: AbbreviationTable,
}

impl MatchConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| MatchError::ConfigParse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| MatchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.columns.validate()?;
        self.options().validate()
    }

    /// Match options with the configured abbreviation table attached.
    pub fn options(&self) -> MatchOptions {
        self.matching
            .clone()
            .with_abbreviations(self.abbreviations.clone())
    }

    pub fn into_parts(self) -> (ColumnSelection, MatchOptions) {
        let options = self.matching.with_abbreviations(self.abbreviations);
        (self.columns, options)
    }
}
