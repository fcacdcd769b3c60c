//! Versioned abbreviation rewrites for native-script names.
//!
//! Blocklists abbreviate common name parts with a trailing dot (`कु.` for
//! `कुमार`). The dot would otherwise be transliterated and then stripped, which
//! leaves a fragment that never scores well against the ledger. Rules are
//! literal substring replacements applied in order, so a rule may rely on the
//! output of the rules before it.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// One literal substring rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AbbreviationRule {
    pub pattern: String,
    pub replacement: String,
}

impl AbbreviationRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Ordered list of rewrites, tagged with a version so that a run summary can
/// say which table produced its canonical names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AbbreviationTable {
    pub version: String,
    #[serde(default)]
    pub rules: Vec<AbbreviationRule>,
}

impl AbbreviationTable {
    pub const DEFAULT_VERSION: &'static str = "nrb-2024.1";

    pub fn new(version: impl Into<String>, rules: Vec<AbbreviationRule>) -> Self {
        Self {
            version: version.into(),
            rules,
        }
    }

    /// The rewrites used for central bank blocklists.
    pub fn nrb_default() -> Self {
        Self::new(
            Self::DEFAULT_VERSION,
            vec![
                AbbreviationRule::new("के.सि", "केसी"),
                AbbreviationRule::new("कु.", "कुमार"),
                AbbreviationRule::new("श.", "शर्मा"),
            ],
        )
    }

    /// A table with no rules.
    pub fn empty() -> Self {
        Self::new("none", Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Applies every rule in order. Borrows when nothing matched.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut out = Cow::Borrowed(text);
        for rule in &self.rules {
            if out.contains(rule.pattern.as_str()) {
                out = Cow::Owned(out.replace(rule.pattern.as_str(), &rule.replacement));
            }
        }
        out
    }

    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(MatchError::invalid_config(
                "abbreviation table version is empty",
            ));
        }
        if let Some(idx) = self.rules.iter().position(|rule| rule.pattern.is_empty()) {
            return Err(MatchError::invalid_config(format!(
                "abbreviation rule {} has an empty pattern",
                idx + 1
            )));
        }
        Ok(())
    }
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::nrb_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_expands_known_abbreviations() {
        let table = AbbreviationTable::default();
        assert_eq!(table.version, "nrb-2024.1");
        assert_eq!(table.apply("राम कु. थापा"), "राम कुमार थापा");
        assert_eq!(table.apply("हरि श."), "हरि शर्मा");
        assert_eq!(table.apply("के.सि राम"), "केसी राम");
    }

    #[test]
    fn unchanged_text_is_borrowed() {
        let table = AbbreviationTable::default();
        assert!(matches!(table.apply("राम थापा"), Cow::Borrowed(_)));
    }

    #[test]
    fn rules_apply_in_order() {
        let table = AbbreviationTable::new(
            "test",
            vec![
                AbbreviationRule::new("a.", "ab"),
                AbbreviationRule::new("ab", "x"),
            ],
        );
        assert_eq!(table.apply("a."), "x");
    }

    #[test]
    fn empty_pattern_is_invalid() {
        let table = AbbreviationTable::new("v1", vec![AbbreviationRule::new("", "x")]);
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("rule 1"));
        assert!(AbbreviationTable::empty().validate().is_ok());
    }
}
