//! Outcome of canonicalizing one name.

use serde::Serialize;

/// A comparison-ready name, tagged with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalName {
    /// Transliterated (when needed) and cleaned.
    Clean(String),
    /// Transliteration failed; the cleaned raw text is used instead.
    Fallback { name: String, reason: String },
    /// Null input, or nothing left after cleaning.
    Unmatchable,
}

impl CanonicalName {
    /// The comparison string. Empty for [`CanonicalName::Unmatchable`].
    pub fn as_str(&self) -> &str {
        match self {
            Self::Clean(name) | Self::Fallback { name, .. } => name,
            Self::Unmatchable => "",
        }
    }

    pub fn is_matchable(&self) -> bool {
        !matches!(self, Self::Unmatchable)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Per-column tally of canonicalization outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalStats {
    pub clean: usize,
    pub fallback: usize,
    pub unmatchable: usize,
}

impl CanonicalStats {
    pub fn record(&mut self, name: &CanonicalName) {
        match name {
            CanonicalName::Clean(_) => self.clean += 1,
            CanonicalName::Fallback { .. } => self.fallback += 1,
            CanonicalName::Unmatchable => self.unmatchable += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.clean + self.fallback + self.unmatchable
    }

    /// Rows whose name did not canonicalize cleanly.
    pub fn degraded(&self) -> usize {
        self.fallback + self.unmatchable
    }
}
