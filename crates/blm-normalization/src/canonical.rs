//! Name canonicalization.

use blm_common::{any_to_text, column_text_values};
use blm_model::{AbbreviationTable, CanonicalName, CanonicalStats, NameScript};
use polars::prelude::*;
use rayon::prelude::*;

use crate::transliterate::transliterate;

/// Lowercases, drops every character that is neither alphanumeric nor
/// whitespace, and collapses runs of whitespace to a single space.
///
/// ```
/// use blm_normalization::clean_name;
///
/// assert_eq!(clean_name("  Ram  K.C. "), "ram kc");
/// assert_eq!(clean_name("O'Brien,\tJr"), "obrien jr");
/// ```
pub fn clean_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Produces comparison-ready names for one side of a reconciliation.
#[derive(Debug, Clone, Copy)]
pub struct NameCanonicalizer<'a> {
    script: NameScript,
    abbreviations: &'a AbbreviationTable,
}

impl<'a> NameCanonicalizer<'a> {
    pub fn new(script: NameScript, abbreviations: &'a AbbreviationTable) -> Self {
        Self {
            script,
            abbreviations,
        }
    }

    pub fn script(&self) -> NameScript {
        self.script
    }

    /// Canonicalizes one cell. Numbers and booleans are rendered as text.
    pub fn canonicalize(&self, value: AnyValue<'_>) -> CanonicalName {
        match any_to_text(value) {
            Some(text) => self.canonicalize_str(&text),
            None => CanonicalName::Unmatchable,
        }
    }

    pub fn canonicalize_str(&self, raw: &str) -> CanonicalName {
        let outcome = match self.script {
            NameScript::Latin => CanonicalName::Clean(clean_name(raw)),
            NameScript::Devanagari => {
                let expanded = self.abbreviations.apply(raw);
                match transliterate(&expanded) {
                    Ok(romanized) => CanonicalName::Clean(clean_name(&romanized)),
                    Err(err) => CanonicalName::Fallback {
                        name: clean_name(&expanded),
                        reason: err.to_string(),
                    },
                }
            }
        };
        if outcome.as_str().is_empty() {
            CanonicalName::Unmatchable
        } else {
            outcome
        }
    }

    /// Canonicalizes every row of `column`, in row order.
    pub fn canonicalize_column(
        &self,
        column: &Column,
    ) -> PolarsResult<(Vec<CanonicalName>, CanonicalStats)> {
        let values = column_text_values(column)?;
        let names: Vec<CanonicalName> = values
            .par_iter()
            .map(|value| match value {
                Some(text) => self.canonicalize_str(text),
                None => CanonicalName::Unmatchable,
            })
            .collect();

        let mut stats = CanonicalStats::default();
        for name in &names {
            stats.record(name);
        }
        if stats.fallback > 0 {
            tracing::warn!(
                column = %column.name(),
                fallback = stats.fallback,
                "names could not be transliterated and were compared as written"
            );
        }
        tracing::debug!(
            column = %column.name(),
            clean = stats.clean,
            fallback = stats.fallback,
            unmatchable = stats.unmatchable,
            "canonicalized names"
        );
        Ok((names, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devanagari(table: &AbbreviationTable) -> NameCanonicalizer<'_> {
        NameCanonicalizer::new(NameScript::Devanagari, table)
    }

    #[test]
    fn latin_names_are_cleaned() {
        let table = AbbreviationTable::empty();
        let canonicalizer = NameCanonicalizer::new(NameScript::Latin, &table);
        assert_eq!(
            canonicalizer.canonicalize_str("  RAM   Bahadur-Thapa "),
            CanonicalName::Clean("ram bahadurthapa".to_string())
        );
    }

    #[test]
    fn devanagari_names_are_romanized() {
        let table = AbbreviationTable::nrb_default();
        assert_eq!(
            devanagari(&table).canonicalize_str("राम थापा"),
            CanonicalName::Clean("rama thapa".to_string())
        );
    }

    #[test]
    fn abbreviations_expand_before_transliteration() {
        let table = AbbreviationTable::nrb_default();
        assert_eq!(
            devanagari(&table).canonicalize_str("राम कु. थापा"),
            CanonicalName::Clean("rama kumara thapa".to_string())
        );
        assert_eq!(
            devanagari(&AbbreviationTable::empty()).canonicalize_str("राम कु. थापा"),
            CanonicalName::Clean("rama ku thapa".to_string())
        );
    }

    #[test]
    fn unsupported_script_falls_back_to_raw_text() {
        let table = AbbreviationTable::nrb_default();
        let name = devanagari(&table).canonicalize_str("Иван Petrov");
        assert!(name.is_fallback());
        assert_eq!(name.as_str(), "иван petrov");
    }

    #[test]
    fn null_and_blank_are_unmatchable() {
        let table = AbbreviationTable::nrb_default();
        let canonicalizer = devanagari(&table);
        assert_eq!(
            canonicalizer.canonicalize(AnyValue::Null),
            CanonicalName::Unmatchable
        );
        assert_eq!(
            canonicalizer.canonicalize_str(" .,- "),
            CanonicalName::Unmatchable
        );
    }

    #[test]
    fn numbers_are_rendered_as_text() {
        let table = AbbreviationTable::empty();
        let canonicalizer = NameCanonicalizer::new(NameScript::Latin, &table);
        assert_eq!(
            canonicalizer.canonicalize(AnyValue::Int64(42)),
            CanonicalName::Clean("42".to_string())
        );
    }

    #[test]
    fn column_stats_count_outcomes() {
        let table = AbbreviationTable::nrb_default();
        let column = Series::new(
            "name".into(),
            [Some("राम थापा"), None, Some("Иван"), Some("सीता")],
        )
        .into_column();
        let (names, stats) = devanagari(&table).canonicalize_column(&column).unwrap();
        assert_eq!(names.len(), 4);
        assert_eq!(names[0].as_str(), "rama thapa");
        assert_eq!(names[3].as_str(), "sita");
        assert_eq!(
            stats,
            CanonicalStats {
                clean: 2,
                fallback: 1,
                unmatchable: 1,
            }
        );
    }
}
