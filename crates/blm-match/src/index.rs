//! Candidate lookup over the target names.

use blm_model::CanonicalName;

use crate::scoring::{sorted_ratio, token_sort_key};

/// The highest score for a query and every target row that reached it.
#[derive(Debug, Clone, PartialEq)]
pub struct BestCandidates {
    pub score: f64,
    /// Target row indices, ascending.
    pub rows: Vec<u32>,
}

/// Finds the best-scoring target rows for a canonical source name.
///
/// Implementations are shared read-only across the rayon workers of a batch.
pub trait CandidateIndex: Sync {
    /// Returns `None` when the index holds no matchable name.
    fn best_candidates(&self, query: &str) -> Option<BestCandidates>;

    /// Number of target rows the index was built from.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scores the query against every target name.
#[derive(Debug, Clone)]
pub struct BruteForceIndex {
    /// Token-sorted names by target row; `None` for unmatchable rows.
    keys: Vec<Option<String>>,
}

impl BruteForceIndex {
    pub fn new(names: &[CanonicalName]) -> Self {
        let keys = names
            .iter()
            .map(|name| name.is_matchable().then(|| token_sort_key(name.as_str())))
            .collect();
        Self { keys }
    }
}

impl CandidateIndex for BruteForceIndex {
    fn best_candidates(&self, query: &str) -> Option<BestCandidates> {
        let query = token_sort_key(query);
        let mut best: Option<BestCandidates> = None;

        for (row, key) in self.keys.iter().enumerate() {
            let Some(key) = key else { continue };
            let score = sorted_ratio(&query, key);
            let row = row as u32;
            let replace = match &mut best {
                Some(current) if score == current.score => {
                    current.rows.push(row);
                    false
                }
                Some(current) => score > current.score,
                None => true,
            };
            if replace {
                best = Some(BestCandidates {
                    score,
                    rows: vec![row],
                });
            }
        }

        best
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[Option<&str>]) -> Vec<CanonicalName> {
        values
            .iter()
            .map(|value| match value {
                Some(name) => CanonicalName::Clean((*name).to_string()),
                None => CanonicalName::Unmatchable,
            })
            .collect()
    }

    #[test]
    fn picks_highest_score() {
        let index = BruteForceIndex::new(&names(&[Some("hari thapa"), Some("ram thapa")]));
        let best = index.best_candidates("thapa ram").unwrap();
        assert_eq!(best.score, 100.0);
        assert_eq!(best.rows, vec![1]);
    }

    #[test]
    fn collects_every_tied_row_in_order() {
        let index = BruteForceIndex::new(&names(&[
            Some("abce"),
            Some("zzzz"),
            Some("abcf"),
        ]));
        let best = index.best_candidates("abcd").unwrap();
        assert_eq!(best.score, 75.0);
        assert_eq!(best.rows, vec![0, 2]);
    }

    #[test]
    fn unmatchable_targets_are_never_candidates() {
        let index = BruteForceIndex::new(&names(&[None, None]));
        assert_eq!(index.len(), 2);
        assert!(index.best_candidates("ram").is_none());
        assert!(BruteForceIndex::new(&[]).is_empty());
    }
}
