//! Record linkage between a blocklist (source) and a customer ledger
//! (target).
//!
//! Source rows that carry a national identifier are joined to the ledger on
//! that identifier ([`exact_match`]). The rest are matched by canonical name
//! similarity ([`fuzzy_match`]). [`reconcile`] runs the whole pipeline and
//! returns both result tables with run statistics.

pub mod assemble;
pub mod cancel;
pub mod exact;
pub mod fuzzy;
pub mod index;
pub mod partition;
pub mod pipeline;
pub mod scoring;

pub use assemble::{RowPairs, assemble_matches};
pub use cancel::CancellationToken;
pub use exact::exact_match;
pub use fuzzy::{CANONICAL_NAME_COLUMN, FuzzyMatcher, FuzzyOutcome, ProgressFn, fuzzy_match};
pub use index::{BestCandidates, BruteForceIndex, CandidateIndex};
pub use partition::{KeyPartition, partition_by_key};
pub use pipeline::{Reconciler, Reconciliation, reconcile};
pub use scoring::{sorted_ratio, token_sort_key, token_sort_ratio};
