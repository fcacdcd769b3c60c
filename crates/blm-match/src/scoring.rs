//! Token-sort similarity.
//!
//! Both names are split on whitespace, their tokens sorted and re-joined with
//! single spaces, and the results compared with the normalized Indel
//! similarity: `100 * 2 * LCS(a, b) / (|a| + |b|)`, lengths in characters.
//! Word order therefore never matters; `ram kumar sharma` and
//! `sharma kumar ram` score 100.

use rapidfuzz::distance::indel;

/// Sorts the whitespace-separated tokens of `name`.
pub fn token_sort_key(name: &str) -> String {
    let mut tokens: Vec<&str> = name.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Similarity (0..=100) of two strings that are already token-sorted.
///
/// Two empty strings score 100. The division is done once on exact integer
/// counts, so a score that is mathematically equal to an integer threshold
/// compares equal to it.
pub fn sorted_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100.0;
    }
    let similarity = indel::similarity(a.chars(), b.chars());
    (100 * similarity) as f64 / total as f64
}

/// Token-sort similarity (0..=100) of two canonical names.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    sorted_ratio(&token_sort_key(a), &token_sort_key(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_order_is_ignored() {
        assert_eq!(token_sort_ratio("ram kumar sharma", "sharma kumar ram"), 100.0);
        assert_eq!(token_sort_key("  sharma   ram kumar "), "kumar ram sharma");
    }

    #[test]
    fn single_substitution() {
        // LCS 3 of 4 + 4 characters.
        assert_eq!(token_sort_ratio("abcd", "abce"), 75.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(token_sort_ratio("abc", "xyz"), 0.0);
        assert_eq!(token_sort_ratio("abc", ""), 0.0);
    }

    #[test]
    fn empty_strings_are_identical() {
        assert_eq!(token_sort_ratio("", ""), 100.0);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // "é" is two bytes but one character.
        assert_eq!(token_sort_ratio("é", "e"), 0.0);
        assert_eq!(token_sort_ratio("éa", "ea"), 50.0);
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = "rama bahadura thapa";
        let b = "rama thapa";
        assert_eq!(token_sort_ratio(a, b), token_sort_ratio(b, a));
    }
}
