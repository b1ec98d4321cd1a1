//! Normalization, similarity and ranking properties.

use proptest::prelude::*;
use tinytz::scoring::top_k;
use tinytz::util::normalize::name_tokens;
use tinytz::{edit_distance, normalize, similarity, Scored};

/// Free text with the characters that matter to normalization.
fn query_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z '()_.-]{0,24}").unwrap()
}

/// Normalized-looking names.
fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: Normalizing twice is the same as normalizing once.
    #[test]
    fn prop_normalize_idempotent(query in query_strategy()) {
        let once = normalize(&query);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Property: Normalized text is lowercase ASCII letters only.
    #[test]
    fn prop_normalize_alphabet(query in "\\PC{0,24}") {
        prop_assert!(normalize(&query).bytes().all(|b| b.is_ascii_lowercase()));
    }

    /// Property: Stored name tokens render to the normalized name.
    #[test]
    fn prop_name_tokens_concat(name in query_strategy()) {
        prop_assert_eq!(name_tokens(&name).concat(), normalize(&name));
    }

    /// Property: Similarity is symmetric.
    #[test]
    fn prop_similarity_symmetric(a in name_strategy(), b in name_strategy()) {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    /// Property: A string is as similar to itself as it is long.
    #[test]
    fn prop_self_similarity_is_length(a in name_strategy()) {
        prop_assert_eq!(edit_distance(&a, &a), 0);
        prop_assert_eq!(usize::from(similarity(&a, &a)), a.len());
    }

    /// Property: Similarity never exceeds the shorter length.
    #[test]
    fn prop_similarity_bounded(a in name_strategy(), b in name_strategy()) {
        prop_assert!(usize::from(similarity(&a, &b)) <= a.len().min(b.len()));
    }

    /// Property: Ranking is a stable descending sort truncated to k.
    #[test]
    fn prop_top_k_stable(scores in prop::collection::vec(0u8..8, 0..40), k in 0usize..50) {
        let candidates: Vec<Scored<usize>> = scores
            .iter()
            .enumerate()
            .map(|(index, &score)| Scored { index, score })
            .collect();
        let ranked = top_k(candidates, k);

        prop_assert_eq!(ranked.len(), k.min(scores.len()));
        for w in ranked.windows(2) {
            prop_assert!(w[0].score >= w[1].score);
            if w[0].score == w[1].score {
                prop_assert!(w[0].index < w[1].index);
            }
        }
    }
}

/// Self-similarity saturates instead of wrapping.
#[test]
fn test_self_similarity_saturates() {
    let long = "a".repeat(300);
    assert_eq!(similarity(&long, &long), u8::MAX);
}
