use super::*;
use crate::bigram::{bigrams, dice};
use crate::tokenizer::{normalize_term, tokenize};
use std::collections::{BTreeSet, HashSet};

mod common {
    use super::*;

    pub(super) fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    pub(super) fn grams(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }
}

mod tokenizing {
    use super::common::set;
    use super::*;

    #[test]
    fn test_tokenize_splits_and_lowercases() {
        assert_eq!(tokenize("The cat sat"), set(&["the", "cat", "sat"]));
    }

    #[test]
    fn test_tokenize_strips_punctuation_and_digits() {
        assert_eq!(
            tokenize("Hello, World! 42 times-2 (again)"),
            set(&["hello", "world", "times", "again"])
        );
    }

    #[test]
    fn test_tokenize_strips_every_symbol() {
        let symbols = "~`!@#$%^&*()-_+={}[]|\\;:\"'<>,./?0123456789";
        assert!(tokenize(symbols).is_empty());
        assert_eq!(tokenize(&format!("a{symbols}b")), set(&["a", "b"]));
    }

    #[test]
    fn test_tokenize_empty_and_blank_rows() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n ").is_empty());
    }

    #[test]
    fn test_tokenize_deduplicates() {
        assert_eq!(tokenize("Cat cat CAT"), set(&["cat"]));
    }

    #[test]
    fn test_tokenize_keeps_non_ascii_letters() {
        assert_eq!(tokenize("ÉCOLE naïve"), set(&["école", "naïve"]));
    }

    #[test]
    fn test_tokenize_is_idempotent() {
        for row in ["The cat sat", "It's 9:30 -- time_to go!", "Ünïcödé  WORDS", ""] {
            let once = tokenize(row);
            let joined = once.iter().cloned().collect::<Vec<_>>().join(" ");
            assert_eq!(tokenize(&joined), once, "row: {row:?}");
        }
    }

    #[test]
    fn test_normalize_term_only_lowercases() {
        assert_eq!(normalize_term("Cat's"), "cat's");
        assert_eq!(normalize_term("R2D2"), "r2d2");
    }
}

mod bigram_similarity {
    use super::common::grams;
    use super::*;

    #[test]
    fn test_bigrams_of_word() {
        assert_eq!(bigrams("color"), grams(&["co", "ol", "lo", "or"]));
        assert_eq!(bigrams("colour"), grams(&["co", "ol", "lo", "ou", "ur"]));
    }

    #[test]
    fn test_bigrams_are_a_set() {
        assert_eq!(bigrams("aaaa"), grams(&["aa"]));
        assert_eq!(bigrams("abab"), grams(&["ab", "ba"]));
    }

    #[test]
    fn test_bigrams_short_token_fallback() {
        assert_eq!(bigrams("a"), grams(&["a"]));
        assert_eq!(bigrams(""), grams(&[""]));
    }

    #[test]
    fn test_bigrams_use_characters() {
        assert_eq!(bigrams("né"), grams(&["né"]));
        assert_eq!(bigrams("été"), grams(&["ét", "té"]));
    }

    #[test]
    fn test_dice_of_identical_sets() {
        let a = bigrams("colour");
        assert_eq!(dice(&a, &a), 1.0);
        assert_eq!(dice(&bigrams("a"), &bigrams("a")), 1.0);
    }

    #[test]
    fn test_dice_of_disjoint_sets() {
        assert_eq!(dice(&bigrams("cat"), &bigrams("dog")), 0.0);
    }

    #[test]
    fn test_dice_of_empty_sets() {
        let empty = HashSet::new();
        assert_eq!(dice(&empty, &empty), 0.0);
        assert_eq!(dice(&empty, &bigrams("cat")), 0.0);
    }

    #[test]
    fn test_dice_color_colour() {
        // 3 shared bigrams out of 4 + 5.
        let score = dice(&bigrams("color"), &bigrams("colour"));
        assert_eq!(score, 6.0 / 9.0);
    }

    #[test]
    fn test_dice_is_symmetric_and_bounded() {
        let words = ["color", "colour", "colors", "a", "cat", "catalog", "dog", ""];
        for l in words {
            for r in words {
                let (a, b) = (bigrams(l), bigrams(r));
                let score = dice(&a, &b);
                assert_eq!(score, dice(&b, &a), "{l:?} vs {r:?}");
                assert!((0.0..=1.0).contains(&score), "{l:?} vs {r:?}: {score}");
            }
        }
    }
}

mod search_config {
    use super::*;
    use aeon_core::types::AppConfig;

    #[test]
    fn test_default_threshold() {
        let config = SearchConfig::default();
        assert_eq!(config.similarity_threshold(), 0.6);
        assert_eq!(config.default_mode(), MatchMode::Exact);
    }

    #[test]
    fn test_threshold_bounds() {
        SearchConfig::new(1.0).unwrap();
        SearchConfig::new(0.01).unwrap();

        for invalid in [0.0, -0.5, 1.5, f64::NAN] {
            let err = SearchConfig::new(invalid).unwrap_err();
            assert!(matches!(err, SearchError::InvalidThreshold(_)));
        }
    }

    #[test]
    fn test_from_app_config_replaces_invalid_threshold() {
        let mut app = AppConfig::default();
        app.indexing.similarity_threshold = 3.0;
        app.query.default_mode = MatchMode::Fuzzy;

        let config = SearchConfig::from(&app);
        assert_eq!(config.similarity_threshold(), 0.6);
        assert_eq!(config.default_mode(), MatchMode::Fuzzy);
    }
}

mod search_query {
    use super::*;

    #[test]
    fn test_parse_splits_on_whitespace() {
        let query = SearchQuery::parse("  cat\tsat  ", MatchMode::Fuzzy);
        assert_eq!(query.terms(), &["cat".to_string(), "sat".to_string()]);
        assert_eq!(query.mode(), MatchMode::Fuzzy);
    }

    #[test]
    fn test_constructors_set_mode() {
        assert_eq!(SearchQuery::exact(["a"]).mode(), MatchMode::Exact);
        assert_eq!(SearchQuery::fuzzy(["a"]).mode(), MatchMode::Fuzzy);
    }
}
