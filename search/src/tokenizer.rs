//! Row tokenization.

use std::collections::BTreeSet;

/// Punctuation and symbols replaced by a space before splitting.
const STRIPPED: &[char] = &[
    '~', '`', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '-', '_', '+', '=', '{', '}', '[',
    ']', '|', '\\', ';', ':', '"', '\'', '<', '>', ',', '.', '/', '?',
];

fn is_stripped(c: char) -> bool {
    c.is_ascii_digit() || STRIPPED.contains(&c)
}

/// Replaces stripped characters with spaces and lowercases the result.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| if is_stripped(c) { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Splits a row into its set of normalized tokens.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Lowercases a query term. Query terms are taken as already split words,
/// so no characters are stripped.
pub fn normalize_term(term: &str) -> String {
    term.to_lowercase()
}
