//! Bigram decomposition and Dice similarity.

use std::collections::HashSet;

pub type Bigrams = HashSet<String>;

/// Returns the set of 2-character substrings of `token`.
///
/// Tokens shorter than two characters yield a set holding the token itself.
pub fn bigrams(token: &str) -> Bigrams {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < 2 {
        return HashSet::from([token.to_owned()]);
    }

    chars.windows(2).map(|pair| pair.iter().collect()).collect()
}

/// Dice's coefficient, `2 * |a ∩ b| / (|a| + |b|)`. Zero when both sets are empty.
pub fn dice(a: &Bigrams, b: &Bigrams) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let shared = small.iter().filter(|gram| large.contains(*gram)).count();

    (2 * shared) as f64 / total as f64
}
