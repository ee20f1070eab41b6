//! Token-set similarity between short learnings
//!
//! Both strings are case-folded, split on whitespace, and stripped of
//! punctuation at token boundaries (`"queries."` → `"queries"`, while
//! `"async/await"` stays whole). The score is the Dice coefficient over the
//! two token sets, `2·|A∩B| / (|A|+|B|)`, so word order does not matter and a
//! couple of extra words only lower the score slightly.

use std::collections::HashSet;

/// Normalized tokens of a learning
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect()
}

/// Similarity in `[0, 1]`; `1.0` for identical token sets, `0.0` for disjoint ones
pub fn similarity(a: &str, b: &str) -> f32 {
    let a_tokens = tokenize(a);
    let b_tokens = tokenize(b);

    if a_tokens.is_empty() && b_tokens.is_empty() {
        return 1.0;
    }

    let total = a_tokens.len() + b_tokens.len();
    let shared = a_tokens.intersection(&b_tokens).count();
    (2 * shared) as f32 / total as f32
}
