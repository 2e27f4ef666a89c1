//! Lexical agreement between candidates.
//!
//! Each candidate is reduced to a keyword set (its 20 most frequent
//! alphabetic tokens longer than three characters, lower-cased). The
//! agreement score is the mean Jaccard similarity over all unordered pairs.

use std::collections::{HashMap, HashSet};

/// Number of keywords kept per candidate
pub const TOP_KEYWORDS: usize = 20;

/// Extract the keyword set of a text.
///
/// Tokens are maximal runs of alphabetic characters. Ranking is by
/// frequency, ties broken by first occurrence, so the result is
/// deterministic for a given text.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for (position, token) in text
        .split(|c: char| !c.is_alphabetic())
        .filter(|t| t.chars().count() > 3)
        .enumerate()
    {
        let entry = counts
            .entry(token.to_lowercase())
            .or_insert((0, position));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));
    ranked
        .into_iter()
        .take(TOP_KEYWORDS)
        .map(|(word, _)| word)
        .collect()
}

/// Jaccard similarity `|A ∩ B| / |A ∪ B|`.
///
/// Two empty sets carry no evidence of agreement and score 0.0.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Mean pairwise Jaccard similarity of the texts' keyword sets.
///
/// Fewer than two texts cannot disagree, so the score is 1.0.
pub fn agreement_score<S: AsRef<str>>(texts: &[S]) -> f64 {
    if texts.len() < 2 {
        return 1.0;
    }

    let sets: Vec<HashSet<String>> = texts.iter().map(|t| extract_keywords(t.as_ref())).collect();

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..sets.len() {
        for j in (i + 1)..sets.len() {
            total += jaccard(&sets[i], &sets[j]);
            pairs += 1;
        }
    }

    (total / pairs as f64).clamp(0.0, 1.0)
}
