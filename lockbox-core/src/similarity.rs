//! Approximate string similarity on a 0-100 integer scale.
//!
//! Two modes over normalized text: `partial` slides the shorter string
//! across the longer and keeps the best window score, `token-set`
//! compares whitespace token sets regardless of order or duplication.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

use crate::config::SimilarityMode;

/// Base ratio: normalized Levenshtein similarity scaled to 0-100.
fn ratio(a: &str, b: &str) -> u8 {
    (normalized_levenshtein(a, b) * 100.0).round() as u8
}

/// Score `name` against `text` in the given mode.
pub fn score(mode: SimilarityMode, name: &str, text: &str) -> u8 {
    match mode {
        SimilarityMode::Partial => partial_ratio(name, text),
        SimilarityMode::TokenSet => token_set_ratio(name, text),
    }
}

/// Best base ratio over every window of the shorter string's length in
/// the longer string. An entity name appearing verbatim anywhere in a
/// line scores 100; near-contiguous fragments score close to it.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let long_chars: Vec<char> = long.chars().collect();
    let width = short.chars().count();

    let mut best = 0;
    for start in 0..=(long_chars.len() - width) {
        let window: String = long_chars[start..start + width].iter().collect();
        best = best.max(ratio(short, &window));
        if best == 100 {
            break;
        }
    }
    best
}

/// Token-set comparison: the sorted shared tokens and each side's
/// leftover tokens are compared pairwise and the best ratio wins, so a
/// name whose words all appear in the line scores 100 regardless of
/// word order or repetition.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let shared: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let base = shared.join(" ");
    let full_a = join_parts(&base, &only_a);
    let full_b = join_parts(&base, &only_b);

    let mut best = ratio(&full_a, &full_b);
    if !base.is_empty() {
        best = best.max(ratio(&base, &full_a));
        best = best.max(ratio(&base, &full_b));
    }
    best
}

fn join_parts(base: &str, rest: &[&str]) -> String {
    if rest.is_empty() {
        return base.to_string();
    }
    if base.is_empty() {
        return rest.join(" ");
    }
    format!("{} {}", base, rest.join(" "))
}
