//! Token-set similarity scoring on the 0-100 integer scale.
//!
//! Implemented in-repo rather than pulled from a fuzzy-matching crate:
//! the match threshold was tuned against exactly this scoring, so its
//! behavior has to stay fixed.

use std::collections::BTreeSet;

/// Score two normalized strings by comparing their token sets.
///
/// Builds the sorted intersection and the two sorted differences, then
/// takes the best insert/delete edit ratio among the intersection alone
/// and the intersection extended by each difference. A string whose
/// tokens are a subset of the other's scores 100, which is what OCR
/// truncation and "County" suffix noise require.
pub(crate) fn token_set_ratio(a: &str, b: &str) -> u8 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let shared: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let sect = shared.join(" ");
    let sect_a = join_groups(&shared, &only_a);
    let sect_b = join_groups(&shared, &only_b);

    [
        indel_ratio(&sect, &sect_a),
        indel_ratio(&sect, &sect_b),
        indel_ratio(&sect_a, &sect_b),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

fn join_groups(shared: &[&str], rest: &[&str]) -> String {
    let mut joined = shared.join(" ");
    if !rest.is_empty() {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(&rest.join(" "));
    }
    joined
}

/// Similarity ratio from insert/delete edit distance, rounded half-up
/// onto the 0-100 integer scale.
fn indel_ratio(a: &str, b: &str) -> u8 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100;
    }
    let distance = indel_distance(a, b);
    (((total - distance) as f64 / total as f64) * 100.0).round() as u8
}

/// Edit distance where a substitution costs a delete plus an insert.
fn indel_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, &a_ch) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let keep_or_replace = if a_ch == b_ch { prev[j] } else { prev[j] + 2 };
            curr[j + 1] = keep_or_replace
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}
