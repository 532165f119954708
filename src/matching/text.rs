//! Text similarity between operation and machine names.
//!
//! Similarity is a normalized Levenshtein distance over Unicode scalar values,
//! gated by a shared-substring check: two strings with no common substring of
//! [`MIN_SHARED_SUBSTRING`] characters score 0 regardless of edit distance.

use std::collections::HashSet;

/// Minimum length of a common substring for two names to be considered related
pub const MIN_SHARED_SUBSTRING: usize = 2;

/// Similarity of two already-normalized strings in `[0, 1]`.
///
/// Returns 1.0 only for identical strings. Otherwise returns
/// `1 - distance / max_len`, or 0.0 when the strings share no substring of
/// [`MIN_SHARED_SUBSTRING`] characters.
#[must_use]
pub fn text_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if !shares_substring(&a, &b, MIN_SHARED_SUBSTRING) {
        return 0.0;
    }

    let max_len = a.len().max(b.len());
    let distance = levenshtein(&a, &b);

    // a != b guarantees distance >= 1, so the result stays below 1.0
    (1.0 - count_to_f64(distance) / count_to_f64(max_len)).clamp(0.0, 1.0)
}

/// Edit distance (insertions, deletions, substitutions) between two char slices
#[must_use]
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// True if `a` and `b` have a common substring of exactly `len` characters
fn shares_substring(a: &[char], b: &[char], len: usize) -> bool {
    if len == 0 {
        return true;
    }
    if a.len() < len || b.len() < len {
        return false;
    }

    let windows: HashSet<&[char]> = b.windows(len).collect();
    a.windows(len).any(|w| windows.contains(w))
}

#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}
