use std::cmp::Ordering;

use crate::core::operation::Operation;
use crate::core::types::LayoutId;
use crate::matching::alignment::{align, Alignment};
use crate::matching::normalize::normalize_operations;

/// Upper bound of every percentage score
pub const MAX_SCORE: f64 = 100.0;

/// Safely convert usize to f64 for percentage calculations
///
/// Operation counts are far below the 2^53 limit of exact f64 integers.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Round to one decimal place
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `100 * weight / denominator`, clamped to `[0, 100]` and rounded to one decimal.
///
/// A zero denominator (both sequences empty) scores 0.
#[must_use]
pub fn percentage(weight: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let raw = MAX_SCORE * weight / count_to_f64(denominator);
    round_to_tenth(raw.clamp(0.0, MAX_SCORE))
}

/// Similarity scores of one candidate against the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    /// Overall similarity, 0-100 with one decimal
    pub similarity_score: f64,

    /// Operation-name component over the aligned pairs, 0-100
    pub operation_similarity: f64,

    /// Machine-name component over the aligned pairs, 0-100
    pub machine_similarity: f64,

    /// Number of aligned pairs
    pub matched_operations: usize,

    /// Raw sum of combined pair similarity
    pub matched_weight: f64,
}

impl MatchScore {
    /// Finalize an alignment into scores.
    ///
    /// Dividing by the larger sequence length penalizes missing and extra
    /// operations alike.
    #[must_use]
    pub fn from_alignment(alignment: &Alignment) -> Self {
        let denominator = alignment.max_length();
        Self {
            similarity_score: percentage(alignment.matched_weight, denominator),
            operation_similarity: percentage(alignment.operation_weight(), denominator),
            machine_similarity: percentage(alignment.machine_weight(), denominator),
            matched_operations: alignment.pairs.len(),
            matched_weight: alignment.matched_weight,
        }
    }

    /// Normalize both sequences, align them and score the result
    #[must_use]
    pub fn calculate(query: &[Operation], candidate: &[Operation]) -> Self {
        let query = normalize_operations(query);
        let candidate = normalize_operations(candidate);
        Self::from_alignment(&align(&query, &candidate))
    }
}

/// Ranking order: higher score first, then lower layout id.
///
/// Never depends on the order candidates were produced in.
#[must_use]
pub fn rank_order(a_score: f64, a_layout: LayoutId, b_score: f64, b_layout: LayoutId) -> Ordering {
    b_score
        .total_cmp(&a_score)
        .then_with(|| a_layout.cmp(&b_layout))
}
