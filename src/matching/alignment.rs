//! Pairwise alignment of two operation sequences.
//!
//! Every (query, candidate) operation pair gets a field-weighted similarity.
//! Pairs at or above [`MATCH_THRESHOLD`] are eligible, and a dynamic program
//! picks the order-preserving one-to-one alignment with the largest total
//! similarity (a weighted longest common subsequence). A strong early match
//! therefore never blocks a stronger set of later matches.
//!
//! Both sequences are expected to be normalized (see
//! [`normalize_operations`](super::normalize::normalize_operations)).

use crate::core::operation::Operation;
use crate::matching::text::text_similarity;

/// Weight of the operation-name similarity in a pair's combined similarity
pub const OPERATION_WEIGHT: f64 = 0.6;

/// Weight of the machine-name similarity in a pair's combined similarity
pub const MACHINE_WEIGHT: f64 = 0.4;

/// Minimum combined similarity for a pair to be aligned
pub const MATCH_THRESHOLD: f64 = 0.5;

/// Similarity of one query operation against one candidate operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairSimilarity {
    /// Operation-name similarity in `[0, 1]`
    pub operation: f64,

    /// Machine-name similarity in `[0, 1]`
    pub machine: f64,

    /// `OPERATION_WEIGHT * operation + MACHINE_WEIGHT * machine`
    pub combined: f64,
}

impl PairSimilarity {
    #[must_use]
    pub fn between(query: &Operation, candidate: &Operation) -> Self {
        let operation = text_similarity(&query.operation_name, &candidate.operation_name);
        let machine = text_similarity(&query.machine_name, &candidate.machine_name);
        Self {
            operation,
            machine,
            combined: OPERATION_WEIGHT * operation + MACHINE_WEIGHT * machine,
        }
    }

    /// Whether this pair may take part in an alignment
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.combined >= MATCH_THRESHOLD
    }
}

/// One aligned (query, candidate) operation pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPair {
    /// Position in the normalized query sequence
    pub query_index: usize,

    /// Position in the normalized candidate sequence
    pub candidate_index: usize,

    pub similarity: PairSimilarity,
}

/// Result of aligning a query sequence against a candidate sequence
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Alignment {
    /// Sum of combined similarity over the chosen pairs
    pub matched_weight: f64,

    pub query_length: usize,

    pub candidate_length: usize,

    /// Chosen pairs, increasing in both indices
    pub pairs: Vec<AlignedPair>,
}

impl Alignment {
    /// Sum of operation-name similarity over the chosen pairs
    pub fn operation_weight(&self) -> f64 {
        self.pairs.iter().map(|p| p.similarity.operation).sum()
    }

    /// Sum of machine-name similarity over the chosen pairs
    pub fn machine_weight(&self) -> f64 {
        self.pairs.iter().map(|p| p.similarity.machine).sum()
    }

    /// Larger of the two sequence lengths, the score denominator
    pub fn max_length(&self) -> usize {
        self.query_length.max(self.candidate_length)
    }
}

/// Align two normalized operation sequences.
///
/// `dp[i][j]` holds the best total similarity aligning the first `i` query
/// operations with the first `j` candidate operations. The traceback prefers
/// the diagonal, so among equally weighted alignments the result is fixed by
/// the inputs alone.
#[must_use]
#[allow(clippy::float_cmp)] // traceback compares dp cells against the exact sums that produced them
pub fn align(query: &[Operation], candidate: &[Operation]) -> Alignment {
    let n = query.len();
    let m = candidate.len();

    if n == 0 || m == 0 {
        return Alignment {
            matched_weight: 0.0,
            query_length: n,
            candidate_length: m,
            pairs: Vec::new(),
        };
    }

    // Pair similarities, row-major by query index
    let similarities: Vec<PairSimilarity> = query
        .iter()
        .flat_map(|q| candidate.iter().map(move |c| PairSimilarity::between(q, c)))
        .collect();
    let pair = |i: usize, j: usize| &similarities[i * m + j];

    let width = m + 1;
    let mut dp = vec![0.0f64; (n + 1) * width];

    for i in 1..=n {
        for j in 1..=m {
            let skip_query = dp[(i - 1) * width + j];
            let skip_candidate = dp[i * width + j - 1];
            let mut best = skip_query.max(skip_candidate);

            let sim = pair(i - 1, j - 1);
            if sim.is_eligible() {
                let take = dp[(i - 1) * width + j - 1] + sim.combined;
                if take > best {
                    best = take;
                }
            }
            dp[i * width + j] = best;
        }
    }

    // Traceback
    let mut pairs = Vec::new();
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        let current = dp[i * width + j];
        let sim = pair(i - 1, j - 1);

        if sim.is_eligible() && current == dp[(i - 1) * width + j - 1] + sim.combined {
            pairs.push(AlignedPair {
                query_index: i - 1,
                candidate_index: j - 1,
                similarity: *sim,
            });
            i -= 1;
            j -= 1;
        } else if current == dp[(i - 1) * width + j] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    pairs.reverse();

    Alignment {
        matched_weight: dp[n * width + m],
        query_length: n,
        candidate_length: m,
        pairs,
    }
}
