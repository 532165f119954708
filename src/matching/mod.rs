//! Operation breakdown similarity: normalization, alignment, scoring and ranking.
//!
//! This module provides the core matching functionality:
//!
//! - [`normalize`]: Canonical form of operation sequences
//! - [`text`]: Text similarity of operation and machine names
//! - [`alignment`]: Weighted order-preserving alignment of two sequences
//! - [`scoring`]: Conversion of an alignment into 0-100 scores
//! - [`RankingEngine`]: Scores a candidate pool and keeps the top results
//! - [`enrich`]: Allocation ordering and attachment
//!
//! ## Matching Algorithm
//!
//! 1. **Normalization**: Names are case-folded and trimmed, operations sorted by sequence number
//! 2. **Pair similarity**: `0.6 * operation-name + 0.4 * machine-name` text similarity
//! 3. **Eligibility**: Only pairs at or above 0.5 may be aligned
//! 4. **Alignment**: Order-preserving one-to-one alignment maximizing total similarity
//! 5. **Score**: `100 * matched_weight / max(query_length, candidate_length)`, one decimal
//!
//! Ties are broken by the lower layout id so rankings do not depend on the
//! order in which candidates arrive.
//!
//! ## Example
//!
//! ```rust
//! use ob_matcher::core::operation::Operation;
//! use ob_matcher::matching::scoring::MatchScore;
//!
//! let query = vec![
//!     Operation::new("TACK SIDE SEAMS", "Zig Zag", 1),
//!     Operation::new("ATTACH ELASTIC", "Coverstitch", 2),
//! ];
//! let candidate = vec![Operation::new("TACK SIDE SEAMS", "Zig Zag", 1)];
//!
//! let score = MatchScore::calculate(&query, &candidate);
//! assert_eq!(score.similarity_score, 50.0);
//! ```

pub mod alignment;
pub mod engine;
pub mod enrich;
pub mod normalize;
pub mod scoring;
pub mod text;

pub use engine::{MatchingConfig, RankingEngine};
