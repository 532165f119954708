use std::sync::Arc;

use rayon::prelude::*;

use crate::core::breakdown::OperationBreakdown;
use crate::core::operation::Operation;
use crate::core::query::{SearchQuery, SearchResponse, SearchResult};
use crate::core::types::LayoutId;
use crate::matching::alignment::align;
use crate::matching::normalize::normalize_operations;
use crate::matching::scoring::{rank_order, MatchScore};

/// Configuration for the ranking engine
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Score candidates on a worker pool instead of the calling thread
    pub parallel: bool,

    /// Size of a dedicated worker pool; `None` uses the global pool sized to available cores
    pub worker_threads: Option<usize>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            worker_threads: None,
        }
    }
}

/// Score of one candidate, produced independently per worker
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate {
    /// Position of the candidate in the pool
    pub index: usize,
    pub layout_id: LayoutId,
    pub score: MatchScore,
}

/// Scores a candidate pool against a query and keeps the best matches
#[derive(Debug, Clone)]
pub struct RankingEngine {
    config: MatchingConfig,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self {
            config: MatchingConfig::default(),
            pool: None,
        }
    }

    /// Create an engine with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a dedicated worker pool was requested and cannot be built.
    pub fn with_config(config: MatchingConfig) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = match config.worker_threads {
            Some(threads) if config.parallel => Some(Arc::new(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("ob-score-{i}"))
                    .build()?,
            )),
            _ => None,
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Rank `candidates` against the query's operations, keeping `query.result_limit` results
    pub fn rank(&self, query: &SearchQuery, candidates: &[OperationBreakdown]) -> SearchResponse {
        self.rank_operations(&query.query_operations, candidates, query.result_limit)
    }

    /// Rank `candidates` against `query_operations`.
    ///
    /// Results are ordered by score descending then layout id ascending, and
    /// carry each candidate's operations exactly as supplied. The response
    /// reports the full pool size regardless of `limit`.
    pub fn rank_operations(
        &self,
        query_operations: &[Operation],
        candidates: &[OperationBreakdown],
        limit: usize,
    ) -> SearchResponse {
        let normalized_query = normalize_operations(query_operations);
        let mut scored = self.score_candidates(&normalized_query, candidates);

        scored.sort_by(|a, b| {
            rank_order(
                a.score.similarity_score,
                a.layout_id,
                b.score.similarity_score,
                b.layout_id,
            )
            .then_with(|| {
                candidates[a.index]
                    .layout_code
                    .cmp(&candidates[b.index].layout_code)
            })
        });

        let results = scored
            .into_iter()
            .take(limit)
            .map(|s| {
                let candidate = &candidates[s.index];
                SearchResult {
                    layout_id: candidate.layout_id,
                    layout_code: candidate.layout_code.clone(),
                    similarity_score: s.score.similarity_score,
                    operation_similarity: s.score.operation_similarity,
                    machine_similarity: s.score.machine_similarity,
                    matched_operations: s.score.matched_operations,
                    operations: candidate.operations.clone(),
                    allocations: None,
                }
            })
            .collect();

        SearchResponse {
            total_candidates: candidates.len(),
            results,
        }
    }

    /// Score every candidate against an already-normalized query.
    ///
    /// Output order follows the candidate pool; callers sort afterwards.
    pub fn score_candidates(
        &self,
        normalized_query: &[Operation],
        candidates: &[OperationBreakdown],
    ) -> Vec<ScoredCandidate> {
        let score_one = |(index, candidate): (usize, &OperationBreakdown)| {
            let normalized = normalize_operations(&candidate.operations);
            ScoredCandidate {
                index,
                layout_id: candidate.layout_id,
                score: MatchScore::from_alignment(&align(normalized_query, &normalized)),
            }
        };

        if !self.config.parallel || candidates.len() < 2 {
            return candidates.iter().enumerate().map(score_one).collect();
        }

        let run = || -> Vec<ScoredCandidate> {
            candidates.par_iter().enumerate().map(score_one).collect()
        };

        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}
