use std::sync::Arc;
use std::time::Instant;

use futures_util::future::try_join_all;
use tracing::{debug, info};

use crate::catalog::provider::{AllocationProvider, CandidateProvider};
use crate::catalog::store::OperationCatalog;
use crate::core::query::{SearchQuery, SearchResponse};
use crate::matching::engine::RankingEngine;
use crate::matching::enrich::enrich;
use crate::search::error::SearchError;
use crate::search::source::{AllocationSource, CandidateSource};
use crate::utils::validation::validate_query;

/// Resolves candidates, ranks them and attaches allocations for one query at a time.
///
/// Holds no per-request state; concurrent searches share only the providers.
#[derive(Clone)]
pub struct SearchService {
    candidates: Arc<dyn CandidateProvider>,
    allocations: Arc<dyn AllocationProvider>,
    engine: RankingEngine,
}

impl SearchService {
    pub fn new(
        candidates: Arc<dyn CandidateProvider>,
        allocations: Arc<dyn AllocationProvider>,
    ) -> Self {
        Self {
            candidates,
            allocations,
            engine: RankingEngine::new(),
        }
    }

    /// Serve both candidates and allocations from one catalog
    pub fn from_catalog(catalog: Arc<OperationCatalog>) -> Self {
        Self::new(catalog.clone(), catalog)
    }

    #[must_use]
    pub fn with_engine(mut self, engine: RankingEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn engine(&self) -> &RankingEngine {
        &self.engine
    }

    /// Rank the recorded breakdowns most similar to the query's operations.
    ///
    /// An empty candidate pool is not an error: the response has
    /// `total_candidates == 0` and no results. Allocations are fetched only
    /// for results that survive truncation.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidQuery` before any provider call if the
    /// query is malformed, and a provider-tagged error if a provider fails.
    pub async fn search(&self, query: SearchQuery) -> Result<SearchResponse, SearchError> {
        validate_query(&query)?;

        let SearchQuery {
            tenant_id,
            style_type,
            query_operations,
            result_limit,
            allocation_limit,
            include_allocations,
            candidate_override,
            allocation_override,
        } = query;

        let source = CandidateSource::select(tenant_id, &style_type, candidate_override);
        debug!(
            "Resolving candidates for tenant {} style type '{}' from {}",
            tenant_id,
            style_type,
            source.data_source()
        );
        let candidates = source.resolve(self.candidates.as_ref()).await?;

        if candidates.is_empty() {
            info!(
                "No operation breakdowns for tenant {} style type '{}'",
                tenant_id, style_type
            );
            return Ok(SearchResponse::default());
        }

        let pool_size = candidates.len();
        let engine = self.engine.clone();
        let started = Instant::now();
        let mut response = tokio::task::spawn_blocking(move || {
            engine.rank_operations(&query_operations, &candidates, result_limit)
        })
        .await
        .map_err(|e| SearchError::ScoringAborted(e.to_string()))?;
        debug!(
            "Scored {} candidates in {:.2?}",
            pool_size,
            started.elapsed()
        );

        if include_allocations {
            let allocations = AllocationSource::select(allocation_override);
            debug!(
                "Fetching allocations for {} results from {}",
                response.results.len(),
                allocations.data_source()
            );

            let fetched = try_join_all(
                response
                    .results
                    .iter()
                    .map(|result| allocations.fetch(result.layout_id, self.allocations.as_ref())),
            )
            .await?;

            response.results = std::mem::take(&mut response.results)
                .into_iter()
                .zip(fetched)
                .map(|(result, allocations)| enrich(result, allocations, allocation_limit))
                .collect();
        }

        info!(
            "Returning {} of {} candidates (best score {})",
            response.results.len(),
            response.total_candidates,
            response
                .best()
                .map_or_else(|| "n/a".to_string(), |r| format!("{:.1}", r.similarity_score))
        );

        Ok(response)
    }
}
