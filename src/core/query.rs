use serde::{Deserialize, Serialize};

use crate::core::allocation::Allocation;
use crate::core::breakdown::OperationBreakdown;
use crate::core::operation::Operation;
use crate::core::types::{LayoutId, TenantId};

/// Default number of results returned per search
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Default number of allocations attached per result
pub const DEFAULT_ALLOCATION_LIMIT: usize = 3;

fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

fn default_allocation_limit() -> usize {
    DEFAULT_ALLOCATION_LIMIT
}

/// A request to rank recorded breakdowns against a submitted one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub tenant_id: TenantId,

    pub style_type: String,

    /// The submitted breakdown
    pub query_operations: Vec<Operation>,

    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    #[serde(default = "default_allocation_limit")]
    pub allocation_limit: usize,

    #[serde(default)]
    pub include_allocations: bool,

    /// Candidates supplied by the caller instead of the candidate provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_override: Option<Vec<OperationBreakdown>>,

    /// Allocations supplied by the caller instead of the allocation provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation_override: Option<Vec<Allocation>>,
}

impl SearchQuery {
    pub fn new(
        tenant_id: TenantId,
        style_type: impl Into<String>,
        query_operations: Vec<Operation>,
    ) -> Self {
        Self {
            tenant_id,
            style_type: style_type.into(),
            query_operations,
            result_limit: DEFAULT_RESULT_LIMIT,
            allocation_limit: DEFAULT_ALLOCATION_LIMIT,
            include_allocations: false,
            candidate_override: None,
            allocation_override: None,
        }
    }

    #[must_use]
    pub fn with_result_limit(mut self, result_limit: usize) -> Self {
        self.result_limit = result_limit;
        self
    }

    /// Request allocation enrichment, keeping at most `allocation_limit` per result
    #[must_use]
    pub fn with_allocations(mut self, allocation_limit: usize) -> Self {
        self.include_allocations = true;
        self.allocation_limit = allocation_limit;
        self
    }

    #[must_use]
    pub fn with_candidate_override(mut self, candidates: Vec<OperationBreakdown>) -> Self {
        self.candidate_override = Some(candidates);
        self
    }

    #[must_use]
    pub fn with_allocation_override(mut self, allocations: Vec<Allocation>) -> Self {
        self.allocation_override = Some(allocations);
        self
    }
}

/// One ranked match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub layout_id: LayoutId,

    pub layout_code: String,

    /// Overall similarity, 0-100 with one decimal
    pub similarity_score: f64,

    /// Operation-name component of the score, 0-100
    pub operation_similarity: f64,

    /// Machine-name component of the score, 0-100
    pub machine_similarity: f64,

    /// Number of query operations aligned to a candidate operation
    pub matched_operations: usize,

    /// The candidate's operations as supplied, not normalized
    pub operations: Vec<Operation>,

    /// Present only when allocations were requested; empty when none exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocations: Option<Vec<Allocation>>,
}

/// Outcome of a search
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Size of the resolved candidate pool before truncation
    pub total_candidates: usize,

    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// True when the resolved candidate pool was empty
    pub fn is_empty(&self) -> bool {
        self.total_candidates == 0
    }

    pub fn best(&self) -> Option<&SearchResult> {
        self.results.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = SearchQuery::new(3, "BRIEF", vec![Operation::new("A", "B", 1)]);
        assert_eq!(query.result_limit, 10);
        assert_eq!(query.allocation_limit, 3);
        assert!(!query.include_allocations);
        assert!(query.candidate_override.is_none());
    }

    #[test]
    fn test_query_deserialize_applies_defaults() {
        let json = r#"{"tenant_id": 3, "style_type": "BRIEF", "query_operations": []}"#;
        let query: SearchQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.result_limit, DEFAULT_RESULT_LIMIT);
        assert_eq!(query.allocation_limit, DEFAULT_ALLOCATION_LIMIT);
        assert!(!query.include_allocations);
    }

    #[test]
    fn test_result_omits_allocations_when_not_requested() {
        let result = SearchResult {
            layout_id: LayoutId(1),
            layout_code: "L1".to_string(),
            similarity_score: 50.0,
            operation_similarity: 50.0,
            machine_similarity: 50.0,
            matched_operations: 1,
            operations: Vec::new(),
            allocations: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("allocations").is_none());

        let with_empty = SearchResult {
            allocations: Some(Vec::new()),
            ..result
        };
        let json = serde_json::to_value(&with_empty).unwrap();
        assert_eq!(json["allocations"], serde_json::json!([]));
    }

    #[test]
    fn test_empty_response() {
        let response = SearchResponse::default();
        assert!(response.is_empty());
        assert!(response.best().is_none());
    }
}
