//! JSON request and response bodies of the search operation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::allocation::Allocation;
use crate::core::operation::Operation;
use crate::core::query::{
    SearchQuery, SearchResponse, SearchResult, DEFAULT_ALLOCATION_LIMIT, DEFAULT_RESULT_LIMIT,
};
use crate::core::types::TenantId;
use crate::parsing::datasource::{filter_by_style_type, group_rows, OperationRow};
use crate::search::{SearchError, SearchService};
use crate::utils::validation::validate_query;

/// Message of a reply with at least one candidate
pub const SEARCH_SUCCESSFUL: &str = "Search successful";

/// Message of a reply whose candidate pool was empty
pub const NO_BREAKDOWNS_FOUND: &str = "No operation breakdowns found";

fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

fn default_allocation_limit() -> usize {
    DEFAULT_ALLOCATION_LIMIT
}

/// A search request as submitted by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub tenant_id: TenantId,

    pub style_type: String,

    /// Attach allocations to each result
    #[serde(default)]
    pub allocation_data: bool,

    #[serde(default = "default_result_limit")]
    pub no_of_results: usize,

    #[serde(default = "default_allocation_limit")]
    pub no_of_allocations: usize,

    /// The submitted breakdown
    pub operation_data: Vec<Operation>,

    /// Candidate rows supplied instead of the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ob_datasource: Option<Vec<OperationRow>>,

    /// Allocations supplied instead of the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation_datasource: Option<Vec<Allocation>>,
}

impl SearchRequest {
    /// Map the request onto a query field by field.
    ///
    /// Datasource rows are narrowed to the request's style type and grouped
    /// into breakdowns; the search itself never filters override data.
    pub fn into_query(self) -> SearchQuery {
        self.into_prepared().query
    }

    /// Map the request onto a query, remembering whether it supplied its own
    /// candidate rows.
    pub fn into_prepared(self) -> PreparedSearch {
        let datasource = self.ob_datasource.is_some();
        let candidate_override = self
            .ob_datasource
            .map(|rows| group_rows(filter_by_style_type(rows, &self.style_type)));

        PreparedSearch {
            query: SearchQuery {
                tenant_id: self.tenant_id,
                style_type: self.style_type,
                query_operations: self.operation_data,
                result_limit: self.no_of_results,
                allocation_limit: self.no_of_allocations,
                include_allocations: self.allocation_data,
                candidate_override,
                allocation_override: self.allocation_datasource,
            },
            datasource,
        }
    }
}

/// A query together with the mode of the request it came from
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSearch {
    pub query: SearchQuery,

    /// The request supplied `ob_datasource`; candidates never come from a provider
    pub datasource: bool,
}

impl PreparedSearch {
    /// Query with candidates from the providers
    pub fn provider(query: SearchQuery) -> Self {
        Self {
            query,
            datasource: false,
        }
    }

    /// Run the search.
    ///
    /// A datasource request whose rows are empty, or left empty by the style
    /// filter, has an empty candidate pool and yields an empty response.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidQuery` for a malformed query, otherwise
    /// whatever [`SearchService::search`] returns.
    pub async fn run(self, service: &SearchService) -> Result<SearchResponse, SearchError> {
        let exhausted = self
            .query
            .candidate_override
            .as_ref()
            .map_or(true, Vec::is_empty);

        if self.datasource && exhausted {
            validate_query(&self.query)?;
            debug!(
                "No datasource rows for style type '{}'; skipping search",
                self.query.style_type
            );
            return Ok(SearchResponse::default());
        }

        service.search(self.query).await
    }
}

/// A search reply as returned to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReply {
    pub message: String,

    pub allocation_data: bool,

    /// Number of candidates considered
    pub total_obs: usize,

    /// Number of results returned
    pub no_of_results: usize,

    /// Wall-clock seconds spent on the search
    pub process_time: f64,

    pub results: Vec<SearchResult>,
}

impl SearchReply {
    pub fn from_response(response: SearchResponse, allocation_data: bool, elapsed: Duration) -> Self {
        let message = if response.is_empty() {
            NO_BREAKDOWNS_FOUND
        } else {
            SEARCH_SUCCESSFUL
        };

        Self {
            message: message.to_string(),
            allocation_data,
            total_obs: response.total_candidates,
            no_of_results: response.results.len(),
            process_time: elapsed.as_secs_f64(),
            results: response.results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::OperationCatalog;
    use crate::core::types::LayoutId;

    const REQUEST: &str = r#"{
        "tenant_id": 3,
        "style_type": "LADIES BRIEF - TEZENIS BEACHWEAR",
        "operation_data": [
            {"operation_name": "TACK SIDE SEAMS UPPER+UNDER", "machine_name": "Zig Zag Machine", "sequence_number": 1}
        ]
    }"#;

    #[test]
    fn test_request_defaults() {
        let request: SearchRequest = serde_json::from_str(REQUEST).unwrap();
        assert!(!request.allocation_data);
        assert_eq!(request.no_of_results, 10);
        assert_eq!(request.no_of_allocations, 3);

        let query = request.into_query();
        assert_eq!(query.tenant_id, 3);
        assert_eq!(query.result_limit, 10);
        assert!(!query.include_allocations);
        assert!(query.candidate_override.is_none());
        assert!(query.allocation_override.is_none());
    }

    #[test]
    fn test_request_with_datasources() {
        let json = r#"{
            "tenant_id": 3,
            "style_type": "BRIEF",
            "allocation_data": true,
            "no_of_results": 2,
            "no_of_allocations": 1,
            "operation_data": [{"operation_name": "TACK", "machine_name": "Zig Zag", "sequence_number": 1}],
            "ob_datasource": [
                {"layout_id": 5, "layout_code": "L-5", "style_type": "BRIEF", "operation_name": "HEM", "machine_name": "Coverstitch", "operation_seq": 2},
                {"layout_id": 5, "layout_code": "L-5", "style_type": "BRIEF", "operation_name": "TACK", "machine_name": "Zig Zag", "operation_seq": 1},
                {"layout_id": 6, "layout_code": "L-6", "style_type": "BOXER", "operation_name": "TACK", "machine_name": "Zig Zag", "operation_seq": 1}
            ],
            "allocation_datasource": [
                {"layout_id": 5, "allocation_id": 1, "allocation_name": "Line 1", "hourly_target": 60.0, "run_efficiency": null}
            ]
        }"#;
        let query = serde_json::from_str::<SearchRequest>(json)
            .unwrap()
            .into_query();

        assert!(query.include_allocations);
        assert_eq!(query.allocation_limit, 1);
        let candidates = query.candidate_override.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].layout_id, LayoutId(5));
        assert_eq!(candidates[0].operations[0].operation_name, "TACK");
        assert_eq!(query.allocation_override.unwrap().len(), 1);
    }

    fn datasource_request(rows: &str) -> SearchRequest {
        let json = format!(
            r#"{{
                "tenant_id": 3,
                "style_type": "LADIES BRIEF - TEZENIS BEACHWEAR",
                "operation_data": [
                    {{"operation_name": "TACK SIDE SEAMS UPPER+UNDER", "machine_name": "Zig Zag Machine", "sequence_number": 1}}
                ],
                "ob_datasource": {rows}
            }}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    fn catalog_service() -> SearchService {
        SearchService::from_catalog(std::sync::Arc::new(OperationCatalog::load_embedded().unwrap()))
    }

    #[tokio::test]
    async fn test_datasource_rows_of_other_style_never_reach_catalog() {
        let request = datasource_request(
            r#"[{"layout_id": 900, "layout_code": "MB-900", "style_type": "MENS BOXER",
                "operation_name": "JOIN CROTCH", "machine_name": "Overlock", "operation_seq": 1}]"#,
        );
        let prepared = request.into_prepared();
        assert!(prepared.datasource);

        let response = prepared.run(&catalog_service()).await.unwrap();
        assert_eq!(response.total_candidates, 0);
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_datasource_never_reaches_catalog() {
        let response = datasource_request("[]")
            .into_prepared()
            .run(&catalog_service())
            .await
            .unwrap();
        assert_eq!(response, SearchResponse::default());
    }

    #[tokio::test]
    async fn test_empty_datasource_still_validates_query() {
        let mut request = datasource_request("[]");
        request.no_of_results = 0;
        let err = request
            .into_prepared()
            .run(&catalog_service())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_request_without_datasource_uses_catalog() {
        let prepared = serde_json::from_str::<SearchRequest>(REQUEST)
            .unwrap()
            .into_prepared();
        assert!(!prepared.datasource);

        let response = prepared.run(&catalog_service()).await.unwrap();
        assert_eq!(response.total_candidates, 4);
    }

    #[test]
    fn test_reply_messages() {
        let reply = SearchReply::from_response(
            SearchResponse::default(),
            false,
            Duration::from_millis(5),
        );
        assert_eq!(reply.message, NO_BREAKDOWNS_FOUND);
        assert_eq!(reply.total_obs, 0);
        assert_eq!(reply.no_of_results, 0);

        let json = serde_json::to_value(&reply).unwrap();
        assert!(json.get("process_time").is_some());
        assert_eq!(json["results"], serde_json::json!([]));
    }
}
