//! Resource exhaustion tests
//!
//! Alignment allocates `query_len * candidate_len` cells per candidate, so
//! every caller-controlled size that feeds it must be bounded before any
//! scoring starts.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ob_matcher::parsing::datasource::OperationRow;
use ob_matcher::parsing::request::SearchRequest;
use ob_matcher::utils::validation::{
    QueryError, MAX_CANDIDATE_OPERATIONS, MAX_OVERRIDE_OPERATIONS, MAX_QUERY_OPERATIONS,
};
use ob_matcher::{
    LayoutId, Operation, OperationBreakdown, OperationCatalog, SearchError, SearchQuery,
    SearchService,
};
use tokio::time::timeout;

const STYLE: &str = "LADIES BRIEF";

fn service() -> SearchService {
    SearchService::from_catalog(Arc::new(OperationCatalog::new()))
}

fn operations(count: usize) -> Vec<Operation> {
    (1..=count)
        .map(|seq| {
            Operation::new(
                format!("OPERATION {seq}"),
                "Overlock",
                u32::try_from(seq).expect("sequence fits"),
            )
        })
        .collect()
}

fn candidate(id: i64, count: usize) -> OperationBreakdown {
    OperationBreakdown::new(id, format!("L-{id}"), STYLE).with_operations(operations(count))
}

/// A single oversized candidate is rejected instead of allocating its alignment table
#[tokio::test]
async fn test_oversized_candidate_rejected_before_scoring() {
    let query = SearchQuery::new(3, STYLE, operations(MAX_QUERY_OPERATIONS))
        .with_candidate_override(vec![candidate(1, 10), candidate(2, MAX_CANDIDATE_OPERATIONS + 1)]);

    let started = Instant::now();
    let err = service().search(query).await.unwrap_err();

    assert!(matches!(
        err,
        SearchError::InvalidQuery(QueryError::CandidateTooLarge {
            layout_id: LayoutId(2),
            count,
        }) if count == MAX_CANDIDATE_OPERATIONS + 1
    ));
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "Rejection should not wait on scoring"
    );
}

/// Many candidates each under the limit are still bounded in total
#[tokio::test]
async fn test_total_override_size_rejected() {
    let per_candidate = MAX_CANDIDATE_OPERATIONS;
    let count = MAX_OVERRIDE_OPERATIONS / per_candidate + 1;
    let candidates: Vec<OperationBreakdown> = (1..=count)
        .map(|id| candidate(i64::try_from(id).expect("id fits"), per_candidate))
        .collect();

    let query = SearchQuery::new(3, STYLE, operations(1)).with_candidate_override(candidates);
    let err = service().search(query).await.unwrap_err();

    assert!(matches!(
        err,
        SearchError::InvalidQuery(QueryError::OverrideTooLarge(total)) if total == count * per_candidate
    ));
}

/// Datasource rows are bounded the same way once grouped into breakdowns
#[tokio::test]
async fn test_oversized_datasource_rows_rejected() {
    let rows: Vec<OperationRow> = (1..=MAX_CANDIDATE_OPERATIONS + 1)
        .map(|seq| OperationRow {
            layout_id: LayoutId(900),
            layout_code: "DS-900".to_string(),
            style_type: STYLE.to_string(),
            operation_name: format!("OPERATION {seq}"),
            machine_name: "Overlock".to_string(),
            operation_seq: u32::try_from(seq).expect("sequence fits"),
        })
        .collect();

    let request = SearchRequest {
        tenant_id: 3,
        style_type: STYLE.to_string(),
        allocation_data: false,
        no_of_results: 10,
        no_of_allocations: 3,
        operation_data: operations(1),
        ob_datasource: Some(rows),
        allocation_datasource: None,
    };

    let err = request.into_prepared().run(&service()).await.unwrap_err();
    assert!(matches!(
        err,
        SearchError::InvalidQuery(QueryError::CandidateTooLarge { .. })
    ));
}

/// Inputs inside the limits finish in bounded time
#[tokio::test]
async fn test_candidate_at_limit_completes() {
    let query = SearchQuery::new(3, STYLE, operations(50))
        .with_candidate_override(vec![candidate(1, MAX_CANDIDATE_OPERATIONS)]);

    let response = timeout(Duration::from_secs(30), service().search(query))
        .await
        .expect("search should finish in time")
        .expect("search should succeed");

    assert_eq!(response.total_candidates, 1);
    assert_eq!(response.results.len(), 1);
}
