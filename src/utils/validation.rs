//! Centralized validation and helper functions.

use crate::core::breakdown::OperationBreakdown;
use crate::core::operation::Operation;
use crate::core::query::SearchQuery;
use crate::core::types::LayoutId;

/// Maximum number of operations accepted in a submitted breakdown (DOS protection)
pub const MAX_QUERY_OPERATIONS: usize = 2_000;

/// Maximum number of operations in one caller-supplied candidate (DOS protection)
///
/// Aligning a query against a candidate allocates a table of
/// `query_len * candidate_len` cells, so both sides are bounded.
pub const MAX_CANDIDATE_OPERATIONS: usize = 2_000;

/// Maximum number of operations across all caller-supplied candidates (DOS protection)
pub const MAX_OVERRIDE_OPERATIONS: usize = 100_000;

/// Reasons a search query is rejected before any data is fetched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("tenant_id must be a positive integer, got {0}")]
    InvalidTenant(i64),
    #[error("result_limit must be at least 1")]
    InvalidResultLimit,
    #[error("allocation_limit must be at least 1 when allocations are requested")]
    InvalidAllocationLimit,
    #[error("Too many operations: {0} exceeds maximum of {MAX_QUERY_OPERATIONS}")]
    TooManyOperations(usize),
    #[error("sequence_number must be a positive integer (operation '{0}')")]
    ZeroSequenceNumber(String),
    #[error("Candidate layout {layout_id} has {count} operations, maximum is {MAX_CANDIDATE_OPERATIONS}")]
    CandidateTooLarge { layout_id: LayoutId, count: usize },
    #[error("Candidate layout {0} has an operation with sequence_number 0")]
    CandidateZeroSequenceNumber(LayoutId),
    #[error("Candidate override has {0} operations in total, maximum is {MAX_OVERRIDE_OPERATIONS}")]
    OverrideTooLarge(usize),
}

/// Check a query before any provider is consulted.
///
/// # Errors
///
/// Returns the first [`QueryError`] found: non-positive tenant, zero result
/// limit, zero allocation limit with allocations requested, an oversized
/// operation list, a zero sequence number, or an oversized candidate override.
pub fn validate_query(query: &SearchQuery) -> Result<(), QueryError> {
    if query.tenant_id <= 0 {
        return Err(QueryError::InvalidTenant(query.tenant_id));
    }

    if query.result_limit == 0 {
        return Err(QueryError::InvalidResultLimit);
    }

    if query.include_allocations && query.allocation_limit == 0 {
        return Err(QueryError::InvalidAllocationLimit);
    }

    check_operation_limit(&query.query_operations)?;

    if let Some(op) = query
        .query_operations
        .iter()
        .find(|op| op.sequence_number == 0)
    {
        return Err(QueryError::ZeroSequenceNumber(op.operation_name.clone()));
    }

    match &query.candidate_override {
        Some(candidates) => check_candidate_override(candidates),
        None => Ok(()),
    }
}

/// Bound the size of caller-supplied candidates and check their sequence numbers
///
/// # Errors
///
/// Returns `QueryError::CandidateTooLarge`, `QueryError::OverrideTooLarge` or
/// `QueryError::CandidateZeroSequenceNumber`.
pub fn check_candidate_override(candidates: &[OperationBreakdown]) -> Result<(), QueryError> {
    let mut total = 0usize;
    for candidate in candidates {
        let count = candidate.operations.len();
        if count > MAX_CANDIDATE_OPERATIONS {
            return Err(QueryError::CandidateTooLarge {
                layout_id: candidate.layout_id,
                count,
            });
        }

        total += count;
        if total > MAX_OVERRIDE_OPERATIONS {
            return Err(QueryError::OverrideTooLarge(
                candidates.iter().map(|c| c.operations.len()).sum(),
            ));
        }

        if candidate.operations.iter().any(|op| op.sequence_number == 0) {
            return Err(QueryError::CandidateZeroSequenceNumber(candidate.layout_id));
        }
    }
    Ok(())
}

/// Reject operation lists longer than [`MAX_QUERY_OPERATIONS`]
///
/// # Errors
///
/// Returns `QueryError::TooManyOperations` when the limit is exceeded.
pub fn check_operation_limit(operations: &[Operation]) -> Result<(), QueryError> {
    if operations.len() > MAX_QUERY_OPERATIONS {
        Err(QueryError::TooManyOperations(operations.len()))
    } else {
        Ok(())
    }
}

/// Normalize a style type for lookups: trimmed, internal case preserved.
#[must_use]
pub fn normalize_style_type(style_type: &str) -> String {
    style_type.trim().to_string()
}
