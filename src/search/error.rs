use thiserror::Error;

use crate::catalog::provider::ProviderError;
use crate::core::types::{LayoutId, TenantId};
use crate::utils::validation::QueryError;

/// Failures of a single search request
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    #[error("candidate provider failed for tenant {tenant_id}, style type '{style_type}': {source}")]
    CandidateProvider {
        tenant_id: TenantId,
        style_type: String,
        #[source]
        source: ProviderError,
    },

    #[error("allocation provider failed for layout {layout_id}: {source}")]
    AllocationProvider {
        layout_id: LayoutId,
        #[source]
        source: ProviderError,
    },

    #[error("candidate scoring aborted: {0}")]
    ScoringAborted(String),
}

impl SearchError {
    /// True for failures of an external collaborator rather than the request itself
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::CandidateProvider { .. } | Self::AllocationProvider { .. }
        )
    }
}
