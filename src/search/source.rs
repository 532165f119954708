//! Per-request choice between caller-supplied data and the providers.

use std::collections::HashMap;

use crate::catalog::provider::{AllocationProvider, CandidateProvider};
use crate::core::allocation::Allocation;
use crate::core::breakdown::OperationBreakdown;
use crate::core::types::{DataSource, LayoutId, TenantId};
use crate::search::error::SearchError;

/// Where the candidate pool of a request comes from
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateSource {
    /// Caller-supplied breakdowns, used verbatim without tenant/style filtering
    Override(Vec<OperationBreakdown>),
    /// The candidate provider, keyed by tenant and style type
    Provider {
        tenant_id: TenantId,
        style_type: String,
    },
}

impl CandidateSource {
    /// A present but empty override falls back to the provider
    pub fn select(
        tenant_id: TenantId,
        style_type: &str,
        candidate_override: Option<Vec<OperationBreakdown>>,
    ) -> Self {
        match candidate_override {
            Some(candidates) if !candidates.is_empty() => Self::Override(candidates),
            _ => Self::Provider {
                tenant_id,
                style_type: style_type.to_string(),
            },
        }
    }

    pub fn data_source(&self) -> DataSource {
        match self {
            Self::Override(_) => DataSource::Override,
            Self::Provider { .. } => DataSource::Provider,
        }
    }

    /// Produce the candidate pool, consulting `provider` only in provider mode.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::CandidateProvider` tagged with the tenant and style type.
    pub async fn resolve(
        self,
        provider: &dyn CandidateProvider,
    ) -> Result<Vec<OperationBreakdown>, SearchError> {
        match self {
            Self::Override(candidates) => Ok(candidates),
            Self::Provider {
                tenant_id,
                style_type,
            } => match provider.fetch_candidates(tenant_id, &style_type).await {
                Ok(candidates) => Ok(candidates),
                Err(source) => Err(SearchError::CandidateProvider {
                    tenant_id,
                    style_type,
                    source,
                }),
            },
        }
    }
}

/// Where the allocations of selected results come from
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationSource {
    /// Caller-supplied allocations indexed by layout, insertion order kept per layout
    Override(HashMap<LayoutId, Vec<Allocation>>),
    /// The allocation provider, one call per selected layout
    Provider,
}

impl AllocationSource {
    /// Any present override is used, even an empty one
    pub fn select(allocation_override: Option<Vec<Allocation>>) -> Self {
        match allocation_override {
            Some(allocations) => Self::Override(index_by_layout(allocations)),
            None => Self::Provider,
        }
    }

    pub fn data_source(&self) -> DataSource {
        match self {
            Self::Override(_) => DataSource::Override,
            Self::Provider => DataSource::Provider,
        }
    }

    /// Allocations of one layout; layouts missing from an override have none.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::AllocationProvider` tagged with the layout id.
    pub async fn fetch(
        &self,
        layout_id: LayoutId,
        provider: &dyn AllocationProvider,
    ) -> Result<Vec<Allocation>, SearchError> {
        match self {
            Self::Override(by_layout) => {
                Ok(by_layout.get(&layout_id).cloned().unwrap_or_default())
            }
            Self::Provider => provider
                .fetch_allocations(layout_id)
                .await
                .map_err(|source| SearchError::AllocationProvider { layout_id, source }),
        }
    }
}

fn index_by_layout(allocations: Vec<Allocation>) -> HashMap<LayoutId, Vec<Allocation>> {
    let mut by_layout: HashMap<LayoutId, Vec<Allocation>> = HashMap::new();
    for allocation in allocations {
        by_layout
            .entry(allocation.layout_id)
            .or_default()
            .push(allocation);
    }
    by_layout
}
