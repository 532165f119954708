//! Interfaces to the collaborators that own breakdown and allocation data.
//!
//! Provider calls are the only points where a search waits on I/O. Retries
//! belong to the implementation; timeouts belong to the calling layer, see
//! [`TimeoutProvider`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::allocation::Allocation;
use crate::core::breakdown::OperationBreakdown;
use crate::core::types::{LayoutId, TenantId};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Backend(String),
}

/// Yields the recorded breakdowns of one tenant and style type.
///
/// Results are unordered, may be empty, and must not repeat a layout id.
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    async fn fetch_candidates(
        &self,
        tenant_id: TenantId,
        style_type: &str,
    ) -> Result<Vec<OperationBreakdown>, ProviderError>;
}

/// Yields the allocations of exactly one layout, possibly none.
#[async_trait]
pub trait AllocationProvider: Send + Sync {
    async fn fetch_allocations(&self, layout_id: LayoutId)
        -> Result<Vec<Allocation>, ProviderError>;
}

#[async_trait]
impl<T: CandidateProvider + ?Sized> CandidateProvider for Arc<T> {
    async fn fetch_candidates(
        &self,
        tenant_id: TenantId,
        style_type: &str,
    ) -> Result<Vec<OperationBreakdown>, ProviderError> {
        (**self).fetch_candidates(tenant_id, style_type).await
    }
}

#[async_trait]
impl<T: AllocationProvider + ?Sized> AllocationProvider for Arc<T> {
    async fn fetch_allocations(
        &self,
        layout_id: LayoutId,
    ) -> Result<Vec<Allocation>, ProviderError> {
        (**self).fetch_allocations(layout_id).await
    }
}

/// Bounds every call of the wrapped provider by a fixed timeout
#[derive(Debug, Clone)]
pub struct TimeoutProvider<P> {
    inner: P,
    timeout: Duration,
}

impl<P> TimeoutProvider<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl<P: CandidateProvider> CandidateProvider for TimeoutProvider<P> {
    async fn fetch_candidates(
        &self,
        tenant_id: TenantId,
        style_type: &str,
    ) -> Result<Vec<OperationBreakdown>, ProviderError> {
        tokio::time::timeout(
            self.timeout,
            self.inner.fetch_candidates(tenant_id, style_type),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.timeout))?
    }
}

#[async_trait]
impl<P: AllocationProvider> AllocationProvider for TimeoutProvider<P> {
    async fn fetch_allocations(
        &self,
        layout_id: LayoutId,
    ) -> Result<Vec<Allocation>, ProviderError> {
        tokio::time::timeout(self.timeout, self.inner.fetch_allocations(layout_id))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowProvider;

    #[async_trait]
    impl CandidateProvider for SlowProvider {
        async fn fetch_candidates(
            &self,
            _tenant_id: TenantId,
            _style_type: &str,
        ) -> Result<Vec<OperationBreakdown>, ProviderError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl AllocationProvider for SlowProvider {
        async fn fetch_allocations(
            &self,
            layout_id: LayoutId,
        ) -> Result<Vec<Allocation>, ProviderError> {
            Ok(vec![Allocation::new(layout_id, 1, "Line 1", 60.0)])
        }
    }

    #[tokio::test]
    async fn test_timeout_provider_times_out() {
        let provider = TimeoutProvider::new(SlowProvider, Duration::from_millis(10));
        let err = provider.fetch_candidates(1, "BRIEF").await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(d) if d == Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn test_timeout_provider_passes_fast_calls() {
        let provider = TimeoutProvider::new(SlowProvider, Duration::from_secs(1));
        let allocations = provider.fetch_allocations(LayoutId(9)).await.unwrap();
        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].layout_id, LayoutId(9));
    }

    #[tokio::test]
    async fn test_arc_forwarding() {
        let provider: Arc<dyn AllocationProvider> = Arc::new(SlowProvider);
        let allocations = provider.fetch_allocations(LayoutId(2)).await.unwrap();
        assert_eq!(allocations[0].layout_id, LayoutId(2));
    }
}
