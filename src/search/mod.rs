//! The exposed search operation.
//!
//! [`SearchService::search`] validates a [`SearchQuery`], resolves the
//! candidate pool through [`CandidateSource`], ranks it with the
//! [`RankingEngine`] and, on request, attaches allocations through
//! [`AllocationSource`]. Failures are reported as [`SearchError`].
//!
//! [`SearchQuery`]: crate::core::query::SearchQuery
//! [`RankingEngine`]: crate::matching::engine::RankingEngine

pub mod error;
pub mod service;
pub mod source;

pub use error::SearchError;
pub use service::SearchService;
pub use source::{AllocationSource, CandidateSource};
