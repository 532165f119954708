//! # ob-matcher
//!
//! A library for finding recorded garment operation breakdowns similar to a submitted one.
//!
//! An operation breakdown (OB) is the ordered list of sewing operations, each
//! bound to a machine, that makes up one garment layout. Factories record
//! thousands of them per style type; when a new style arrives, the closest
//! recorded breakdowns tell planners which lines ran something similar and
//! how efficiently.
//!
//! `ob-matcher` scores every recorded breakdown of a tenant and style type
//! against the submitted one and returns the best matches.
//!
//! ## Features
//!
//! - **Order-preserving alignment**: Operations are matched one-to-one in sequence order
//! - **Fuzzy names**: Operation and machine names are compared by edit distance
//! - **Deterministic ranking**: Ties broken by layout id, independent of input order
//! - **Allocation enrichment**: Best production lines of each match by run efficiency
//! - **Caller-supplied data**: Candidates and allocations may be passed with the query
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ob_matcher::{OperationCatalog, SearchQuery, SearchService};
//! use ob_matcher::core::operation::Operation;
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Load the embedded sample catalog
//! let catalog = Arc::new(OperationCatalog::load_embedded()?);
//! let service = SearchService::from_catalog(catalog);
//!
//! let query = SearchQuery::new(
//!     3,
//!     "LADIES BRIEF - TEZENIS BEACHWEAR",
//!     vec![
//!         Operation::new("TACK SIDE SEAMS UPPER+UNDER", "Zig Zag Machine", 1),
//!         Operation::new("ATTACH LEG ELASTIC", "Coverstitch", 2),
//!     ],
//! )
//! .with_allocations(3);
//!
//! let response = service.search(query).await?;
//! for result in &response.results {
//!     println!("{}: {:.1}", result.layout_code, result.similarity_score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Provider interfaces and the JSON operation catalog
//! - [`core`]: Core data types for operations, breakdowns, allocations and queries
//! - [`matching`]: Normalization, alignment, scoring and ranking
//! - [`search`]: The search operation and its source selection
//! - [`parsing`]: Parsers for operation lists, datasource rows and requests
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod search;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::provider::{AllocationProvider, CandidateProvider, ProviderError};
pub use catalog::store::OperationCatalog;
pub use core::allocation::Allocation;
pub use core::breakdown::OperationBreakdown;
pub use core::operation::Operation;
pub use core::query::{SearchQuery, SearchResponse, SearchResult};
pub use core::types::*;
pub use matching::engine::{MatchingConfig, RankingEngine};
pub use search::{SearchError, SearchService};
