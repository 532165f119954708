//! Core data types for operation breakdown matching.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Operation`]: A sewing operation bound to a machine at a sequence position
//! - [`OperationBreakdown`]: The ordered operations of one garment layout
//! - [`Allocation`]: A layout's assignment to a production line with target and efficiency
//! - [`SearchQuery`], [`SearchResult`], [`SearchResponse`]: Per-request input and output
//! - [`LayoutId`], [`TenantId`], [`DataSource`]: Identity and provenance types
//!
//! Breakdowns and allocations are read-only inputs to matching; queries and
//! responses live for a single request.
//!
//! [`Operation`]: operation::Operation
//! [`OperationBreakdown`]: breakdown::OperationBreakdown
//! [`Allocation`]: allocation::Allocation
//! [`SearchQuery`]: query::SearchQuery
//! [`SearchResult`]: query::SearchResult
//! [`SearchResponse`]: query::SearchResponse
//! [`LayoutId`]: types::LayoutId
//! [`TenantId`]: types::TenantId
//! [`DataSource`]: types::DataSource

pub mod allocation;
pub mod breakdown;
pub mod operation;
pub mod query;
pub mod types;
