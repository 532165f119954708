//! Recorded operation breakdowns and allocations, and the interfaces that serve them.
//!
//! [`CandidateProvider`] and [`AllocationProvider`] are the only places where
//! a search waits on I/O. [`OperationCatalog`] implements both over a
//! versioned JSON document; an embedded sample catalog is compiled into the
//! binary, and custom catalogs can be loaded from files.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ob_matcher::OperationCatalog;
//! use std::path::Path;
//!
//! // Load embedded catalog
//! let catalog = OperationCatalog::load_embedded().unwrap();
//!
//! // Style types recorded for tenant 3
//! for style in catalog.style_types(3) {
//!     println!("{style}");
//! }
//!
//! // Load from custom file
//! let custom = OperationCatalog::load_from_file(Path::new("my_catalog.json")).unwrap();
//! ```
//!
//! [`CandidateProvider`]: provider::CandidateProvider
//! [`AllocationProvider`]: provider::AllocationProvider
//! [`OperationCatalog`]: store::OperationCatalog

pub mod provider;
pub mod store;
