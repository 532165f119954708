//! Readers for submitted breakdowns and caller-supplied data.
//!
//! This module provides parsers for:
//!
//! - **TSV/CSV files**: Operation tables with `operation_name`, `machine_name`
//!   and an optional sequence number
//! - **Datasource rows**: Flat per-operation rows grouped into breakdowns
//! - **Search requests**: The JSON request and response bodies of the search operation
//!
//! ## Example
//!
//! ```rust,no_run
//! use ob_matcher::parsing::parse_operations_file;
//! use std::path::Path;
//!
//! let operations = parse_operations_file(Path::new("brief.tsv")).unwrap();
//! println!("{} operations", operations.len());
//! ```

use std::path::Path;

use thiserror::Error;

use crate::core::operation::Operation;

pub mod datasource;
pub mod request;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Too many operations: {0}")]
    TooManyOperations(usize),
}

/// Read an operation list, choosing the format from the file extension.
///
/// `.csv` is comma separated, `.json` is an array of operations, anything
/// else is read as tab separated.
///
/// # Errors
///
/// Returns `ParseError` if the file cannot be read or its content is invalid.
pub fn parse_operations_file(path: &Path) -> Result<Vec<Operation>, ParseError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("json") => {
            let content = std::fs::read_to_string(path)?;
            let operations: Vec<Operation> = serde_json::from_str(&content)?;
            crate::utils::validation::check_operation_limit(&operations)
                .map_err(|_| ParseError::TooManyOperations(operations.len()))?;
            Ok(operations)
        }
        Some("csv") => tsv::parse_tsv_file(path, ','),
        _ => tsv::parse_tsv_file(path, '\t'),
    }
}
