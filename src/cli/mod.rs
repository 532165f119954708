//! Command-line interface for ob-matcher.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Rank recorded breakdowns against a submitted one
//! - **score**: Compare two operation lists directly and show the alignment
//! - **catalog**: List style types, show a breakdown, or build a catalog from rows
//!
//! ## Usage
//!
//! ```text
//! # Search with a JSON request against the embedded catalog
//! ob-matcher search request.json
//!
//! # Search with an operation list
//! ob-matcher search brief.tsv --tenant 3 --style-type "LADIES BRIEF" -n 5 --allocations
//!
//! # JSON output for scripting
//! ob-matcher search request.json --format json
//!
//! # Explain a single comparison
//! ob-matcher score query.tsv candidate.tsv
//! ```

use clap::{Parser, Subcommand};

pub mod catalog;
pub mod score;
pub mod search;

#[derive(Parser)]
#[command(name = "ob-matcher")]
#[command(version)]
#[command(about = "Find recorded operation breakdowns similar to a submitted one")]
#[command(
    long_about = "ob-matcher ranks the recorded operation breakdowns of a tenant and style type by their similarity to a submitted breakdown.\n\nIt aligns operations in sequence order, compares operation and machine names, and reports:\n- A 0-100 similarity score per recorded breakdown\n- The operation-name and machine-name components of that score\n- Optionally, the best production line allocations of each match"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank recorded breakdowns by similarity to a submitted one
    Search(search::SearchArgs),

    /// Compare two operation lists
    Score(score::ScoreArgs),

    /// Inspect or build an operation catalog
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
