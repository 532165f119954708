//! Score command - compare two operation lists directly using the scoring algorithm.
//!
//! This command compares a query list against a candidate list without using
//! a catalog, and shows which operations were aligned. Useful for explaining
//! a single search result.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::operation::Operation;
use crate::matching::alignment::{align, Alignment};
use crate::matching::normalize::normalize_operations;
use crate::matching::scoring::MatchScore;
use crate::parsing;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// Query operation list (the breakdown you want to score)
    /// Supports: TSV, CSV, JSON array
    #[arg(required = true)]
    pub query: PathBuf,

    /// Candidate operation list (the breakdown to compare against)
    /// Supports: TSV, CSV, JSON array
    #[arg(required = true)]
    pub candidate: PathBuf,
}

/// Result of one comparison, over normalized operations
struct ScoreResult {
    query: Vec<Operation>,
    candidate: Vec<Operation>,
    alignment: Alignment,
    score: MatchScore,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if either input cannot be parsed.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let query = parse_input(&args.query)?;
    let candidate = parse_input(&args.candidate)?;
    if verbose {
        eprintln!(
            "Query: {} operations, candidate: {} operations",
            query.len(),
            candidate.len()
        );
    }

    let result = compute_score(&query, &candidate);

    match format {
        OutputFormat::Text => print_text_result(&result, &args.query, &args.candidate),
        OutputFormat::Json => print_json_result(&result, &args.query, &args.candidate)?,
        OutputFormat::Tsv => print_tsv_result(&result),
    }

    Ok(())
}

fn compute_score(query: &[Operation], candidate: &[Operation]) -> ScoreResult {
    let query = normalize_operations(query);
    let candidate = normalize_operations(candidate);
    let alignment = align(&query, &candidate);
    let score = MatchScore::from_alignment(&alignment);

    ScoreResult {
        query,
        candidate,
        alignment,
        score,
    }
}

fn parse_input(path: &Path) -> anyhow::Result<Vec<Operation>> {
    Ok(parsing::parse_operations_file(path)?)
}

fn print_text_result(result: &ScoreResult, query_path: &Path, candidate_path: &Path) {
    println!(
        "\nScoring: {} vs {}",
        query_path.display(),
        candidate_path.display()
    );

    println!(
        "\n   Score: {:.1} = {:.1} operations + {:.1} machines",
        result.score.similarity_score,
        result.score.operation_similarity,
        result.score.machine_similarity,
    );
    println!(
        "   Matched: {} of {} query operations ({} candidate operations)",
        result.score.matched_operations,
        result.query.len(),
        result.candidate.len(),
    );

    if result.alignment.pairs.is_empty() {
        println!("\n   No operations aligned");
        return;
    }

    println!("\n   Aligned operations:");
    for pair in &result.alignment.pairs {
        let q = &result.query[pair.query_index];
        let c = &result.candidate[pair.candidate_index];
        println!(
            "   {:>3} {} [{}] ~ {:>3} {} [{}]  ({:.2})",
            q.sequence_number,
            q.operation_name,
            q.machine_name,
            c.sequence_number,
            c.operation_name,
            c.machine_name,
            pair.similarity.combined,
        );
    }
}

fn print_json_result(
    result: &ScoreResult,
    query_path: &Path,
    candidate_path: &Path,
) -> anyhow::Result<()> {
    let pairs: Vec<serde_json::Value> = result
        .alignment
        .pairs
        .iter()
        .map(|pair| {
            serde_json::json!({
                "query": result.query[pair.query_index],
                "candidate": result.candidate[pair.candidate_index],
                "operation_similarity": pair.similarity.operation,
                "machine_similarity": pair.similarity.machine,
                "combined": pair.similarity.combined,
            })
        })
        .collect();

    let output = serde_json::json!({
        "query": {
            "file": query_path.display().to_string(),
            "operations": result.query.len(),
        },
        "candidate": {
            "file": candidate_path.display().to_string(),
            "operations": result.candidate.len(),
        },
        "score": {
            "similarity_score": result.score.similarity_score,
            "operation_similarity": result.score.operation_similarity,
            "machine_similarity": result.score.machine_similarity,
            "matched_operations": result.score.matched_operations,
        },
        "pairs": pairs,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_result(result: &ScoreResult) {
    println!(
        "query_seq\tquery_operation\tquery_machine\tcandidate_seq\tcandidate_operation\tcandidate_machine\tsimilarity"
    );

    for pair in &result.alignment.pairs {
        let q = &result.query[pair.query_index];
        let c = &result.candidate[pair.candidate_index];
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{:.4}",
            q.sequence_number,
            q.operation_name,
            q.machine_name,
            c.sequence_number,
            c.operation_name,
            c.machine_name,
            pair.similarity.combined,
        );
    }
}
