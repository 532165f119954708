//! Search command - rank recorded breakdowns against a submitted one.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Args;

use crate::catalog::provider::{AllocationProvider, CandidateProvider, TimeoutProvider};
use crate::catalog::store::OperationCatalog;
use crate::cli::OutputFormat;
use crate::core::query::{SearchQuery, SearchResponse, SearchResult};
use crate::matching::engine::{MatchingConfig, RankingEngine};
use crate::parsing;
use crate::parsing::request::{PreparedSearch, SearchReply, SearchRequest};
use crate::search::service::SearchService;

#[derive(Args)]
pub struct SearchArgs {
    /// Search request (JSON), or an operation list (TSV, CSV or JSON array)
    /// together with --tenant and --style-type.
    /// Use '-' to read a JSON request from stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Tenant whose breakdowns are searched (operation list input)
    #[arg(long)]
    pub tenant: Option<i64>,

    /// Style type whose breakdowns are searched (operation list input)
    #[arg(long)]
    pub style_type: Option<String>,

    /// Number of results to show (overrides the request)
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Attach production line allocations to each result
    #[arg(long)]
    pub allocations: bool,

    /// Number of allocations per result (overrides the request)
    #[arg(long)]
    pub allocation_limit: Option<usize>,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Size of the scoring worker pool (defaults to available cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Score candidates on the calling thread
    #[arg(long, conflicts_with = "threads")]
    pub sequential: bool,

    /// Bound every catalog lookup by this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Execute search subcommand
///
/// # Errors
///
/// Returns an error if the input or catalog cannot be read, the query is
/// invalid, or a lookup fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let prepared = build_query(&args)?;
    let query = &prepared.query;
    if verbose {
        eprintln!(
            "Query: {} operations for tenant {} style type '{}'",
            query.query_operations.len(),
            query.tenant_id,
            query.style_type,
        );
    }

    let catalog = Arc::new(if let Some(path) = &args.catalog {
        OperationCatalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?
    } else {
        OperationCatalog::load_embedded()?
    });
    if verbose {
        eprintln!("Loaded catalog with {} breakdowns", catalog.len());
    }

    let engine = RankingEngine::with_config(MatchingConfig {
        parallel: !args.sequential,
        worker_threads: args.threads,
    })?;

    let service = match args.timeout_ms {
        Some(ms) => {
            let bounded = Arc::new(TimeoutProvider::new(
                catalog.clone(),
                Duration::from_millis(ms),
            ));
            let candidates: Arc<dyn CandidateProvider> = bounded.clone();
            let allocations: Arc<dyn AllocationProvider> = bounded;
            SearchService::new(candidates, allocations)
        }
        None => SearchService::from_catalog(catalog),
    }
    .with_engine(engine);

    let tenant_id = query.tenant_id;
    let style_type = query.style_type.clone();
    let include_allocations = query.include_allocations;

    let started = Instant::now();
    let rt = tokio::runtime::Runtime::new()?;
    let response = rt.block_on(prepared.run(&service))?;
    let elapsed = started.elapsed();

    if verbose {
        eprintln!("Search completed in {elapsed:.2?}");
    }

    match format {
        OutputFormat::Text => print_text(&response, tenant_id, &style_type),
        OutputFormat::Json => {
            let reply = SearchReply::from_response(response, include_allocations, elapsed);
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        OutputFormat::Tsv => print_tsv(&response),
    }

    Ok(())
}

/// Build the query from a request file or an operation list plus flags.
fn build_query(args: &SearchArgs) -> anyhow::Result<PreparedSearch> {
    let mut prepared = match (args.tenant, &args.style_type) {
        (Some(tenant_id), Some(style_type)) => {
            let operations = parsing::parse_operations_file(&args.input)?;
            PreparedSearch::provider(SearchQuery::new(tenant_id, style_type.clone(), operations))
        }
        (None, None) => read_request(&args.input)?.into_prepared(),
        _ => bail!("--tenant and --style-type must be given together"),
    };
    let query = &mut prepared.query;

    if let Some(n) = args.max_results {
        query.result_limit = n;
    }
    if args.allocations {
        query.include_allocations = true;
    }
    if let Some(limit) = args.allocation_limit {
        query.allocation_limit = limit;
    }

    Ok(prepared)
}

fn read_request(path: &Path) -> anyhow::Result<SearchRequest> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request {}", path.display()))?
    };
    serde_json::from_str(&content).context("Invalid search request")
}

fn print_text(response: &SearchResponse, tenant_id: i64, style_type: &str) {
    if response.is_empty() {
        println!("No operation breakdowns found for tenant {tenant_id} style type '{style_type}'");
        return;
    }

    println!(
        "\nTop {} of {} breakdowns for '{}':\n",
        response.results.len(),
        response.total_candidates,
        style_type
    );

    for (i, result) in response.results.iter().enumerate() {
        print_text_result(i + 1, result);
    }
}

fn print_text_result(rank: usize, result: &SearchResult) {
    println!(
        "#{} {} (layout {})  {:.1}",
        rank, result.layout_code, result.layout_id, result.similarity_score
    );
    println!(
        "   Operations: {:.1}  Machines: {:.1}  Matched: {}/{}",
        result.operation_similarity,
        result.machine_similarity,
        result.matched_operations,
        result.operations.len(),
    );

    if let Some(allocations) = &result.allocations {
        if allocations.is_empty() {
            println!("   Allocations: none");
        }
        for allocation in allocations {
            let efficiency = allocation
                .run_efficiency
                .map_or_else(|| "n/a".to_string(), |e| format!("{e:.1}%"));
            println!(
                "   Allocation: {} (target {:.0}/h, efficiency {})",
                allocation.allocation_name, allocation.hourly_target, efficiency
            );
        }
    }
    println!();
}

fn print_tsv(response: &SearchResponse) {
    println!(
        "rank\tlayout_id\tlayout_code\tsimilarity_score\toperation_similarity\tmachine_similarity\tmatched_operations\toperations\tallocations"
    );

    for (i, result) in response.results.iter().enumerate() {
        let allocations = result.allocations.as_ref().map_or_else(String::new, |a| {
            a.iter()
                .map(|x| x.allocation_id.to_string())
                .collect::<Vec<_>>()
                .join(",")
        });
        println!(
            "{}\t{}\t{}\t{:.1}\t{:.1}\t{:.1}\t{}\t{}\t{}",
            i + 1,
            result.layout_id,
            result.layout_code,
            result.similarity_score,
            result.operation_similarity,
            result.machine_similarity,
            result.matched_operations,
            result.operations.len(),
            allocations,
        );
    }
}
