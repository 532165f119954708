use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};

use crate::catalog::store::{CatalogLayout, OperationCatalog};
use crate::cli::OutputFormat;
use crate::core::allocation::Allocation;
use crate::core::types::TenantId;
use crate::parsing::datasource::{group_rows, OperationRow};

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List style types recorded in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only list this tenant's style types
        #[arg(long)]
        tenant: Option<TenantId>,
    },

    /// Show the breakdown recorded under a layout code
    Show {
        /// Layout code (style number)
        #[arg(required = true)]
        layout_code: String,

        /// Tenant that owns the layout
        #[arg(long, required = true)]
        tenant: TenantId,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Build a catalog from flat operation rows
    Build {
        /// JSON array of rows with layout_id, layout_code, style_type,
        /// operation_name, machine_name and operation_seq
        #[arg(long = "rows", required = true)]
        rows: PathBuf,

        /// Tenant that owns the rows
        #[arg(long, required = true)]
        tenant: TenantId,

        /// JSON array of allocations to include
        #[arg(long)]
        allocations: Option<PathBuf>,

        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Add the layouts to an existing catalog file
        #[arg(long)]
        append_to: Option<PathBuf>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the requested layout is
/// not found, or files cannot be read or written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, tenant } => {
            let catalog = load_catalog(catalog.as_deref())?;
            list_style_types(&catalog, tenant, format)
        }
        CatalogCommands::Show {
            layout_code,
            tenant,
            catalog,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let layout = catalog
                .find_by_layout_code(tenant, &layout_code)
                .ok_or_else(|| {
                    anyhow::anyhow!("Layout '{layout_code}' not found for tenant {tenant}")
                })?;
            show_layout(&catalog, layout, format)
        }
        CatalogCommands::Export { output, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            std::fs::write(&output, catalog.to_json()?)?;
            println!("Catalog exported to {}", output.display());
            Ok(())
        }
        CatalogCommands::Build {
            rows,
            tenant,
            allocations,
            output,
            append_to,
        } => build_catalog(
            &rows,
            tenant,
            allocations.as_deref(),
            output.as_deref(),
            append_to.as_deref(),
            verbose,
        ),
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<OperationCatalog> {
    Ok(match path {
        Some(p) => OperationCatalog::load_from_file(p)
            .with_context(|| format!("Failed to load catalog {}", p.display()))?,
        None => OperationCatalog::load_embedded()?,
    })
}

fn list_style_types(
    catalog: &OperationCatalog,
    tenant: Option<TenantId>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let tenants = match tenant {
        Some(t) => vec![t],
        None => catalog.tenants(),
    };

    let entries: Vec<(TenantId, String, usize)> = tenants
        .into_iter()
        .flat_map(|t| {
            catalog
                .style_types(t)
                .into_iter()
                .map(move |style| (t, style))
        })
        .map(|(t, style)| {
            let count = catalog.breakdowns(t, &style).len();
            (t, style, count)
        })
        .collect();

    match format {
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No style types found");
                return Ok(());
            }
            println!("{:<8} {:<48} {:>10}", "Tenant", "Style type", "Breakdowns");
            println!("{}", "-".repeat(68));
            for (t, style, count) in &entries {
                println!("{t:<8} {style:<48} {count:>10}");
            }
        }
        OutputFormat::Json => {
            let json: Vec<_> = entries
                .iter()
                .map(|(t, style, count)| {
                    serde_json::json!({
                        "tenant_id": t,
                        "style_type": style,
                        "breakdowns": count,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("tenant_id\tstyle_type\tbreakdowns");
            for (t, style, count) in &entries {
                println!("{t}\t{style}\t{count}");
            }
        }
    }

    Ok(())
}

fn show_layout(
    catalog: &OperationCatalog,
    layout: &CatalogLayout,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let breakdown = &layout.breakdown;
    let allocations: Vec<&Allocation> = catalog.allocations_for(breakdown.layout_id);

    match format {
        OutputFormat::Text => {
            println!("Layout:     {}", breakdown.layout_code);
            println!("Layout id:  {}", breakdown.layout_id);
            println!("Tenant:     {}", layout.tenant_id);
            println!("Style type: {}", breakdown.style_type);
            println!("Machines:   {}", breakdown.machines().join(", "));
            println!("\nOperations ({}):", breakdown.len());
            for op in &breakdown.operations {
                println!(
                    "  {:>4}  {:<40} {}",
                    op.sequence_number, op.operation_name, op.machine_name
                );
            }
            if !allocations.is_empty() {
                println!("\nAllocations ({}):", allocations.len());
                for allocation in &allocations {
                    println!(
                        "  {:>6}  {:<24} target {:.0}/h",
                        allocation.allocation_id, allocation.allocation_name, allocation.hourly_target
                    );
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "tenant_id": layout.tenant_id,
                "breakdown": breakdown,
                "allocations": allocations,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("sequence_number\toperation_name\tmachine_name");
            for op in &breakdown.operations {
                println!(
                    "{}\t{}\t{}",
                    op.sequence_number, op.operation_name, op.machine_name
                );
            }
        }
    }

    Ok(())
}

fn build_catalog(
    rows_path: &Path,
    tenant: TenantId,
    allocations_path: Option<&Path>,
    output: Option<&Path>,
    append_to: Option<&Path>,
    verbose: bool,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(rows_path)
        .with_context(|| format!("Failed to read rows {}", rows_path.display()))?;
    let rows: Vec<OperationRow> = serde_json::from_str(&content).context("Invalid rows")?;
    let breakdowns = group_rows(rows);

    let mut catalog = match append_to {
        Some(path) => OperationCatalog::load_from_file(path)?,
        None => OperationCatalog::new(),
    };

    let added = breakdowns.len();
    for breakdown in breakdowns {
        catalog.add_layout(tenant, breakdown)?;
    }

    if let Some(path) = allocations_path {
        let content = std::fs::read_to_string(path)?;
        let allocations: Vec<Allocation> =
            serde_json::from_str(&content).context("Invalid allocations")?;
        for allocation in allocations {
            catalog.add_allocation(allocation);
        }
    }

    if verbose {
        eprintln!(
            "Added {} breakdowns for tenant {} ({} total)",
            added,
            tenant,
            catalog.len()
        );
    }

    let json = catalog.to_json()?;
    match output.or(append_to) {
        Some(path) => {
            std::fs::write(path, json)?;
            eprintln!("Catalog written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
