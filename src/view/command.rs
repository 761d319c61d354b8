//! Functionality related to the `exoncov view` command itself.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use prettytable::row;
use prettytable::Table;
use tracing::info;

use crate::coverage;
use crate::coverage::Analysis;
use crate::utils::args::threshold_in_range;
use crate::utils::args::DEFAULT_THRESHOLD;
use crate::utils::args::KeyPolicy;

//========================//
// Command-line arguments //
//========================//

/// Command line arguments for `exoncov view`.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Path to the coverage file to view.
    #[arg(value_name = "FILE")]
    src: PathBuf,

    /// Exons with a lower percentage of bases covered at 30x are low coverage.
    #[arg(short, long, value_name = "0-100", default_value_t = DEFAULT_THRESHOLD)]
    #[arg(value_parser = threshold_in_range)]
    threshold: u8,

    /// How to treat rows whose gene column is not `GeneSymbol;Accession`.
    #[arg(long, value_enum, default_value_t = KeyPolicy::Strict)]
    malformed_keys: KeyPolicy,
}

//==============//
// Main command //
//==============//

/// Main method for the `exoncov view` subcommand.
pub fn view(args: ViewArgs) -> anyhow::Result<()> {
    info!("Starting view command...");

    let analysis = coverage::analyze(&args.src, args.threshold, args.malformed_keys)
        .with_context(|| format!("viewing coverage file: {}", args.src.display()))?;

    if analysis.low_genes.is_empty() {
        println!(
            "No genes with less than {}% coverage at 30x.",
            args.threshold
        );
        return Ok(());
    }

    println!(
        "Genes with less than {}% coverage at 30x: {}.",
        args.threshold,
        analysis.low_genes.join(", ")
    );
    println!();
    summary_table(&analysis).printstd();

    Ok(())
}

/// Lays the per-gene summary out as a table, one row per gene.
pub fn summary_table(analysis: &Analysis) -> Table {
    let mut table = Table::new();

    table.add_row(row![
        "Gene", "Accession", "Exons", "Lowest", "Highest", "Mean", "Median"
    ]);
    for gene in &analysis.summary {
        table.add_row(row![
            gene.gene_symbol,
            gene.accession.as_deref().unwrap_or("-"),
            r->gene.exon_count,
            r->format!("{:.2}", gene.lowest),
            r->format!("{:.2}", gene.highest),
            r->format!("{:.2}", gene.mean),
            r->format!("{:.2}", gene.median)
        ]);
    }

    table
}
