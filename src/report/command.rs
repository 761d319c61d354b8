//! Functionality related to the `exoncov report` command itself.

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use clap::ArgGroup;
use clap::Args;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use tracing::debug;
use tracing::error;
use tracing::info;

use crate::coverage;
use crate::report::inputs::derive_prefix;
use crate::report::inputs::find_coverage_files;
use crate::report::writer::write_reports;
use crate::report::writer::ReportPaths;
use crate::utils::args::threshold_in_range;
use crate::utils::args::DEFAULT_THRESHOLD;
use crate::utils::args::KeyPolicy;
use crate::utils::display::PercentageFormat;
use crate::utils::formats::OutputFormat;

//========================//
// Command line arguments //
//========================//

/// Clap arguments for the `exoncov report` subcommand.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["sambamba_input_file", "input_directory"])))]
pub struct ReportArgs {
    /// A single coverage file to report on.
    #[arg(
        long = "sambamba_input_file",
        visible_alias = "sambamba-input-file",
        value_name = "PATH"
    )]
    pub sambamba_input_file: Option<PathBuf>,

    /// A directory whose coverage files (names ending in `_output.tsv` or
    /// `_output.txt`, optionally gzipped) are each reported on.
    #[arg(
        long = "input_directory",
        visible_alias = "input-directory",
        value_name = "PATH"
    )]
    pub input_directory: Option<PathBuf>,

    /// Output prefix for the files that will be created. Defaults to the name
    /// of the input file. In directory mode, it is prepended to the name of
    /// each input file.
    #[arg(
        short = 'p',
        long = "output_file_prefix",
        visible_alias = "output-file-prefix",
        value_name = "STRING"
    )]
    pub output_file_prefix: Option<String>,

    /// Directory to output files to. Defaults to current working directory.
    #[arg(
        short = 'o',
        long = "output_directory",
        visible_alias = "output-directory",
        value_name = "PATH"
    )]
    pub output_directory: Option<PathBuf>,

    /// Exons with a lower percentage of bases covered at 30x are low coverage.
    #[arg(short, long, value_name = "0-100", default_value_t = DEFAULT_THRESHOLD)]
    #[arg(value_parser = threshold_in_range)]
    pub threshold: u8,

    /// Format of the written reports.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// How to treat rows whose gene column is not `GeneSymbol;Accession`.
    #[arg(long, value_enum, default_value_t = KeyPolicy::Strict)]
    pub malformed_keys: KeyPolicy,

    /// In directory mode, keep processing the remaining files after one fails.
    #[arg(long)]
    pub keep_going: bool,
}

//==================//
// Resolved options //
//==================//

/// Where the coverage data comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// A single coverage file.
    File(PathBuf),

    /// Every coverage file within a directory.
    Directory(PathBuf),
}

/// Settings shared by every file processed in one run.
#[derive(Clone, Debug)]
pub struct ReportOptions {
    /// Prefix supplied on the command line, if any.
    pub prefix: Option<String>,

    /// Directory the reports are written to.
    pub output_directory: PathBuf,

    /// Percentage at 30x below which an exon is low coverage.
    pub threshold: u8,

    /// Format of the written reports.
    pub format: OutputFormat,

    /// Treatment of malformed gene keys.
    pub policy: KeyPolicy,

    /// Whether a failing file aborts a directory run.
    pub keep_going: bool,
}

//==================================//
// Prepares the `report` subcommand //
//==================================//

/// Main function for the `exoncov report` subcommand.
pub fn report(args: ReportArgs) -> anyhow::Result<()> {
    info!("Starting report command...");
    debug!("Arguments:");

    let input = match (args.sambamba_input_file, args.input_directory) {
        (Some(file), None) => Input::File(file),
        (None, Some(dir)) => Input::Directory(dir),
        _ => bail!("exactly one of --sambamba_input_file or --input_directory must be provided"),
    };
    debug!("  [*] Input: {:?}", input);

    let output_directory = match args.output_directory {
        Some(p) => p,
        None => std::env::current_dir()?,
    };
    debug!("  [*] Output directory: {}", output_directory.display());
    debug!("  [*] Output prefix: {:?}", args.output_file_prefix);
    debug!("  [*] Threshold: {}%", args.threshold);
    debug!("  [*] Format: {}", args.format);
    debug!("  [*] Malformed keys: {}", args.malformed_keys);

    let options = ReportOptions {
        prefix: args.output_file_prefix,
        output_directory,
        threshold: args.threshold,
        format: args.format,
        policy: args.malformed_keys,
        keep_going: args.keep_going,
    };

    let written = run(&input, &options)?;
    info!("Finished: wrote reports for {} input(s).", written.len());

    Ok(())
}

//==============//
// Main program //
//==============//

/// Runs the full pipeline for every input file, returning the reports written.
pub fn run(input: &Input, options: &ReportOptions) -> anyhow::Result<Vec<ReportPaths>> {
    if !options.output_directory.exists() {
        std::fs::create_dir_all(&options.output_directory).with_context(|| {
            format!(
                "creating output directory: {}",
                options.output_directory.display()
            )
        })?;
    }

    match input {
        Input::File(src) => {
            let prefix = match &options.prefix {
                Some(p) => p.clone(),
                None => derive_prefix(src, None),
            };

            Ok(vec![process_file(src, &prefix, options)?])
        }
        Input::Directory(dir) => run_directory(dir, options),
    }
}

fn run_directory(dir: &Path, options: &ReportOptions) -> anyhow::Result<Vec<ReportPaths>> {
    let files = find_coverage_files(dir)?;
    info!(
        "Found {} coverage files in {}.",
        files.len(),
        dir.display()
    );

    // Two files that differ only by a stripped extension would overwrite each
    // other's reports.
    let mut claimed: HashMap<String, &PathBuf> = HashMap::new();
    let mut jobs = Vec::with_capacity(files.len());

    for src in &files {
        let prefix = derive_prefix(src, options.prefix.as_deref());

        if let Some(other) = claimed.insert(prefix.clone(), src) {
            bail!(
                "{} and {} both map to the output prefix \"{}\"",
                other.display(),
                src.display(),
                prefix
            );
        }

        jobs.push((src, prefix));
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:.cyan.bold} [{elapsed_precise}] [{bar}] {pos}/{len} {msg}")
            .progress_chars("=> "),
    );
    pb.set_prefix("Reporting");

    let mut written = Vec::new();
    let mut failures = 0usize;

    for (src, prefix) in &jobs {
        pb.set_message(src.display().to_string());

        match process_file(src, prefix, options) {
            Ok(paths) => written.push(paths),
            Err(err) if options.keep_going => {
                error!("{:#}", err);
                failures += 1;
            }
            Err(err) => {
                pb.abandon();
                return Err(err);
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if failures > 0 {
        bail!(
            "{} of {} coverage files in {} failed",
            failures,
            files.len(),
            dir.display()
        );
    }

    Ok(written)
}

/// Reads, filters, summarizes and writes the reports for one coverage file.
fn process_file(src: &Path, prefix: &str, options: &ReportOptions) -> anyhow::Result<ReportPaths> {
    info!("Processing {}...", src.display());

    let analysis = coverage::analyze(src, options.threshold, options.policy)
        .with_context(|| format!("processing coverage file: {}", src.display()))?;

    info!(
        "  [*] {} of {} exons belong to genes below {}% at 30x ({}).",
        analysis.low_coverage.len(),
        analysis.total_exons,
        options.threshold,
        PercentageFormat(analysis.low_coverage.len(), analysis.total_exons)
    );

    match analysis.low_genes.is_empty() {
        true => info!(
            "  [*] No genes with less than {}% coverage at 30x.",
            options.threshold
        ),
        false => info!(
            "  [*] Genes with less than {}% coverage at 30x: {}.",
            options.threshold,
            analysis.low_genes.join(", ")
        ),
    }

    write_reports(&analysis, &options.output_directory, prefix, options.format)
        .with_context(|| format!("writing reports for {}", src.display()))
}
