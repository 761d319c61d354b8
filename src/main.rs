use clap::Parser;
use clap::Subcommand;
use git_testament::git_testament;
use git_testament::render_testament;

use exoncov::report;
use exoncov::view;

git_testament!(TESTAMENT);

#[derive(Parser)]
#[command(
    name = "exoncov",
    version = render_testament!(TESTAMENT),
    propagate_version = true,
    about = "Reports genes with insufficient exon coverage at 30x."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Only errors are printed to the stderr stream.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// All available information, including debug information, is printed to
    /// stderr.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Writes detailed and per-gene reports of low coverage genes.
    Report(report::command::ReportArgs),

    /// Prints the per-gene summary of low coverage genes for one file.
    View(view::command::ViewArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut level = tracing::Level::INFO;
    if cli.quiet {
        level = tracing::Level::ERROR;
    } else if cli.verbose {
        level = tracing::Level::DEBUG;
    }

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match cli.command {
        Commands::Report(args) => report::command::report(args),
        Commands::View(args) => view::command::view(args),
    }
}
