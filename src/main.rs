use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use sectionx::{print_results, SectionProperties, DEFAULT_FORMAT};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Print the section properties stored in a results file.
#[derive(Debug, Parser)]
#[command(name = "sectionx", version, about)]
struct Cli {
    /// JSON file written by the cross-section analysis.
    results: PathBuf,

    /// Number format applied to every value, e.g. ".3e" or "12.4f".
    #[arg(short, long, default_value = DEFAULT_FORMAT)]
    fmt: String,

    /// Increase log verbosity (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the report on stdout.
    // SECTIONX_LOG takes precedence over -v.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("SECTIONX_LOG").unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    let properties = SectionProperties::from_path(&cli.results)?;
    info!(path = %cli.results.display(), "loaded section properties");

    print_results(&properties, &cli.fmt)?;

    Ok(())
}
