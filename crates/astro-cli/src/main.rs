//! astrostretch - statistical stretch for linear astronomical images
//!
//! Brightens faint nebulosity in stacked frames by moving the image median
//! to a target value with a median-anchored tone curve.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{stats::StatsArgs, stretch::StretchArgs};

#[derive(Parser)]
#[command(name = "astrostretch")]
#[command(author, version, about = "Statistical stretch for astronomical images")]
#[command(long_about = "
Statistical stretch for linear astronomical images.

Examples:
  astrostretch stretch M42.tif -o M42.png                 # Linked, median 0.25
  astrostretch stretch M42.tif -o M42.png -m 0.15 --unlinked
  astrostretch stretch M42.tif -o M42.tif --curves --curves-boost 0.3 --normalize
  astrostretch stretch M42.tif -o M42.png --config params.yaml
  astrostretch stats M42.tif                              # Channel statistics
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Stretch an image to a target median
    #[command(visible_alias = "s")]
    Stretch(StretchArgs),

    /// Print per-channel statistics and black point
    Stats(StatsArgs),
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Stretch(args) => commands::stretch::run(args),
        Commands::Stats(args) => commands::stats::run(args),
    }
}
