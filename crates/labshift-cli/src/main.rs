//! labshift - statistical color transfer CLI
//!
//! Recolors a target image so its color distribution matches a source
//! (pallet) image, preserving the target's spatial structure.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "labshift")]
#[command(author, version, about = "Statistical color transfer between images")]
#[command(long_about = "
Recolors a target image so its per-channel statistics in the decorrelated
lab color space match those of a source (pallet) image.

Examples:
  labshift transfer pallet.png photo.png -o out.png
  labshift transfer pallet.png photo.png -o out.png --strength 1.1
  labshift transfer pallet.png photo.png -o out.png --grid 100x100 --filter bilinear
  labshift stats photo.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Transfer the source image's color statistics onto the target
    #[command(visible_alias = "t")]
    Transfer(commands::transfer::TransferArgs),

    /// Print per-channel lab statistics for an image
    #[command(visible_alias = "s")]
    Stats(commands::stats::StatsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Transfer(args) => commands::transfer::run(args),
        Commands::Stats(args) => commands::stats::run(args),
    }
}
