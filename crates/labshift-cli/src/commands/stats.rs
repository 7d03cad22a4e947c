//! Image statistics command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use labshift_core::SampleGrid;
use labshift_ops::channel_stats;

use super::{load_image, parse_filter, parse_grid};

/// Arguments for the `stats` command.
#[derive(Args)]
pub struct StatsArgs {
    /// Input image
    pub input: PathBuf,

    /// Sampling grid (WxH); default is the image's own size
    #[arg(short, long)]
    pub grid: Option<String>,

    /// Sampling filter: nearest, bilinear
    #[arg(short, long, default_value = "nearest")]
    pub filter: String,
}

/// Run the stats command.
pub fn run(args: StatsArgs) -> Result<()> {
    let img = load_image(&args.input)?;
    let grid = match args.grid.as_deref() {
        Some(spec) => parse_grid(spec)?,
        None => SampleGrid::of_image(&img),
    };
    let filter = parse_filter(&args.filter)?;

    let stats = channel_stats(&img, grid, filter)?;
    let stddev = stats.stddev();

    println!("{} ({}x{}, grid {}x{})",
        args.input.display(),
        img.width(),
        img.height(),
        grid.width,
        grid.height
    );
    println!("  channel       mean    variance      stddev");
    for (name, c) in [("l", 0), ("alpha", 1), ("beta", 2)] {
        println!(
            "  {:<8} {:>9.5} {:>11.6} {:>11.6}",
            name, stats.mean[c], stats.variance[c], stddev[c]
        );
    }

    Ok(())
}
