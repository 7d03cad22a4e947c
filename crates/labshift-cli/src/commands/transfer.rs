//! Color transfer command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use labshift_math::Vec3;
use labshift_ops::{transfer_image, TransferConfig};
use tracing::info;

use super::{load_image, parse_clamp, parse_filter, parse_grid, save_image};

/// Arguments for the `transfer` command.
#[derive(Args)]
pub struct TransferArgs {
    /// Source (pallet) image whose colors are transferred
    pub source: PathBuf,

    /// Target image that gets recolored
    pub target: PathBuf,

    /// Output image
    #[arg(short, long)]
    pub output: PathBuf,

    /// Strength coefficient applied to the stddev ratio
    #[arg(short, long, default_value = "1.0")]
    pub strength: f32,

    /// Sampling grid for both images (WxH); default is each image's own size
    #[arg(short, long)]
    pub grid: Option<String>,

    /// Per-channel clamp bounds in lab space (LO,HI)
    #[arg(long, default_value = "0,255")]
    pub clamp: String,

    /// Sampling filter: nearest, bilinear
    #[arg(short, long, default_value = "nearest")]
    pub filter: String,
}

/// Run the transfer command.
pub fn run(args: TransferArgs) -> Result<()> {
    let source = load_image(&args.source)?;
    let target = load_image(&args.target)?;
    info!(
        "source {}x{}, target {}x{}",
        source.width(),
        source.height(),
        target.width(),
        target.height()
    );

    let grid = args.grid.as_deref().map(parse_grid).transpose()?;
    let (lo, hi) = parse_clamp(&args.clamp)?;

    let config = TransferConfig {
        strength: args.strength,
        clamp_low: Vec3::splat(lo),
        clamp_high: Vec3::splat(hi),
        source_grid: grid,
        target_grid: grid,
        filter: parse_filter(&args.filter)?,
    };

    let out = transfer_image(&source, &target, &config)?;
    save_image(&args.output, &out)?;
    info!("saved {}", args.output.display());

    Ok(())
}
