//! CLI command implementations

pub mod stats;
pub mod transfer;

use anyhow::{bail, Context, Result};
use labshift_core::{Filter, Image, SampleGrid};
use std::path::Path;

/// Load an image and normalize to RGBA f32.
pub fn load_image(path: &Path) -> Result<Image> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    Image::from_rgba8(width, height, decoded.as_raw())
        .with_context(|| format!("Bad pixel buffer: {}", path.display()))
}

/// Save an image, quantizing back to 8-bit RGBA.
pub fn save_image(path: &Path, img: &Image) -> Result<()> {
    let buffer = image::RgbaImage::from_raw(img.width(), img.height(), img.to_rgba8())
        .context("Output buffer size mismatch")?;
    buffer
        .save(path)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parse a `WxH` sampling grid specification.
pub fn parse_grid(s: &str) -> Result<SampleGrid> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("Expected WxH, got '{}'", s))?;
    let grid = SampleGrid::new(
        w.trim().parse().with_context(|| format!("Bad grid width '{}'", w))?,
        h.trim().parse().with_context(|| format!("Bad grid height '{}'", h))?,
    );
    grid.validate()?;
    Ok(grid)
}

/// Parse a `LO,HI` clamp bound pair.
pub fn parse_clamp(s: &str) -> Result<(f32, f32)> {
    let (lo, hi) = s
        .split_once(',')
        .with_context(|| format!("Expected LO,HI, got '{}'", s))?;
    let lo: f32 = lo.trim().parse().with_context(|| format!("Bad bound '{}'", lo))?;
    let hi: f32 = hi.trim().parse().with_context(|| format!("Bad bound '{}'", hi))?;
    if lo > hi {
        bail!("Clamp bounds inverted: {} > {}", lo, hi);
    }
    Ok((lo, hi))
}

/// Parse a sampling filter name.
pub fn parse_filter(s: &str) -> Result<Filter> {
    match s {
        "nearest" => Ok(Filter::Nearest),
        "bilinear" => Ok(Filter::Bilinear),
        _ => bail!("Unknown filter '{}' (expected nearest or bilinear)", s),
    }
}
