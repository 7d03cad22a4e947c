//! Moment-matching transfer engine.
//!
//! Given per-channel lab statistics for a source (pallet) image and a
//! target image, each target pixel is recentered and rescaled so the
//! target's lab distribution takes on the source's mean and standard
//! deviation:
//!
//! ```text
//! out_c = clamp((x_c - target_mean_c) * (source_std_c / target_std_c)
//!               * strength + source_mean_c, low_c, high_c)
//! ```
//!
//! The per-pixel application is a pure parallel map: no pixel depends
//! on any other, only on the two precomputed [`ChannelStats`].

use crate::stats::{channel_stats, ChannelStats};
use labshift_color::{lab_to_rgb, rgb_to_lab};
use labshift_core::image::CHANNELS;
use labshift_core::{Error, Filter, Image, Result, SampleGrid};
use labshift_math::Vec3;
use rayon::prelude::*;
use tracing::debug;

/// Configuration for one transfer invocation.
///
/// # Defaults
///
/// - `strength`: 1.0. Values slightly above 1 (e.g. 1.1) exaggerate
///   the source's contrast.
/// - `clamp_low` / `clamp_high`: (0, 255) per channel. With [0, 1]
///   normalized working values only the low bound can bind; both are
///   configurable.
/// - `source_grid` / `target_grid`: `None`, meaning each image is
///   aggregated over its own full pixel grid
/// - `filter`: nearest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferConfig {
    /// Scale applied to the stddev ratio; > 0.
    pub strength: f32,
    /// Per-channel lower clamp bound in lab space.
    pub clamp_low: Vec3,
    /// Per-channel upper clamp bound in lab space.
    pub clamp_high: Vec3,
    /// Grid for source statistics; defaults to the source's dimensions.
    pub source_grid: Option<SampleGrid>,
    /// Grid for target statistics; defaults to the target's dimensions.
    pub target_grid: Option<SampleGrid>,
    /// Sampling filter used during aggregation.
    pub filter: Filter,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            strength: 1.0,
            clamp_low: Vec3::ZERO,
            clamp_high: Vec3::splat(255.0),
            source_grid: None,
            target_grid: None,
            filter: Filter::Nearest,
        }
    }
}

impl TransferConfig {
    /// Checks the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `strength` is not a
    /// positive finite number or a clamp interval is inverted.
    pub fn validate(&self) -> Result<()> {
        if !self.strength.is_finite() || self.strength <= 0.0 {
            return Err(Error::invalid_parameter(format!(
                "strength must be positive and finite, got {}",
                self.strength
            )));
        }
        for c in 0..3 {
            if self.clamp_low[c] > self.clamp_high[c] {
                return Err(Error::invalid_parameter(format!(
                    "clamp bounds inverted on channel {}: low {} > high {}",
                    c, self.clamp_low[c], self.clamp_high[c]
                )));
            }
        }
        Ok(())
    }
}

/// Applies the moment-matching transform to one lab sample.
///
/// When a target channel has zero standard deviation the ratio is
/// defined as 1.0, so the pixel receives a pure mean shift instead of a
/// NaN or infinity.
///
/// # Example
///
/// ```rust
/// use labshift_math::Vec3;
/// use labshift_ops::{transfer_pixel, ChannelStats, TransferConfig};
///
/// let stats = ChannelStats { mean: Vec3::splat(0.5), variance: Vec3::splat(0.01) };
/// let out = transfer_pixel(Vec3::splat(0.5), &stats, &stats, &TransferConfig::default());
/// // Identical stats and a sample at the mean: nothing moves
/// assert!((out - Vec3::splat(0.5)).abs().max_element() < 1e-6);
/// ```
pub fn transfer_pixel(
    lab: Vec3,
    source: &ChannelStats,
    target: &ChannelStats,
    config: &TransferConfig,
) -> Vec3 {
    let source_std = source.stddev();
    let target_std = target.stddev();

    let mut out = Vec3::ZERO;
    for c in 0..3 {
        // Zero target deviation: pass the mean shift through unscaled.
        let ratio = if target_std[c] == 0.0 {
            1.0
        } else {
            source_std[c] / target_std[c]
        };
        out[c] = (lab[c] - target.mean[c]) * ratio * config.strength + source.mean[c];
    }
    out.clamp(config.clamp_low, config.clamp_high)
}

/// Recolors `target` so its lab statistics match `source`'s.
///
/// Statistics for each image are aggregated over that image's own grid
/// (unless overridden in `config`), then every target pixel is mapped
/// through [`transfer_pixel`]. The output has the target's dimensions;
/// alpha passes through untouched. Each call is a fresh computation
/// with no cached state.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] for a bad configuration
/// - [`Error::EmptyGrid`] / [`Error::EmptyImage`] from aggregation
///
/// # Example
///
/// ```rust
/// use labshift_core::Image;
/// use labshift_ops::{transfer_image, TransferConfig};
///
/// let source = Image::filled(8, 8, [0.78, 0.2, 0.2, 1.0]);
/// let target = Image::filled(8, 8, [0.04, 0.04, 0.78, 1.0]);
/// let out = transfer_image(&source, &target, &TransferConfig::default()).unwrap();
/// // Constant target takes on the source color
/// assert!((out.pixel(0, 0)[0] - 0.78).abs() < 0.01);
/// ```
pub fn transfer_image(source: &Image, target: &Image, config: &TransferConfig) -> Result<Image> {
    config.validate()?;

    let source_grid = config.source_grid.unwrap_or_else(|| SampleGrid::of_image(source));
    let target_grid = config.target_grid.unwrap_or_else(|| SampleGrid::of_image(target));

    // The two aggregations are independent; each image over its own grid.
    let source_stats = channel_stats(source, source_grid, config.filter)?;
    let target_stats = channel_stats(target, target_grid, config.filter)?;

    debug!(
        source_mean = ?source_stats.mean,
        target_mean = ?target_stats.mean,
        strength = config.strength,
        "transferring {}x{} target",
        target.width(),
        target.height()
    );

    let width = target.width() as usize;
    let src_data = target.data();
    let mut out = vec![0.0f32; src_data.len()];

    out.par_chunks_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            let src_row = &src_data[y * width * CHANNELS..(y + 1) * width * CHANNELS];
            for x in 0..width {
                let off = x * CHANNELS;
                let rgb = Vec3::new(src_row[off], src_row[off + 1], src_row[off + 2]);
                let lab = rgb_to_lab(rgb);
                let matched = transfer_pixel(lab, &source_stats, &target_stats, config);
                let out_rgb = lab_to_rgb(matched);
                row[off] = out_rgb.x;
                row[off + 1] = out_rgb.y;
                row[off + 2] = out_rgb.z;
                row[off + 3] = src_row[off + 3];
            }
        });

    Image::from_data(target.width(), target.height(), out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(mean: Vec3, variance: Vec3) -> ChannelStats {
        ChannelStats { mean, variance }
    }

    #[test]
    fn test_config_validate() {
        assert!(TransferConfig::default().validate().is_ok());

        let bad_strength = TransferConfig {
            strength: 0.0,
            ..Default::default()
        };
        assert!(bad_strength.validate().is_err());

        let inverted = TransferConfig {
            clamp_low: Vec3::splat(1.0),
            clamp_high: Vec3::ZERO,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_pixel_identity_with_equal_stats() {
        let s = stats(Vec3::new(0.5, 0.1, 0.2), Vec3::splat(0.04));
        let lab = Vec3::new(0.7, 0.15, 0.1);
        let out = transfer_pixel(lab, &s, &s, &TransferConfig::default());
        assert!((out - lab).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_pixel_zero_target_variance_is_mean_shift() {
        let source = stats(Vec3::new(0.8, 0.05, 0.02), Vec3::splat(0.09));
        let target = stats(Vec3::new(0.3, 0.01, 0.01), Vec3::ZERO);
        let lab = target.mean;
        let out = transfer_pixel(lab, &source, &target, &TransferConfig::default());
        // Deviation is zero, ratio guard yields a pure mean swap
        assert!((out - source.mean).abs().max_element() < 1e-6);
        assert!(out.is_finite());
    }

    #[test]
    fn test_pixel_clamps_exactly_to_low_bound() {
        let source = stats(Vec3::ZERO, Vec3::splat(100.0));
        let target = stats(Vec3::splat(0.5), Vec3::splat(0.01));
        // Large stddev ratio drives every channel far below zero
        let out = transfer_pixel(Vec3::ZERO, &source, &target, &TransferConfig::default());
        assert_eq!(out, Vec3::ZERO);
    }

    #[test]
    fn test_pixel_clamps_exactly_to_high_bound() {
        let config = TransferConfig {
            clamp_high: Vec3::splat(1.0),
            ..Default::default()
        };
        let source = stats(Vec3::splat(0.5), Vec3::splat(100.0));
        let target = stats(Vec3::splat(0.5), Vec3::splat(0.01));
        let out = transfer_pixel(Vec3::splat(0.9), &source, &target, &config);
        assert_eq!(out, Vec3::splat(1.0));
    }

    #[test]
    fn test_strength_scales_deviation() {
        let s = stats(Vec3::splat(0.5), Vec3::splat(0.04));
        let lab = Vec3::splat(0.7);
        let gentle = transfer_pixel(lab, &s, &s, &TransferConfig::default());
        let config = TransferConfig {
            strength: 1.1,
            ..Default::default()
        };
        let strong = transfer_pixel(lab, &s, &s, &config);
        // strength 1.1 pushes the deviation 10% further from the mean
        assert!((strong.x - 0.5) > (gentle.x - 0.5));
        assert!(((strong.x - 0.5) / (gentle.x - 0.5) - 1.1).abs() < 1e-5);
    }
}
