//! Per-channel lab statistics over a sampling grid.
//!
//! The aggregator walks a [`SampleGrid`] in normalized coordinates,
//! samples the image with the texture convention from `labshift-core`,
//! converts every sample to lab, and accumulates moments in two passes:
//!
//! 1. sum each channel, divide by the sample count -> means
//! 2. sum squared deviations from the pass-1 means, divide by the
//!    sample count -> population variances
//!
//! The two-pass shape mirrors the moment-matching method itself rather
//! than being a numerical-stability workaround. Accumulation runs in
//! f64 and rows reduce in parallel; addition order only affects
//! rounding, never correctness.

use labshift_color::rgb_to_lab;
use labshift_core::{sample::sample_rgb, Error, Filter, Image, Result, SampleGrid};
use labshift_math::Vec3;
use rayon::prelude::*;

/// Per-channel lab moments of one image's sampled grid.
///
/// Recomputed from scratch on every transfer invocation; never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    /// Mean of each lab channel.
    pub mean: Vec3,
    /// Population variance of each lab channel (divide by N, not N-1).
    pub variance: Vec3,
}

impl ChannelStats {
    /// Standard deviation of each channel: `sqrt(variance)`.
    ///
    /// Zero variance yields a zero standard deviation; the transfer
    /// engine guards the division.
    #[inline]
    pub fn stddev(&self) -> Vec3 {
        self.variance.max(Vec3::ZERO).sqrt()
    }
}

/// Computes per-channel lab statistics of `image` over `grid`.
///
/// Source and target images are aggregated independently, each over its
/// own grid.
///
/// # Errors
///
/// - [`Error::EmptyGrid`] if the grid has zero area
/// - [`Error::EmptyImage`] if the image has zero area
///
/// # Example
///
/// ```rust
/// use labshift_core::{Filter, Image, SampleGrid};
/// use labshift_ops::channel_stats;
///
/// let img = Image::filled(4, 4, [0.5, 0.5, 0.5, 1.0]);
/// let stats = channel_stats(&img, SampleGrid::of_image(&img), Filter::Nearest).unwrap();
/// assert!(stats.variance.max_element() < 1e-10);
/// ```
pub fn channel_stats(image: &Image, grid: SampleGrid, filter: Filter) -> Result<ChannelStats> {
    grid.validate()?;
    if image.is_empty() {
        return Err(Error::empty_image(image.width(), image.height()));
    }

    let n = grid.len() as f64;

    // Pass 1: channel sums -> means.
    let sum = reduce_rows(grid, |j| {
        let mut acc = [0.0f64; 3];
        for i in 0..grid.width {
            let (u, v) = grid.uv(i, j);
            let lab = rgb_to_lab(sample_rgb(image, u, v, filter));
            acc[0] += lab.x as f64;
            acc[1] += lab.y as f64;
            acc[2] += lab.z as f64;
        }
        acc
    });
    let mean = [sum[0] / n, sum[1] / n, sum[2] / n];

    // Pass 2: squared deviations from the pass-1 means -> variances.
    let sq_sum = reduce_rows(grid, |j| {
        let mut acc = [0.0f64; 3];
        for i in 0..grid.width {
            let (u, v) = grid.uv(i, j);
            let lab = rgb_to_lab(sample_rgb(image, u, v, filter));
            let d = [
                lab.x as f64 - mean[0],
                lab.y as f64 - mean[1],
                lab.z as f64 - mean[2],
            ];
            acc[0] += d[0] * d[0];
            acc[1] += d[1] * d[1];
            acc[2] += d[2] * d[2];
        }
        acc
    });

    Ok(ChannelStats {
        mean: Vec3::new(mean[0] as f32, mean[1] as f32, mean[2] as f32),
        variance: Vec3::new(
            (sq_sum[0] / n) as f32,
            (sq_sum[1] / n) as f32,
            (sq_sum[2] / n) as f32,
        ),
    })
}

/// Parallel reduction of per-row partial sums.
///
/// Addition is associative and commutative, so the rayon split order
/// does not matter.
fn reduce_rows<F>(grid: SampleGrid, row_sum: F) -> [f64; 3]
where
    F: Fn(u32) -> [f64; 3] + Sync + Send,
{
    (0..grid.height)
        .into_par_iter()
        .map(row_sum)
        .reduce(
            || [0.0; 3],
            |a, b| [a[0] + b[0], a[1] + b[1], a[2] + b[2]],
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_grid_rejected() {
        let img = Image::new(4, 4);
        let err = channel_stats(&img, SampleGrid::new(0, 4), Filter::Nearest);
        assert!(matches!(err, Err(Error::EmptyGrid { .. })));
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = Image::new(0, 4);
        let err = channel_stats(&img, SampleGrid::new(4, 4), Filter::Nearest);
        assert!(matches!(err, Err(Error::EmptyImage { .. })));
    }

    #[test]
    fn test_constant_image_has_zero_variance() {
        let img = Image::filled(8, 8, [0.3, 0.6, 0.9, 1.0]);
        let stats = channel_stats(&img, SampleGrid::of_image(&img), Filter::Nearest).unwrap();
        let expected = rgb_to_lab(labshift_math::Vec3::new(0.3, 0.6, 0.9));
        assert_relative_eq!(stats.mean.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(stats.mean.y, expected.y, epsilon = 1e-6);
        assert_relative_eq!(stats.mean.z, expected.z, epsilon = 1e-6);
        assert!(stats.variance.max_element() < 1e-10);
        assert!(stats.stddev().max_element() < 1e-9);
    }

    #[test]
    fn test_two_by_two_population_moments() {
        // Four known colors; grid equals the image, so every pixel is
        // sampled exactly once.
        let mut img = Image::new(2, 2);
        let colors = [
            [0.1, 0.2, 0.3, 1.0],
            [0.4, 0.5, 0.6, 1.0],
            [0.7, 0.8, 0.9, 1.0],
            [0.2, 0.4, 0.6, 1.0],
        ];
        img.set_pixel(0, 0, colors[0]);
        img.set_pixel(1, 0, colors[1]);
        img.set_pixel(0, 1, colors[2]);
        img.set_pixel(1, 1, colors[3]);

        let labs: Vec<Vec3> = colors
            .iter()
            .map(|c| rgb_to_lab(Vec3::new(c[0], c[1], c[2])))
            .collect();
        let mean = labs.iter().fold(Vec3::ZERO, |a, &b| a + b) / 4.0;
        // Population variance: divide by N = 4.
        let variance = labs
            .iter()
            .fold(Vec3::ZERO, |a, &b| a + (b - mean) * (b - mean))
            / 4.0;

        let stats = channel_stats(&img, SampleGrid::of_image(&img), Filter::Nearest).unwrap();
        for c in 0..3 {
            assert_relative_eq!(stats.mean[c], mean[c], epsilon = 1e-5);
            assert_relative_eq!(stats.variance[c], variance[c], epsilon = 1e-5);
        }
    }

    #[test]
    fn test_stats_invariant_under_grid_flip() {
        // Mean and variance are permutation-invariant, so the vertical
        // flip in the sampling convention must not change them.
        let mut img = Image::new(2, 2);
        img.set_pixel(0, 0, [0.9, 0.1, 0.1, 1.0]);
        img.set_pixel(1, 0, [0.1, 0.9, 0.1, 1.0]);
        img.set_pixel(0, 1, [0.1, 0.1, 0.9, 1.0]);
        img.set_pixel(1, 1, [0.5, 0.5, 0.5, 1.0]);

        let a = channel_stats(&img, SampleGrid::of_image(&img), Filter::Nearest).unwrap();

        // Same pixels, rows swapped.
        let mut flipped = Image::new(2, 2);
        flipped.set_pixel(0, 0, [0.1, 0.1, 0.9, 1.0]);
        flipped.set_pixel(1, 0, [0.5, 0.5, 0.5, 1.0]);
        flipped.set_pixel(0, 1, [0.9, 0.1, 0.1, 1.0]);
        flipped.set_pixel(1, 1, [0.1, 0.9, 0.1, 1.0]);
        let b = channel_stats(&flipped, SampleGrid::of_image(&flipped), Filter::Nearest).unwrap();

        for c in 0..3 {
            assert_relative_eq!(a.mean[c], b.mean[c], epsilon = 1e-6);
            assert_relative_eq!(a.variance[c], b.variance[c], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_coarse_grid_on_uniform_image() {
        // Resampling a uniform image on a smaller grid changes nothing.
        let img = Image::filled(64, 64, [0.2, 0.7, 0.4, 1.0]);
        let fine = channel_stats(&img, SampleGrid::of_image(&img), Filter::Nearest).unwrap();
        let coarse = channel_stats(&img, SampleGrid::new(10, 10), Filter::Bilinear).unwrap();
        for c in 0..3 {
            assert_relative_eq!(fine.mean[c], coarse.mean[c], epsilon = 1e-5);
        }
    }
}
