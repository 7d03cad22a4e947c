//! Sampling grid and texture-style image sampling.
//!
//! Statistics are aggregated over a [`SampleGrid`]: a `width x height`
//! lattice of normalized coordinates `(i/w, j/h)` in `[0,1) x [0,1)`.
//! Each image is sampled over its **own** grid; source and target never
//! share iteration bounds.
//!
//! Sampling follows GPU texture conventions: coordinates are
//! normalized, the v axis is flipped (v = 0 addresses the bottom row of
//! the image), lookups clamp to the edge, and filtering is
//! nearest-neighbor by default with bilinear as an option.

use crate::{Error, Image, Result};
use labshift_math::Vec3;

/// Sampling filter applied when a grid coordinate lands between pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor lookup.
    #[default]
    Nearest,
    /// Bilinear interpolation of the four surrounding pixels.
    Bilinear,
}

/// The discrete domain statistics are aggregated over.
///
/// Defaults to the sampled image's own dimensions via
/// [`SampleGrid::of_image`]. A grid of different size resamples the
/// image, which trades accuracy for speed on large inputs.
///
/// # Example
///
/// ```rust
/// use labshift_core::{Image, SampleGrid};
///
/// let img = Image::new(640, 480);
/// let grid = SampleGrid::of_image(&img);
/// assert_eq!(grid.len(), 640 * 480);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleGrid {
    /// Number of sample columns.
    pub width: u32,
    /// Number of sample rows.
    pub height: u32,
}

impl SampleGrid {
    /// Creates a grid with explicit dimensions.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates the grid covering every pixel of `image`.
    #[inline]
    pub fn of_image(image: &Image) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Total number of samples in the grid.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the grid has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rejects zero-area grids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGrid`] when either dimension is zero.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::empty_grid(self.width, self.height));
        }
        Ok(())
    }

    /// Normalized coordinate of grid cell (i, j), in [0,1) x [0,1).
    #[inline]
    pub fn uv(&self, i: u32, j: u32) -> (f32, f32) {
        (
            i as f32 / self.width as f32,
            j as f32 / self.height as f32,
        )
    }
}

/// Samples the RGB channels of `image` at normalized coordinates (u, v).
///
/// The v axis is flipped: v = 0 reads the bottom row, v approaching 1
/// reads the top. Coordinates outside [0, 1] clamp to the edge.
///
/// # Example
///
/// ```rust
/// use labshift_core::{sample::sample_rgb, Filter, Image};
///
/// let mut img = Image::new(2, 2);
/// img.set_pixel(0, 1, [1.0, 0.0, 0.0, 1.0]); // bottom-left pixel
/// let rgb = sample_rgb(&img, 0.0, 0.0, Filter::Nearest);
/// assert_eq!(rgb.x, 1.0);
/// ```
pub fn sample_rgb(image: &Image, u: f32, v: f32, filter: Filter) -> Vec3 {
    debug_assert!(!image.is_empty(), "sampling an empty image");
    match filter {
        Filter::Nearest => sample_nearest(image, u, v),
        Filter::Bilinear => sample_bilinear(image, u, v),
    }
}

fn sample_nearest(image: &Image, u: f32, v: f32) -> Vec3 {
    let w = image.width();
    let h = image.height();
    let x = ((u * w as f32).floor() as i64).clamp(0, w as i64 - 1) as u32;
    // Flipped: texel row 0 is the bottom image row.
    let row = ((v * h as f32).floor() as i64).clamp(0, h as i64 - 1) as u32;
    let y = h - 1 - row;
    image.rgb(x, y)
}

fn sample_bilinear(image: &Image, u: f32, v: f32) -> Vec3 {
    let w = image.width();
    let h = image.height();

    // Texel centers sit at (i + 0.5) / size.
    let fx = u * w as f32 - 0.5;
    let fy = v * h as f32 - 0.5;

    let x0 = (fx.floor() as i64).clamp(0, w as i64 - 1) as u32;
    let x1 = (x0 + 1).min(w - 1);
    let r0 = (fy.floor() as i64).clamp(0, h as i64 - 1) as u32;
    let r1 = (r0 + 1).min(h - 1);

    // Fractions relative to the clamped texel, so edge lookups stay on
    // the edge instead of blending toward the neighbor.
    let tx = (fx - x0 as f32).clamp(0.0, 1.0);
    let ty = (fy - r0 as f32).clamp(0.0, 1.0);

    // Rows are addressed bottom-up in texture space.
    let y0 = h - 1 - r0;
    let y1 = h - 1 - r1;

    let p00 = image.rgb(x0, y0);
    let p10 = image.rgb(x1, y0);
    let p01 = image.rgb(x0, y1);
    let p11 = image.rgb(x1, y1);

    let top = p00 * (1.0 - tx) + p10 * tx;
    let bottom = p01 * (1.0 - tx) + p11 * tx;
    top * (1.0 - ty) + bottom * ty
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gradient_image() -> Image {
        // 2x2: top row red/green, bottom row blue/white
        let mut img = Image::new(2, 2);
        img.set_pixel(0, 0, [1.0, 0.0, 0.0, 1.0]);
        img.set_pixel(1, 0, [0.0, 1.0, 0.0, 1.0]);
        img.set_pixel(0, 1, [0.0, 0.0, 1.0, 1.0]);
        img.set_pixel(1, 1, [1.0, 1.0, 1.0, 1.0]);
        img
    }

    #[test]
    fn test_grid_of_image() {
        let img = Image::new(10, 20);
        let grid = SampleGrid::of_image(&img);
        assert_eq!(grid, SampleGrid::new(10, 20));
        assert_eq!(grid.len(), 200);
    }

    #[test]
    fn test_grid_validate_empty() {
        assert!(SampleGrid::new(0, 100).validate().is_err());
        assert!(SampleGrid::new(100, 0).validate().is_err());
        assert!(SampleGrid::new(1, 1).validate().is_ok());
    }

    #[test]
    fn test_grid_uv() {
        let grid = SampleGrid::new(4, 4);
        assert_eq!(grid.uv(0, 0), (0.0, 0.0));
        assert_eq!(grid.uv(2, 1), (0.5, 0.25));
    }

    #[test]
    fn test_nearest_vertical_flip() {
        let img = gradient_image();
        // v = 0 addresses the bottom row (blue), v near 1 the top (red)
        assert_eq!(sample_rgb(&img, 0.0, 0.0, Filter::Nearest).z, 1.0);
        assert_eq!(sample_rgb(&img, 0.0, 0.9, Filter::Nearest).x, 1.0);
    }

    #[test]
    fn test_nearest_clamps_to_edge() {
        let img = gradient_image();
        let a = sample_rgb(&img, -1.0, -1.0, Filter::Nearest);
        let b = sample_rgb(&img, 0.0, 0.0, Filter::Nearest);
        assert_eq!(a, b);
        let c = sample_rgb(&img, 2.0, 2.0, Filter::Nearest);
        let d = sample_rgb(&img, 0.99, 0.99, Filter::Nearest);
        assert_eq!(c, d);
    }

    #[test]
    fn test_bilinear_midpoint() {
        let img = gradient_image();
        // Dead center of the 2x2 averages all four pixels
        let c = sample_rgb(&img, 0.5, 0.5, Filter::Bilinear);
        assert_relative_eq!(c.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(c.y, 0.5, epsilon = 1e-6);
        assert_relative_eq!(c.z, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_bilinear_at_texel_center() {
        let img = gradient_image();
        // (0.25, 0.25) is the center of the bottom-left texel: pure blue
        let c = sample_rgb(&img, 0.25, 0.25, Filter::Bilinear);
        assert_relative_eq!(c.z, 1.0, epsilon = 1e-6);
        assert_relative_eq!(c.x, 0.0, epsilon = 1e-6);
    }
}
