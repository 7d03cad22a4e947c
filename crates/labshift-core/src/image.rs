//! Image buffer type for the transfer pipeline.
//!
//! # Memory Layout
//!
//! Pixels are interleaved RGBA `f32`, row-major, top-to-bottom:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0 (top)
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! Channel values are normalized to [0, 1]. 8-bit boundary conversions
//! divide by 255 on the way in and round on the way out.
//!
//! # Sharing
//!
//! The buffer is held in an `Arc`, so cloning an [`Image`] is cheap and
//! the pipeline can fan it out across threads. Mutation goes through
//! [`Image::data_mut`], which copies on write when the buffer is shared.
//!
//! # Usage
//!
//! ```rust
//! use labshift_core::Image;
//!
//! let mut img = Image::new(64, 64);
//! img.set_pixel(10, 10, [1.0, 0.5, 0.25, 1.0]);
//! assert_eq!(img.pixel(10, 10)[1], 0.5);
//! ```

use crate::{Error, Result};
use labshift_math::Vec3;
use std::sync::Arc;

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// Owned RGBA image buffer with [0, 1] normalized f32 samples.
///
/// The pipeline only ever reads source and target images; output images
/// are built once and handed back to the caller.
#[derive(Debug, Clone)]
pub struct Image {
    /// Pixel data buffer (Arc for cheap cloning)
    data: Arc<Vec<f32>>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
}

impl Image {
    /// Creates a new image filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        let data = vec![0.0; width as usize * height as usize * CHANNELS];
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Creates an image from existing interleaved RGBA data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 4`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use labshift_core::Image;
    ///
    /// let pixels = vec![0.0f32; 8 * 8 * 4];
    /// let img = Image::from_data(8, 8, pixels).unwrap();
    /// assert_eq!(img.dimensions(), (8, 8));
    /// ```
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Creates an image filled with a single RGBA value.
    pub fn filled(width: u32, height: u32, pixel: [f32; CHANNELS]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * CHANNELS);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Creates an image from an 8-bit interleaved RGBA buffer.
    ///
    /// Values are normalized to [0, 1].
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if bytes.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, bytes.len()),
            ));
        }
        let data = bytes.iter().map(|&b| b as f32 / 255.0).collect();
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Converts to an 8-bit interleaved RGBA buffer.
    ///
    /// Values are clamped to [0, 1] and rounded.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a reference to the raw pixel data.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns a mutable reference to the pixel data.
    ///
    /// If the buffer is shared (Arc refcount > 1), this clones the data
    /// first (copy-on-write).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Returns the element offset for pixel at (x, y).
    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the RGBA pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [f32; CHANNELS] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for image {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        let off = self.pixel_offset(x, y);
        [
            self.data[off],
            self.data[off + 1],
            self.data[off + 2],
            self.data[off + 3],
        ]
    }

    /// Returns the RGB channels of the pixel at (x, y) as a [`Vec3`].
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> Vec3 {
        let p = self.pixel(x, y);
        Vec3::new(p[0], p[1], p[2])
    }

    /// Sets the RGBA pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the image.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [f32; CHANNELS]) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for image {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        let off = self.pixel_offset(x, y);
        self.data_mut()[off..off + CHANNELS].copy_from_slice(&pixel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_new() {
        let img = Image::new(16, 8);
        assert_eq!(img.dimensions(), (16, 8));
        assert_eq!(img.data().len(), 16 * 8 * 4);
        assert_eq!(img.pixel(15, 7), [0.0; 4]);
    }

    #[test]
    fn test_image_from_data_mismatch() {
        let result = Image::from_data(4, 4, vec![0.0; 10]);
        assert!(matches!(
            result,
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_image_set_get() {
        let mut img = Image::new(4, 4);
        img.set_pixel(1, 2, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(img.pixel(1, 2), [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(img.rgb(1, 2).to_array(), [0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_image_cow_clone() {
        let mut a = Image::filled(2, 2, [0.5, 0.5, 0.5, 1.0]);
        let b = a.clone();
        a.set_pixel(0, 0, [1.0, 0.0, 0.0, 1.0]);
        // b must not see the write through the shared Arc
        assert_eq!(b.pixel(0, 0), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(a.pixel(0, 0), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_rgba8_roundtrip() {
        let bytes: Vec<u8> = (0..4 * 2 * 2).map(|i| (i * 16) as u8).collect();
        let img = Image::from_rgba8(2, 2, &bytes).unwrap();
        assert_eq!(img.to_rgba8(), bytes);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_out_of_bounds() {
        let img = Image::new(2, 2);
        let _ = img.pixel(2, 0);
    }
}
