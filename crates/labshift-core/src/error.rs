//! Error types for core image operations.
//!
//! All failure modes in the numeric pipeline are programming or
//! input-contract violations: they are detected before or during
//! aggregation and surfaced synchronously. The computation is
//! deterministic, so a failing input fails identically on retry.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during color transfer operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The sampling grid has zero area.
    ///
    /// Statistics over an empty grid are undefined; the aggregator
    /// rejects the grid before iterating.
    #[error("sampling grid {width}x{height} has zero area")]
    EmptyGrid {
        /// Grid width
        width: u32,
        /// Grid height
        height: u32,
    },

    /// The image has zero area.
    ///
    /// Sampling an empty image is undefined for every coordinate.
    #[error("image {width}x{height} has zero area")]
    EmptyImage {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Pixel buffer length does not match the declared dimensions.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// A configuration value is out of its valid domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Creates an [`Error::EmptyGrid`] error.
    #[inline]
    pub fn empty_grid(width: u32, height: u32) -> Self {
        Self::EmptyGrid { width, height }
    }

    /// Creates an [`Error::EmptyImage`] error.
    #[inline]
    pub fn empty_image(width: u32, height: u32) -> Self {
        Self::EmptyImage { width, height }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
