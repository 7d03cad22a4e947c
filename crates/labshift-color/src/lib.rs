//! # labshift-color
//!
//! Color space conversion for statistical color transfer.
//!
//! Moment matching works best in a space where the channels are
//! statistically independent. This crate implements the classic
//! decorrelated "lab" pipeline: RGB is first mapped to an LMS
//! cone-response approximation, then rotated into the lab basis where
//! l carries achromatic weight and alpha/beta carry opponent chroma.
//!
//! ```text
//! RGB --[cone matrix]--> LMS --[orthogonal basis]--> lab
//! lab --[basis transpose]--> LMS --[inverse cone matrix]--> RGB
//! ```
//!
//! All conversions are pure, stateless, total functions over `Vec3`.
//! Inputs are not clamped; out-of-gamut values pass through unchanged.
//!
//! # Example
//!
//! ```rust
//! use labshift_color::{lab_to_rgb, rgb_to_lab};
//! use labshift_math::Vec3;
//!
//! let rgb = Vec3::new(0.8, 0.2, 0.1);
//! let lab = rgb_to_lab(rgb);
//! let back = lab_to_rgb(lab);
//! assert!((back - rgb).abs().max_element() < 1e-5);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lab;
pub mod lms;

pub use lab::{lab_to_lms, lms_to_lab, LAB_TO_LMS, LMS_TO_LAB};
pub use lms::{lms_to_rgb, rgb_to_lms, LMS_TO_RGB, RGB_TO_LMS};

use labshift_math::Vec3;

/// Converts an RGB triplet to the decorrelated lab space.
#[inline]
pub fn rgb_to_lab(rgb: Vec3) -> Vec3 {
    lms_to_lab(rgb_to_lms(rgb))
}

/// Converts a lab triplet back to RGB.
///
/// Exact inverse of [`rgb_to_lab`] up to floating-point rounding.
#[inline]
pub fn lab_to_rgb(lab: Vec3) -> Vec3 {
    lms_to_rgb(lab_to_lms(lab))
}
