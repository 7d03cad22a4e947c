//! # labshift-core
//!
//! Core types for the labshift color transfer pipeline.
//!
//! This crate provides the foundational types used by the numeric stages:
//!
//! - [`Image`] - owned RGBA f32 buffer, row-major top-to-bottom
//! - [`SampleGrid`] - the normalized-coordinate domain statistics are
//!   aggregated over
//! - [`Filter`] - texture-style sampling filter (nearest or bilinear)
//! - [`Error`], [`Result`] - shared error handling
//!
//! Image decoding and encoding live outside this workspace's numeric core;
//! callers hand in decoded pixel buffers and take the result buffer back.
//!
//! # Example
//!
//! ```rust
//! use labshift_core::Image;
//!
//! let img = Image::filled(4, 4, [0.5, 0.25, 0.1, 1.0]);
//! assert_eq!(img.pixel(2, 3)[0], 0.5);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod sample;

pub use error::{Error, Result};
pub use image::Image;
pub use sample::{Filter, SampleGrid};
