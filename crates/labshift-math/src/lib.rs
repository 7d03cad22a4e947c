//! # labshift-math
//!
//! Small linear-algebra toolkit for the labshift color transfer pipeline.
//!
//! Everything the numeric core needs boils down to 3-component vectors and
//! fixed 3x3 matrices:
//!
//! - [`Vec3`] - one color triplet (RGB, LMS, or lab)
//! - [`Mat3`] - a linear color space transform
//!
//! # Example
//!
//! ```rust
//! use labshift_math::{Mat3, Vec3};
//!
//! let m = Mat3::from_rows([
//!     [0.3811, 0.5783, 0.0402],
//!     [0.1967, 0.7244, 0.0782],
//!     [0.0241, 0.1288, 0.8444],
//! ]);
//! let lms = m * Vec3::new(1.0, 0.0, 0.0);
//! assert!((lms.x - 0.3811).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod mat3;
pub mod vec3;

pub use mat3::Mat3;
pub use vec3::Vec3;
