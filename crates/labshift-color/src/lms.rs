//! RGB <-> LMS cone-response conversion.
//!
//! The LMS space models long/medium/short cone sensitivity and is the
//! intermediate stop on the way to the decorrelated lab basis.
//!
//! # Range
//!
//! - Input RGB: nominally [0, 1], not enforced
//! - Output LMS: non-negative for non-negative RGB

use labshift_math::{Mat3, Vec3};

/// RGB to LMS cone-response approximation.
pub const RGB_TO_LMS: Mat3 = Mat3::from_rows([
    [0.3811, 0.5783, 0.0402],
    [0.1967, 0.7244, 0.0782],
    [0.0241, 0.1288, 0.8444],
]);

/// LMS back to RGB.
///
/// Exact algebraic inverse of [`RGB_TO_LMS`], carried to nine
/// significant digits. The commonly quoted four-digit inverse only
/// round-trips to about 7e-3, which is far outside the 1e-5 contract of
/// the conversion pipeline.
pub const LMS_TO_RGB: Mat3 = Mat3::from_rows([
    [4.468_669_86, -3.588_675_90, 0.119_604_367],
    [-1.219_716_63, 2.383_087_91, -0.162_630_112],
    [0.058_508_477, -0.261_078_439, 1.205_665_91],
]);

/// Converts an RGB triplet to LMS cone response.
///
/// # Example
///
/// ```rust
/// use labshift_color::lms::rgb_to_lms;
/// use labshift_math::Vec3;
///
/// let lms = rgb_to_lms(Vec3::new(1.0, 1.0, 1.0));
/// // White maps close to (1, 1, 1) in LMS
/// assert!((lms.x - 0.9996).abs() < 1e-4);
/// ```
#[inline]
pub fn rgb_to_lms(rgb: Vec3) -> Vec3 {
    RGB_TO_LMS * rgb
}

/// Converts an LMS triplet back to RGB.
#[inline]
pub fn lms_to_rgb(lms: Vec3) -> Vec3 {
    LMS_TO_RGB * lms
}
