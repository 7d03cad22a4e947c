//! LMS <-> decorrelated lab conversion.
//!
//! The lab basis rotates LMS so that the first channel (l) carries the
//! shared achromatic component and the remaining two (alpha, beta)
//! carry yellow-blue and red-green opponency. The basis rows are
//! orthonormal, so the inverse transform is simply the transpose.
//!
//! # Range
//!
//! For LMS in [0, 1]: l in [0, sqrt(3)], alpha in [-2/sqrt(6), 2/sqrt(6)],
//! beta in [-1/sqrt(2), 1/sqrt(2)].

use labshift_math::{Mat3, Vec3};

const FRAC_1_SQRT_3: f32 = 0.577_350_269;
const FRAC_1_SQRT_6: f32 = 0.408_248_290;
const FRAC_1_SQRT_2: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// LMS to lab decorrelation basis (orthonormal rows).
pub const LMS_TO_LAB: Mat3 = Mat3::from_rows([
    [FRAC_1_SQRT_3, FRAC_1_SQRT_3, FRAC_1_SQRT_3],
    [FRAC_1_SQRT_6, FRAC_1_SQRT_6, -2.0 * FRAC_1_SQRT_6],
    [FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0],
]);

/// lab back to LMS: the transpose of [`LMS_TO_LAB`].
pub const LAB_TO_LMS: Mat3 = Mat3::from_rows([
    [FRAC_1_SQRT_3, FRAC_1_SQRT_6, FRAC_1_SQRT_2],
    [FRAC_1_SQRT_3, FRAC_1_SQRT_6, -FRAC_1_SQRT_2],
    [FRAC_1_SQRT_3, -2.0 * FRAC_1_SQRT_6, 0.0],
]);

/// Converts an LMS triplet to the decorrelated lab space.
///
/// # Example
///
/// ```rust
/// use labshift_color::lab::lms_to_lab;
/// use labshift_math::Vec3;
///
/// let lab = lms_to_lab(Vec3::new(1.0, 1.0, 1.0));
/// // Equal cone response is purely achromatic
/// assert!(lab.y.abs() < 1e-6 && lab.z.abs() < 1e-6);
/// ```
#[inline]
pub fn lms_to_lab(lms: Vec3) -> Vec3 {
    LMS_TO_LAB * lms
}

/// Converts a lab triplet back to LMS.
#[inline]
pub fn lab_to_lms(lab: Vec3) -> Vec3 {
    LAB_TO_LMS * lab
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_is_orthonormal() {
        for i in 0..3 {
            for j in 0..3 {
                let dot = LMS_TO_LAB.row(i).dot(LMS_TO_LAB.row(j));
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (dot - expected).abs() < 1e-6,
                    "row{} . row{} = {}",
                    i,
                    j,
                    dot
                );
            }
        }
    }

    #[test]
    fn test_inverse_is_transpose() {
        assert_eq!(LAB_TO_LMS, LMS_TO_LAB.transpose());
    }

    #[test]
    fn test_gray_axis() {
        let lab = lms_to_lab(Vec3::new(0.5, 0.5, 0.5));
        assert!((lab.x - 1.5 * FRAC_1_SQRT_3).abs() < 1e-6);
        assert!(lab.y.abs() < 1e-6);
        assert!(lab.z.abs() < 1e-6);
    }

    #[test]
    fn test_roundtrip() {
        let lms = Vec3::new(0.3, 0.9, 0.1);
        let back = lab_to_lms(lms_to_lab(lms));
        assert!((back - lms).abs().max_element() < 1e-6);
    }
}
