//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{DMatrix, Matrix3};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for phasors and matrix entries.
pub type CScalar = num_complex::Complex<Scalar>;
/// Dynamically sized complex matrix (primitive and reduced matrices).
pub type CMatrix = DMatrix<CScalar>;
/// Fixed three-by-three complex matrix (phase and sequence frames).
pub type C3x3 = Matrix3<CScalar>;

/// Returns the complex exponential `e^(j * theta)` using `Scalar` precision.
#[must_use]
pub fn phasor(theta: Scalar) -> CScalar {
    CScalar::from_polar(1.0, theta)
}

/// The imaginary unit `j`.
#[must_use]
pub const fn j() -> CScalar {
    CScalar::new(0.0, 1.0)
}

/// Checks that `m` equals its transpose within `tol` (element-wise, by
/// complex magnitude of the difference). Reciprocal networks must pass this.
#[must_use]
pub fn is_reciprocal(m: &CMatrix, tol: Scalar) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    for i in 0..m.nrows() {
        for k in (i + 1)..m.ncols() {
            if (m[(i, k)] - m[(k, i)]).norm() > tol {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn phasor_of_zero_is_one() {
        let p = phasor(0.0);
        assert_relative_eq!(p.re, 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(p.im, 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn reciprocity_check_flags_asymmetry() {
        let mut m = CMatrix::zeros(2, 2);
        m[(0, 1)] = CScalar::new(1.0, 0.0);
        assert!(!is_reciprocal(&m, 1.0e-12));
        m[(1, 0)] = CScalar::new(1.0, 0.0);
        assert!(is_reciprocal(&m, 1.0e-12));
    }
}
