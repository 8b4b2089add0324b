//! Symmetrical components: the Fortescue transform and its inverse.
//!
//! Sequence matrices are indexed `[zero, positive, negative]`, so
//! `m[(0, 0)]` is the zero-sequence self term and `m[(1, 1)]` the
//! positive-sequence self term.

use std::f64::consts::PI;

use crate::errors::LineConstantsError;
use crate::math::{phasor, C3x3, CMatrix, CScalar};

/// The Fortescue transformation matrix `A` with `a = e^(j2π/3)`:
/// `[[1, 1, 1], [1, a², a], [1, a, a²]]`.
#[must_use]
pub fn fortescue() -> C3x3 {
    let one = CScalar::new(1.0, 0.0);
    let a = phasor(2.0 * PI / 3.0);
    let a2 = a * a;
    C3x3::new(one, one, one, one, a2, a, one, a, a2)
}

/// The inverse Fortescue matrix `A⁻¹ = (1/3)·[[1, 1, 1], [1, a, a²], [1, a², a]]`.
#[must_use]
pub fn fortescue_inverse() -> C3x3 {
    let third = CScalar::new(1.0 / 3.0, 0.0);
    let one = CScalar::new(1.0, 0.0);
    let a = phasor(2.0 * PI / 3.0);
    let a2 = a * a;
    C3x3::new(one, one, one, one, a, a2, one, a2, a) * third
}

/// Transforms a 3×3 phase-frame (ABC) matrix into the sequence frame:
/// `A⁻¹·M·A`.
///
/// # Errors
///
/// Returns [`LineConstantsError::ShapeMismatch`] for any input that is
/// not exactly 3×3. A non-3×3 matrix here always means an upstream
/// pipeline error (the orchestrator reduces to three phases before
/// calling), so this fails fast instead of producing a placeholder.
pub fn abc_to_seq(m: &CMatrix) -> Result<C3x3, LineConstantsError> {
    if m.nrows() != 3 || m.ncols() != 3 {
        return Err(LineConstantsError::ShapeMismatch {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    let abc = C3x3::from_fn(|r, c| m[(r, c)]);
    Ok(fortescue_inverse() * abc * fortescue())
}

/// Transforms a sequence-frame matrix back into the phase frame:
/// `A·M·A⁻¹`.
#[must_use]
pub fn seq_to_abc(m: &C3x3) -> C3x3 {
    fortescue() * m * fortescue_inverse()
}
