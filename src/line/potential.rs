//! Maxwell's potential coefficients and the shunt-admittance derivation.
//!
//! Potential coefficients relate conductor charges to conductor voltages
//! using the mirror-image method over a perfectly conducting ground plane;
//! inverting the coefficient matrix and scaling by `jω` yields the shunt
//! admittance. Coefficients are km/F, admittances S/km.

use crate::constants::{air_permittivity_km, angular_frequency};
use crate::errors::LineConstantsError;
use crate::line::geometry::{direct_distance, image_distance, Wire};
use crate::math::{j, CMatrix, CScalar, Scalar};

/// Nudge applied to heights and to the GMR so degenerate logarithms are
/// avoided for conductors at exactly ground level.
const EPS: Scalar = 1.0e-12;

/// Non-fatal diagnostics produced while building matrices.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineWarning {
    /// A wire sits at or below ground level; its self potential
    /// coefficient is zero and it does not couple capacitively.
    GroundedWire {
        /// Index of the wire in the conductor set.
        index: usize,
    },
}

/// Self potential coefficient of one conductor (km/F).
///
/// `(1/(2πε))·ln(2h/gmr)` with `ε` the effective permittivity of air.
/// A non-positive height yields a zero coefficient: the conductor is
/// effectively excluded from capacitive coupling rather than failing the
/// whole computation; the matrix builder reports it as a warning.
#[must_use]
pub fn self_potential(height: Scalar, gmr: Scalar) -> CScalar {
    if height > 0.0 {
        let coeff = 1.0 / (2.0 * std::f64::consts::PI * air_permittivity_km());
        CScalar::new(coeff * (2.0 * height / (gmr + EPS)).ln(), 0.0)
    } else {
        CScalar::new(0.0, 0.0)
    }
}

/// Mutual potential coefficient between two conductors (km/F).
///
/// `(1/(2πε))·ln(D_ij/d_ij)` where `D_ij` is the distance from conductor
/// i to the mirror image of conductor j and `d_ij` the direct distance.
#[must_use]
pub fn mutual_potential(d_ij: Scalar, big_d_ij: Scalar) -> CScalar {
    let coeff = 1.0 / (2.0 * std::f64::consts::PI * air_permittivity_km());
    CScalar::new(coeff * (big_d_ij / d_ij).ln(), 0.0)
}

/// Builds the n×n primitive potential-coefficient matrix of a conductor
/// set (km/F), along with warnings for grounded wires.
///
/// Heights are nudged by a small epsilon in the mutual terms. Row/column
/// order follows the slice order.
#[must_use]
pub fn potential_matrix(wires: &[Wire]) -> (CMatrix, Vec<LineWarning>) {
    let n = wires.len();
    let mut p_prim = CMatrix::zeros(n, n);
    let mut warnings = Vec::new();

    for (i, wire_i) in wires.iter().enumerate() {
        p_prim[(i, i)] = self_potential(wire_i.y_pos, wire_i.gmr);
        if wire_i.y_pos <= 0.0 {
            warnings.push(LineWarning::GroundedWire { index: i });
        }

        for (k, wire_k) in wires.iter().enumerate() {
            if i != k {
                let d_ik = direct_distance(
                    wire_i.x_pos,
                    wire_i.y_pos + EPS,
                    wire_k.x_pos,
                    wire_k.y_pos + EPS,
                );
                let big_d_ik = image_distance(
                    wire_i.x_pos,
                    wire_i.y_pos + EPS,
                    wire_k.x_pos,
                    wire_k.y_pos + EPS,
                );
                p_prim[(i, k)] = mutual_potential(d_ik, big_d_ik);
            }
        }
    }

    (p_prim, warnings)
}

/// Derives the shunt admittance matrix `Y = jω·P⁻¹` (S/km) from a
/// potential-coefficient matrix.
///
/// # Errors
///
/// Returns [`LineConstantsError::SingularMatrix`] if `P` cannot be
/// inverted, e.g. when duplicate conductor positions slipped past
/// validation.
pub fn admittance_from_potential(
    p: &CMatrix,
    frequency_hz: Scalar,
) -> Result<CMatrix, LineConstantsError> {
    let w = angular_frequency(frequency_hz);
    let inverse = p
        .clone()
        .try_inverse()
        .ok_or(LineConstantsError::SingularMatrix {
            context: "inverting the potential-coefficient matrix",
        })?;
    Ok(inverse * (j() * w))
}
