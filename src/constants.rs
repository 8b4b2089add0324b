//! Electromagnetic constants for per-kilometre line-parameter work.
//!
//! ## Units
//!
//! Line parameters are conventionally stated per kilometre of line, so the
//! field constants here are scaled to km as well: inductive constants in
//! H/km, capacitive constants in F/km. Conductor positions stay in metres;
//! the formulas in [`crate::line`] combine the two the way the classical
//! line-constants literature writes them.
//!
//! ## References
//!
//! - ATP-EMTP theory book, chapter 4 (overhead line parameters).

use std::f64::consts::PI;

/// Vacuum permeability μ₀ expressed per kilometre: 4π·10⁻⁴ H/km.
pub const MU_0_KM: f64 = 4.0 * PI * 1.0e-4;
/// The recurring factor μ₀/2π in H/km, exactly 2·10⁻⁴.
pub const MU_0_OVER_2PI_KM: f64 = 2.0e-4;
/// Vacuum permittivity ε₀ expressed per kilometre: 8.854187817·10⁻⁹ F/km.
pub const EPSILON_0_KM: f64 = 8.854_187_817e-9;
/// Relative permittivity of air at standard conditions.
pub const AIR_RELATIVE_PERMITTIVITY: f64 = 1.000_589_86;

/// Default system frequency in Hz.
pub const DEFAULT_FREQUENCY_HZ: f64 = 50.0;
/// Default earth resistivity in Ω·m³ (average damp earth).
pub const DEFAULT_EARTH_RESISTIVITY: f64 = 100.0;

/// Earth resistivity of swampy ground in Ω·m³.
pub const RESISTIVITY_SWAMPY_GROUND: f64 = 10.0;
/// Earth resistivity of average damp earth in Ω·m³.
pub const RESISTIVITY_DAMP_EARTH: f64 = 100.0;
/// Earth resistivity of dry earth in Ω·m³.
pub const RESISTIVITY_DRY_EARTH: f64 = 1000.0;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}

/// Effective permittivity of air in F/km, `ε₀·ε_air`.
#[inline]
#[must_use]
pub fn air_permittivity_km() -> f64 {
    EPSILON_0_KM * AIR_RELATIVE_PERMITTIVITY
}
