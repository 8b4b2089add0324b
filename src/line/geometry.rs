//! Conductor geometry: wires, phase assignment, and validation.

use thiserror::Error;

use crate::math::Scalar;

/// Phase assignment of a conductor.
///
/// The numeric values follow the classical tower-description convention and
/// drive the bundling/reduction order, so they are part of the contract.
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Neutral or grounded conductor; eliminated by Kron reduction.
    Neutral = 0,
    /// Phase A.
    A = 1,
    /// Phase B.
    B = 2,
    /// Phase C.
    C = 3,
}

impl Phase {
    /// All phases in descending numeric order, the order bundling uses.
    pub const DESCENDING: [Self; 4] = [Self::C, Self::B, Self::A, Self::Neutral];

    /// Numeric value of the phase (0 = Neutral … 3 = C).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// One overhead conductor within a tower arrangement.
///
/// Positions are metres, per-length parameters Ω/km, currents kA. The
/// record is immutable for the duration of a computation; being `Copy`,
/// callers clone freely when editing a conductor set.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wire {
    /// Horizontal position within the tower (m).
    pub x_pos: Scalar,
    /// Vertical position, height above ground (m).
    pub y_pos: Scalar,
    /// Geometric mean radius (m), must be positive.
    pub gmr: Scalar,
    /// Series resistance per unit length (Ω/km).
    pub resistance: Scalar,
    /// Series reactance per unit length (Ω/km).
    pub reactance: Scalar,
    /// Maximum conductor current (kA).
    pub max_current: Scalar,
    /// Phase assignment.
    pub phase: Phase,
}

impl Wire {
    /// Creates a wire from position, GMR, per-length r/x, rating, and phase.
    #[must_use]
    pub const fn new(
        x_pos: Scalar,
        y_pos: Scalar,
        gmr: Scalar,
        resistance: Scalar,
        reactance: Scalar,
        max_current: Scalar,
        phase: Phase,
    ) -> Self {
        Self {
            x_pos,
            y_pos,
            gmr,
            resistance,
            reactance,
            max_current,
            phase,
        }
    }

    /// Plane distance to `other` (m).
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> Scalar {
        direct_distance(self.x_pos, self.y_pos, other.x_pos, other.y_pos)
    }

    /// Distance to the below-ground mirror image of `other` (m).
    #[must_use]
    pub fn image_distance_to(&self, other: &Self) -> Scalar {
        image_distance(self.x_pos, self.y_pos, other.x_pos, other.y_pos)
    }
}

/// Plane distance between points `(xi, yi)` and `(xj, yj)`.
#[inline]
#[must_use]
pub fn direct_distance(xi: Scalar, yi: Scalar, xj: Scalar, yj: Scalar) -> Scalar {
    ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt()
}

/// Distance between point `(xi, yi)` and the mirror image of `(xj, yj)`
/// below the ground plane, i.e. `(xj, -yj)`.
#[inline]
#[must_use]
pub fn image_distance(xi: Scalar, yi: Scalar, xj: Scalar, yj: Scalar) -> Scalar {
    ((xi - xj).powi(2) + (yi + yj).powi(2)).sqrt()
}

/// A single violated geometry rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryViolation {
    /// A wire has a zero or negative geometric mean radius.
    #[error("wire {index} has non-positive GMR ({gmr} m)")]
    NonPositiveGmr {
        /// Index of the offending wire in the conductor set.
        index: usize,
        /// The offending GMR value (m).
        gmr: Scalar,
    },
    /// Two wires occupy the identical position.
    #[error("wires {first} and {second} share the position ({x} m, {y} m)")]
    DuplicatePosition {
        /// Index of the first wire.
        first: usize,
        /// Index of the second wire.
        second: usize,
        /// Shared horizontal position (m).
        x: Scalar,
        /// Shared vertical position (m).
        y: Scalar,
    },
    /// Every wire sits exactly at ground level.
    #[error("all wires have y = 0; lift the conductors or use a small positive height")]
    AllConductorsGrounded,
    /// Fewer than two distinct phase values are present.
    #[error("fewer than two distinct phases among the wires")]
    SinglePhaseOnly,
}

/// Aggregated geometry validation failure.
///
/// Collects every rule violated by the conductor set in one pass, so an
/// editor can present the complete diagnostic instead of fixing one
/// problem per attempt.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid conductor geometry ({} rule(s) violated)", violations.len())]
pub struct GeometryError {
    violations: Vec<GeometryViolation>,
}

impl GeometryError {
    /// The individual violated rules, in check order.
    #[must_use]
    pub fn violations(&self) -> &[GeometryViolation] {
        &self.violations
    }
}

/// Checks that a conductor set is physically sane.
///
/// Rules, in order: every GMR positive, no duplicate positions, not every
/// wire at ground level, at least two distinct phases. All violations are
/// reported together in the returned [`GeometryError`].
///
/// # Errors
///
/// Returns [`GeometryError`] listing each violated rule.
pub fn validate(wires: &[Wire]) -> Result<(), GeometryError> {
    let mut violations = Vec::new();

    for (i, wire) in wires.iter().enumerate() {
        if wire.gmr <= 0.0 {
            violations.push(GeometryViolation::NonPositiveGmr {
                index: i,
                gmr: wire.gmr,
            });
        }
    }

    for (i, wire_i) in wires.iter().enumerate() {
        for (j, wire_j) in wires.iter().enumerate().skip(i + 1) {
            if wire_i.x_pos == wire_j.x_pos && wire_i.y_pos == wire_j.y_pos {
                violations.push(GeometryViolation::DuplicatePosition {
                    first: i,
                    second: j,
                    x: wire_i.x_pos,
                    y: wire_i.y_pos,
                });
            }
        }
    }

    if wires.iter().all(|w| w.y_pos == 0.0) {
        violations.push(GeometryViolation::AllConductorsGrounded);
    }

    let mut seen = [false; 4];
    for wire in wires {
        seen[wire.phase.value() as usize] = true;
    }
    if seen.iter().filter(|&&s| s).count() < 2 {
        violations.push(GeometryViolation::SinglePhaseOnly);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(GeometryError { violations })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn phase_wire(x: Scalar, y: Scalar, phase: Phase) -> Wire {
        Wire::new(x, y, 0.01, 0.1, 0.2, 0.4, phase)
    }

    #[test]
    fn distances_match_geometry() {
        let a = phase_wire(0.0, 10.0, Phase::A);
        let b = phase_wire(3.0, 14.0, Phase::B);
        assert_relative_eq!(a.distance_to(&b), 5.0, epsilon = 1.0e-12);
        assert_relative_eq!(a.image_distance_to(&b), (9.0f64 + 576.0).sqrt(), epsilon = 1.0e-12);
    }

    #[test]
    fn valid_four_wire_tower_passes() {
        let wires = [
            phase_wire(0.0, 10.0, Phase::A),
            phase_wire(1.0, 10.0, Phase::B),
            phase_wire(2.0, 10.0, Phase::C),
            phase_wire(1.0, 9.0, Phase::Neutral),
        ];
        assert!(validate(&wires).is_ok());
    }

    #[test]
    fn grounded_set_is_rejected() {
        let wires = [
            phase_wire(0.0, 0.0, Phase::A),
            phase_wire(1.0, 0.0, Phase::B),
            phase_wire(2.0, 0.0, Phase::C),
            phase_wire(3.0, 0.0, Phase::Neutral),
        ];
        let err = validate(&wires).unwrap_err();
        assert!(err
            .violations()
            .contains(&GeometryViolation::AllConductorsGrounded));
    }

    #[test]
    fn single_phase_set_is_rejected() {
        let wires = [
            phase_wire(0.0, 10.0, Phase::A),
            phase_wire(1.0, 10.0, Phase::A),
        ];
        let err = validate(&wires).unwrap_err();
        assert!(err
            .violations()
            .contains(&GeometryViolation::SinglePhaseOnly));
    }

    #[test]
    fn duplicate_position_is_rejected() {
        let wires = [
            phase_wire(0.0, 10.0, Phase::A),
            phase_wire(0.0, 10.0, Phase::B),
        ];
        let err = validate(&wires).unwrap_err();
        assert_eq!(
            err.violations(),
            vec![GeometryViolation::DuplicatePosition {
                first: 0,
                second: 1,
                x: 0.0,
                y: 10.0,
            }]
        );
    }

    #[test]
    fn all_violations_are_reported_together() {
        // Non-positive GMR, duplicate position, grounded, single phase: all at once.
        let wires = [
            Wire::new(0.0, 0.0, 0.0, 0.1, 0.2, 0.4, Phase::A),
            Wire::new(0.0, 0.0, 0.01, 0.1, 0.2, 0.4, Phase::A),
        ];
        let err = validate(&wires).unwrap_err();
        assert_eq!(err.violations().len(), 4);
    }
}
