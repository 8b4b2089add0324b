//! The line-constants pipeline: primitive matrices to sequence scalars.
//!
//! Both entry points run validate → primitive matrix → phase bundling →
//! Kron reduction of neutral conductors → Fortescue transform, and fail
//! as a whole if any stage fails; no partial results are ever produced.

use crate::errors::LineConstantsError;
use crate::line::carson::impedance_matrix;
use crate::line::geometry::{validate, Phase, Wire};
use crate::line::potential::{admittance_from_potential, potential_matrix, LineWarning};
use crate::line::reduction::{bundle_phases, kron_reduction};
use crate::line::sequence::abc_to_seq;
use crate::math::{C3x3, CMatrix, Scalar};

/// Series impedance of a conductor set at every pipeline stage (Ω/km).
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesImpedance {
    /// Bundled matrix, one row/column per distinct phase (neutral included).
    pub z_abcn: CMatrix,
    /// Phases of `z_abcn`'s rows/columns.
    pub phases_abcn: Vec<Phase>,
    /// Three-phase matrix after Kron-reducing the neutral conductors.
    pub z_abc: CMatrix,
    /// Phases of `z_abc`'s rows/columns.
    pub phases_abc: Vec<Phase>,
    /// Sequence-frame matrix, indexed [zero, positive, negative].
    pub z_seq: C3x3,
}

/// Shunt admittance of a conductor set at every pipeline stage (S/km).
#[derive(Debug, Clone, PartialEq)]
pub struct ShuntAdmittance {
    /// Bundled admittance, one row/column per distinct phase.
    pub y_abcn: CMatrix,
    /// Phases of `y_abcn`'s rows/columns.
    pub phases_abcn: Vec<Phase>,
    /// Three-phase admittance after Kron-reducing the neutral conductors.
    pub y_abc: CMatrix,
    /// Phases of `y_abc`'s rows/columns.
    pub phases_abc: Vec<Phase>,
    /// Sequence-frame matrix, indexed [zero, positive, negative].
    pub y_seq: C3x3,
    /// Non-fatal diagnostics gathered while building the potential matrix.
    pub warnings: Vec<LineWarning>,
}

/// The scalar sequence parameters a line/device model stores.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceParameters {
    /// Positive-sequence series resistance (Ω/km).
    pub r1: Scalar,
    /// Positive-sequence series reactance (Ω/km).
    pub x1: Scalar,
    /// Positive-sequence shunt conductance (S/km).
    pub gsh1: Scalar,
    /// Positive-sequence shunt susceptance (S/km).
    pub bsh1: Scalar,
    /// Zero-sequence series resistance (Ω/km).
    pub r0: Scalar,
    /// Zero-sequence series reactance (Ω/km).
    pub x0: Scalar,
    /// Zero-sequence shunt conductance (S/km).
    pub gsh0: Scalar,
    /// Zero-sequence shunt susceptance (S/km).
    pub bsh0: Scalar,
    /// Current rating, the sum of all conductor ratings (kA).
    pub rating: Scalar,
}

/// Everything the pipeline produces for one conductor set.
#[derive(Debug, Clone, PartialEq)]
pub struct LineParameters {
    /// Series impedance matrices.
    pub series: SeriesImpedance,
    /// Shunt admittance matrices.
    pub shunt: ShuntAdmittance,
    /// Scalar sequence parameters and rating.
    pub sequence: SequenceParameters,
}

/// Splits bundled indices into live-phase and neutral groups, in order.
fn neutral_split(phases: &[Phase]) -> (Vec<usize>, Vec<usize>) {
    let keep = phases
        .iter()
        .enumerate()
        .filter_map(|(i, &p)| (p != Phase::Neutral).then_some(i))
        .collect();
    let embed = phases
        .iter()
        .enumerate()
        .filter_map(|(i, &p)| (p == Phase::Neutral).then_some(i))
        .collect();
    (keep, embed)
}

/// Computes the series impedance matrices of a conductor set.
///
/// # Errors
///
/// Returns [`LineConstantsError::Geometry`] if the conductor set fails
/// validation, [`LineConstantsError::SingularMatrix`] if a reduction
/// sub-block is not invertible, and
/// [`LineConstantsError::ShapeMismatch`] if the reduced phase matrix is
/// not 3×3 (fewer than the three live phases present).
pub fn series_impedance(
    wires: &[Wire],
    frequency_hz: Scalar,
    earth_resistivity: Scalar,
) -> Result<SeriesImpedance, LineConstantsError> {
    validate(wires)?;

    let z_prim = impedance_matrix(wires, frequency_hz, earth_resistivity);
    let phases: Vec<Phase> = wires.iter().map(|w| w.phase).collect();

    let (z_abcn, phases_abcn) = bundle_phases(&z_prim, &phases)?;

    let (keep, embed) = neutral_split(&phases_abcn);
    let z_abc = kron_reduction(&z_abcn, &keep, &embed)?;
    let phases_abc: Vec<Phase> = keep.iter().map(|&i| phases_abcn[i]).collect();

    let z_seq = abc_to_seq(&z_abc)?;

    Ok(SeriesImpedance {
        z_abcn,
        phases_abcn,
        z_abc,
        phases_abc,
        z_seq,
    })
}

/// Computes the shunt admittance matrices of a conductor set.
///
/// The potential-coefficient matrix runs through the same bundling and
/// reduction as the impedance primitive; the admittances are derived as
/// `Y = jω·P⁻¹` at both the bundled and the three-phase stage.
///
/// # Errors
///
/// Same taxonomy as [`series_impedance`], plus
/// [`LineConstantsError::SingularMatrix`] from the potential-matrix
/// inversions.
pub fn shunt_admittance(
    wires: &[Wire],
    frequency_hz: Scalar,
    earth_resistivity: Scalar,
) -> Result<ShuntAdmittance, LineConstantsError> {
    let _ = earth_resistivity; // shunt admittance does not see the earth path
    validate(wires)?;

    let (p_prim, warnings) = potential_matrix(wires);
    let phases: Vec<Phase> = wires.iter().map(|w| w.phase).collect();

    let (p_abcn, phases_abcn) = bundle_phases(&p_prim, &phases)?;

    let (keep, embed) = neutral_split(&phases_abcn);
    let p_abc = kron_reduction(&p_abcn, &keep, &embed)?;
    let phases_abc: Vec<Phase> = keep.iter().map(|&i| phases_abcn[i]).collect();

    let y_abcn = admittance_from_potential(&p_abcn, frequency_hz)?;
    let y_abc = admittance_from_potential(&p_abc, frequency_hz)?;

    let y_seq = abc_to_seq(&y_abc)?;

    Ok(ShuntAdmittance {
        y_abcn,
        phases_abcn,
        y_abc,
        phases_abc,
        y_seq,
        warnings,
    })
}

/// Current rating of the conductor set: the arithmetic sum of every
/// wire's `max_current`, neutral conductors included (kA).
#[must_use]
pub fn rating(wires: &[Wire]) -> Scalar {
    wires.iter().map(|w| w.max_current).sum()
}

impl LineParameters {
    /// Runs the full pipeline and extracts the sequence scalars.
    ///
    /// The result is constructed only after both matrix pipelines and the
    /// rating succeed, so a failure never publishes partial parameters.
    ///
    /// # Errors
    ///
    /// Propagates every error of [`series_impedance`] and
    /// [`shunt_admittance`].
    pub fn compute(
        wires: &[Wire],
        frequency_hz: Scalar,
        earth_resistivity: Scalar,
    ) -> Result<Self, LineConstantsError> {
        let series = series_impedance(wires, frequency_hz, earth_resistivity)?;
        let shunt = shunt_admittance(wires, frequency_hz, earth_resistivity)?;

        let sequence = SequenceParameters {
            r1: series.z_seq[(1, 1)].re,
            x1: series.z_seq[(1, 1)].im,
            gsh1: shunt.y_seq[(1, 1)].re,
            bsh1: shunt.y_seq[(1, 1)].im,
            r0: series.z_seq[(0, 0)].re,
            x0: series.z_seq[(0, 0)].im,
            gsh0: shunt.y_seq[(0, 0)].re,
            bsh0: shunt.y_seq[(0, 0)].im,
            rating: rating(wires),
        };

        Ok(Self {
            series,
            shunt,
            sequence,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::is_reciprocal;

    fn four_wire_tower() -> Vec<Wire> {
        vec![
            Wire::new(0.0, 10.0, 0.01, 0.1, 0.2, 0.4, Phase::A),
            Wire::new(1.0, 10.0, 0.01, 0.1, 0.2, 0.4, Phase::B),
            Wire::new(2.0, 10.0, 0.01, 0.1, 0.2, 0.4, Phase::C),
            Wire::new(1.0, 9.0, 0.01, 0.1, 0.2, 0.4, Phase::Neutral),
        ]
    }

    #[test]
    fn series_pipeline_end_to_end() {
        let wires = four_wire_tower();
        let series = series_impedance(&wires, 50.0, 100.0).expect("valid tower");

        // All phases are unique, so the bundled matrix is the primitive.
        assert_eq!(series.z_abcn.nrows(), 4);
        assert!(is_reciprocal(&series.z_abcn, 1.0e-12));
        assert_eq!(
            series.phases_abcn,
            vec![Phase::A, Phase::B, Phase::C, Phase::Neutral]
        );

        assert_eq!(series.z_abc.nrows(), 3);
        assert_eq!(series.phases_abc, vec![Phase::A, Phase::B, Phase::C]);
        assert!(series.z_abc[(0, 1)].norm() > 0.0);

        // Earth return adds loss on top of the 0.1 Ω/km conductor
        // resistance but stays within the same order of magnitude.
        let r1 = series.z_seq[(1, 1)].re;
        assert!(r1 > 0.1);
        assert!(r1 < 1.0);
    }

    #[test]
    fn shunt_pipeline_end_to_end() {
        let wires = four_wire_tower();
        let shunt = shunt_admittance(&wires, 50.0, 100.0).expect("valid tower");

        assert_eq!(shunt.y_abcn.nrows(), 4);
        assert_eq!(shunt.y_abc.nrows(), 3);
        assert_eq!(shunt.phases_abc, vec![Phase::A, Phase::B, Phase::C]);
        assert!(shunt.warnings.is_empty());

        // The potential matrix is real, so the admittance is purely
        // capacitive: zero conductance, positive susceptance.
        assert_relative_eq!(shunt.y_seq[(1, 1)].re, 0.0, epsilon = 1.0e-12);
        assert!(shunt.y_seq[(1, 1)].im > 0.0);
    }

    #[test]
    fn grounded_neutral_cannot_be_embedded() {
        // A wire at ground level has a zero self potential coefficient;
        // Kron-embedding it hits a singular sub-block, reported as a
        // typed error rather than a panic deep in the inversion.
        let mut wires = four_wire_tower();
        wires[3].y_pos = 0.0;
        let err = shunt_admittance(&wires, 50.0, 100.0).unwrap_err();
        assert!(matches!(err, LineConstantsError::SingularMatrix { .. }));
    }

    #[test]
    fn rating_sums_all_conductors() {
        let mut wires = four_wire_tower();
        wires[3].max_current = 0.2;
        assert_relative_eq!(rating(&wires), 1.4, epsilon = 1.0e-12);
    }

    #[test]
    fn full_parameters_match_the_reference_scenario() {
        let wires = four_wire_tower();
        let params = LineParameters::compute(&wires, 50.0, 100.0).expect("valid tower");

        assert!(params.sequence.r1 >= 0.1);
        assert!(params.sequence.r1 <= 1.0);
        assert!(params.sequence.x1 > 0.0);
        assert!(params.sequence.bsh1 > 0.0);
        assert_relative_eq!(params.sequence.gsh1, 0.0, epsilon = 1.0e-12);
        // Zero-sequence impedance exceeds positive-sequence: the earth
        // return path carries the full residual current.
        assert!(params.sequence.r0 > params.sequence.r1);
        assert!(params.sequence.x0 > params.sequence.x1);
        assert_relative_eq!(params.sequence.rating, 1.6, epsilon = 1.0e-12);
    }

    #[test]
    fn bundled_phase_reduces_positive_sequence_resistance() {
        let single = LineParameters::compute(&four_wire_tower(), 50.0, 100.0).expect("valid");

        // Twin-conductor bundle on every phase: the bundle halves the
        // conductor resistance seen by the positive sequence.
        let mut bundled = four_wire_tower();
        bundled.push(Wire::new(0.1, 10.0, 0.01, 0.1, 0.2, 0.4, Phase::A));
        bundled.push(Wire::new(1.1, 10.0, 0.01, 0.1, 0.2, 0.4, Phase::B));
        bundled.push(Wire::new(2.1, 10.0, 0.01, 0.1, 0.2, 0.4, Phase::C));
        let twin = LineParameters::compute(&bundled, 50.0, 100.0).expect("valid");

        assert!(twin.sequence.r1 < single.sequence.r1);
        assert_eq!(twin.series.z_abc.nrows(), 3);
        assert_relative_eq!(twin.sequence.rating, 2.8, epsilon = 1.0e-12);
    }

    #[test]
    fn invalid_geometry_rejects_both_pipelines() {
        let wires = [
            Wire::new(0.0, 10.0, 0.01, 0.1, 0.2, 0.4, Phase::A),
            Wire::new(0.0, 10.0, 0.01, 0.1, 0.2, 0.4, Phase::B),
        ];
        assert!(matches!(
            series_impedance(&wires, 50.0, 100.0),
            Err(LineConstantsError::Geometry(_))
        ));
        assert!(matches!(
            shunt_admittance(&wires, 50.0, 100.0),
            Err(LineConstantsError::Geometry(_))
        ));
    }

    #[test]
    fn two_live_phases_fail_at_the_sequence_step() {
        // Validates (two distinct phases) but cannot form a 3x3 ABC
        // matrix, so the pipeline reports the shape defect instead of
        // inventing a placeholder.
        let wires = [
            Wire::new(0.0, 10.0, 0.01, 0.1, 0.2, 0.4, Phase::A),
            Wire::new(1.0, 10.0, 0.01, 0.1, 0.2, 0.4, Phase::B),
        ];
        assert!(matches!(
            series_impedance(&wires, 50.0, 100.0),
            Err(LineConstantsError::ShapeMismatch { rows: 2, cols: 2 })
        ));
    }
}
