//! Convenience re-exports for computing overhead-line constants.

pub use crate::constants::{
    angular_frequency, DEFAULT_EARTH_RESISTIVITY, DEFAULT_FREQUENCY_HZ, RESISTIVITY_DAMP_EARTH,
    RESISTIVITY_DRY_EARTH, RESISTIVITY_SWAMPY_GROUND,
};
pub use crate::errors::LineConstantsError;
pub use crate::line::carson::{earth_return_depth, impedance_matrix, mutual_impedance, self_impedance};
pub use crate::line::potential::{
    admittance_from_potential, mutual_potential, potential_matrix, self_potential,
};
pub use crate::line::reduction::{bundle_phases, kron_reduction};
pub use crate::line::sequence::{abc_to_seq, fortescue, fortescue_inverse, seq_to_abc};
pub use crate::line::{
    rating, series_impedance, shunt_admittance, validate, GeometryError, GeometryViolation,
    LineParameters, LineWarning, Phase, SequenceParameters, SeriesImpedance, ShuntAdmittance, Wire,
};
pub use crate::math::{phasor, C3x3, CMatrix, CScalar, Scalar};
