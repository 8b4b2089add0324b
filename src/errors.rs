//! Shared error types used across submodules.

use thiserror::Error;

use crate::line::geometry::GeometryError;

/// Top-level error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineConstantsError {
    /// The conductor geometry failed validation; carries every violated rule.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// A matrix that must be inverted turned out singular.
    #[error("singular matrix while {context}")]
    SingularMatrix {
        /// Pipeline stage that required the inversion.
        context: &'static str,
    },
    /// The sequence transform received a matrix that is not 3×3.
    #[error("expected a 3x3 phase matrix, found {rows}x{cols}")]
    ShapeMismatch {
        /// Row count of the offending matrix.
        rows: usize,
        /// Column count of the offending matrix.
        cols: usize,
    },
}
