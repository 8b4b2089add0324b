#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Electromagnetic constants used throughout the library.
pub mod constants;
/// Shared numerical aliases anchored on `nalgebra`.
pub mod math;
/// Overhead-line geometry, engines, and the line-constants pipeline.
pub mod line;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

pub use errors::LineConstantsError;
