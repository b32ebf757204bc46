//! DLT camera calibration and multi-view point reconstruction.
//!
//! This crate implements the Direct Linear Transformation engine behind
//! `tracker3d`:
//!
//! - [`normalize_points`]: isotropic coordinate normalization for
//!   numerical conditioning,
//! - [`calibrate`]: per-view projection coefficients from known object
//!   points and their pixel observations, with an RMS reprojection
//!   residual,
//! - [`reconstruct`]: object-space point recovery from one or more
//!   calibrated views (linear least-squares triangulation),
//! - [`reconstruct_trajectory`]: the per-frame batch loop over tracked
//!   pixel positions,
//! - [`assess_reconstruction`]: per-axis accuracy statistics against
//!   known reference points.
//!
//! All operations are pure functions of their inputs; nothing is cached
//! between calls, so calibration and reconstruction may run in parallel
//! across cameras and frames.

mod assess;
mod calibrate;
mod dimension;
mod error;
mod normalize;
mod reconstruct;
mod trajectory;

pub use assess::{assess_reconstruction, ReconstructionStats};
pub use calibrate::{calibrate, ViewParameters};
pub use dimension::Dimensionality;
pub use error::DltError;
pub use normalize::normalize_points;
pub use reconstruct::{reconstruct, reconstruct_point3};
pub use trajectory::reconstruct_trajectory;
