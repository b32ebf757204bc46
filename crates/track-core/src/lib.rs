//! Core math primitives for `tracker3d`.
//!
//! This crate contains the linear algebra type aliases (`Real`, `Pt2`,
//! `Pt3`, ...) and the small homogeneous-coordinate helpers shared by the
//! calibration and reconstruction crates.

/// Linear algebra type aliases and helpers.
pub mod math;

pub use math::*;
