//! CSV interop for `tracker3d`.
//!
//! Bridges the in-memory engine types to the persisted formats the
//! surrounding tooling produces and consumes:
//!
//! - calibration coefficient files (headerless, one row of 12 or 9
//!   floats per camera view),
//! - point correspondence tables (`x,y[,z]` object columns followed by
//!   `<view>_x,<view>_y` pixel column pairs),
//! - trajectory tables (`x,y,z`, one row per frame).

mod coefficients;
mod correspondence;
mod trajectory;

pub use coefficients::{read_coefficients, write_coefficients};
pub use correspondence::{
    read_correspondence, read_pixel_tracks, CorrespondenceTable, ViewTrack,
};
pub use trajectory::{read_trajectory, write_trajectory};
