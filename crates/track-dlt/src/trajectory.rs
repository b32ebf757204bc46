//! Frame-by-frame 3D trajectory reconstruction.

use rayon::prelude::*;
use track_core::{Pt2, Pt3};

use crate::{calibrate::ViewParameters, reconstruct_point3, DltError};

/// Reconstruct a full 3D trajectory from per-view pixel tracks.
///
/// `tracks` holds one pixel track per calibrated view, positionally
/// aligned with `views`; every track has one entry per frame and all
/// tracks must have the same length. Frame `i` of the result is the
/// triangulation of frame `i` of every track.
///
/// The engine is stateless and the coefficient vectors are read-only, so
/// frames are reconstructed in parallel.
pub fn reconstruct_trajectory(
    views: &[ViewParameters],
    tracks: &[Vec<Pt2>],
) -> Result<Vec<Pt3>, DltError> {
    if views.is_empty() || tracks.len() != views.len() {
        return Err(DltError::ViewCountMismatch {
            declared: views.len(),
            got: tracks.len(),
            what: "pixel tracks",
        });
    }

    let frames = tracks[0].len();
    for track in tracks {
        if track.len() != frames {
            return Err(DltError::DimensionMismatch {
                expected: frames,
                got: track.len(),
            });
        }
    }

    log::debug!(
        "reconstructing {} frames from {} views",
        frames,
        views.len()
    );

    (0..frames)
        .into_par_iter()
        .map(|frame| {
            let pixels: Vec<Pt2> = tracks.iter().map(|track| track[frame]).collect();
            reconstruct_point3(views, &pixels)
        })
        .collect()
}
