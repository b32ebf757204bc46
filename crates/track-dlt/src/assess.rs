//! Calibration accuracy assessment against known reference points.

use nalgebra::DMatrix;
use serde::Serialize;
use track_core::{Pt3, Real};

use crate::DltError;

/// Per-axis accuracy statistics of a reconstruction, in object-space
/// units.
#[derive(Debug, Clone, Serialize)]
pub struct ReconstructionStats {
    /// Number of reference points compared.
    pub points: usize,
    /// RMS error per axis (x, y, z).
    pub rms: [Real; 3],
    /// Sample standard deviation of the absolute error per axis.
    pub abs_err_std: [Real; 3],
}

/// Compare reconstructed points against their known object-space
/// positions.
///
/// `known` is N×3, positionally aligned with `reconstructed`. Used to
/// validate a calibration by reconstructing the calibration (or a held
/// out test) point set and inspecting the per-axis errors.
pub fn assess_reconstruction(
    known: &DMatrix<Real>,
    reconstructed: &[Pt3],
) -> Result<ReconstructionStats, DltError> {
    if known.ncols() != 3 {
        return Err(DltError::InvalidDimension {
            expected: 3,
            got: known.ncols(),
        });
    }
    let n = known.nrows();
    if reconstructed.len() != n {
        return Err(DltError::DimensionMismatch {
            expected: n,
            got: reconstructed.len(),
        });
    }
    if n == 0 {
        return Err(DltError::InsufficientPoints {
            nd: 3,
            required: 1,
            got: 0,
        });
    }

    let n_real = n as Real;
    let mut rms = [0.0; 3];
    let mut abs_err_std = [0.0; 3];

    for axis in 0..3 {
        let errs: Vec<Real> = (0..n)
            .map(|r| known[(r, axis)] - reconstructed[r][axis])
            .collect();

        rms[axis] = (errs.iter().map(|e| e * e).sum::<Real>() / n_real).sqrt();

        let abs_mean = errs.iter().map(|e| e.abs()).sum::<Real>() / n_real;
        abs_err_std[axis] = if n > 1 {
            (errs
                .iter()
                .map(|e| (e.abs() - abs_mean) * (e.abs() - abs_mean))
                .sum::<Real>()
                / (n_real - 1.0))
                .sqrt()
        } else {
            0.0
        };
    }

    Ok(ReconstructionStats {
        points: n,
        rms,
        abs_err_std,
    })
}
