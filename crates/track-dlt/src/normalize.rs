//! Isotropic coordinate normalization for DLT conditioning.
//!
//! Centers a point set on its centroid and rescales it by a single shared
//! factor before the linear solve. Note the scale is the *pooled*
//! standard deviation of every coordinate value in the set, not the
//! per-axis deviation or the Hartley mean-distance-from-centroid metric
//! common in textbook DLT formulations. This convention is non-standard
//! but is kept deliberately so that coefficient vectors stay
//! interchangeable with calibrations produced by existing tooling.

use nalgebra::DMatrix;
use track_core::Real;

use crate::DltError;

/// Normalize an N×nd point set for a DLT solve.
///
/// Returns `(T, normalized)` where `T` is the (nd+1)×(nd+1) raw→normalized
/// homogeneous transform (translation by the centroid plus uniform scale)
/// and `normalized` is the transformed N×nd set with approximately zero
/// mean and unit spread.
///
/// Fails with [`DltError::DegenerateInput`] when all points coincide (zero
/// pooled deviation leaves the transform singular).
pub fn normalize_points(
    nd: usize,
    points: &DMatrix<Real>,
) -> Result<(DMatrix<Real>, DMatrix<Real>), DltError> {
    if points.ncols() != nd {
        return Err(DltError::InvalidDimension {
            expected: nd,
            got: points.ncols(),
        });
    }
    let n = points.nrows();
    if n == 0 {
        return Err(DltError::InsufficientPoints {
            nd,
            required: 1,
            got: 0,
        });
    }

    // Per-column centroid.
    let n_real = n as Real;
    let mut m = vec![0.0; nd];
    for r in 0..n {
        for (c, mc) in m.iter_mut().enumerate() {
            *mc += points[(r, c)];
        }
    }
    for mc in m.iter_mut() {
        *mc /= n_real;
    }

    // Pooled population standard deviation over all coordinate values.
    let total = (n * nd) as Real;
    let grand_mean = points.iter().sum::<Real>() / total;
    let s = (points
        .iter()
        .map(|v| (v - grand_mean) * (v - grand_mean))
        .sum::<Real>()
        / total)
        .sqrt();

    if s <= Real::EPSILON {
        return Err(DltError::degenerate(
            "all points coincide, normalization scale is zero",
        ));
    }

    // Tr maps normalized -> raw; its inverse maps raw -> normalized.
    let mut tr = DMatrix::<Real>::identity(nd + 1, nd + 1);
    for (c, mc) in m.iter().enumerate() {
        tr[(c, c)] = s;
        tr[(c, nd)] = *mc;
    }
    let t = tr
        .try_inverse()
        .ok_or_else(|| DltError::degenerate("normalization transform is singular"))?;

    // Apply T to the homogeneous-augmented points (points as columns).
    let mut aug = DMatrix::<Real>::zeros(nd + 1, n);
    for r in 0..n {
        for c in 0..nd {
            aug[(c, r)] = points[(r, c)];
        }
        aug[(nd, r)] = 1.0;
    }
    let mapped = &t * aug;

    let normalized = DMatrix::from_fn(n, nd, |r, c| mapped[(c, r)]);
    Ok((t, normalized))
}
