//! DLT camera calibration from known point correspondences.

use nalgebra::{DMatrix, DVector};
use track_core::{point_matrix_2d, Pt2, Real};

use crate::{normalize_points, Dimensionality, DltError};

const PINV_EPS: Real = 1e-12;

/// Calibrated projection coefficients for one camera view.
///
/// Wraps the flattened projection matrix `H` (3×(nd+1), bottom-right
/// entry normalized to 1, row-major order, trailing 1 included) produced
/// by [`calibrate`]. Immutable once created; a calibration session holds
/// one `ViewParameters` per camera and reuses them for every
/// reconstruction call until recalibration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewParameters {
    dim: Dimensionality,
    l: DVector<Real>,
}

impl ViewParameters {
    /// Build from a flat coefficient vector, e.g. one row of a
    /// calibration file.
    ///
    /// Accepts either the full flattened matrix (9 or 12 values) or the
    /// free parameters only (8 or 11), in which case the implicit
    /// trailing 1 is appended.
    pub fn from_coefficients(
        dim: Dimensionality,
        coefficients: Vec<Real>,
    ) -> Result<Self, DltError> {
        let full = dim.coeff_len();
        let l = if coefficients.len() == full {
            DVector::from_vec(coefficients)
        } else if coefficients.len() + 1 == full {
            let mut v = coefficients;
            v.push(1.0);
            DVector::from_vec(v)
        } else {
            return Err(DltError::InvalidDimension {
                expected: full,
                got: coefficients.len(),
            });
        };
        Ok(ViewParameters { dim, l })
    }

    pub fn dim(&self) -> Dimensionality {
        self.dim
    }

    /// The flattened coefficient vector `L` (9 or 12 values).
    pub fn coefficients(&self) -> &[Real] {
        self.l.as_slice()
    }

    /// Reshape `L` back into the 3×(nd+1) projection matrix `H`.
    pub fn projection_matrix(&self) -> DMatrix<Real> {
        let cols = self.dim.nd() + 1;
        DMatrix::from_fn(3, cols, |r, c| self.l[r * cols + c])
    }
}

/// Camera calibration by DLT from known object points and their observed
/// pixel positions.
///
/// `object_points` is N×nd (nd from `dim`), `image_points` the
/// positionally corresponding pixel observations. Requires at least
/// `2·nd` correspondences (6 for 3D, 4 for 2D).
///
/// Both point sets are normalized independently, the homogeneous
/// projection constraints are stacked into a design matrix, and the
/// right-singular vector of the smallest singular value yields the
/// projection matrix, which is then denormalized and rescaled so its
/// bottom-right entry is 1.
///
/// Returns the flattened coefficients together with the residual: the RMS
/// Euclidean distance in pixels between the measured image points and the
/// calibration points reprojected through the recovered matrix.
pub fn calibrate(
    dim: Dimensionality,
    object_points: &DMatrix<Real>,
    image_points: &[Pt2],
) -> Result<(ViewParameters, Real), DltError> {
    let nd = dim.nd();
    let n = object_points.nrows();

    if object_points.ncols() != nd {
        return Err(DltError::InvalidDimension {
            expected: nd,
            got: object_points.ncols(),
        });
    }
    if image_points.len() != n {
        return Err(DltError::DimensionMismatch {
            expected: n,
            got: image_points.len(),
        });
    }
    if n < dim.min_points() {
        return Err(DltError::InsufficientPoints {
            nd,
            required: dim.min_points(),
            got: n,
        });
    }

    let uv = point_matrix_2d(image_points);
    let (txyz, xyzn) = normalize_points(nd, object_points)?;
    let (tuv, uvn) = normalize_points(2, &uv)?;

    // Two homogeneous constraint rows per correspondence. The matrix is
    // padded to at least `cols` rows so the SVD carries the complete
    // right-singular basis at the minimal point count (2N = 8 < 9 in 2D).
    let cols = dim.coeff_len();
    let rows = (2 * n).max(cols);
    let mut a = DMatrix::<Real>::zeros(rows, cols);

    for i in 0..n {
        let u = uvn[(i, 0)];
        let v = uvn[(i, 1)];
        let r0 = 2 * i;
        let r1 = r0 + 1;

        // [x.. 1 | 0.. | -u·x.. -u] and [0.. | x.. 1 | -v·x.. -v]
        for c in 0..nd {
            let x = xyzn[(i, c)];
            a[(r0, c)] = x;
            a[(r0, 2 * (nd + 1) + c)] = -u * x;
            a[(r1, nd + 1 + c)] = x;
            a[(r1, 2 * (nd + 1) + c)] = -v * x;
        }
        a[(r0, nd)] = 1.0;
        a[(r0, cols - 1)] = -u;
        a[(r1, 2 * nd + 1)] = 1.0;
        a[(r1, cols - 1)] = -v;
    }

    // Solve A·l = 0: right-singular vector of the smallest singular value.
    let svd = a.svd(false, true);
    let v_t = svd
        .v_t
        .ok_or_else(|| DltError::degenerate("svd failed on the design matrix"))?;
    let l_raw = v_t.row(v_t.nrows() - 1);

    let w = l_raw[cols - 1];
    if w.abs() <= Real::EPSILON {
        return Err(DltError::degenerate(
            "projection solution has zero homogeneous scale",
        ));
    }

    let mut h = DMatrix::from_fn(3, nd + 1, |r, c| l_raw[r * (nd + 1) + c] / w);

    // Denormalize: H = pinv(Tuv) · H_norm · Txyz, then rescale to H[2,nd] = 1.
    let tuv_inv = tuv
        .pseudo_inverse(PINV_EPS)
        .map_err(|_| DltError::degenerate("image normalization transform is not invertible"))?;
    h = tuv_inv * h * txyz;

    let scale = h[(2, nd)];
    if scale.abs() <= Real::EPSILON {
        return Err(DltError::degenerate(
            "denormalized projection has zero homogeneous scale",
        ));
    }
    h /= scale;

    let l = DVector::from_fn(cols, |i, _| h[(i / (nd + 1), i % (nd + 1))]);

    // RMS reprojection distance against the raw image points.
    let mut sum_sq = 0.0;
    for i in 0..n {
        let mut p = [0.0; 3];
        for (r, pr) in p.iter_mut().enumerate() {
            let mut acc = h[(r, nd)];
            for c in 0..nd {
                acc += h[(r, c)] * object_points[(i, c)];
            }
            *pr = acc;
        }
        let du = p[0] / p[2] - image_points[i].x;
        let dv = p[1] / p[2] - image_points[i].y;
        sum_sq += du * du + dv * dv;
    }
    let residual = (sum_sq / n as Real).sqrt();

    log::debug!(
        "{}D DLT calibration: {} points, residual {:.6} px",
        nd,
        n,
        residual
    );

    Ok((ViewParameters { dim, l }, residual))
}
