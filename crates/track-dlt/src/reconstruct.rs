//! Object-space point recovery from calibrated views.

use nalgebra::{DMatrix, DVector};
use track_core::{from_homogeneous, to_homogeneous, Mat3, Pt2, Pt3, Real};

use crate::{calibrate::ViewParameters, Dimensionality, DltError};

/// Reconstruct an object-space point from per-view pixel observations.
///
/// `views` holds one calibrated [`ViewParameters`] per camera and
/// `pixels` the simultaneous observation of the same point in each view,
/// positionally aligned. `num_views` is the caller's declared view count
/// and must match both slices.
///
/// 3D reconstruction needs at least two views. A single 2D view is the
/// one allowed degenerate case and takes a fast path: the 3×3 homography
/// is inverted directly, no SVD involved. With two or more views the
/// constraint rows of every view are stacked and solved jointly, a linear
/// least-squares triangulation that minimizes algebraic error across all
/// views simultaneously (exact for two noiseless views).
///
/// Returns the nd object-space coordinates.
pub fn reconstruct(
    dim: Dimensionality,
    num_views: usize,
    views: &[ViewParameters],
    pixels: &[Pt2],
) -> Result<DVector<Real>, DltError> {
    if num_views == 0 || views.len() != num_views {
        return Err(DltError::ViewCountMismatch {
            declared: num_views,
            got: views.len(),
            what: "sets of camera parameters",
        });
    }
    if pixels.len() != num_views {
        return Err(DltError::ViewCountMismatch {
            declared: num_views,
            got: pixels.len(),
            what: "pixel observations",
        });
    }
    for view in views {
        if view.dim() != dim {
            return Err(DltError::InvalidDimension {
                expected: dim.coeff_len(),
                got: view.dim().coeff_len(),
            });
        }
    }
    if dim == Dimensionality::ThreeD && num_views < 2 {
        return Err(DltError::InsufficientViews(num_views));
    }

    if num_views == 1 {
        return reconstruct_single_view(&views[0], &pixels[0]);
    }

    let nd = dim.nd();
    let k = nd + 1;
    let mut m = DMatrix::<Real>::zeros(2 * num_views, k);

    // Per view: rows L[0..k] - u·L[2k..3k] and L[k..2k] - v·L[2k..3k].
    for (i, (view, px)) in views.iter().zip(pixels.iter()).enumerate() {
        let l = view.coefficients();
        let (u, v) = (px.x, px.y);
        for c in 0..k {
            m[(2 * i, c)] = l[c] - u * l[2 * k + c];
            m[(2 * i + 1, c)] = l[k + c] - v * l[2 * k + c];
        }
    }

    let svd = m.svd(false, true);
    let v_t = svd
        .v_t
        .ok_or_else(|| DltError::degenerate("svd failed during triangulation"))?;
    let x_h = v_t.row(v_t.nrows() - 1);

    let w = x_h[nd];
    if w.abs() <= Real::EPSILON {
        return Err(DltError::degenerate(
            "triangulated point has zero homogeneous scale",
        ));
    }

    Ok(DVector::from_fn(nd, |i, _| x_h[i] / w))
}

/// Convenience wrapper for the common 3D case: reconstruct one [`Pt3`]
/// from simultaneous pixel observations in every calibrated view.
pub fn reconstruct_point3(views: &[ViewParameters], pixels: &[Pt2]) -> Result<Pt3, DltError> {
    let x = reconstruct(Dimensionality::ThreeD, views.len(), views, pixels)?;
    Ok(Pt3::new(x[0], x[1], x[2]))
}

fn reconstruct_single_view(view: &ViewParameters, pixel: &Pt2) -> Result<DVector<Real>, DltError> {
    let h = Mat3::from_row_slice(view.coefficients());
    let h_inv = h
        .try_inverse()
        .ok_or_else(|| DltError::degenerate("planar projection matrix is not invertible"))?;

    let x = h_inv * to_homogeneous(pixel);
    if x.z.abs() <= Real::EPSILON {
        return Err(DltError::degenerate(
            "back-projected point has zero homogeneous scale",
        ));
    }

    let p = from_homogeneous(&x);
    Ok(DVector::from_vec(vec![p.x, p.y]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibrate;
    use nalgebra::DMatrix;
    use track_core::point_matrix_3d;

    fn project(h: &[Real; 12], p: &Pt3) -> Pt2 {
        let u = h[0] * p.x + h[1] * p.y + h[2] * p.z + h[3];
        let v = h[4] * p.x + h[5] * p.y + h[6] * p.z + h[7];
        let w = h[8] * p.x + h[9] * p.y + h[10] * p.z + h[11];
        Pt2::new(u / w, v / w)
    }

    fn two_camera_rig() -> ([Real; 12], [Real; 12], Vec<Pt3>) {
        let left = [
            800.0, 0.0, 640.0, 320.0, //
            0.0, 780.0, 360.0, 180.0, //
            0.0, 0.0, 1.2, 1.0,
        ];
        let right = [
            790.0, 30.0, 600.0, 150.0, //
            -25.0, 770.0, 340.0, 200.0, //
            0.02, 0.01, 1.1, 1.0,
        ];
        let mut world = Vec::new();
        for z in 0..2 {
            for y in 0..3 {
                for x in 0..4 {
                    world.push(Pt3::new(
                        x as Real * 0.1,
                        y as Real * 0.1,
                        0.5 + z as Real * 0.1,
                    ));
                }
            }
        }
        (left, right, world)
    }

    fn calibrated_views(
        left: &[Real; 12],
        right: &[Real; 12],
        world: &[Pt3],
    ) -> Vec<ViewParameters> {
        let xyz = point_matrix_3d(world);
        [left, right]
            .iter()
            .map(|h| {
                let uv: Vec<Pt2> = world.iter().map(|p| project(h, p)).collect();
                let (params, _) = calibrate(Dimensionality::ThreeD, &xyz, &uv).unwrap();
                params
            })
            .collect()
    }

    #[test]
    fn two_views_recover_points_exactly() {
        let (left, right, world) = two_camera_rig();
        let views = calibrated_views(&left, &right, &world);

        for p in &world {
            let pixels = [project(&left, p), project(&right, p)];
            let est = reconstruct_point3(&views, &pixels).unwrap();
            let err = (est - *p).norm();
            assert!(err < 1e-6, "reconstruction error too large: {}", err);
        }
    }

    #[test]
    fn view_count_mismatch_is_rejected() {
        let (left, right, world) = two_camera_rig();
        let mut views = calibrated_views(&left, &right, &world);
        views.push(views[0].clone());

        let pixels = [Pt2::new(0.0, 0.0), Pt2::new(1.0, 1.0)];
        let err = reconstruct(Dimensionality::ThreeD, 2, &views, &pixels).unwrap_err();
        assert!(matches!(err, DltError::ViewCountMismatch { .. }), "{err:?}");
    }

    #[test]
    fn single_view_3d_is_rejected() {
        let (left, right, world) = two_camera_rig();
        let views = calibrated_views(&left, &right, &world);

        let pixels = [Pt2::new(100.0, 100.0)];
        let err = reconstruct(Dimensionality::ThreeD, 1, &views[..1], &pixels).unwrap_err();
        assert!(matches!(err, DltError::InsufficientViews(1)), "{err:?}");
    }

    #[test]
    fn single_view_back_projects_to_object_plane() {
        // Known planar mapping: pixels are object coordinates scaled by 3.
        let xyz =
            DMatrix::from_row_slice(4, 2, &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
        let image = vec![
            Pt2::new(0.0, 0.0),
            Pt2::new(3.0, 0.0),
            Pt2::new(3.0, 3.0),
            Pt2::new(0.0, 3.0),
        ];
        let (params, _) = calibrate(Dimensionality::TwoD, &xyz, &image).unwrap();

        let est = reconstruct(Dimensionality::TwoD, 1, &[params], &[Pt2::new(1.5, 0.9)]).unwrap();
        assert!((est[0] - 0.5).abs() < 1e-9, "x: {}", est[0]);
        assert!((est[1] - 0.3).abs() < 1e-9, "y: {}", est[1]);
    }

    #[test]
    fn planar_fast_path_matches_general_path() {
        // Calibrate a 2D view, then compare direct homography inversion
        // against the SVD path with the same view supplied twice.
        let xyz = DMatrix::from_row_slice(
            5,
            2,
            &[0.0, 0.0, 1.0, 0.1, 1.1, 1.0, 0.05, 0.9, 0.5, 0.4],
        );
        let image = vec![
            Pt2::new(10.0, 20.0),
            Pt2::new(210.0, 35.0),
            Pt2::new(230.0, 240.0),
            Pt2::new(25.0, 195.0),
            Pt2::new(115.0, 105.0),
        ];
        let (params, _) = calibrate(Dimensionality::TwoD, &xyz, &image).unwrap();

        let px = Pt2::new(120.0, 110.0);
        let fast = reconstruct(Dimensionality::TwoD, 1, &[params.clone()], &[px]).unwrap();
        let general = reconstruct(
            Dimensionality::TwoD,
            2,
            &[params.clone(), params],
            &[px, px],
        )
        .unwrap();

        assert!((fast[0] - general[0]).abs() < 1e-9);
        assert!((fast[1] - general[1]).abs() < 1e-9);
    }
}
