use nalgebra::{DMatrix, Matrix3, Point2, Point3, Vector3};

pub type Real = f64;

pub type Vec3 = Vector3<Real>;
pub type Pt2 = Point2<Real>;
pub type Pt3 = Point3<Real>;
pub type Mat3 = Matrix3<Real>;

pub fn to_homogeneous(p: &Pt2) -> Vec3 {
    Vec3::new(p.x, p.y, 1.0)
}

pub fn from_homogeneous(v: &Vec3) -> Pt2 {
    Pt2::new(v.x / v.z, v.y / v.z)
}

/// Stack 2D points into an N×2 row-per-point matrix.
pub fn point_matrix_2d(points: &[Pt2]) -> DMatrix<Real> {
    DMatrix::from_fn(points.len(), 2, |r, c| points[r][c])
}

/// Stack 3D points into an N×3 row-per-point matrix.
pub fn point_matrix_3d(points: &[Pt3]) -> DMatrix<Real> {
    DMatrix::from_fn(points.len(), 3, |r, c| points[r][c])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homogeneous_round_trip() {
        let p = Pt2::new(3.0, -2.0);
        let h = to_homogeneous(&p);
        assert_eq!(h, Vec3::new(3.0, -2.0, 1.0));
        let back = from_homogeneous(&(h * 2.5));
        assert!((back - p).norm() < 1e-12);
    }

    #[test]
    fn point_matrix_layout() {
        let m = point_matrix_3d(&[Pt3::new(1.0, 2.0, 3.0), Pt3::new(4.0, 5.0, 6.0)]);
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 2)], 6.0);
    }
}
