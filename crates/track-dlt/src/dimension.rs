/// Object-space dimensionality of a DLT problem.
///
/// `TwoD` maps a planar object space through a 3×3 homography; `ThreeD`
/// maps through a 3×4 projection matrix. All size-dependent constants of
/// the solver derive from this tag, so the calibration and reconstruction
/// routines stay generic instead of branching into duplicated 2D/3D code
/// paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
    TwoD,
    ThreeD,
}

impl Dimensionality {
    /// Number of object-space coordinates per point.
    pub fn nd(self) -> usize {
        match self {
            Dimensionality::TwoD => 2,
            Dimensionality::ThreeD => 3,
        }
    }

    /// Minimum correspondences for a stable calibration solve (2·nd).
    pub fn min_points(self) -> usize {
        2 * self.nd()
    }

    /// Length of the flattened coefficient vector: the full 3×(nd+1)
    /// projection matrix in row-major order, trailing entry normalized
    /// to 1 (9 for 2D, 12 for 3D).
    pub fn coeff_len(self) -> usize {
        3 * (self.nd() + 1)
    }
}
