use thiserror::Error;

/// Errors raised by the DLT calibration and reconstruction routines.
///
/// Every variant is a deterministic precondition or degeneracy detected
/// at the boundary of the function that first observes it; no partial
/// results are returned and no `NaN` values are propagated.
#[derive(Debug, Error)]
pub enum DltError {
    #[error("expected {expected} coordinate columns, got {got}")]
    InvalidDimension { expected: usize, got: usize },

    #[error("point count mismatch: expected {expected} points, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("{nd}D DLT requires at least {required} calibration points, got {got}")]
    InsufficientPoints {
        nd: usize,
        required: usize,
        got: usize,
    },

    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("declared {declared} views but got {got} {what}")]
    ViewCountMismatch {
        declared: usize,
        got: usize,
        what: &'static str,
    },

    #[error("3D reconstruction requires at least 2 views, got {0}")]
    InsufficientViews(usize),
}

impl DltError {
    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        DltError::DegenerateInput(msg.into())
    }
}
