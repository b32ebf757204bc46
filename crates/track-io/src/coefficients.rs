//! Calibration coefficient files.
//!
//! Headerless CSV, one row per camera view, each row the flattened
//! projection matrix in row-major order (12 columns for 3D, 9 for 2D).
//! Values are written with Rust's shortest-round-trip float formatting,
//! so reading a file back reproduces the projection matrices exactly.

use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use track_core::Real;
use track_dlt::{Dimensionality, ViewParameters};

pub fn write_coefficients(path: &Path, views: &[ViewParameters]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create calibration file {}", path.display()))?;

    for view in views {
        let row: Vec<String> = view.coefficients().iter().map(|c| c.to_string()).collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;

    log::debug!(
        "wrote {} coefficient rows to {}",
        views.len(),
        path.display()
    );
    Ok(())
}

pub fn read_coefficients(path: &Path, dim: Dimensionality) -> Result<Vec<ViewParameters>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("open calibration file {}", path.display()))?;

    let mut views = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let coefficients: Vec<Real> = record
            .iter()
            .map(|field| field.trim().parse::<Real>())
            .collect::<Result<_, _>>()
            .with_context(|| format!("calibration file row {}: non-numeric value", row + 1))?;

        let view = ViewParameters::from_coefficients(dim, coefficients)
            .with_context(|| format!("calibration file row {}", row + 1))?;
        views.push(view);
    }

    log::debug!(
        "read {} coefficient rows from {}",
        views.len(),
        path.display()
    );
    Ok(views)
}
