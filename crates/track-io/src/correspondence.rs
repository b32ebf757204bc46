//! Point correspondence and pixel track tables.
//!
//! Header layout: optional object-space columns (`x,y` or `x,y,z`)
//! followed by one `<view>_x,<view>_y` column pair per camera view. Rows
//! are positionally aligned: row i of the object columns corresponds to
//! row i of every view's pixel columns.

use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::StringRecord;
use nalgebra::DMatrix;
use track_core::{Pt2, Real};
use track_dlt::Dimensionality;

/// Pixel positions of one camera view, one entry per table row.
#[derive(Debug, Clone)]
pub struct ViewTrack {
    pub name: String,
    pub points: Vec<Pt2>,
}

/// A decomposed correspondence table: object-space points plus the
/// positionally aligned per-view pixel observations.
#[derive(Debug, Clone)]
pub struct CorrespondenceTable {
    /// N×nd object-space coordinates.
    pub object_points: DMatrix<Real>,
    pub views: Vec<ViewTrack>,
}

/// Read a correspondence table whose first nd columns are object-space
/// coordinates and whose remaining columns are per-view pixel pairs.
pub fn read_correspondence(path: &Path, dim: Dimensionality) -> Result<CorrespondenceTable> {
    let nd = dim.nd();
    let (headers, rows) = read_table(path)?;

    if headers.len() < nd + 2 {
        bail!(
            "correspondence table needs {} object columns plus at least one view pair, got {} columns",
            nd,
            headers.len()
        );
    }
    let view_names = pair_names(&headers[nd..])?;

    let n = rows.len();
    let object_points = DMatrix::from_fn(n, nd, |r, c| rows[r][c]);

    let views = view_names
        .into_iter()
        .enumerate()
        .map(|(v, name)| ViewTrack {
            name,
            points: rows
                .iter()
                .map(|row| Pt2::new(row[nd + 2 * v], row[nd + 2 * v + 1]))
                .collect(),
        })
        .collect();

    Ok(CorrespondenceTable {
        object_points,
        views,
    })
}

/// Read a pixel track table: `<view>_x,<view>_y` column pairs only, one
/// row per frame.
pub fn read_pixel_tracks(path: &Path) -> Result<Vec<ViewTrack>> {
    let (headers, rows) = read_table(path)?;
    let view_names = pair_names(&headers)?;

    Ok(view_names
        .into_iter()
        .enumerate()
        .map(|(v, name)| ViewTrack {
            name,
            points: rows
                .iter()
                .map(|row| Pt2::new(row[2 * v], row[2 * v + 1]))
                .collect(),
        })
        .collect())
}

fn read_table(path: &Path) -> Result<(Vec<String>, Vec<Vec<Real>>)> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open point table {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record: StringRecord = record?;
        if record.len() != headers.len() {
            bail!(
                "point table row {}: {} fields, header has {}",
                i + 1,
                record.len(),
                headers.len()
            );
        }
        let row: Vec<Real> = record
            .iter()
            .map(|field| field.trim().parse::<Real>())
            .collect::<Result<_, _>>()
            .with_context(|| format!("point table row {}: non-numeric value", i + 1))?;
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("point table {} has no data rows", path.display());
    }

    log::debug!("read {} rows from {}", rows.len(), path.display());
    Ok((headers, rows))
}

/// Validate `<name>_x,<name>_y` column pairing and return the view names.
fn pair_names(columns: &[String]) -> Result<Vec<String>> {
    if columns.is_empty() || columns.len() % 2 != 0 {
        bail!(
            "expected an even number of view pixel columns, got {}",
            columns.len()
        );
    }

    let mut names = Vec::new();
    for pair in columns.chunks(2) {
        let (x, y) = (&pair[0], &pair[1]);
        let (Some(xn), Some(yn)) = (x.strip_suffix("_x"), y.strip_suffix("_y")) else {
            bail!("expected a <view>_x,<view>_y column pair, got {x:?},{y:?}");
        };
        if xn != yn {
            bail!("mismatched view column pair: {x:?},{y:?}");
        }
        names.push(xn.to_string());
    }
    Ok(names)
}
