//! Reconstructed trajectory tables: `x,y,z` columns, one row per frame.

use std::path::Path;

use anyhow::{bail, Context, Result};
use track_core::{Pt3, Real};

pub fn write_trajectory(path: &Path, points: &[Pt3]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create trajectory file {}", path.display()))?;

    writer.write_record(["x", "y", "z"])?;
    for p in points {
        writer.write_record([p.x.to_string(), p.y.to_string(), p.z.to_string()])?;
    }
    writer.flush()?;

    log::debug!("wrote {} trajectory rows to {}", points.len(), path.display());
    Ok(())
}

pub fn read_trajectory(path: &Path) -> Result<Vec<Pt3>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open trajectory file {}", path.display()))?;

    let headers = reader.headers()?.clone();
    if headers.len() != 3 {
        bail!(
            "trajectory file {} has {} columns, expected x,y,z",
            path.display(),
            headers.len()
        );
    }

    let mut points = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let coords: Vec<Real> = record
            .iter()
            .map(|field| field.trim().parse::<Real>())
            .collect::<Result<_, _>>()
            .with_context(|| format!("trajectory row {}: non-numeric value", i + 1))?;
        if coords.len() != 3 {
            bail!("trajectory row {}: {} fields, expected 3", i + 1, coords.len());
        }
        points.push(Pt3::new(coords[0], coords[1], coords[2]));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trajectory_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trajectory.csv");

        let points = vec![
            Pt3::new(0.1, -0.2, 0.55),
            Pt3::new(0.12345678901234, 0.0, 0.6),
        ];
        write_trajectory(&path, &points).unwrap();
        let restored = read_trajectory(&path).unwrap();

        assert_eq!(points, restored);
    }
}
