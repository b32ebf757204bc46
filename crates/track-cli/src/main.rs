use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use track_dlt::{
    assess_reconstruction, calibrate, reconstruct_trajectory, Dimensionality,
    ReconstructionStats,
};
use track_io::{
    read_coefficients, read_correspondence, read_pixel_tracks, write_coefficients,
    write_trajectory, CorrespondenceTable, ViewTrack,
};

/// Multi-view DLT calibration and 3D track reconstruction.
#[derive(Debug, Parser)]
#[command(author, version, about = "Multi-view DLT calibration and 3D track reconstruction")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute per-view calibration coefficients from a correspondence table.
    Calibrate {
        /// CSV with x,y,z object columns followed by <view>_x,<view>_y pairs.
        #[arg(long)]
        points: PathBuf,

        /// Output calibration coefficient file (headerless, 12 columns per view).
        #[arg(long)]
        output: PathBuf,
    },

    /// Reconstruct a 3D trajectory from per-view pixel tracks.
    Reconstruct {
        /// Calibration coefficient file produced by `calibrate`.
        #[arg(long)]
        calibration: PathBuf,

        /// CSV of <view>_x,<view>_y pixel columns, one row per frame.
        #[arg(long)]
        points: PathBuf,

        /// Output trajectory CSV (x,y,z per frame).
        #[arg(long)]
        output: PathBuf,
    },

    /// Reconstruct known reference points and report per-axis accuracy.
    Assess {
        /// Calibration coefficient file produced by `calibrate`.
        #[arg(long)]
        calibration: PathBuf,

        /// Correspondence table with known x,y,z and per-view pixels.
        #[arg(long)]
        points: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct CalibrationReport {
    views: Vec<ViewReport>,
}

#[derive(Debug, Serialize)]
struct ViewReport {
    name: String,
    residual_px: f64,
}

fn run_calibrate(points: &Path, output: &Path) -> Result<CalibrationReport> {
    let table = read_correspondence(points, Dimensionality::ThreeD)?;
    if table.views.len() < 2 {
        bail!(
            "3D calibration needs at least two views, table has {}",
            table.views.len()
        );
    }

    let mut params = Vec::new();
    let mut reports = Vec::new();
    for view in &table.views {
        let (p, residual) = calibrate(Dimensionality::ThreeD, &table.object_points, &view.points)?;
        log::info!("view {}: residual {:.4} px", view.name, residual);
        params.push(p);
        reports.push(ViewReport {
            name: view.name.clone(),
            residual_px: residual,
        });
    }

    write_coefficients(output, &params)?;
    Ok(CalibrationReport { views: reports })
}

fn run_reconstruct(calibration: &Path, points: &Path, output: &Path) -> Result<usize> {
    let views = read_coefficients(calibration, Dimensionality::ThreeD)?;
    let tracks = read_pixel_tracks(points)?;
    if tracks.len() != views.len() {
        bail!(
            "calibration has {} views but track table has {}",
            views.len(),
            tracks.len()
        );
    }

    let pixel_tracks: Vec<_> = tracks.into_iter().map(|t: ViewTrack| t.points).collect();
    let trajectory = reconstruct_trajectory(&views, &pixel_tracks)?;
    write_trajectory(output, &trajectory)?;
    Ok(trajectory.len())
}

fn run_assess(calibration: &Path, points: &Path) -> Result<ReconstructionStats> {
    let views = read_coefficients(calibration, Dimensionality::ThreeD)?;
    let table: CorrespondenceTable = read_correspondence(points, Dimensionality::ThreeD)?;
    if table.views.len() != views.len() {
        bail!(
            "calibration has {} views but point table has {}",
            views.len(),
            table.views.len()
        );
    }

    let pixel_tracks: Vec<_> = table.views.iter().map(|t| t.points.clone()).collect();
    let reconstructed = reconstruct_trajectory(&views, &pixel_tracks)?;
    Ok(assess_reconstruction(&table.object_points, &reconstructed)?)
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    match &args.command {
        Command::Calibrate { points, output } => {
            let report = run_calibrate(points, output)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Reconstruct {
            calibration,
            points,
            output,
        } => {
            let frames = run_reconstruct(calibration, points, output)?;
            log::info!("reconstructed {} frames", frames);
        }
        Command::Assess {
            calibration,
            points,
        } => {
            let stats = run_assess(calibration, points)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    if let Err(err) = try_main() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
