use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lsm_patch::{FieldStats, IndexBox2, PatchData, PatchGeometry, PatchLevel, precision_name};
use tracing::info;

use crate::config::OutputOptions;
use crate::error::Result;
use crate::snapshot::{FieldSnapshot, save_snapshot};
use crate::vtk_writer::VtkWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failed,
}

impl RunStatus {
    fn as_str(self) -> &'static str {
        match self {
            RunStatus::Success => "SUCCESS",
            RunStatus::Failed => "FAILED",
        }
    }

    fn code(self) -> u8 {
        match self {
            RunStatus::Success => 0,
            RunStatus::Failed => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub job_name: String,
    pub precision: &'static str,
    pub domain: IndexBox2,
    pub num_patches: usize,
    pub ghost_width: i32,
    pub ghost_cells_exchanged: usize,
    pub stats: Option<FieldStats>,
    pub status: RunStatus,
    pub message: String,
    pub generated_at: DateTime<Utc>,
}

impl RunReport {
    pub fn from_level(
        job_name: impl Into<String>,
        level: &PatchLevel,
        ghost_cells_exchanged: usize,
        status: RunStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            precision: precision_name(),
            domain: level.domain(),
            num_patches: level.patch_count(),
            ghost_width: level.ghost_width(),
            ghost_cells_exchanged,
            stats: level.stats(),
            status,
            message: message.into(),
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBundle {
    pub snapshot_path: Option<PathBuf>,
    pub vtk_path: Option<PathBuf>,
    pub sta_path: Option<PathBuf>,
}

/// Writes `<job>.json`, `<job>.vtk` and `<job>.sta` into `dir` as selected
/// by `options`.
pub fn write_output_bundle(
    dir: impl AsRef<Path>,
    report: &RunReport,
    field: &PatchData,
    geometry: &PatchGeometry,
    options: &OutputOptions,
) -> Result<OutputBundle> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut bundle = OutputBundle::default();

    if options.snapshot {
        let path = dir.join(format!("{}.json", report.job_name));
        let snapshot = FieldSnapshot::from_patch(field, geometry)
            .with_metadata("job", report.job_name.clone())
            .with_metadata("generated_at", report.generated_at.to_rfc3339());
        save_snapshot(&path, &snapshot)?;
        bundle.snapshot_path = Some(path);
    }
    if options.vtk {
        let path = dir.join(format!("{}.vtk", report.job_name));
        VtkWriter::new(field, geometry)
            .with_scalar_name(&options.scalar_name)
            .write_vtk(&path)?;
        bundle.vtk_path = Some(path);
    }
    if options.report {
        let path = dir.join(format!("{}.sta", report.job_name));
        write_sta(&path, report)?;
        bundle.sta_path = Some(path);
    }

    info!(dir = %dir.display(), job = %report.job_name, "wrote output bundle");
    Ok(bundle)
}

pub fn write_sta(path: impl AsRef<Path>, report: &RunReport) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let stats_line = match &report.stats {
        Some(s) => format!(
            "{:<8} {:<8} {:<14.6e} {:<14.6e}",
            s.cells, s.negative_cells, s.min, s.max
        ),
        None => "0        0        -              -".to_string(),
    };
    let body = format!(
        "*LSM STA REPORT\n\
         JOB: {}\n\
         DATE: {}\n\
         PRECISION: {}\n\
         DOMAIN: {}\n\
         PATCHES: {}  GHOST_WIDTH: {}  GHOSTS_EXCHANGED: {}\n\
         STATUS  CELLS    INSIDE   MIN            MAX\n\
         {:<7} {}\n\
         # {}: {}\n",
        report.job_name,
        report.generated_at.to_rfc3339(),
        report.precision,
        report.domain,
        report.num_patches,
        report.ghost_width,
        report.ghost_cells_exchanged,
        report.status.code(),
        stats_line.trim_end(),
        report.status.as_str(),
        report.message
    );
    fs::write(path, body)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
