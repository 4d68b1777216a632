//! JSON run configuration.
//!
//! ```json
//! {
//!   "job_name": "circle",
//!   "domain": { "ilo": 0, "ihi": 63, "jlo": 0, "jhi": 63 },
//!   "geometry": { "x_lower": [-1.0, -1.0], "dx": [0.03125, 0.03125] },
//!   "circle": { "center": [0.0, 0.0], "radius": 0.5 }
//! }
//! ```
//!
//! Every other field has a default.

use std::fs;
use std::path::Path;

use lsm_patch::{Circle, FillRegion, IndexBox2, PatchGeometry, PatchLevel, Real};
use serde::{Deserialize, Serialize};

use crate::error::{IoError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CircleConfig {
    pub center: [Real; 2],
    pub radius: Real,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputOptions {
    pub snapshot: bool,
    pub vtk: bool,
    pub report: bool,
    /// Point-data array name in the VTK file.
    pub scalar_name: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            snapshot: true,
            vtk: true,
            report: true,
            scalar_name: "level_set".to_string(),
        }
    }
}

/// Widest ghost layer a run may request.
pub const MAX_GHOST_WIDTH: i32 = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default = "default_job_name")]
    pub job_name: String,
    pub domain: IndexBox2,
    pub geometry: PatchGeometry,
    #[serde(default = "default_max_patch_size")]
    pub max_patch_size: i32,
    #[serde(default = "default_ghost_width")]
    pub ghost_width: i32,
    pub circle: CircleConfig,
    #[serde(default)]
    pub fill_region: FillRegion,
    #[serde(default)]
    pub output: OutputOptions,
}

fn default_job_name() -> String {
    "level_set".to_string()
}

fn default_max_patch_size() -> i32 {
    32
}

// Third-order ENO stencils need three ghost layers.
fn default_ghost_width() -> i32 {
    3
}

impl RunConfig {
    pub fn circle(&self) -> Result<Circle> {
        Ok(Circle::new(self.circle.center, self.circle.radius)?)
    }

    pub fn build_level(&self) -> Result<PatchLevel> {
        Ok(PatchLevel::decompose(
            self.domain,
            self.geometry,
            self.max_patch_size,
            self.ghost_width,
        )?)
    }

    /// Checks everything a run needs before any buffer is allocated.
    pub fn validate(&self) -> Result<()> {
        if self.job_name.trim().is_empty()
            || self
                .job_name
                .chars()
                .any(|ch| ch == '/' || ch == '\\' || ch.is_control())
        {
            return Err(IoError::InvalidData(format!(
                "job name {:?} is not a valid file stem",
                self.job_name
            )));
        }
        if self.domain.is_empty() {
            return Err(IoError::InvalidData(format!(
                "domain box {} is empty",
                self.domain
            )));
        }
        if !(0..=MAX_GHOST_WIDTH).contains(&self.ghost_width) {
            return Err(IoError::InvalidData(format!(
                "ghost width {} is outside 0..={MAX_GHOST_WIDTH}",
                self.ghost_width
            )));
        }
        if self.max_patch_size < 1 {
            return Err(IoError::InvalidData(format!(
                "max patch size must be at least 1, got {}",
                self.max_patch_size
            )));
        }
        if self.domain.grow(self.ghost_width).is_none() {
            return Err(IoError::InvalidData(format!(
                "ghost layers of width {} around {} leave the index range",
                self.ghost_width, self.domain
            )));
        }
        let name = &self.output.scalar_name;
        if name.is_empty() || name.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
            return Err(IoError::InvalidData(format!(
                "scalar name {name:?} must be a single non-empty word"
            )));
        }
        self.geometry.validate()?;
        self.circle()?;
        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<RunConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    let config: RunConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}
