use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use lsm_patch::{IndexBox2, PatchData, PatchGeometry, Real, precision_name};
use serde::{Deserialize, Serialize};

use crate::error::{IoError, Result};

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Field values over a box, in Fortran order, with the geometry needed to
/// place them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSnapshot {
    pub schema_version: u32,
    pub precision: String,
    pub ghost_box: IndexBox2,
    pub geometry: PatchGeometry,
    pub values: Vec<Real>,
    pub metadata: BTreeMap<String, String>,
}

impl FieldSnapshot {
    pub fn from_patch(field: &PatchData, geometry: &PatchGeometry) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            precision: precision_name().to_string(),
            ghost_box: field.ghost_box(),
            geometry: *geometry,
            values: field.to_vec(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn to_patch(&self) -> Result<PatchData> {
        Ok(PatchData::from_values(self.ghost_box, self.values.clone())?)
    }
}

pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &FieldSnapshot) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    if let Some(bad) = snapshot.values.iter().find(|v| !v.is_finite()) {
        return Err(IoError::InvalidData(format!(
            "snapshot holds non-finite sample {bad}"
        )));
    }
    let bytes = serde_json::to_vec_pretty(snapshot)?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn load_snapshot(path: impl AsRef<Path>) -> Result<FieldSnapshot> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    let snapshot: FieldSnapshot = serde_json::from_slice(&bytes)?;
    if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
        return Err(IoError::InvalidData(format!(
            "unsupported snapshot schema version {}",
            snapshot.schema_version
        )));
    }
    if snapshot.precision != precision_name() {
        return Err(IoError::InvalidData(format!(
            "snapshot precision {} does not match build precision {}",
            snapshot.precision,
            precision_name()
        )));
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsm_patch::{Circle, ported::init_circle};

    fn sample_field() -> (PatchData, PatchGeometry) {
        let ghost = IndexBox2::new(-1, 4, -1, 2);
        let geometry = PatchGeometry::new([0.0, 0.0], [0.5, 0.5]).expect("geometry");
        let circle = Circle::new([1.0, 0.5], 0.75).expect("circle");
        let mut field = PatchData::new(ghost, 0.0).expect("patch");
        init_circle(&mut field, ghost, &geometry, &circle).expect("init");
        (field, geometry)
    }

    #[test]
    fn snapshot_preserves_field() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out").join("snapshot.json");
        let (field, geometry) = sample_field();

        let snapshot = FieldSnapshot::from_patch(&field, &geometry).with_metadata("job", "circle");
        save_snapshot(&path, &snapshot).expect("save should succeed");
        let loaded = load_snapshot(&path).expect("load should succeed");

        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.to_patch().expect("patch"), field);
        assert_eq!(loaded.metadata.get("job").map(String::as_str), Some("circle"));
    }

    #[test]
    fn load_snapshot_fails_for_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_snapshot(dir.path().join("missing.json")).expect_err("missing file");
        assert!(matches!(err, IoError::FileNotFound(_)));
    }

    #[test]
    fn load_snapshot_fails_for_invalid_payload() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "{invalid json").expect("write invalid payload");
        let err = load_snapshot(&path).expect_err("invalid JSON should fail");
        assert!(matches!(err, IoError::Json(_)));
    }

    #[test]
    fn load_snapshot_rejects_other_schema_version() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("v2.json");
        let (field, geometry) = sample_field();
        let mut snapshot = FieldSnapshot::from_patch(&field, &geometry);
        snapshot.schema_version = 2;
        save_snapshot(&path, &snapshot).expect("save");
        assert!(matches!(load_snapshot(&path), Err(IoError::InvalidData(_))));
    }

    #[test]
    fn save_snapshot_rejects_non_finite_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (field, geometry) = sample_field();
        let mut snapshot = FieldSnapshot::from_patch(&field, &geometry);
        snapshot.values[0] = Real::NAN;
        let err = save_snapshot(dir.path().join("nan.json"), &snapshot).expect_err("NaN");
        assert!(matches!(err, IoError::InvalidData(_)));
    }

    #[test]
    fn to_patch_checks_length() {
        let (field, geometry) = sample_field();
        let mut snapshot = FieldSnapshot::from_patch(&field, &geometry);
        snapshot.values.pop();
        assert!(matches!(snapshot.to_patch(), Err(IoError::Patch(_))));
    }
}
