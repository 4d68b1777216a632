//! I/O support for level-set patch runs.
//!
//! This crate provides:
//! - **Run configuration** loaded from JSON
//! - **Field snapshots** persisted as JSON and reloaded into patch data
//! - **VTK export** (legacy ASCII structured points) for ParaView
//! - **STA run reports** with field statistics

pub mod config;
mod error;
mod report;
mod snapshot;
pub mod vtk_writer;

pub use config::{CircleConfig, OutputOptions, RunConfig, load_config};
pub use error::{IoError, Result};
pub use report::{OutputBundle, RunReport, RunStatus, write_output_bundle, write_sta};
pub use snapshot::{FieldSnapshot, SNAPSHOT_SCHEMA_VERSION, load_snapshot, save_snapshot};
pub use vtk_writer::VtkWriter;
