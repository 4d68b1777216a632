//! Patch-level building blocks for 2D level-set examples.
//!
//! This crate provides:
//! - inclusive [`IndexBox2`] boxes for ghost and fill regions
//! - [`PatchGeometry`] mapping grid indices to physical coordinates
//! - [`PatchData`] storage in Fortran memory order
//! - ported patch routines under [`ported`] (signed-distance initialization)
//! - [`PatchLevel`] domain decomposition with parallel per-patch kernels
//!
//! The scalar type is [`Real`], fixed per build by the `single-precision`
//! feature.

pub mod error;
pub mod geometry;
pub mod index_box;
pub mod level;
pub mod patch;
pub mod ported;
pub mod real;
pub mod shape;

pub use error::{PatchError, Result};
pub use geometry::{Centering, PatchGeometry};
pub use index_box::IndexBox2;
pub use level::{FieldStats, FillRegion, Patch, PatchLevel};
pub use patch::PatchData;
pub use ported::{PORTED_ROUTINES, is_ported};
pub use real::{REAL_BYTES, Real, precision_name};
pub use shape::{Circle, SignedDistance};
