//! Error types for lsm-patch

use thiserror::Error;

use crate::index_box::IndexBox2;
use crate::real::Real;

pub type Result<T> = std::result::Result<T, PatchError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatchError {
    #[error("grid spacing must be positive and finite, got {dx:?}")]
    InvalidSpacing { dx: [Real; 2] },

    #[error("grid origin must be finite, got {x_lower:?}")]
    NonFiniteOrigin { x_lower: [Real; 2] },

    #[error("invalid circle radius {radius}")]
    InvalidRadius { radius: Real },

    #[error("circle center must be finite, got {center:?}")]
    NonFiniteCenter { center: [Real; 2] },

    #[error("ghost box {0} is empty")]
    EmptyGhostBox(IndexBox2),

    #[error("box {0} has too many cells to address")]
    BoxTooLarge(IndexBox2),

    #[error("fill box {fill} is not contained in ghost box {ghost}")]
    FillBoxOutsideGhostBox { fill: IndexBox2, ghost: IndexBox2 },

    #[error("region {region} lies outside patch box {patch}")]
    RegionOutsidePatch { region: IndexBox2, patch: IndexBox2 },

    #[error("buffer holds {got} samples but ghost box {ghost} needs {expected}")]
    BufferLengthMismatch {
        ghost: IndexBox2,
        expected: usize,
        got: usize,
    },

    #[error("invalid decomposition: {0}")]
    InvalidDecomposition(String),
}
