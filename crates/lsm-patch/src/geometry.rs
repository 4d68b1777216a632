//! Affine map from integer grid indices to physical coordinates.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::{PatchError, Result};
use crate::real::Real;

/// Where a sample sits inside its grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Centering {
    /// Sample at the cell centre: `x = x_lower + (i + 0.5) * dx`.
    #[default]
    Cell,
    /// Sample at the lower cell corner: `x = x_lower + i * dx`.
    Node,
}

impl Centering {
    #[inline]
    pub fn offset(self) -> Real {
        match self {
            Centering::Cell => 0.5,
            Centering::Node => 0.0,
        }
    }
}

/// Physical placement of a structured grid.
///
/// `x_lower` is the coordinate of the lower face of index 0 in each
/// dimension, so every patch of a level shares the same geometry and indices
/// are global.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchGeometry {
    pub x_lower: [Real; 2],
    pub dx: [Real; 2],
    #[serde(default)]
    pub centering: Centering,
}

impl PatchGeometry {
    /// Cell-centred geometry.
    pub fn new(x_lower: [Real; 2], dx: [Real; 2]) -> Result<Self> {
        Self::with_centering(x_lower, dx, Centering::Cell)
    }

    pub fn with_centering(x_lower: [Real; 2], dx: [Real; 2], centering: Centering) -> Result<Self> {
        let geometry = Self {
            x_lower,
            dx,
            centering,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Checks spacing and origin. Geometries built through serde skip
    /// [`PatchGeometry::new`], so kernels call this before use.
    pub fn validate(&self) -> Result<()> {
        if self.dx.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(PatchError::InvalidSpacing { dx: self.dx });
        }
        if self.x_lower.iter().any(|x| !x.is_finite()) {
            return Err(PatchError::NonFiniteOrigin {
                x_lower: self.x_lower,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn coordinate(&self, i: i32, j: i32) -> Point2<Real> {
        let offset = self.centering.offset();
        Point2::new(
            self.x_lower[0] + (i as Real + offset) * self.dx[0],
            self.x_lower[1] + (j as Real + offset) * self.dx[1],
        )
    }

    pub fn translated(&self, offset: Vector2<Real>) -> Self {
        Self {
            x_lower: [self.x_lower[0] + offset.x, self.x_lower[1] + offset.y],
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: Real = 64.0 * Real::EPSILON;

    #[test]
    fn cell_centred_coordinates_use_half_offset() {
        let g = PatchGeometry::new([0.0, -1.0], [0.1, 0.2]).expect("valid geometry");
        let p = g.coordinate(0, 0);
        assert!((p.x - 0.05).abs() < TOL);
        assert!((p.y + 0.9).abs() < TOL);

        let q = g.coordinate(9, 4);
        assert!((q.x - 0.95).abs() < TOL);
        assert!((q.y - (-1.0 + 4.5 * 0.2)).abs() < TOL);
    }

    #[test]
    fn node_centred_coordinates_have_no_offset() {
        let g = PatchGeometry::with_centering([1.0, 2.0], [0.5, 0.25], Centering::Node)
            .expect("valid geometry");
        let p = g.coordinate(2, -4);
        assert!((p.x - 2.0).abs() < TOL);
        assert!((p.y - 1.0).abs() < TOL);
    }

    #[test]
    fn rejects_non_positive_spacing() {
        let err = PatchGeometry::new([0.0, 0.0], [0.1, 0.0]).expect_err("dx = 0 should fail");
        assert_eq!(err, PatchError::InvalidSpacing { dx: [0.1, 0.0] });

        assert!(PatchGeometry::new([0.0, 0.0], [-0.1, 1.0]).is_err());
        assert!(PatchGeometry::new([0.0, 0.0], [Real::NAN, 1.0]).is_err());
    }

    #[test]
    fn rejects_non_finite_origin() {
        let err = PatchGeometry::new([Real::INFINITY, 0.0], [1.0, 1.0])
            .expect_err("infinite origin should fail");
        assert!(matches!(err, PatchError::NonFiniteOrigin { .. }));
    }

    #[test]
    fn centering_defaults_to_cell_when_deserialized() {
        let g: PatchGeometry =
            serde_json::from_str(r#"{"x_lower":[0.0,0.0],"dx":[1.0,1.0]}"#).expect("parse");
        assert_eq!(g.centering, Centering::Cell);
    }
}
