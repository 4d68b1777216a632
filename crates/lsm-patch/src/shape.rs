//! Reference shapes whose signed distance seeds a level-set field.

use nalgebra::{Point2, Vector2};

use crate::error::{PatchError, Result};
use crate::real::Real;

/// Signed distance to a closed boundary: negative inside, zero on the
/// boundary, positive outside.
pub trait SignedDistance: Sync {
    fn signed_distance(&self, point: &Point2<Real>) -> Real;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point2<Real>,
    radius: Real,
}

impl Circle {
    /// A zero radius is allowed and yields the plain distance to `center`.
    /// A negative radius is rejected.
    pub fn new(center: [Real; 2], radius: Real) -> Result<Self> {
        if radius < 0.0 {
            return Err(PatchError::InvalidRadius { radius });
        }
        Self::with_signed_radius(center, radius)
    }

    /// Accepts any finite radius, negative included, and evaluates
    /// `|p - center| - radius` as written. The legacy flat-buffer entry
    /// points use this form.
    pub fn with_signed_radius(center: [Real; 2], radius: Real) -> Result<Self> {
        if !center[0].is_finite() || !center[1].is_finite() {
            return Err(PatchError::NonFiniteCenter { center });
        }
        if !radius.is_finite() {
            return Err(PatchError::InvalidRadius { radius });
        }
        Ok(Self {
            center: Point2::new(center[0], center[1]),
            radius,
        })
    }

    #[inline]
    pub fn center(&self) -> Point2<Real> {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }

    pub fn translated(&self, offset: Vector2<Real>) -> Self {
        Self {
            center: self.center + offset,
            radius: self.radius,
        }
    }
}

impl SignedDistance for Circle {
    #[inline]
    fn signed_distance(&self, point: &Point2<Real>) -> Real {
        (point - self.center).norm() - self.radius
    }
}
