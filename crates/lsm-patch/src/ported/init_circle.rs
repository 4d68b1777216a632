//! Rust port of the `INIT_CIRCLE` patch routine (`initcircle_`).
//!
//! Fills the fill box of a 2D level-set patch with the signed distance to a
//! circle: negative inside, zero on the circle, positive outside. Samples are
//! taken at cell centres, `x = x_lower + (i + 0.5) * dx`, unless the geometry
//! selects node centring.
//!
//! Cells of the ghost box that are outside the fill box are never written.

use crate::error::{PatchError, Result};
use crate::geometry::PatchGeometry;
use crate::index_box::IndexBox2;
use crate::patch::{PatchData, check_ghost_box};
use crate::real::Real;
use crate::shape::{Circle, SignedDistance};

/// Writes `shape.signed_distance` for every cell of `fill_box`.
///
/// An empty fill box is a no-op.
pub fn fill_signed_distance<S: SignedDistance>(
    level_set: &mut PatchData,
    fill_box: IndexBox2,
    geometry: &PatchGeometry,
    shape: &S,
) -> Result<()> {
    geometry.validate()?;
    if fill_box.is_empty() {
        return Ok(());
    }
    let ghost = level_set.ghost_box();
    if !ghost.contains_box(fill_box) {
        return Err(PatchError::FillBoxOutsideGhostBox {
            fill: fill_box,
            ghost,
        });
    }

    for (i, j) in fill_box.cells() {
        let x = geometry.coordinate(i, j);
        if let Some(value) = level_set.get_mut(i, j) {
            *value = shape.signed_distance(&x);
        }
    }
    Ok(())
}

/// Initializes `fill_box` of `level_set` to the signed distance from `circle`.
///
/// # Examples
///
/// ```
/// use lsm_patch::{Circle, IndexBox2, PatchData, PatchGeometry, ported::init_circle};
///
/// let ghost = IndexBox2::new(-1, 4, -1, 4);
/// let mut phi = PatchData::new(ghost, 0.0)?;
/// let geometry = PatchGeometry::new([0.0, 0.0], [0.25, 0.25])?;
/// let circle = Circle::new([0.5, 0.5], 0.25)?;
///
/// init_circle(&mut phi, IndexBox2::new(0, 3, 0, 3), &geometry, &circle)?;
/// // cell (1, 1) is centred at (0.375, 0.375), inside the circle
/// assert!(phi.get(1, 1).unwrap() < 0.0);
/// // ghost cells are untouched
/// assert_eq!(phi.get(-1, -1), Some(0.0));
/// # Ok::<(), lsm_patch::PatchError>(())
/// ```
pub fn init_circle(
    level_set: &mut PatchData,
    fill_box: IndexBox2,
    geometry: &PatchGeometry,
    circle: &Circle,
) -> Result<()> {
    fill_signed_distance(level_set, fill_box, geometry, circle)
}

/// Flat-buffer form with the legacy argument layout.
///
/// `level_set` is the whole ghost box in Fortran order (`i` fastest). Unlike
/// the legacy routine every precondition is checked and reported instead of
/// being left undefined. The radius only has to be finite: a negative radius
/// still writes `|x - center| - radius`.
pub fn init_circle_raw(
    level_set: &mut [Real],
    ghost_box: IndexBox2,
    fill_box: IndexBox2,
    x_lower: [Real; 2],
    dx: [Real; 2],
    center: [Real; 2],
    radius: Real,
) -> Result<()> {
    let expected = check_ghost_box(ghost_box)?;
    if level_set.len() != expected {
        return Err(PatchError::BufferLengthMismatch {
            ghost: ghost_box,
            expected,
            got: level_set.len(),
        });
    }
    if !ghost_box.contains_box(fill_box) {
        return Err(PatchError::FillBoxOutsideGhostBox {
            fill: fill_box,
            ghost: ghost_box,
        });
    }
    let geometry = PatchGeometry::new(x_lower, dx)?;
    let circle = Circle::with_signed_radius(center, radius)?;

    let nx = ghost_box.extent_i();
    for (i, j) in fill_box.cells() {
        let di = (i64::from(i) - i64::from(ghost_box.ilo)) as usize;
        let dj = (i64::from(j) - i64::from(ghost_box.jlo)) as usize;
        let offset = di + dj * nx;
        level_set[offset] = circle.signed_distance(&geometry.coordinate(i, j));
    }
    Ok(())
}
