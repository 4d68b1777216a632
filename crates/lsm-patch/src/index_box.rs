//! Inclusive integer index boxes for 2D patches.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Rectangle in `(i, j)` index space with inclusive bounds on both ends:
/// `[ilo, ihi] x [jlo, jhi]`.
///
/// A box with `ihi < ilo` or `jhi < jlo` is empty and covers no cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexBox2 {
    pub ilo: i32,
    pub ihi: i32,
    pub jlo: i32,
    pub jhi: i32,
}

impl IndexBox2 {
    #[inline]
    pub fn new(ilo: i32, ihi: i32, jlo: i32, jhi: i32) -> Self {
        Self { ilo, ihi, jlo, jhi }
    }

    /// Builds a box from bounds ordered `[ilo, ihi, jlo, jhi]`.
    #[inline]
    pub fn from_bounds(bounds: [i32; 4]) -> Self {
        Self::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.ihi < self.ilo || self.jhi < self.jlo
    }

    #[inline]
    pub fn extent_i(self) -> usize {
        if self.is_empty() {
            0
        } else {
            (i64::from(self.ihi) - i64::from(self.ilo) + 1) as usize
        }
    }

    #[inline]
    pub fn extent_j(self) -> usize {
        if self.is_empty() {
            0
        } else {
            (i64::from(self.jhi) - i64::from(self.jlo) + 1) as usize
        }
    }

    /// Number of cells, saturating at `usize::MAX`.
    #[inline]
    pub fn num_cells(self) -> usize {
        self.checked_num_cells().unwrap_or(usize::MAX)
    }

    /// Number of cells, or `None` when no buffer over the box could be
    /// addressed (more than `isize::MAX` cells).
    pub fn checked_num_cells(self) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        let ni = i64::from(self.ihi) - i64::from(self.ilo) + 1;
        let nj = i64::from(self.jhi) - i64::from(self.jlo) + 1;
        let cells = isize::try_from(ni.checked_mul(nj)?).ok()?;
        usize::try_from(cells).ok()
    }

    #[inline]
    pub fn contains(self, i: i32, j: i32) -> bool {
        i >= self.ilo && i <= self.ihi && j >= self.jlo && j <= self.jhi
    }

    /// Returns true if every cell of `other` lies inside this box.
    /// An empty `other` is trivially contained.
    pub fn contains_box(self, other: IndexBox2) -> bool {
        other.is_empty()
            || (other.ilo >= self.ilo
                && other.ihi <= self.ihi
                && other.jlo >= self.jlo
                && other.jhi <= self.jhi)
    }

    /// Intersection of two boxes, `None` when they share no cell.
    pub fn intersect(self, other: IndexBox2) -> Option<IndexBox2> {
        let out = IndexBox2::new(
            self.ilo.max(other.ilo),
            self.ihi.min(other.ihi),
            self.jlo.max(other.jlo),
            self.jhi.min(other.jhi),
        );
        if out.is_empty() { None } else { Some(out) }
    }

    /// Grows the box by `width` cells on every side, `None` if a bound
    /// leaves the `i32` range.
    pub fn grow(self, width: i32) -> Option<IndexBox2> {
        Some(IndexBox2::new(
            self.ilo.checked_sub(width)?,
            self.ihi.checked_add(width)?,
            self.jlo.checked_sub(width)?,
            self.jhi.checked_add(width)?,
        ))
    }

    /// Iterates cells in Fortran order: `i` varies fastest.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        let (ilo, ihi) = (self.ilo, self.ihi);
        (self.jlo..=self.jhi).flat_map(move |j| (ilo..=ihi).map(move |i| (i, j)))
    }
}

impl Display for IndexBox2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}..{}]x[{}..{}]",
            self.ilo, self.ihi, self.jlo, self.jhi
        )
    }
}
