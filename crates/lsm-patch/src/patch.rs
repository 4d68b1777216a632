//! Patch-local sample storage.

use nalgebra::DMatrix;

use crate::error::{PatchError, Result};
use crate::index_box::IndexBox2;
use crate::real::Real;

/// Samples of a scalar field over a ghost box.
///
/// Storage is a column-major matrix with one row per `i` index and one
/// column per `j` index, which is the memory order of a Fortran
/// `level_set(ilo_gb:ihi_gb, jlo_gb:jhi_gb)` array.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchData {
    ghost_box: IndexBox2,
    values: DMatrix<Real>,
}

impl PatchData {
    pub fn new(ghost_box: IndexBox2, fill_value: Real) -> Result<Self> {
        check_ghost_box(ghost_box)?;
        Ok(Self {
            ghost_box,
            values: DMatrix::from_element(ghost_box.extent_i(), ghost_box.extent_j(), fill_value),
        })
    }

    /// Wraps a flat buffer laid out in Fortran order.
    pub fn from_values(ghost_box: IndexBox2, values: Vec<Real>) -> Result<Self> {
        let expected = check_ghost_box(ghost_box)?;
        if values.len() != expected {
            return Err(PatchError::BufferLengthMismatch {
                ghost: ghost_box,
                expected,
                got: values.len(),
            });
        }
        Ok(Self {
            ghost_box,
            values: DMatrix::from_vec(ghost_box.extent_i(), ghost_box.extent_j(), values),
        })
    }

    #[inline]
    pub fn ghost_box(&self) -> IndexBox2 {
        self.ghost_box
    }

    #[inline]
    fn local(&self, i: i32, j: i32) -> Option<(usize, usize)> {
        if self.ghost_box.contains(i, j) {
            Some((
                (i64::from(i) - i64::from(self.ghost_box.ilo)) as usize,
                (i64::from(j) - i64::from(self.ghost_box.jlo)) as usize,
            ))
        } else {
            None
        }
    }

    pub fn get(&self, i: i32, j: i32) -> Option<Real> {
        self.local(i, j).map(|idx| self.values[idx])
    }

    pub fn get_mut(&mut self, i: i32, j: i32) -> Option<&mut Real> {
        self.local(i, j).map(move |idx| &mut self.values[idx])
    }

    pub fn as_slice(&self) -> &[Real] {
        self.values.as_slice()
    }

    pub fn to_vec(&self) -> Vec<Real> {
        self.values.as_slice().to_vec()
    }

    /// Values over `region` in Fortran order. Cells outside the ghost box
    /// are skipped.
    pub fn values_in(&self, region: IndexBox2) -> impl Iterator<Item = Real> + '_ {
        region.cells().filter_map(move |(i, j)| self.get(i, j))
    }

    /// Copies `region` from `source` into this patch.
    pub fn copy_region_from(&mut self, source: &PatchData, region: IndexBox2) -> Result<()> {
        for patch in [self.ghost_box, source.ghost_box] {
            if !patch.contains_box(region) {
                return Err(PatchError::RegionOutsidePatch { region, patch });
            }
        }
        for (i, j) in region.cells() {
            if let (Some(dst), Some(src)) = (self.local(i, j), source.local(i, j)) {
                self.values[dst] = source.values[src];
            }
        }
        Ok(())
    }
}

/// Cell count of a non-empty, addressable ghost box.
pub(crate) fn check_ghost_box(ghost_box: IndexBox2) -> Result<usize> {
    if ghost_box.is_empty() {
        return Err(PatchError::EmptyGhostBox(ghost_box));
    }
    ghost_box
        .checked_num_cells()
        .ok_or(PatchError::BoxTooLarge(ghost_box))
}
