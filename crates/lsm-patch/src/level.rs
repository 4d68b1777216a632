//! A single refinement level split into disjoint patches.
//!
//! Each patch owns its buffer, so per-patch kernels run in parallel with
//! Rayon without sharing mutable state. Interiors never overlap; ghost
//! layers are refreshed from neighbouring interiors by
//! [`PatchLevel::exchange_ghosts`].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{PatchError, Result};
use crate::geometry::PatchGeometry;
use crate::index_box::IndexBox2;
use crate::patch::PatchData;
use crate::ported::init_circle;
use crate::real::Real;
use crate::shape::Circle;

/// Which part of each patch a level-wide initialization writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRegion {
    /// Interior cells only; ghosts are left for [`PatchLevel::exchange_ghosts`].
    #[default]
    Interior,
    /// The whole ghost box, including ghosts outside the domain.
    GhostBox,
}

#[derive(Debug, Clone)]
pub struct Patch {
    pub id: usize,
    pub interior: IndexBox2,
    pub data: PatchData,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub min: Real,
    pub max: Real,
    pub cells: usize,
    /// Cells with a negative level-set value, i.e. inside the interface.
    pub negative_cells: usize,
}

impl FieldStats {
    pub fn from_values(values: impl IntoIterator<Item = Real>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| {
            let negative = usize::from(v < 0.0);
            Some(match acc {
                None => FieldStats {
                    min: v,
                    max: v,
                    cells: 1,
                    negative_cells: negative,
                },
                Some(s) => FieldStats {
                    min: s.min.min(v),
                    max: s.max.max(v),
                    cells: s.cells + 1,
                    negative_cells: s.negative_cells + negative,
                },
            })
        })
    }
}

#[derive(Debug, Clone)]
pub struct PatchLevel {
    domain: IndexBox2,
    geometry: PatchGeometry,
    ghost_width: i32,
    patches: Vec<Patch>,
}

impl PatchLevel {
    /// Tiles `domain` with patches of at most `max_patch_size` cells per side.
    /// Every patch buffer covers its interior grown by `ghost_width`.
    pub fn decompose(
        domain: IndexBox2,
        geometry: PatchGeometry,
        max_patch_size: i32,
        ghost_width: i32,
    ) -> Result<Self> {
        geometry.validate()?;
        if domain.is_empty() {
            return Err(PatchError::InvalidDecomposition(format!(
                "domain box {domain} is empty"
            )));
        }
        if max_patch_size < 1 {
            return Err(PatchError::InvalidDecomposition(format!(
                "max patch size must be at least 1, got {max_patch_size}"
            )));
        }
        if ghost_width < 0 {
            return Err(PatchError::InvalidDecomposition(format!(
                "ghost width must be non-negative, got {ghost_width}"
            )));
        }

        let mut patches = Vec::new();
        let mut jlo = domain.jlo;
        while jlo <= domain.jhi {
            let jhi = jlo.saturating_add(max_patch_size - 1).min(domain.jhi);
            let mut ilo = domain.ilo;
            while ilo <= domain.ihi {
                let ihi = ilo.saturating_add(max_patch_size - 1).min(domain.ihi);
                let interior = IndexBox2::new(ilo, ihi, jlo, jhi);
                let ghost_box = interior.grow(ghost_width).ok_or_else(|| {
                    PatchError::InvalidDecomposition(format!(
                        "ghost width {ghost_width} overflows the index range around {interior}"
                    ))
                })?;
                patches.push(Patch {
                    id: patches.len(),
                    interior,
                    data: PatchData::new(ghost_box, 0.0)?,
                });
                if ihi == domain.ihi {
                    break;
                }
                ilo = ihi + 1;
            }
            if jhi == domain.jhi {
                break;
            }
            jlo = jhi + 1;
        }

        info!(
            domain = %domain,
            patches = patches.len(),
            ghost_width,
            "decomposed domain"
        );
        Ok(Self {
            domain,
            geometry,
            ghost_width,
            patches,
        })
    }

    pub fn domain(&self) -> IndexBox2 {
        self.domain
    }

    pub fn geometry(&self) -> &PatchGeometry {
        &self.geometry
    }

    pub fn ghost_width(&self) -> i32 {
        self.ghost_width
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn patch_count(&self) -> usize {
        self.patches.len()
    }

    /// Runs the circle kernel on every patch in parallel.
    pub fn init_circle(&mut self, circle: &Circle, region: FillRegion) -> Result<()> {
        let geometry = self.geometry;
        self.patches.par_iter_mut().try_for_each(|patch| {
            let fill_box = match region {
                FillRegion::Interior => patch.interior,
                FillRegion::GhostBox => patch.data.ghost_box(),
            };
            init_circle(&mut patch.data, fill_box, &geometry, circle).inspect_err(|err| {
                warn!(
                    patch = patch.id,
                    fill = %fill_box,
                    error = %err,
                    "circle initialization failed"
                );
            })
        })?;
        debug!(
            patches = self.patches.len(),
            ?region,
            radius = circle.radius(),
            "initialized level to circle"
        );
        Ok(())
    }

    /// Copies neighbour interior values into every overlapping ghost cell.
    /// Returns the number of cells copied.
    pub fn exchange_ghosts(&mut self) -> Result<usize> {
        let mut transfers = Vec::new();
        for (dst, target) in self.patches.iter().enumerate() {
            let ghost = target.data.ghost_box();
            for (src, source) in self.patches.iter().enumerate() {
                if src == dst {
                    continue;
                }
                if let Some(region) = ghost.intersect(source.interior) {
                    transfers.push((dst, src, region));
                }
            }
        }

        let mut copied = 0usize;
        for (dst, src, region) in transfers {
            let (target, source) = if dst < src {
                let (head, tail) = self.patches.split_at_mut(src);
                (&mut head[dst], &tail[0])
            } else {
                let (head, tail) = self.patches.split_at_mut(dst);
                (&mut tail[0], &head[src])
            };
            target.data.copy_region_from(&source.data, region)?;
            copied += region.num_cells();
        }
        debug!(copied, "exchanged ghost cells");
        Ok(copied)
    }

    /// Assembles all patch interiors into one buffer over the domain box.
    pub fn gather(&self) -> Result<PatchData> {
        let mut out = PatchData::new(self.domain, 0.0)?;
        for patch in &self.patches {
            out.copy_region_from(&patch.data, patch.interior)?;
        }
        Ok(out)
    }

    /// Statistics over patch interiors.
    pub fn stats(&self) -> Option<FieldStats> {
        FieldStats::from_values(
            self.patches
                .iter()
                .flat_map(|patch| patch.data.values_in(patch.interior)),
        )
    }
}
