//! VTK writer for ParaView visualization
//!
//! Writes a patch field as a legacy ASCII `STRUCTURED_POINTS` dataset. One
//! point per sample, placed at the sample's physical coordinate, so the zero
//! contour of the level set can be extracted directly in ParaView.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lsm_io::VtkWriter;
//! use lsm_patch::{IndexBox2, PatchData, PatchGeometry};
//!
//! let field = PatchData::new(IndexBox2::new(0, 63, 0, 63), 0.0)?;
//! let geometry = PatchGeometry::new([-1.0, -1.0], [1.0 / 32.0, 1.0 / 32.0])?;
//! VtkWriter::new(&field, &geometry).write_vtk("phi.vtk")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use lsm_patch::{PatchData, PatchGeometry, REAL_BYTES};

/// VTK writer for one patch field
pub struct VtkWriter<'a> {
    field: &'a PatchData,
    geometry: &'a PatchGeometry,
    scalar_name: &'a str,
}

impl<'a> VtkWriter<'a> {
    pub fn new(field: &'a PatchData, geometry: &'a PatchGeometry) -> Self {
        Self {
            field,
            geometry,
            scalar_name: "level_set",
        }
    }

    /// Name of the point-data array (no whitespace).
    pub fn with_scalar_name(mut self, name: &'a str) -> Self {
        self.scalar_name = name;
        self
    }

    /// Write VTK legacy format file
    pub fn write_vtk<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_header(out)?;
        self.write_lattice(out)?;
        self.write_point_data(out)?;
        Ok(())
    }

    fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "# vtk DataFile Version 3.0")?;
        writeln!(out, "Level set field over {}", self.field.ghost_box())?;
        writeln!(out, "ASCII")?;
        writeln!(out, "DATASET STRUCTURED_POINTS")?;
        Ok(())
    }

    fn write_lattice<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let ghost = self.field.ghost_box();
        let origin = self.geometry.coordinate(ghost.ilo, ghost.jlo);
        writeln!(
            out,
            "DIMENSIONS {} {} 1",
            ghost.extent_i(),
            ghost.extent_j()
        )?;
        writeln!(out, "ORIGIN {} {} 0", origin.x, origin.y)?;
        writeln!(
            out,
            "SPACING {} {} 1",
            self.geometry.dx[0], self.geometry.dx[1]
        )?;
        Ok(())
    }

    // VTK point order is x fastest, the same as the Fortran order of the
    // patch buffer.
    fn write_point_data<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let values = self.field.as_slice();
        let data_type = if REAL_BYTES == 4 { "float" } else { "double" };
        writeln!(out, "POINT_DATA {}", values.len())?;
        writeln!(out, "SCALARS {} {} 1", self.scalar_name, data_type)?;
        writeln!(out, "LOOKUP_TABLE default")?;
        for value in values {
            writeln!(out, "{value}")?;
        }
        Ok(())
    }
}
