//! Mesh file emission for generated segments.
//!
//! The output directory is reset (deleted and recreated) as one step
//! before any file is written; the fixed combined-assembly names are
//! overwritten on every run.

pub mod stl;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ExportError, Result};
use crate::store::{GeometryStore, SolidId};
use crate::tessellation::{TessellateSolid, TessellationParams, TriangleMesh};

/// A named tolerance pair for a combined-assembly export.
#[derive(Debug, Clone, Copy)]
pub struct ExportPreset {
    pub file_name: &'static str,
    pub tolerance: f64,
    pub angular_tolerance: f64,
}

/// Tolerance pair used for the individual per-segment meshes.
pub const SEGMENT_TOLERANCES: (f64, f64) = (5.0, 1.0);

/// Fixed combined-assembly exports, coarsest to finest.
pub const COMBINED_PRESETS: [ExportPreset; 4] = [
    ExportPreset {
        file_name: "combined_blanket_51.stl",
        tolerance: 5.0,
        angular_tolerance: 1.0,
    },
    ExportPreset {
        file_name: "combined_blanket_lowpoly.stl",
        tolerance: 5.0,
        angular_tolerance: 1.0,
    },
    ExportPreset {
        file_name: "combined_blanket_normal.stl",
        tolerance: 2.5,
        angular_tolerance: 0.5,
    },
    ExportPreset {
        file_name: "combined_blanket_fine.stl",
        tolerance: 1.0,
        angular_tolerance: 0.1,
    },
];

/// Deletes the output directory if present and recreates it empty.
///
/// # Errors
///
/// Returns [`ExportError::DirectoryReset`] if the directory cannot be
/// removed or created.
pub fn reset_output_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|source| ExportError::DirectoryReset {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::create_dir_all(path).map_err(|source| ExportError::DirectoryReset {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Writes segment and combined meshes for a set of solids.
pub struct Exporter<'a> {
    store: &'a GeometryStore,
    out_dir: PathBuf,
}

impl<'a> Exporter<'a> {
    #[must_use]
    pub fn new(store: &'a GeometryStore, out_dir: &Path) -> Self {
        Self {
            store,
            out_dir: out_dir.to_path_buf(),
        }
    }

    /// Exports each solid as `BLKT_{i}.stl` (1-based) in iteration order.
    ///
    /// # Errors
    ///
    /// Stops and returns the first tessellation or I/O error; no further
    /// files are written after a failure.
    pub fn export_segments(&self, solids: &[SolidId]) -> Result<()> {
        let (tolerance, angular) = SEGMENT_TOLERANCES;
        let params = TessellationParams::from_tolerances(tolerance, angular);
        for (i, &solid) in solids.iter().enumerate() {
            let mesh = TessellateSolid::new(solid, params).execute(self.store)?;
            let path = self.out_dir.join(format!("BLKT_{}.stl", i + 1));
            self.write_mesh(&mesh, &path)?;
        }
        info!(count = solids.len(), dir = %self.out_dir.display(), "exported segment meshes");
        Ok(())
    }

    /// Merges all solids in index order and writes the four fixed-name
    /// combined files, coarsest to finest.
    ///
    /// # Errors
    ///
    /// Stops at the first tessellation or I/O error.
    pub fn export_combined(&self, solids: &[SolidId]) -> Result<()> {
        for preset in COMBINED_PRESETS {
            let params =
                TessellationParams::from_tolerances(preset.tolerance, preset.angular_tolerance);
            let mut combined = TriangleMesh::default();
            for &solid in solids {
                let mesh = TessellateSolid::new(solid, params).execute(self.store)?;
                combined.merge(&mesh);
            }
            let path = self.out_dir.join(preset.file_name);
            self.write_mesh(&combined, &path)?;
            info!(file = preset.file_name, triangles = combined.triangle_count(), "exported combined mesh");
        }
        Ok(())
    }

    fn write_mesh(&self, mesh: &TriangleMesh, path: &Path) -> Result<()> {
        let mut file = fs::File::create(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        stl::write_stl(mesh, &mut file).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}
