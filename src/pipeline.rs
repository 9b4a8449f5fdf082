//! The one-shot blanket generation pipeline:
//! load -> assemble cross-section -> per-station cut -> revolve -> export.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::export::{reset_output_dir, Exporter};
use crate::input;
use crate::operations::{clearance_angle_deg, CutWindow, Revolve, CLEARANCE, CURVATURE_DAMPING, WINDOW_THICKNESS};
use crate::section::{CrossSection, StationSet};
use crate::store::{GeometryStore, PlanarFace, SolidId};

/// Input locations and tunables for one generation run.
#[derive(Debug, Clone)]
pub struct BlanketConfig {
    pub inner_path: PathBuf,
    pub outer_path: PathBuf,
    pub normals_path: PathBuf,
    pub coordinates_path: PathBuf,
    pub output_dir: PathBuf,
    /// Cutting window extent along the normal, meters.
    pub thickness: f64,
    /// Curvature damping strength.
    pub alpha: f64,
    /// Linear clearance between adjacent segments, meters.
    pub clearance: f64,
}

impl BlanketConfig {
    /// Builds a config from a torus description directory using the
    /// conventional file names; meshes go to a `Mesh` subdirectory.
    #[must_use]
    pub fn from_torus_dir(torus_dir: &Path) -> Self {
        Self {
            inner_path: torus_dir.join("inner_unity.txt"),
            outer_path: torus_dir.join("outer_unity.txt"),
            normals_path: torus_dir.join("normals_unity.txt"),
            coordinates_path: torus_dir.join("blanket_toroidal_coordinates.txt"),
            output_dir: torus_dir.join("Mesh"),
            thickness: WINDOW_THICKNESS,
            alpha: CURVATURE_DAMPING,
            clearance: CLEARANCE,
        }
    }
}

/// Everything produced by a generation run, prior to export.
#[derive(Debug)]
pub struct BlanketAssembly {
    /// Owner of all faces and solids created during the run.
    pub store: GeometryStore,
    /// One solid per station, in station order.
    pub segments: Vec<SolidId>,
}

/// Runs the geometry stages of the pipeline: loading, cross-section
/// assembly, per-station cutting and revolution.
///
/// # Errors
///
/// Any input or geometry error aborts the run; there is no partial
/// recovery.
pub fn generate_blankets(config: &BlanketConfig) -> Result<BlanketAssembly> {
    let inner = input::read_boundary_points(&config.inner_path)?;
    let outer = input::read_boundary_points(&config.outer_path)?;
    let normals = input::read_normals(&config.normals_path)?;
    let coordinates = input::read_toroidal_coordinates(&config.coordinates_path)?;

    let stations = StationSet::from_parts(&normals, &coordinates)?;
    let section = CrossSection::assemble(&inner, &outer);
    let spacing = section.average_spacing(stations.len());
    info!(
        stations = stations.len(),
        profile_points = section.points().len(),
        spacing,
        "assembled cross-section"
    );

    let mut store = GeometryStore::new();
    let mut segments = Vec::with_capacity(stations.len());
    for i in 0..stations.len() {
        let face = CutWindow::new(i, spacing)
            .with_thickness(config.thickness)
            .with_damping(config.alpha)
            .with_clearance(config.clearance)
            .execute(&stations, &section, &mut store)?;

        let station = stations.get(i);
        let radius = station.origin.x.abs();
        let delta_theta = clearance_angle_deg(radius, config.clearance);
        let sweep = station.revolve_deg - 2.0 * delta_theta;
        debug!(station = i, radius, sweep, "revolving segment");

        let solid = Revolve::new(face, station.toroidal_deg, sweep)
            .for_station(i)
            .execute(&mut store)?;
        segments.push(solid);
    }

    Ok(BlanketAssembly { store, segments })
}

/// Resets the output directory and writes per-segment and combined
/// meshes.
///
/// # Errors
///
/// The first export failure aborts the remaining exports.
pub fn export_assembly(assembly: &BlanketAssembly, output_dir: &Path) -> Result<()> {
    reset_output_dir(output_dir)?;
    let exporter = Exporter::new(&assembly.store, output_dir);
    exporter.export_segments(&assembly.segments)?;
    exporter.export_combined(&assembly.segments)?;
    Ok(())
}

/// Full batch run: generate all segments, then export them.
///
/// # Errors
///
/// Propagates the first input, geometry or export error.
pub fn run(config: &BlanketConfig) -> Result<BlanketAssembly> {
    let assembly = generate_blankets(config)?;
    export_assembly(&assembly, &config.output_dir)?;
    Ok(assembly)
}

/// Revolves the closed profile from a torus parameter file a full turn
/// into one plain torus solid.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the profile is
/// degenerate.
pub fn generate_torus_solid(
    parameter_path: &Path,
    store: &mut GeometryStore,
) -> Result<SolidId> {
    let points = input::read_torus_parameters(parameter_path)?;
    let face = store.add_face(PlanarFace::new(points));
    Revolve::full_turn(face).execute(store)
}
