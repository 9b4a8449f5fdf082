//! Central arena that owns the geometric entities produced by the
//! pipeline.
//!
//! Operations reference entities via typed IDs (generational indices),
//! keeping the geometry itself value-like and immutable once inserted.

use slotmap::SlotMap;

use crate::error::GeometryError;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a planar face in the geometry store.
    pub struct FaceId;
}

slotmap::new_key_type! {
    /// Unique identifier for a revolved solid in the geometry store.
    pub struct SolidId;
}

/// A bounded planar polygon region in the poloidal plane.
///
/// Coordinates are (distance from the main axis, height along it).
#[derive(Debug, Clone)]
pub struct PlanarFace {
    /// Closed boundary polygon, counter-clockwise.
    pub points: Vec<Point2>,
}

impl PlanarFace {
    /// Creates a face, normalizing the boundary to counter-clockwise winding.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self {
            points: crate::math::polygon_2d::ensure_ccw(points),
        }
    }
}

/// A solid of revolution: a planar face swept about the main (Z) axis
/// over `[start_deg, end_deg]`.
///
/// The solid stays parametric until tessellated for export, so one solid
/// can be meshed at several tolerance presets.
#[derive(Debug, Clone)]
pub struct RevolvedSolid {
    /// Profile polygon in the poloidal plane, counter-clockwise.
    pub profile: Vec<Point2>,
    /// Sweep start angle about the main axis, degrees.
    pub start_deg: f64,
    /// Sweep end angle about the main axis, degrees.
    pub end_deg: f64,
    /// Index of the station this solid was generated for, when any.
    pub station: Option<usize>,
}

impl RevolvedSolid {
    /// Swept angle in degrees.
    #[must_use]
    pub fn sweep_deg(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    /// True when the sweep covers the full turn (caps are not needed).
    #[must_use]
    pub fn is_full_turn(&self) -> bool {
        (self.sweep_deg() - 360.0).abs() < 1e-9
    }
}

/// Arena owning all faces and solids created during a run.
#[derive(Debug, Default)]
pub struct GeometryStore {
    faces: SlotMap<FaceId, PlanarFace>,
    solids: SlotMap<SolidId, RevolvedSolid>,
}

impl GeometryStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, face: PlanarFace) -> FaceId {
        self.faces.insert(face)
    }

    /// Returns the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&PlanarFace, GeometryError> {
        self.faces
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("face".into()))
    }

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, solid: RevolvedSolid) -> SolidId {
        self.solids.insert(solid)
    }

    /// Returns the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid(&self, id: SolidId) -> Result<&RevolvedSolid, GeometryError> {
        self.solids
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("solid".into()))
    }
}
