mod revolved;

pub use revolved::TessellateSolid;

use crate::math::{Point3, Vector3};

/// Parameters controlling tessellation quality.
///
/// `tolerance` bounds the chord deviation from the true surface of
/// revolution, `angular_tolerance` caps the angular step directly
/// (radians). The export presets map onto these two knobs.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Maximum allowed deviation from the true geometry.
    pub tolerance: f64,
    /// Maximum angular step of the sweep, radians.
    pub angular_tolerance: f64,
    /// Minimum number of sweep segments.
    pub min_segments: usize,
    /// Maximum number of sweep segments.
    pub max_segments: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        // The per-segment export pair used by the batch pipeline.
        Self {
            tolerance: 5.0,
            angular_tolerance: 1.0,
            min_segments: 4,
            max_segments: 512,
        }
    }
}

impl TessellationParams {
    /// Creates parameters from an export tolerance pair.
    #[must_use]
    pub fn from_tolerances(tolerance: f64, angular_tolerance: f64) -> Self {
        Self {
            tolerance,
            angular_tolerance,
            ..Self::default()
        }
    }
}

/// A triangle mesh approximation of a solid boundary.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Appends another mesh, re-basing its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|[a, b, c]| [a + base, b + base, c + base]),
        );
    }

    /// Signed volume enclosed by the mesh (divergence theorem).
    ///
    /// Positive for a closed mesh with outward-facing triangles.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut six_v = 0.0;
        for [a, b, c] in &self.indices {
            let v0: Vector3 = self.vertices[*a as usize].coords;
            let v1: Vector3 = self.vertices[*b as usize].coords;
            let v2: Vector3 = self.vertices[*c as usize].coords;
            six_v += v0.dot(&v1.cross(&v2));
        }
        six_v / 6.0
    }
}

/// Number of sweep subdivisions needed to keep the chord deviation at
/// `max_radius` under `params.tolerance`, and every angular step under
/// `params.angular_tolerance`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub(crate) fn sweep_segments(max_radius: f64, sweep: f64, params: &TessellationParams) -> usize {
    let sweep = sweep.abs();
    let mut max_step = params.angular_tolerance;
    if max_radius > params.tolerance {
        let chord_step = 2.0 * (1.0 - params.tolerance / max_radius).acos();
        max_step = max_step.min(chord_step);
    }
    if max_step <= 0.0 {
        return params.max_segments;
    }
    let computed = (sweep / max_step).ceil() as usize;
    computed.clamp(params.min_segments, params.max_segments)
}
