use spade::handles::FixedFaceHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, TOLERANCE};
use crate::store::{GeometryStore, SolidId};

use super::{sweep_segments, TessellationParams, TriangleMesh};

/// Tessellates a revolved solid into a closed triangle mesh.
///
/// The lateral surface is a swept quad grid; for partial sweeps the two
/// planar end caps are triangulated with a constrained Delaunay
/// triangulation so non-convex segment faces close correctly.
pub struct TessellateSolid {
    solid: SolidId,
    params: TessellationParams,
}

impl TessellateSolid {
    /// Creates a new `TessellateSolid` operation.
    #[must_use]
    pub fn new(solid: SolidId, params: TessellationParams) -> Self {
        Self { solid, params }
    }

    /// Executes the tessellation, returning a triangle mesh with
    /// outward-facing triangles.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid does not exist, its profile has
    /// fewer than 3 vertices, or cap triangulation fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn execute(&self, store: &GeometryStore) -> Result<TriangleMesh> {
        let solid = store.solid(self.solid)?;
        let profile = dedup_loop(&solid.profile);
        let n = profile.len();
        if n < 3 {
            return Err(GeometryError::Degenerate(
                "revolve profile must have at least 3 vertices".into(),
            )
            .into());
        }
        let sweep_deg = solid.sweep_deg();
        if sweep_deg <= 0.0 {
            return Err(GeometryError::Degenerate(format!(
                "revolve sweep must be positive, got {sweep_deg} degrees"
            ))
            .into());
        }

        let start = solid.start_deg.to_radians();
        let sweep = sweep_deg.to_radians();
        let max_radius = profile.iter().fold(0.0_f64, |acc, p| acc.max(p.x.abs()));
        let steps = sweep_segments(max_radius, sweep, &self.params);
        let full = solid.is_full_turn();
        let rings = if full { steps } else { steps + 1 };

        let mut mesh = TriangleMesh::default();
        for j in 0..rings {
            let phi = start + sweep * (j as f64) / (steps as f64);
            for p in &profile {
                mesh.vertices.push(map_to_ring(p, phi));
            }
        }

        // Lateral wall: one quad per profile edge per sweep step, wound
        // so that cross(d_phi, d_profile) faces outward for a CCW profile.
        for j in 0..steps {
            let ring = j * n;
            let next_ring = if full { ((j + 1) % steps) * n } else { (j + 1) * n };
            for i in 0..n {
                let i2 = (i + 1) % n;
                let v00 = (ring + i) as u32;
                let v10 = (ring + i2) as u32;
                let v01 = (next_ring + i) as u32;
                let v11 = (next_ring + i2) as u32;
                mesh.indices.push([v00, v01, v11]);
                mesh.indices.push([v00, v11, v10]);
            }
        }

        if !full {
            let triangles = triangulate_profile(&profile)?;
            let end = start + sweep;
            for tri in &triangles {
                // CCW in the poloidal plane maps to an outward (-d_phi)
                // normal at the sweep start; the end cap flips.
                append_cap_triangle(&mut mesh, tri, start, false);
                append_cap_triangle(&mut mesh, tri, end, true);
            }
        }

        Ok(mesh)
    }
}

/// Maps a poloidal-plane point onto the ring at toroidal angle `phi`.
fn map_to_ring(p: &Point2, phi: f64) -> Point3 {
    Point3::new(p.x * phi.cos(), p.x * phi.sin(), p.y)
}

#[allow(clippy::cast_possible_truncation)]
fn append_cap_triangle(mesh: &mut TriangleMesh, tri: &[Point2; 3], phi: f64, flip: bool) {
    let base = mesh.vertices.len() as u32;
    for p in tri {
        mesh.vertices.push(map_to_ring(p, phi));
    }
    if flip {
        mesh.indices.push([base, base + 2, base + 1]);
    } else {
        mesh.indices.push([base, base + 1, base + 2]);
    }
}

/// Removes consecutive near-duplicate vertices, including a repeated
/// closing vertex.
fn dedup_loop(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if let Some(last) = out.last() {
            if (last.x - p.x).abs() < TOLERANCE && (last.y - p.y).abs() < TOLERANCE {
                continue;
            }
        }
        out.push(p);
    }
    if out.len() > 1 {
        let first = out[0];
        if let Some(last) = out.last() {
            if (last.x - first.x).abs() < TOLERANCE && (last.y - first.y).abs() < TOLERANCE {
                out.pop();
            }
        }
    }
    out
}

/// Triangulates a simple closed polygon via constrained Delaunay,
/// returning its interior triangles in counter-clockwise order.
fn triangulate_profile(profile: &[Point2]) -> Result<Vec<[Point2; 3]>> {
    let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
    insert_constraint_loop(&mut cdt, profile)?;
    let interior = classify_interior_faces(&cdt);

    let mut triangles = Vec::new();
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let verts = face.vertices();
        let mut tri = [Point2::origin(); 3];
        for (i, vh) in verts.iter().enumerate() {
            let pos = vh.position();
            tri[i] = Point2::new(pos.x, pos.y);
        }
        triangles.push(tri);
    }
    Ok(triangles)
}

fn insert_constraint_loop(
    cdt: &mut ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
    points: &[Point2],
) -> Result<()> {
    if points.len() < 3 {
        return Err(
            GeometryError::Degenerate("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for p in points {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| {
                GeometryError::Degenerate(format!("cap triangulation insert: {e}"))
            })?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }

    Ok(())
}

/// Classifies which inner faces of the CDT are inside the polygon using
/// flood-fill: depth increments across constraint edges, odd depth is
/// interior.
fn classify_interior_faces(
    cdt: &ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<spade::handles::InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() == outer_fix {
            let rev_face = edge.rev().face();
            if let Some(inner) = rev_face.as_inner() {
                let idx = inner.fix().index();
                if depth_map.contains_key(&idx) {
                    continue;
                }
                let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
                depth_map.insert(idx, depth);
                if depth % 2 == 1 {
                    interior.insert(idx);
                }
                queue.push_back((inner.fix(), depth));
            }
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let neighbor = edge.rev().face();
            if let Some(inner_neighbor) = neighbor.as_inner() {
                let n_idx = inner_neighbor.fix().index();
                if depth_map.contains_key(&n_idx) {
                    continue;
                }
                let new_depth = if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    depth + 1
                } else {
                    depth
                };
                depth_map.insert(n_idx, new_depth);
                if new_depth % 2 == 1 {
                    interior.insert(n_idx);
                }
                queue.push_back((inner_neighbor.fix(), new_depth));
            }
        }
    }

    interior
}
