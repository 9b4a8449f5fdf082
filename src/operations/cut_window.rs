//! Per-station cutting window with curvature-corrected width.
//!
//! The window is built from the station's local normal rather than a
//! global parametrization so the cut stays perpendicular to the reference
//! curve even where curvature is high; the curvature-damped offset keeps
//! adjacent segments from overlapping on tight bends.

use crate::error::{GeometryError, Result};
use crate::math::clip_2d::clip_polygon;
use crate::math::{rot90, try_unit, wrap_angle, Point2, Vector2, DEGENERACY_EPS};
use crate::section::{CrossSection, StationSet};
use crate::store::{FaceId, GeometryStore, PlanarFace};

/// Fixed linear manufacturing clearance between adjacent segments, meters.
pub const CLEARANCE: f64 = 0.025;

/// Damping strength of the curvature correction: higher curvature shrinks
/// the segment half-width by `1 / (1 + CURVATURE_DAMPING * curvature)`.
pub const CURVATURE_DAMPING: f64 = 0.1;

/// Extent of the cutting window along the normal direction, meters.
/// Chosen to exceed the blanket wall thickness on both sides.
pub const WINDOW_THICKNESS: f64 = 1.0;

/// Cuts one station's segment face out of the cross-section profile.
pub struct CutWindow {
    station: usize,
    average_spacing: f64,
    thickness: f64,
    alpha: f64,
    clearance: f64,
}

impl CutWindow {
    /// Creates the operation for one station with the default window
    /// thickness, damping and clearance.
    #[must_use]
    pub fn new(station: usize, average_spacing: f64) -> Self {
        Self {
            station,
            average_spacing,
            thickness: WINDOW_THICKNESS,
            alpha: CURVATURE_DAMPING,
            clearance: CLEARANCE,
        }
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_damping(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance;
        self
    }

    /// Executes the cut, inserting the segment face into the store.
    ///
    /// # Errors
    ///
    /// Returns an error if a participating normal is zero-length, the
    /// spacing leaves no room for the clearance inset, or the window does
    /// not overlap the cross-section.
    pub fn execute(
        &self,
        stations: &StationSet,
        section: &CrossSection,
        store: &mut GeometryStore,
    ) -> Result<FaceId> {
        let i = self.station;
        let station = stations.get(i);
        let unit_normal =
            try_unit(station.normal).ok_or(GeometryError::ZeroNormal { station: i })?;

        let curvature = station_curvature(stations, i)?;
        let base_offset = self.average_spacing / 2.0 - self.clearance;
        if base_offset <= 0.0 {
            return Err(GeometryError::Degenerate(format!(
                "station spacing {} leaves no room for the {} clearance inset",
                self.average_spacing, self.clearance
            ))
            .into());
        }
        let offset = damped_offset(base_offset, curvature, self.alpha);

        let corners = window_corners(station.origin, unit_normal, offset, self.thickness);
        let clipped = clip_polygon(section.points(), &corners);
        if clipped.is_empty() {
            return Err(GeometryError::EmptyIntersection { station: i }.into());
        }
        Ok(store.add_face(PlanarFace::new(clipped)))
    }
}

/// Local curvature estimate at station `i` from its cyclic neighbors:
/// the wrapped heading difference of the neighbor normals divided by the
/// chord between the neighbor origins.
///
/// The chord is a direct distance, not a true arc length; a chord below
/// [`DEGENERACY_EPS`] clamps the curvature to zero.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroNormal`] if a neighbor normal is
/// zero-length.
pub fn station_curvature(stations: &StationSet, index: usize) -> Result<f64> {
    let n = stations.len();
    let prev_index = (index + n - 1) % n;
    let next_index = (index + 1) % n;
    let prev = stations.get(prev_index);
    let next = stations.get(next_index);

    let unit_prev = try_unit(prev.normal).ok_or(GeometryError::ZeroNormal {
        station: prev_index,
    })?;
    let unit_next = try_unit(next.normal).ok_or(GeometryError::ZeroNormal {
        station: next_index,
    })?;

    let heading_prev = unit_prev.y.atan2(unit_prev.x);
    let heading_next = unit_next.y.atan2(unit_next.x);
    let delta = wrap_angle(heading_next - heading_prev);

    let chord = nalgebra::distance(&next.origin, &prev.origin);
    if chord <= DEGENERACY_EPS {
        return Ok(0.0);
    }
    Ok(delta.abs() / chord)
}

/// Curvature-damped segment half-width. Damping only shrinks the offset:
/// `0 < result <= base_offset` for positive inputs.
#[must_use]
pub fn damped_offset(base_offset: f64, curvature: f64, alpha: f64) -> f64 {
    base_offset / (1.0 + alpha * curvature)
}

/// Four corners of the local cutting window: the two lateral points
/// `origin ± perp * offset` extruded by `± thickness` along the normal.
#[must_use]
pub fn window_corners(
    origin: Point2,
    unit_normal: Vector2,
    offset: f64,
    thickness: f64,
) -> [Point2; 4] {
    let perp = rot90(unit_normal);
    let lateral_a = origin + perp * offset;
    let lateral_b = origin - perp * offset;
    [
        lateral_a + unit_normal * thickness,
        lateral_a - unit_normal * thickness,
        lateral_b - unit_normal * thickness,
        lateral_b + unit_normal * thickness,
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::input::ToroidalCoordinate;
    use crate::math::polygon_2d::signed_area;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn stations_from(normals: Vec<(Point2, Vector2)>) -> StationSet {
        let coords: Vec<_> = normals
            .iter()
            .map(|_| ToroidalCoordinate {
                toroidal_deg: 0.0,
                revolve_deg: 10.0,
            })
            .collect();
        StationSet::from_parts(&normals, &coords).unwrap()
    }

    #[test]
    fn collinear_normals_zero_curvature() {
        let set = stations_from(vec![
            (Point2::new(5.0, -1.0), Vector2::new(1.0, 0.0)),
            (Point2::new(5.0, 0.0), Vector2::new(2.0, 0.0)),
            (Point2::new(5.0, 1.0), Vector2::new(0.5, 0.0)),
        ]);
        assert!(station_curvature(&set, 1).unwrap().abs() < 1e-12);
    }

    #[test]
    fn right_angle_neighbors_curvature() {
        // Neighbor normals 90 degrees apart, neighbor origins 2.0 apart.
        let set = stations_from(vec![
            (Point2::new(5.0, -1.0), Vector2::new(1.0, 0.0)),
            (Point2::new(5.7, 0.0), Vector2::new(1.0, 1.0)),
            (Point2::new(5.0, 1.0), Vector2::new(0.0, 1.0)),
        ]);
        assert_relative_eq!(
            station_curvature(&set, 1).unwrap(),
            (PI / 2.0) / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn coincident_neighbors_clamp_curvature() {
        let set = stations_from(vec![
            (Point2::new(5.0, 0.0), Vector2::new(1.0, 0.0)),
            (Point2::new(5.0, 0.0), Vector2::new(0.0, 1.0)),
        ]);
        // Two stations: both neighbors of station 0 are station 1, so the
        // chord is zero and curvature clamps to 0.
        assert!(station_curvature(&set, 0).unwrap().abs() < 1e-12);
    }

    #[test]
    fn zero_neighbor_normal_is_error() {
        let set = stations_from(vec![
            (Point2::new(5.0, -1.0), Vector2::new(1.0, 0.0)),
            (Point2::new(5.0, 0.0), Vector2::new(1.0, 0.0)),
            (Point2::new(5.0, 1.0), Vector2::new(0.0, 0.0)),
        ]);
        let err = station_curvature(&set, 1).unwrap_err();
        assert!(matches!(
            err,
            crate::PoloidalError::Geometry(GeometryError::ZeroNormal { station: 2 })
        ));
    }

    #[test]
    fn damping_only_shrinks() {
        let base = 0.35;
        for curvature in [0.0, 0.1, 1.0, 10.0, 1000.0] {
            let offset = damped_offset(base, curvature, CURVATURE_DAMPING);
            assert!(offset > 0.0);
            assert!(offset <= base);
        }
        assert_relative_eq!(damped_offset(base, 0.0, CURVATURE_DAMPING), base);
    }

    #[test]
    fn window_corners_form_rectangle() {
        let corners = window_corners(
            Point2::new(5.0, 0.0),
            Vector2::new(1.0, 0.0),
            0.25,
            1.0,
        );
        // Sides: 2 * thickness by 2 * offset.
        assert_relative_eq!(signed_area(&corners).abs(), 2.0 * 0.5, epsilon = 1e-12);
        let [a, b, c, d] = corners;
        assert_relative_eq!(nalgebra::distance(&a, &b), 2.0, epsilon = 1e-12);
        assert_relative_eq!(nalgebra::distance(&b, &c), 0.5, epsilon = 1e-12);
        assert_relative_eq!(nalgebra::distance(&c, &d), 2.0, epsilon = 1e-12);
        assert_relative_eq!(nalgebra::distance(&d, &a), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn execute_cuts_face_from_section() {
        // Unit-square cross-section centered at x = 5, station on its
        // right side looking outward.
        let inner = vec![
            Point2::new(4.5, -0.5),
            Point2::new(5.5, -0.5),
            Point2::new(5.5, 0.5),
            Point2::new(4.5, 0.5),
        ];
        let section = CrossSection::assemble(&inner, &[]);
        let set = stations_from(vec![
            (Point2::new(5.0, -0.5), Vector2::new(0.0, -1.0)),
            (Point2::new(5.5, 0.0), Vector2::new(1.0, 0.0)),
            (Point2::new(5.0, 0.5), Vector2::new(0.0, 1.0)),
            (Point2::new(4.5, 0.0), Vector2::new(-1.0, 0.0)),
        ]);
        let mut store = GeometryStore::new();
        let spacing = section.average_spacing(set.len());
        let face_id = CutWindow::new(1, spacing)
            .execute(&set, &section, &mut store)
            .unwrap();
        let face = store.face(face_id).unwrap();
        let area = signed_area(&face.points);
        assert!(area > 0.0);
        // The window reaches 1.0 inward from x = 5.5, so the cut spans
        // the full square horizontally and 2 * offset vertically.
        let base = spacing / 2.0 - CLEARANCE;
        assert!(area <= 1.0 * 2.0 * base + 1e-9);
    }

    #[test]
    fn window_outside_section_is_empty_intersection() {
        let inner = vec![
            Point2::new(4.5, -0.5),
            Point2::new(5.5, -0.5),
            Point2::new(5.5, 0.5),
            Point2::new(4.5, 0.5),
        ];
        let section = CrossSection::assemble(&inner, &[]);
        let set = stations_from(vec![
            (Point2::new(50.0, 0.0), Vector2::new(1.0, 0.0)),
            (Point2::new(50.0, 1.0), Vector2::new(1.0, 0.0)),
            (Point2::new(50.0, 2.0), Vector2::new(1.0, 0.0)),
        ]);
        let mut store = GeometryStore::new();
        let err = CutWindow::new(0, 1.0)
            .execute(&set, &section, &mut store)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::PoloidalError::Geometry(GeometryError::EmptyIntersection { station: 0 })
        ));
    }

    #[test]
    fn insufficient_spacing_is_degenerate() {
        let inner = vec![
            Point2::new(4.5, -0.5),
            Point2::new(5.5, -0.5),
            Point2::new(5.5, 0.5),
        ];
        let section = CrossSection::assemble(&inner, &[]);
        let set = stations_from(vec![
            (Point2::new(5.0, 0.0), Vector2::new(1.0, 0.0)),
            (Point2::new(5.1, 0.0), Vector2::new(1.0, 0.0)),
        ]);
        let mut store = GeometryStore::new();
        // Spacing 0.04 < 2 * clearance.
        let err = CutWindow::new(0, 0.04)
            .execute(&set, &section, &mut store)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::PoloidalError::Geometry(GeometryError::Degenerate(_))
        ));
    }
}
