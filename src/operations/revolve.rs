use crate::error::{GeometryError, Result};
use crate::math::DEGENERACY_EPS;
use crate::store::{FaceId, GeometryStore, RevolvedSolid, SolidId};

/// Revolves a planar face about the main (Z) axis.
///
/// The sweep is centered on `center_deg`: the solid covers
/// `[center_deg - sweep_deg / 2, center_deg + sweep_deg / 2]`, which is
/// geometrically identical to revolving two half-sweeps in opposite
/// directions from the bisection plane and unioning them.
pub struct Revolve {
    face: FaceId,
    center_deg: f64,
    sweep_deg: f64,
    station: Option<usize>,
}

impl Revolve {
    /// Creates a new `Revolve` operation.
    #[must_use]
    pub fn new(face: FaceId, center_deg: f64, sweep_deg: f64) -> Self {
        Self {
            face,
            center_deg,
            sweep_deg,
            station: None,
        }
    }

    /// A full 360-degree revolution.
    #[must_use]
    pub fn full_turn(face: FaceId) -> Self {
        Self::new(face, 180.0, 360.0)
    }

    /// Tags the resulting solid with the station index it belongs to.
    #[must_use]
    pub fn for_station(mut self, station: usize) -> Self {
        self.station = Some(station);
        self
    }

    /// Executes the revolution, creating the solid in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist, its boundary has
    /// fewer than 3 vertices, or the sweep is not positive.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<SolidId> {
        if self.sweep_deg <= 0.0 {
            return Err(GeometryError::Degenerate(format!(
                "revolve sweep must be positive, got {} degrees",
                self.sweep_deg
            ))
            .into());
        }
        let face = store.face(self.face)?;
        if face.points.len() < 3 {
            return Err(GeometryError::Degenerate(
                "revolve profile must have at least 3 vertices".into(),
            )
            .into());
        }
        let profile = face.points.clone();
        Ok(store.add_solid(RevolvedSolid {
            profile,
            start_deg: self.center_deg - self.sweep_deg / 2.0,
            end_deg: self.center_deg + self.sweep_deg / 2.0,
            station: self.station,
        }))
    }
}

/// Angle (degrees) subtended by a fixed linear `clearance` gap at the
/// given radius from the main axis. Clamps to zero near the axis.
#[must_use]
pub fn clearance_angle_deg(radius: f64, clearance: f64) -> f64 {
    if radius > DEGENERACY_EPS {
        (clearance / radius).to_degrees()
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::operations::CLEARANCE;
    use crate::store::PlanarFace;
    use approx::assert_relative_eq;

    fn triangle_face(store: &mut GeometryStore) -> FaceId {
        store.add_face(PlanarFace::new(vec![
            Point2::new(5.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(5.5, 1.0),
        ]))
    }

    #[test]
    fn sweep_is_bisected_on_center() {
        let mut store = GeometryStore::new();
        let face = triangle_face(&mut store);
        let id = Revolve::new(face, 45.0, 30.0)
            .for_station(7)
            .execute(&mut store)
            .unwrap();
        let solid = store.solid(id).unwrap();
        assert_relative_eq!(solid.start_deg, 30.0);
        assert_relative_eq!(solid.end_deg, 60.0);
        assert_eq!(solid.station, Some(7));
    }

    #[test]
    fn full_turn_covers_circle() {
        let mut store = GeometryStore::new();
        let face = triangle_face(&mut store);
        let id = Revolve::full_turn(face).execute(&mut store).unwrap();
        assert!(store.solid(id).unwrap().is_full_turn());
    }

    #[test]
    fn non_positive_sweep_rejected() {
        let mut store = GeometryStore::new();
        let face = triangle_face(&mut store);
        assert!(Revolve::new(face, 0.0, 0.0).execute(&mut store).is_err());
        assert!(Revolve::new(face, 0.0, -5.0).execute(&mut store).is_err());
    }

    #[test]
    fn clearance_angle_shrinks_with_radius() {
        let near = clearance_angle_deg(1.0, CLEARANCE);
        let far = clearance_angle_deg(10.0, CLEARANCE);
        assert!(near > far);
        assert_relative_eq!(far, (CLEARANCE / 10.0).to_degrees(), epsilon = 1e-12);
    }

    #[test]
    fn clearance_angle_clamps_near_axis() {
        assert!(clearance_angle_deg(0.0, CLEARANCE).abs() < 1e-12);
        assert!(clearance_angle_deg(1e-9, CLEARANCE).abs() < 1e-12);
    }
}
