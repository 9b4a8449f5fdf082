use crate::error::{GeometryError, Result};
use crate::math::clip_2d::clip_polygon;
use crate::math::Point2;
use crate::store::{FaceId, GeometryStore, PlanarFace};

/// Splits a planar face into an inboard and an outboard part at a given
/// radius, leaving a slit of fixed width between them.
///
/// Used to divide a blanket cross-section into two independently revolved
/// bodies for structural analysis exports.
pub struct RadialSplit {
    face: FaceId,
    radius: f64,
    slit: f64,
}

impl RadialSplit {
    /// Creates a new `RadialSplit` at `radius` with the given slit width.
    #[must_use]
    pub fn new(face: FaceId, radius: f64, slit: f64) -> Self {
        Self { face, radius, slit }
    }

    /// Executes the split, returning `(inboard, outboard)` face IDs.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist or either side of the
    /// split is empty (the dividing radius misses the face).
    pub fn execute(&self, store: &mut GeometryStore) -> Result<(FaceId, FaceId)> {
        let face = store.face(self.face)?;
        let points = face.points.clone();

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &points {
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }
        // Windows padded past the face extents so only the radial cut matters.
        let pad = 1.0;
        let inboard_window = rect(
            x_min - pad,
            self.radius - self.slit / 2.0,
            y_min - pad,
            y_max + pad,
        );
        let outboard_window = rect(
            self.radius + self.slit / 2.0,
            x_max + pad,
            y_min - pad,
            y_max + pad,
        );

        let inboard = clip_polygon(&points, &inboard_window);
        if inboard.is_empty() {
            return Err(GeometryError::Degenerate(format!(
                "radial split at r = {} leaves an empty inboard part",
                self.radius
            ))
            .into());
        }
        let outboard = clip_polygon(&points, &outboard_window);
        if outboard.is_empty() {
            return Err(GeometryError::Degenerate(format!(
                "radial split at r = {} leaves an empty outboard part",
                self.radius
            ))
            .into());
        }

        Ok((
            store.add_face(PlanarFace::new(inboard)),
            store.add_face(PlanarFace::new(outboard)),
        ))
    }
}

fn rect(x0: f64, x1: f64, y0: f64, y1: f64) -> [Point2; 4] {
    [
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::signed_area;
    use approx::assert_relative_eq;

    fn square_face(store: &mut GeometryStore) -> FaceId {
        store.add_face(PlanarFace::new(vec![
            Point2::new(5.0, 0.0),
            Point2::new(7.0, 0.0),
            Point2::new(7.0, 1.0),
            Point2::new(5.0, 1.0),
        ]))
    }

    #[test]
    fn split_areas_leave_slit() {
        let mut store = GeometryStore::new();
        let face = square_face(&mut store);
        let (inboard, outboard) = RadialSplit::new(face, 6.0, 0.05)
            .execute(&mut store)
            .unwrap();
        let a_in = signed_area(&store.face(inboard).unwrap().points);
        let a_out = signed_area(&store.face(outboard).unwrap().points);
        assert_relative_eq!(a_in, (1.0 - 0.025) * 1.0, epsilon = 1e-9);
        assert_relative_eq!(a_out, (1.0 - 0.025) * 1.0, epsilon = 1e-9);
        // Slit area removed from the original.
        assert_relative_eq!(a_in + a_out, 2.0 - 0.05, epsilon = 1e-9);
    }

    #[test]
    fn inboard_and_outboard_sides_correct() {
        let mut store = GeometryStore::new();
        let face = square_face(&mut store);
        let (inboard, outboard) = RadialSplit::new(face, 6.0, 0.05)
            .execute(&mut store)
            .unwrap();
        let max_in = store
            .face(inboard)
            .unwrap()
            .points
            .iter()
            .fold(f64::NEG_INFINITY, |m, p| m.max(p.x));
        let min_out = store
            .face(outboard)
            .unwrap()
            .points
            .iter()
            .fold(f64::INFINITY, |m, p| m.min(p.x));
        assert!(max_in <= 6.0 - 0.025 + 1e-9);
        assert!(min_out >= 6.0 + 0.025 - 1e-9);
    }

    #[test]
    fn split_outside_face_is_error() {
        let mut store = GeometryStore::new();
        let face = square_face(&mut store);
        assert!(RadialSplit::new(face, 20.0, 0.05).execute(&mut store).is_err());
        assert!(RadialSplit::new(face, 1.0, 0.05).execute(&mut store).is_err());
    }
}
