use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Total length of an open polyline: the sum of distances between
/// consecutive points. No wraparound closure term.
#[must_use]
pub fn polyline_length(points: &[Point2]) -> f64 {
    points
        .windows(2)
        .map(|w| nalgebra::distance(&w[0], &w[1]))
        .sum()
}

/// Returns the polygon with counter-clockwise winding, reversing if needed.
#[must_use]
pub fn ensure_ccw(mut points: Vec<Point2>) -> Vec<Point2> {
    if signed_area(&points) < 0.0 {
        points.reverse();
    }
    points
}

/// Area centroid of a simple polygon.
///
/// Falls back to the vertex average for (near) zero-area polygons.
#[must_use]
pub fn centroid(points: &[Point2]) -> Point2 {
    let area = signed_area(points);
    let n = points.len();
    if n == 0 {
        return Point2::origin();
    }
    if area.abs() < TOLERANCE {
        let mut cx = 0.0;
        let mut cy = 0.0;
        for p in points {
            cx += p.x;
            cy += p.y;
        }
        #[allow(clippy::cast_precision_loss)]
        return Point2::new(cx / n as f64, cy / n as f64);
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let cross = points[i].x * points[j].y - points[j].x * points[i].y;
        cx += (points[i].x + points[j].x) * cross;
        cy += (points[i].y + points[j].y) * cross;
    }
    Point2::new(cx / (6.0 * area), cy / (6.0 * area))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert!((signed_area(&square()) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = square();
        pts.reverse();
        assert!((signed_area(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area(&[]).abs() < TOLERANCE);
        assert!(signed_area(&[Point2::new(1.0, 2.0)]).abs() < TOLERANCE);
    }

    #[test]
    fn polyline_length_open() {
        // Four corners of the unit square as an open polyline: 3 sides.
        assert!((polyline_length(&square()) - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn polyline_length_short_inputs() {
        assert!(polyline_length(&[]).abs() < TOLERANCE);
        assert!(polyline_length(&[Point2::new(1.0, 1.0)]).abs() < TOLERANCE);
    }

    #[test]
    fn ensure_ccw_flips_cw() {
        let mut pts = square();
        pts.reverse();
        let fixed = ensure_ccw(pts);
        assert!(signed_area(&fixed) > 0.0);
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid(&square());
        assert!((c.x - 0.5).abs() < TOLERANCE);
        assert!((c.y - 0.5).abs() < TOLERANCE);
    }
}
