use super::polygon_2d::{ensure_ccw, signed_area};
use super::{Point2, TOLERANCE};

/// Clips a simple polygon against a convex window polygon
/// (Sutherland-Hodgman).
///
/// The window may be given in either winding; it is normalized to
/// counter-clockwise internally. Returns the clipped polygon, which is
/// empty when subject and window do not overlap.
#[must_use]
pub fn clip_polygon(subject: &[Point2], window: &[Point2]) -> Vec<Point2> {
    if subject.len() < 3 || window.len() < 3 {
        return Vec::new();
    }
    let window = ensure_ccw(window.to_vec());

    let mut output: Vec<Point2> = subject.to_vec();
    let m = window.len();
    for i in 0..m {
        if output.is_empty() {
            break;
        }
        let a = window[i];
        let b = window[(i + 1) % m];
        let input = std::mem::take(&mut output);
        let n = input.len();
        for j in 0..n {
            let current = input[j];
            let previous = input[(j + n - 1) % n];
            let current_inside = is_left_or_on(&a, &b, &current);
            let previous_inside = is_left_or_on(&a, &b, &previous);
            if current_inside {
                if !previous_inside {
                    push_vertex(&mut output, edge_intersection(&previous, &current, &a, &b));
                }
                push_vertex(&mut output, current);
            } else if previous_inside {
                push_vertex(&mut output, edge_intersection(&previous, &current, &a, &b));
            }
        }
    }

    // A sliver entirely on a window edge can survive with near-zero area.
    if output.len() < 3 || signed_area(&output).abs() < TOLERANCE {
        return Vec::new();
    }
    output
}

/// True when `p` lies on or to the left of the directed edge `a -> b`.
fn is_left_or_on(a: &Point2, b: &Point2, p: &Point2) -> bool {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x) >= -TOLERANCE
}

/// Intersection of segment `p0 -> p1` with the infinite line through `a -> b`.
///
/// Only called when the segment straddles the line, so the denominator is
/// bounded away from zero.
fn edge_intersection(p0: &Point2, p1: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = Point2::new(p1.x - p0.x, p1.y - p0.y);
    let e = Point2::new(b.x - a.x, b.y - a.y);
    let denom = d.x * e.y - d.y * e.x;
    if denom.abs() < TOLERANCE {
        return *p1;
    }
    let t = ((a.x - p0.x) * e.y - (a.y - p0.y) * e.x) / denom;
    Point2::new(p0.x + d.x * t, p0.y + d.y * t)
}

/// Appends a vertex, skipping near-duplicates of the previous one.
fn push_vertex(out: &mut Vec<Point2>, p: Point2) {
    if let Some(last) = out.last() {
        if (last.x - p.x).abs() < TOLERANCE && (last.y - p.y).abs() < TOLERANCE {
            return;
        }
    }
    out.push(p);
}
