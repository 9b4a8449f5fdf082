pub mod clip_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Chord length below which neighbor spacing is treated as degenerate
/// (curvature is clamped to zero, see [`crate::operations::CutWindow`]).
pub const DEGENERACY_EPS: f64 = 1e-6;

/// Wraps an angle into the principal range `[-PI, PI)`.
#[must_use]
pub fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Normalizes a 2D vector, or returns `None` for a (near) zero vector.
#[must_use]
pub fn try_unit(v: Vector2) -> Option<Vector2> {
    let len = v.norm();
    if len < TOLERANCE {
        None
    } else {
        Some(v / len)
    }
}

/// Rotates a 2D vector by 90 degrees counter-clockwise.
#[must_use]
pub fn rot90(v: Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn wrap_angle_identity_in_range() {
        assert!((wrap_angle(1.0) - 1.0).abs() < TOLERANCE);
        assert!((wrap_angle(-1.0) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn wrap_angle_past_pi() {
        assert!((wrap_angle(PI + 0.1) - (-PI + 0.1)).abs() < 1e-12);
        assert!((wrap_angle(-PI - 0.1) - (PI - 0.1)).abs() < 1e-12);
    }

    #[test]
    fn wrap_angle_full_turns() {
        assert!(wrap_angle(2.0 * PI).abs() < 1e-12);
        assert!(wrap_angle(-4.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn try_unit_zero_vector() {
        assert!(try_unit(Vector2::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn try_unit_normalizes() {
        let u = try_unit(Vector2::new(3.0, 4.0)).unwrap();
        assert!((u.norm() - 1.0).abs() < TOLERANCE);
        assert!((u.x - 0.6).abs() < TOLERANCE);
    }

    #[test]
    fn rot90_basis() {
        let r = rot90(Vector2::new(1.0, 0.0));
        assert!((r.x).abs() < TOLERANCE);
        assert!((r.y - 1.0).abs() < TOLERANCE);
    }
}
