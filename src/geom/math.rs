//! Vector math and 2D geometric predicates
//!
//! Core value types used by the contour merger, the triangulator, and the
//! mesh builder. Kept free of any graphics-crate types so the compiler
//! stays pure; the render facade converts at its own boundary.

use std::ops::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

/// Tolerance for near-zero and near-equality checks
pub const EPSILON: f32 = 1e-6;

/// 2D Vector / point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z-component of the 3D cross of the embedded vectors)
    pub fn perp_dot(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    pub fn normalize(self) -> Vec2 {
        let l = self.length();
        if l == 0.0 {
            return Vec2::ZERO;
        }
        Vec2 {
            x: self.x / l,
            y: self.y / l,
        }
    }

    /// Near-equality within EPSILON on both axes
    pub fn approx_eq(self, other: Vec2) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const DOWN: Vec3 = Vec3 { x: 0.0, y: -1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.length();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

// =============================================================================
// 2D predicates
// =============================================================================

/// Intersect the infinite line `origin + t * direction` with the segment
/// `a..b`.
///
/// Returns the intersection point, or None when the direction and segment
/// are parallel (cross product within EPSILON of zero) or the segment
/// parameter falls outside [0, 1].
///
/// `t` is intentionally unconstrained in sign: a hit behind the origin is
/// still reported, so this is line/segment rather than ray/segment
/// intersection on the first argument. Callers that want forward hits only
/// filter on the returned point.
pub fn intersect_ray_segment(origin: Vec2, direction: Vec2, a: Vec2, b: Vec2) -> Option<Vec2> {
    let edge = b - a;
    let denom = direction.perp_dot(edge);

    // Parallel (or degenerate segment)
    if denom.abs() < EPSILON {
        return None;
    }

    let w = a - origin;
    let u = w.perp_dot(direction) / denom;
    if u < 0.0 || u > 1.0 {
        return None;
    }

    let t = w.perp_dot(edge) / denom;
    Some(origin + direction * t)
}

/// Test if point p is inside triangle a-b-c, boundary inclusive.
/// Sign-based edge test; works regardless of triangle winding.
pub fn point_in_triangle(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> bool {
    fn sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
        (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
    }

    let d1 = sign(p, a, b);
    let d2 = sign(p, b, c);
    let d3 = sign(p, c, a);

    let has_neg = (d1 < 0.0) || (d2 < 0.0) || (d3 < 0.0);
    let has_pos = (d1 > 0.0) || (d2 > 0.0) || (d3 > 0.0);

    // Inside (or on an edge) when all non-zero signs agree
    !(has_neg && has_pos)
}

/// Signed area of triangle a-b-c. Positive iff a -> b -> c winds
/// counter-clockwise.
pub fn signed_triangle_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    0.5 * (b - a).perp_dot(c - a)
}

/// Signed area of a closed polygon (shoelace). Positive iff the points wind
/// counter-clockwise.
pub fn signed_polygon_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        sum += points[i].perp_dot(points[(i + 1) % n]);
    }
    0.5 * sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_ahead_of_origin() {
        let hit = intersect_ray_segment(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(2.0, 1.0),
        );
        let p = hit.expect("segment crosses the ray");
        assert!((p.x - 2.0).abs() < 0.001);
        assert!(p.y.abs() < 0.001);
    }

    #[test]
    fn test_intersect_behind_origin() {
        // t is unconstrained in sign: the segment sits behind the origin on
        // the infinite line and is still reported.
        let hit = intersect_ray_segment(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(-1.0, 1.0),
        );
        let p = hit.expect("line behavior reports hits behind the origin");
        assert!((p.x + 1.0).abs() < 0.001);
        assert!(p.y.abs() < 0.001);
    }

    #[test]
    fn test_intersect_parallel() {
        let hit = intersect_ray_segment(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(5.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_intersect_misses_segment() {
        // The infinite line crosses the segment's carrier line outside [0,1]
        let hit = intersect_ray_segment(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(2.0, 3.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_point_in_triangle() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 0.0);
        let c = Vec2::new(0.0, 4.0);
        assert!(point_in_triangle(a, b, c, Vec2::new(1.0, 1.0)));
        assert!(!point_in_triangle(a, b, c, Vec2::new(3.0, 3.0)));
        // Boundary is inclusive
        assert!(point_in_triangle(a, b, c, Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_signed_triangle_area() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(2.0, 0.0);
        let c = Vec2::new(0.0, 2.0);
        assert!((signed_triangle_area(a, b, c) - 2.0).abs() < 0.001);
        assert!((signed_triangle_area(a, c, b) + 2.0).abs() < 0.001);
    }

    #[test]
    fn test_signed_polygon_area() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        assert!((signed_polygon_area(&square) - 16.0).abs() < 0.001);

        let reversed: Vec<Vec2> = square.iter().rev().copied().collect();
        assert!((signed_polygon_area(&reversed) + 16.0).abs() < 0.001);
    }
}
