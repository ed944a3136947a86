//! Ear-clipping triangulation of simple polygons
//!
//! Converts a counter-clockwise simple polygon into a flat index list,
//! three entries per triangle. The scan always clips the first ear it
//! finds; for a valid simple polygon with N vertices this yields exactly
//! N - 2 triangles covering the polygon's area, each wound
//! counter-clockwise.

use super::math::{point_in_triangle, signed_triangle_area, Vec2, EPSILON};

/// Triangulate a simple polygon given as (vertex id, position) pairs in
/// counter-clockwise order. Returns the ids of every clipped ear, three per
/// triangle, each triple with strictly positive signed area.
///
/// Duplicated bridge entries (same position, separate sequence slots) are
/// legal input; points coinciding with an ear's own corners never block it.
///
/// Input that is not a simple polygon violates the caller contract: the
/// scan stops once a full pass finds no ear and returns the partial cover
/// instead of looping forever.
pub fn triangulate(polygon: &[(u32, Vec2)]) -> Vec<u32> {
    let mut remaining: Vec<(u32, Vec2)> = polygon.to_vec();
    let mut indices = Vec::with_capacity(polygon.len().saturating_sub(2) * 3);

    while remaining.len() >= 3 {
        let n = remaining.len();
        let mut clipped = false;

        for i in 0..n {
            let (prev_id, prev) = remaining[(i + n - 1) % n];
            let (curr_id, curr) = remaining[i];
            let (next_id, next) = remaining[(i + 1) % n];

            // Convex, non-degenerate corner
            if signed_triangle_area(prev, curr, next) <= EPSILON {
                continue;
            }

            // No other remaining vertex inside the candidate triangle
            // (boundary inclusive). Coincident bridge twins of a corner
            // are the corner, not a blocker.
            let blocked = remaining.iter().enumerate().any(|(j, &(_, p))| {
                if j == (i + n - 1) % n || j == i || j == (i + 1) % n {
                    return false;
                }
                if p.approx_eq(prev) || p.approx_eq(curr) || p.approx_eq(next) {
                    return false;
                }
                point_in_triangle(prev, curr, next, p)
            });
            if blocked {
                continue;
            }

            indices.push(prev_id);
            indices.push(curr_id);
            indices.push(next_id);
            remaining.remove(i);
            clipped = true;
            break;
        }

        if !clipped {
            // Not a simple polygon; bail rather than spin
            break;
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::math::signed_polygon_area;

    fn id_points(points: &[(f32, f32)]) -> Vec<(u32, Vec2)> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| (i as u32, Vec2::new(x, y)))
            .collect()
    }

    fn covered_area(polygon: &[(u32, Vec2)], indices: &[u32]) -> f32 {
        let mut area = 0.0;
        for tri in indices.chunks(3) {
            let a = polygon[tri[0] as usize].1;
            let b = polygon[tri[1] as usize].1;
            let c = polygon[tri[2] as usize].1;
            area += signed_triangle_area(a, b, c);
        }
        area
    }

    fn assert_valid_cover(polygon: &[(u32, Vec2)]) {
        let indices = triangulate(polygon);
        assert_eq!(indices.len(), (polygon.len() - 2) * 3);

        // Every emitted triple winds counter-clockwise
        for tri in indices.chunks(3) {
            let a = polygon[tri[0] as usize].1;
            let b = polygon[tri[1] as usize].1;
            let c = polygon[tri[2] as usize].1;
            assert!(
                signed_triangle_area(a, b, c) > 0.0,
                "triangle {:?} not counter-clockwise",
                tri
            );
        }

        // Triangles tile the polygon: signed areas sum to the polygon area
        let points: Vec<Vec2> = polygon.iter().map(|&(_, p)| p).collect();
        let expected = signed_polygon_area(&points);
        assert!((covered_area(polygon, &indices) - expected).abs() < 0.01);
    }

    #[test]
    fn test_triangle_passthrough() {
        let tri = id_points(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
        let indices = triangulate(&tri);
        assert_eq!(indices.len(), 3);
        assert_valid_cover(&tri);
    }

    #[test]
    fn test_convex_square() {
        assert_valid_cover(&id_points(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]));
    }

    #[test]
    fn test_concave_l_shape() {
        assert_valid_cover(&id_points(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ]));
    }

    #[test]
    fn test_spiky_concave_polygon() {
        assert_valid_cover(&id_points(&[
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 4.0),
            (5.0, 1.0),
            (4.0, 4.0),
            (3.0, 1.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ]));
    }

    #[test]
    fn test_collinear_run_is_skipped_not_emitted() {
        // Midpoint on the bottom edge: its corner is degenerate, never an ear
        let polygon = id_points(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (0.0, 4.0),
        ]);
        assert_valid_cover(&polygon);
    }

    #[test]
    fn test_not_enough_vertices() {
        let two = id_points(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(triangulate(&two).is_empty());
    }
}
