//! Contour merging for sectors with a hole
//!
//! A floor plan with one hole (a pillar, a courtyard pit) cannot be ear
//! clipped directly. The merger cuts the hole open by splicing a zero-area
//! bridge between the hole's rightmost vertex and a visible vertex of the
//! outer contour, producing a single simple polygon the triangulator can
//! consume. The bridge pair shares coordinates but occupies two positions
//! in the output sequence, so the result never self-touches.

use super::math::{intersect_ray_segment, point_in_triangle, signed_triangle_area, Vec2, EPSILON};

/// Failure to connect a hole to its outer contour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeError {
    /// The +x ray from the hole's rightmost vertex reaches no outer edge.
    /// The hole is not strictly inside the outer contour.
    NoVisibleEdge,
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeError::NoVisibleEdge => {
                write!(f, "hole has no visible outer edge in the +x direction")
            }
        }
    }
}

/// Merge an outer contour (counter-clockwise) and one hole contour
/// (clockwise) into a single simple polygon of length N + M + 2.
///
/// Entries are (vertex id, position) pairs; the spliced bridge vertex and
/// the hole's rightmost vertex each appear twice, keeping their original
/// ids. Both contours must be non-empty; callers skip the merge entirely
/// for hole-less sectors.
pub fn merge_hole(
    outer: &[(u32, Vec2)],
    hole: &[(u32, Vec2)],
) -> Result<Vec<(u32, Vec2)>, MergeError> {
    let n = outer.len();
    let m = hole.len();

    // Rightmost hole vertex, first one on ties
    let mut m_idx = 0;
    for (i, &(_, p)) in hole.iter().enumerate() {
        if p.x > hole[m_idx].1.x {
            m_idx = i;
        }
    }
    let m_pt = hole[m_idx].1;

    // Closest outer edge hit by the +x ray from M. Hits behind M are line
    // artifacts and would thread the bridge through the hole; only forward
    // hits qualify.
    let dir = Vec2::new(1.0, 0.0);
    let mut best: Option<(f32, usize, Vec2)> = None;
    for i in 0..n {
        let a = outer[i].1;
        let b = outer[(i + 1) % n].1;
        if let Some(hit) = intersect_ray_segment(m_pt, dir, a, b) {
            if hit.x < m_pt.x {
                continue;
            }
            let dist_sq = (hit - m_pt).length_sq();
            if best.map(|(d, _, _)| dist_sq < d).unwrap_or(true) {
                best = Some((dist_sq, i, hit));
            }
        }
    }
    let (_, edge_idx, i_pt) = best.ok_or(MergeError::NoVisibleEdge)?;

    // P: the hit edge's endpoint with the larger x coordinate
    let p1_idx = edge_idx;
    let p2_idx = (edge_idx + 1) % n;
    let p_idx = if outer[p1_idx].1.x > outer[p2_idx].1.x {
        p1_idx
    } else {
        p2_idx
    };
    let p_pt = outer[p_idx].1;

    // P is the bridge endpoint unless a reflex outer vertex sits inside
    // triangle (M, I, P). Such a vertex occludes P from M; among them the
    // one with the smallest angle to the ray direction is visible.
    let mut bridge_idx = p_idx;
    let mut best_angle = f32::MAX;
    let mut best_dist = f32::MAX;
    for j in 0..n {
        if j == p_idx {
            continue;
        }
        let prev = outer[(j + n - 1) % n].1;
        let v = outer[j].1;
        let next = outer[(j + 1) % n].1;
        // Reflex relative to the counter-clockwise outer winding
        if signed_triangle_area(prev, v, next) >= 0.0 {
            continue;
        }
        if !point_in_triangle(m_pt, i_pt, p_pt, v) {
            continue;
        }
        let to_v = v - m_pt;
        let angle = to_v.y.abs().atan2(to_v.x);
        let dist_sq = to_v.length_sq();
        if angle + EPSILON < best_angle
            || ((angle - best_angle).abs() <= EPSILON && dist_sq < best_dist)
        {
            best_angle = angle;
            best_dist = dist_sq;
            bridge_idx = j;
        }
    }

    // Splice: the whole outer loop starting at the bridge vertex, the
    // bridge vertex again to close that loop, then the hole loop from M
    // back around to M. The implicit closure back to the first entry forms
    // the second bridge edge.
    let mut merged = Vec::with_capacity(n + m + 2);
    for k in 0..n {
        merged.push(outer[(bridge_idx + k) % n]);
    }
    merged.push(outer[bridge_idx]);
    for k in 0..=m {
        merged.push(hole[(m_idx + k) % m]);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::math::signed_polygon_area;
    use crate::geom::triangulate::triangulate;

    fn square_outer() -> Vec<(u32, Vec2)> {
        vec![
            (0, Vec2::new(0.0, 0.0)),
            (1, Vec2::new(4.0, 0.0)),
            (2, Vec2::new(4.0, 4.0)),
            (3, Vec2::new(0.0, 4.0)),
        ]
    }

    fn square_hole() -> Vec<(u32, Vec2)> {
        // Clockwise, strictly inside the outer square
        vec![
            (4, Vec2::new(1.5, 1.5)),
            (5, Vec2::new(1.5, 2.5)),
            (6, Vec2::new(2.5, 2.5)),
            (7, Vec2::new(2.5, 1.5)),
        ]
    }

    #[test]
    fn test_merged_length_and_duplicates() {
        let merged = merge_hole(&square_outer(), &square_hole()).unwrap();
        assert_eq!(merged.len(), 4 + 4 + 2);

        // Exactly one outer vertex and one hole vertex appear twice
        let mut counts = std::collections::HashMap::new();
        for &(id, _) in &merged {
            *counts.entry(id).or_insert(0) += 1;
        }
        let doubled: Vec<u32> = counts
            .iter()
            .filter(|(_, &c)| c == 2)
            .map(|(&id, _)| id)
            .collect();
        assert_eq!(doubled.len(), 2);
        // The hole's rightmost vertex is one of them
        assert!(doubled.contains(&6));
    }

    #[test]
    fn test_merged_polygon_triangulates_to_ring_area() {
        let merged = merge_hole(&square_outer(), &square_hole()).unwrap();
        let points: Vec<Vec2> = merged.iter().map(|&(_, p)| p).collect();

        // The bridge contributes zero area: outer minus hole
        assert!((signed_polygon_area(&points) - 15.0).abs() < 0.001);

        let indices = triangulate(&merged);
        assert_eq!(indices.len(), (merged.len() - 2) * 3);

        let lookup = |id: u32| {
            merged
                .iter()
                .find(|&&(vid, _)| vid == id)
                .map(|&(_, p)| p)
                .unwrap()
        };
        let mut area = 0.0;
        for tri in indices.chunks(3) {
            area += signed_triangle_area(lookup(tri[0]), lookup(tri[1]), lookup(tri[2]));
        }
        assert!((area - 15.0).abs() < 0.01);
    }

    #[test]
    fn test_hole_outside_outer_is_rejected() {
        let hole = vec![
            (4, Vec2::new(5.0, 1.0)),
            (5, Vec2::new(5.0, 2.0)),
            (6, Vec2::new(6.0, 2.0)),
            (7, Vec2::new(6.0, 1.0)),
        ];
        assert_eq!(
            merge_hole(&square_outer(), &hole),
            Err(MergeError::NoVisibleEdge)
        );
    }

    #[test]
    fn test_offset_hole_still_bridges() {
        // Hole shoved into the lower-left quadrant: the nearest outer
        // edge on the +x ray is the far right wall
        let hole = vec![
            (4, Vec2::new(0.5, 0.5)),
            (5, Vec2::new(0.5, 1.0)),
            (6, Vec2::new(1.0, 1.0)),
            (7, Vec2::new(1.0, 0.5)),
        ];
        let merged = merge_hole(&square_outer(), &hole).unwrap();
        assert_eq!(merged.len(), 10);

        let points: Vec<Vec2> = merged.iter().map(|&(_, p)| p).collect();
        assert!((signed_polygon_area(&points) - 15.75).abs() < 0.001);
    }
}
