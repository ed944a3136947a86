//! 2D geometry kernel for the sector compiler
//!
//! # Module Organization
//!
//! - `math` - Vec2/Vec3, epsilon comparisons, intersection and area predicates
//! - `merge` - polygon-with-hole to simple-polygon bridge merging
//! - `triangulate` - ear-clipping triangulation
//!
//! Note: some kernel entry points are exercised only by the compiler
//! pipeline and tests, not by the viewer binary.

#![allow(dead_code)]

pub mod math;
pub mod merge;
pub mod triangulate;

pub use math::{
    intersect_ray_segment, point_in_triangle, signed_polygon_area, signed_triangle_area, Vec2,
    Vec3, EPSILON,
};
pub use merge::{merge_hole, MergeError};
pub use triangulate::triangulate;
