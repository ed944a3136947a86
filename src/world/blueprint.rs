//! Sector blueprints
//!
//! A blueprint is the authoring-time description of one sector: the 2D
//! floor contour (with an optional hole for a pillar or pit), the wall
//! edges between contour vertices, the vertical extents, and the three
//! material references. Compiling a blueprint into a mesh happens in
//! `world::mesh`; loading and saving in `world::io`.

use serde::{Deserialize, Serialize};
use crate::geom::{signed_polygon_area, Vec2, EPSILON};

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum total contour vertices (outer plus hole)
    pub const MAX_VERTICES: usize = 4096;
    /// Maximum number of wall edges
    pub const MAX_WALLS: usize = 8192;
    /// Maximum string length for material names
    pub const MAX_STRING_LEN: usize = 256;
    /// Maximum coordinate value (prevents overflow issues)
    pub const MAX_COORD: f32 = 1_000_000.0;
}

/// Material reference by pack and name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaterialRef {
    /// Material pack name (e.g., "proto")
    pub pack: String,
    /// Material name without extension (e.g., "wall_01")
    pub name: String,
}

impl MaterialRef {
    pub fn new(pack: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pack: pack.into(),
            name: name.into(),
        }
    }

    /// Create a None reference (uses fallback checkerboard)
    pub fn none() -> Self {
        Self {
            pack: String::new(),
            name: String::new(),
        }
    }

    /// Check if this is a valid reference
    pub fn is_valid(&self) -> bool {
        !self.pack.is_empty() && !self.name.is_empty()
    }
}

impl Default for MaterialRef {
    fn default() -> Self {
        Self::none()
    }
}

/// A wall between two contour vertices, referenced by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallEdge {
    pub start: u32,
    pub end: u32,
}

impl WallEdge {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// Authoring-time description of one sector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    /// Outer floor/ceiling contour as (vertex id, position) pairs.
    /// Ids are unique; insertion order defines the contour order.
    /// Counter-clockwise winding.
    pub contour: Vec<(u32, Vec2)>,
    /// Optional hole contour (empty = no hole). Ids are unique and
    /// disjoint from the outer contour's. Clockwise winding.
    #[serde(default)]
    pub hole: Vec<(u32, Vec2)>,
    /// Wall edges; every referenced id must exist in a contour
    pub walls: Vec<WallEdge>,
    /// Floor height (world Y), strictly below the ceiling
    pub floor_height: f32,
    /// Ceiling height (world Y)
    pub ceiling_height: f32,
    pub floor_material: MaterialRef,
    pub ceiling_material: MaterialRef,
    pub wall_material: MaterialRef,
}

impl Blueprint {
    /// Look up a contour vertex position by id (outer first, then hole)
    pub fn vertex(&self, id: u32) -> Option<Vec2> {
        self.contour
            .iter()
            .chain(self.hole.iter())
            .find(|&&(vid, _)| vid == id)
            .map(|&(_, p)| p)
    }

    pub fn has_hole(&self) -> bool {
        !self.hole.is_empty()
    }

    /// Total number of contour vertices (outer plus hole)
    pub fn vertex_count(&self) -> usize {
        self.contour.len() + self.hole.len()
    }
}

/// Check if a float is valid (not NaN or Inf, within coordinate limits)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

/// Validate a material reference
fn validate_material_ref(mat: &MaterialRef, context: &str) -> Result<(), String> {
    if mat.pack.len() > limits::MAX_STRING_LEN {
        return Err(format!(
            "{}: material pack name too long ({} > {})",
            context,
            mat.pack.len(),
            limits::MAX_STRING_LEN
        ));
    }
    if mat.name.len() > limits::MAX_STRING_LEN {
        return Err(format!(
            "{}: material name too long ({} > {})",
            context,
            mat.name.len(),
            limits::MAX_STRING_LEN
        ));
    }
    Ok(())
}

/// Validate one contour: enough vertices, finite coordinates, no
/// zero-length edges, required winding
fn validate_contour(points: &[(u32, Vec2)], want_ccw: bool, context: &str) -> Result<(), String> {
    if points.len() < 3 {
        return Err(format!(
            "{}: needs at least 3 vertices, has {}",
            context,
            points.len()
        ));
    }

    for &(id, p) in points {
        if !is_valid_float(p.x) || !is_valid_float(p.y) {
            return Err(format!(
                "{}: vertex {} has invalid position ({}, {})",
                context, id, p.x, p.y
            ));
        }
    }

    let n = points.len();
    for i in 0..n {
        let (id, a) = points[i];
        let (_, b) = points[(i + 1) % n];
        if a.approx_eq(b) {
            return Err(format!("{}: zero-length edge at vertex {}", context, id));
        }
    }

    let positions: Vec<Vec2> = points.iter().map(|&(_, p)| p).collect();
    let area = signed_polygon_area(&positions);
    if area.abs() < EPSILON {
        return Err(format!("{}: degenerate (zero area)", context));
    }
    if want_ccw && area < 0.0 {
        return Err(format!("{}: must wind counter-clockwise", context));
    }
    if !want_ccw && area > 0.0 {
        return Err(format!("{}: must wind clockwise", context));
    }

    Ok(())
}

/// Validate a blueprint before compiling or saving it.
///
/// Content-authoring bugs (unknown wall vertices, inverted heights, wrong
/// contour winding) fail here rather than deep inside the mesh builder.
pub fn validate_blueprint(blueprint: &Blueprint) -> Result<(), String> {
    if blueprint.vertex_count() > limits::MAX_VERTICES {
        return Err(format!(
            "too many contour vertices ({} > {})",
            blueprint.vertex_count(),
            limits::MAX_VERTICES
        ));
    }
    if blueprint.walls.len() > limits::MAX_WALLS {
        return Err(format!(
            "too many walls ({} > {})",
            blueprint.walls.len(),
            limits::MAX_WALLS
        ));
    }

    validate_contour(&blueprint.contour, true, "contour")?;
    if blueprint.has_hole() {
        validate_contour(&blueprint.hole, false, "hole")?;
    }

    // Ids unique across both contours
    let mut seen = std::collections::HashSet::new();
    for &(id, _) in blueprint.contour.iter().chain(blueprint.hole.iter()) {
        if !seen.insert(id) {
            return Err(format!("duplicate vertex id {}", id));
        }
    }

    for (i, wall) in blueprint.walls.iter().enumerate() {
        if blueprint.vertex(wall.start).is_none() {
            return Err(format!(
                "walls[{}]: unknown start vertex id {}",
                i, wall.start
            ));
        }
        if blueprint.vertex(wall.end).is_none() {
            return Err(format!("walls[{}]: unknown end vertex id {}", i, wall.end));
        }
        if wall.start == wall.end {
            return Err(format!(
                "walls[{}]: start and end are the same vertex {}",
                i, wall.start
            ));
        }
    }

    if !is_valid_float(blueprint.floor_height) || !is_valid_float(blueprint.ceiling_height) {
        return Err(format!(
            "invalid heights ({}, {})",
            blueprint.floor_height, blueprint.ceiling_height
        ));
    }
    if blueprint.floor_height >= blueprint.ceiling_height {
        return Err(format!(
            "floor height {} not below ceiling height {}",
            blueprint.floor_height, blueprint.ceiling_height
        ));
    }

    validate_material_ref(&blueprint.floor_material, "floor material")?;
    validate_material_ref(&blueprint.ceiling_material, "ceiling material")?;
    validate_material_ref(&blueprint.wall_material, "wall material")?;

    Ok(())
}
