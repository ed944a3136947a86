//! Sector mesh building
//!
//! Compiles a validated blueprint into one vertex buffer and one index
//! buffer partitioned into wall, floor, and ceiling ranges. Pure function
//! of the blueprint; GPU upload lives in the render facade.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::geom::merge::MergeError;
use crate::geom::{merge_hole, triangulate, Vec2, Vec3, EPSILON};
use super::blueprint::{validate_blueprint, Blueprint, MaterialRef};

/// World units to texture repeats
pub const TEXTURE_SCALE: f32 = 0.08;

/// One mesh vertex with a full tangent frame.
///
/// Field order is the upload layout: position, normal, tangent, bitangent,
/// uv. `repr(C)` keeps it stable so the buffer can go to the GPU as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub uv: Vec2,
}

/// A compiled sector: vertex buffer, partitioned index buffer, materials.
/// Built once from a blueprint, immutable afterwards.
#[derive(Debug, Clone)]
pub struct SectorMesh {
    /// Wall vertices, then floor vertices, then ceiling vertices
    pub vertices: Vec<MeshVertex>,
    /// Wall indices, then floor indices, then ceiling indices
    pub indices: Vec<u32>,
    wall_index_end: usize,
    floor_index_end: usize,
    pub floor_material: MaterialRef,
    pub ceiling_material: MaterialRef,
    pub wall_material: MaterialRef,
}

impl SectorMesh {
    /// Index range for the wall triangles
    pub fn wall_range(&self) -> Range<usize> {
        0..self.wall_index_end
    }

    /// Index range for the floor triangles
    pub fn floor_range(&self) -> Range<usize> {
        self.wall_index_end..self.floor_index_end
    }

    /// Index range for the ceiling triangles
    pub fn ceiling_range(&self) -> Range<usize> {
        self.floor_index_end..self.indices.len()
    }
}

/// Error building a sector mesh from a blueprint
#[derive(Debug)]
pub enum BuildError {
    /// Malformed blueprint (content-authoring bug, fails fast)
    Validation(String),
    /// The hole could not be bridged to the outer contour
    Bridge(MergeError),
}

impl From<MergeError> for BuildError {
    fn from(e: MergeError) -> Self {
        BuildError::Bridge(e)
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Validation(e) => write!(f, "invalid blueprint: {}", e),
            BuildError::Bridge(e) => write!(f, "hole merge failed: {}", e),
        }
    }
}

/// Compile a blueprint into a sector mesh.
///
/// Walls first (one quad per wall edge), then the floor (triangulated
/// contour, merged with the hole when one exists), then the ceiling (floor
/// lifted to ceiling height with flipped normal and winding).
pub fn build_sector(blueprint: &Blueprint) -> Result<SectorMesh, BuildError> {
    validate_blueprint(blueprint).map_err(BuildError::Validation)?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let floor_y = blueprint.floor_height;
    let ceiling_y = blueprint.ceiling_height;
    let wall_height = ceiling_y - floor_y;

    // Walls: 4 vertices per edge (start-floor, start-ceiling, end-floor,
    // end-ceiling), two triangles facing the normal side
    for wall in &blueprint.walls {
        let start = blueprint
            .vertex(wall.start)
            .ok_or_else(|| BuildError::Validation(format!("unknown vertex id {}", wall.start)))?;
        let end = blueprint
            .vertex(wall.end)
            .ok_or_else(|| BuildError::Validation(format!("unknown vertex id {}", wall.end)))?;

        let span = end - start;
        let length = span.length();
        if length < EPSILON {
            continue;
        }
        let dir = span * (1.0 / length);

        let normal = Vec3::new(-dir.y, 0.0, dir.x);
        let tangent = Vec3::new(dir.x, 0.0, dir.y);
        let bitangent = Vec3::DOWN;

        let u_max = length * TEXTURE_SCALE;
        let v_max = wall_height * TEXTURE_SCALE;

        let base = vertices.len() as u32;
        let corners = [
            (start, floor_y, Vec2::new(0.0, v_max)),
            (start, ceiling_y, Vec2::new(0.0, 0.0)),
            (end, floor_y, Vec2::new(u_max, v_max)),
            (end, ceiling_y, Vec2::new(u_max, 0.0)),
        ];
        for (p, y, uv) in corners {
            vertices.push(MeshVertex {
                position: Vec3::new(p.x, y, p.y),
                normal,
                tangent,
                bitangent,
                uv,
            });
        }
        indices.extend_from_slice(&[base, base + 2, base + 1, base + 1, base + 2, base + 3]);
    }

    let wall_vertex_count = vertices.len();
    let wall_index_end = indices.len();

    // Floor polygon in floor-local indices: outer contour, then hole
    let floor_points: Vec<Vec2> = blueprint
        .contour
        .iter()
        .chain(blueprint.hole.iter())
        .map(|&(_, p)| p)
        .collect();
    let outer: Vec<(u32, Vec2)> = blueprint
        .contour
        .iter()
        .enumerate()
        .map(|(i, &(_, p))| (i as u32, p))
        .collect();

    let polygon = if blueprint.has_hole() {
        let hole: Vec<(u32, Vec2)> = blueprint
            .hole
            .iter()
            .enumerate()
            .map(|(i, &(_, p))| ((blueprint.contour.len() + i) as u32, p))
            .collect();
        merge_hole(&outer, &hole)?
    } else {
        outer
    };
    let floor_triangles = triangulate(&polygon);

    // Floor vertices: one per contour vertex, facing up
    let floor_base = wall_vertex_count as u32;
    for &p in &floor_points {
        vertices.push(MeshVertex {
            position: Vec3::new(p.x, floor_y, p.y),
            normal: Vec3::UP,
            tangent: Vec3::new(1.0, 0.0, 0.0),
            bitangent: Vec3::new(0.0, 0.0, 1.0),
            uv: p * TEXTURE_SCALE,
        });
    }
    indices.extend(floor_triangles.iter().map(|&i| floor_base + i));
    let floor_index_end = indices.len();

    // Ceiling: floor vertices lifted and flipped, winding reversed
    let ceiling_base = (wall_vertex_count + floor_points.len()) as u32;
    for &p in &floor_points {
        vertices.push(MeshVertex {
            position: Vec3::new(p.x, ceiling_y, p.y),
            normal: Vec3::DOWN,
            tangent: Vec3::new(1.0, 0.0, 0.0),
            bitangent: Vec3::new(0.0, 0.0, 1.0),
            uv: p * TEXTURE_SCALE,
        });
    }
    for tri in floor_triangles.chunks(3) {
        indices.push(ceiling_base + tri[0]);
        indices.push(ceiling_base + tri[2]);
        indices.push(ceiling_base + tri[1]);
    }

    Ok(SectorMesh {
        vertices,
        indices,
        wall_index_end,
        floor_index_end,
        floor_material: blueprint.floor_material.clone(),
        ceiling_material: blueprint.ceiling_material.clone(),
        wall_material: blueprint.wall_material.clone(),
    })
}
