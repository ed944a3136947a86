//! GPU upload and draw calls for compiled sectors
//!
//! The geometry compiler hands over an immutable `SectorMesh`; everything
//! GPU-side lives here. A `SectorRenderer` keeps one mesh per index range
//! (walls, floor, ceiling), each bound to its material texture, and drawing
//! a sector is exactly three indexed draw calls. GPU resources are owned by
//! the renderer and released when it drops. The render context is
//! single-threaded; renderers stay on the thread that created them.

use macroquad::models::{draw_mesh, Mesh as GpuMesh, Vertex as GpuVertex};
use macroquad::prelude::*;

use crate::world::{MeshVertex, SectorMesh};
use super::texture::load_material;

/// The three resolved material textures of a sector
pub struct SectorMaterials {
    pub floor: Texture2D,
    pub ceiling: Texture2D,
    pub wall: Texture2D,
}

impl SectorMaterials {
    /// Resolve the mesh's material references to textures
    pub fn load(mesh: &SectorMesh) -> Self {
        Self {
            floor: load_material(&mesh.floor_material),
            ceiling: load_material(&mesh.ceiling_material),
            wall: load_material(&mesh.wall_material),
        }
    }
}

/// An uploaded sector, ready to draw
pub struct SectorRenderer {
    walls: GpuMesh,
    floor: GpuMesh,
    ceiling: GpuMesh,
}

impl SectorRenderer {
    /// Upload a compiled sector's vertex buffer and the three index ranges
    pub fn upload(mesh: &SectorMesh, materials: &SectorMaterials) -> Self {
        let vertices: Vec<GpuVertex> = mesh.vertices.iter().map(gpu_vertex).collect();

        Self {
            walls: range_mesh(
                &vertices,
                &mesh.indices[mesh.wall_range()],
                materials.wall.clone(),
            ),
            floor: range_mesh(
                &vertices,
                &mesh.indices[mesh.floor_range()],
                materials.floor.clone(),
            ),
            ceiling: range_mesh(
                &vertices,
                &mesh.indices[mesh.ceiling_range()],
                materials.ceiling.clone(),
            ),
        }
    }

    /// Draw the sector: walls, floor, ceiling, one call each
    pub fn draw(&self) {
        draw_mesh(&self.walls);
        draw_mesh(&self.floor);
        draw_mesh(&self.ceiling);
    }
}

fn range_mesh(vertices: &[GpuVertex], indices: &[u32], texture: Texture2D) -> GpuMesh {
    GpuMesh {
        vertices: vertices.to_vec(),
        indices: indices.iter().map(|&i| i as u16).collect(),
        texture: Some(texture),
    }
}

fn gpu_vertex(v: &MeshVertex) -> GpuVertex {
    let mut vertex = GpuVertex::new(v.position.x, v.position.y, v.position.z, v.uv.x, v.uv.y, WHITE);
    vertex.normal = vec4(v.normal.x, v.normal.y, v.normal.z, 0.0);
    vertex
}
