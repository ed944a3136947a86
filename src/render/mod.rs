//! Render facade for compiled sectors
//!
//! Thin wrappers around the graphics API: material texture resolution and
//! the upload/draw path. No geometry logic lives here.

mod facade;
mod texture;

pub use facade::{SectorMaterials, SectorRenderer};
pub use texture::{checkerboard, load_material, MATERIALS_DIR};
