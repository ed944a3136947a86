//! Material texture loading
//!
//! Resolves a `MaterialRef` to a GPU texture. PNG files live under
//! `assets/materials/<pack>/<name>.png`; anything unresolved falls back to
//! a generated checkerboard so missing content is obvious instead of
//! invisible.

use macroquad::prelude::*;

use crate::world::MaterialRef;

/// Root directory for material packs
pub const MATERIALS_DIR: &str = "assets/materials";

/// Load the texture for a material reference, falling back to a
/// checkerboard when the reference is empty or the file cannot be read.
pub fn load_material(material: &MaterialRef) -> Texture2D {
    if material.is_valid() {
        let path = format!("{}/{}/{}.png", MATERIALS_DIR, material.pack, material.name);
        match load_material_file(&path) {
            Ok(texture) => return texture,
            Err(e) => {
                eprintln!("Failed to load material {}: {}", path, e);
            }
        }
    }
    checkerboard(64, 64, [158, 158, 166, 255], [96, 96, 104, 255])
}

/// Load a PNG file into a GPU texture with pixel-art filtering
fn load_material_file(path: &str) -> Result<Texture2D, String> {
    let img = image::open(path).map_err(|e| format!("{}", e))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let texture = Texture2D::from_rgba8(width as u16, height as u16, &rgba);
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

/// Create a checkerboard test texture
pub fn checkerboard(width: usize, height: usize, color1: [u8; 4], color2: [u8; 4]) -> Texture2D {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let checker = ((x / 4) + (y / 4)) % 2 == 0;
            pixels.extend_from_slice(if checker { &color1 } else { &color2 });
        }
    }
    let texture = Texture2D::from_rgba8(width as u16, height as u16, &pixels);
    texture.set_filter(FilterMode::Nearest);
    texture
}
