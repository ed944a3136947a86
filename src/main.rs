//! Sectorforge - sector blueprint compiler and viewer
//!
//! Compiles a 2D sector blueprint (floor contour, wall edges, heights,
//! materials) into a renderable 3D mesh and displays it with an orbit
//! camera. Pass a blueprint RON file as the first argument, or run with no
//! arguments to view the built-in courtyard sample.

use macroquad::prelude::*;

mod geom;
mod render;
mod world;

use render::{SectorMaterials, SectorRenderer};
use world::{build_sector, load_blueprint, samples, Blueprint};

fn window_conf() -> Conf {
    Conf {
        window_title: "Sectorforge".to_string(),
        window_width: 1024,
        window_height: 768,
        ..Default::default()
    }
}

/// Orbit camera state around a fixed target
struct OrbitCamera {
    target: Vec3,
    distance: f32,
    azimuth: f32,
    elevation: f32,
}

impl OrbitCamera {
    /// Frame the blueprint: target the sector's center, pull back far
    /// enough to see all of it
    fn framing(blueprint: &Blueprint) -> Self {
        let mut min = vec2(f32::MAX, f32::MAX);
        let mut max = vec2(f32::MIN, f32::MIN);
        for &(_, p) in blueprint.contour.iter() {
            min = min.min(vec2(p.x, p.y));
            max = max.max(vec2(p.x, p.y));
        }
        let center = (min + max) * 0.5;
        let mid_height = (blueprint.floor_height + blueprint.ceiling_height) * 0.5;
        let extent = (max - min).max_element().max(1.0);

        Self {
            target: vec3(center.x, mid_height, center.y),
            distance: extent * 1.6,
            azimuth: 0.8,
            elevation: 0.4,
        }
    }

    fn eye(&self) -> Vec3 {
        let offset = vec3(
            self.azimuth.cos() * self.elevation.cos(),
            self.elevation.sin(),
            self.azimuth.sin() * self.elevation.cos(),
        );
        self.target + offset * self.distance
    }

    /// Right-drag orbits, wheel zooms
    fn update(&mut self, mouse_delta: Vec2) {
        if is_mouse_button_down(MouseButton::Right) {
            self.azimuth += mouse_delta.x * 0.01;
            self.elevation = (self.elevation + mouse_delta.y * 0.01).clamp(-1.4, 1.4);
        }
        let (_, wheel_y) = mouse_wheel();
        if wheel_y != 0.0 {
            self.distance = (self.distance * (1.0 - wheel_y.signum() * 0.1)).clamp(1.0, 500.0);
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let blueprint = match std::env::args().nth(1) {
        Some(path) => match load_blueprint(&path) {
            Ok(bp) => bp,
            Err(e) => {
                eprintln!("Failed to load blueprint {}: {}", path, e);
                return;
            }
        },
        None => samples::courtyard(),
    };

    let mesh = match build_sector(&blueprint) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("Failed to compile sector: {}", e);
            return;
        }
    };

    let materials = SectorMaterials::load(&mesh);
    let renderer = SectorRenderer::upload(&mesh, &materials);

    let mut camera = OrbitCamera::framing(&blueprint);
    let mut last_mouse: Vec2 = mouse_position().into();

    loop {
        let mouse: Vec2 = mouse_position().into();
        camera.update(mouse - last_mouse);
        last_mouse = mouse;

        clear_background(Color::from_rgba(20, 22, 28, 255));

        set_camera(&Camera3D {
            position: camera.eye(),
            target: camera.target,
            up: vec3(0.0, 1.0, 0.0),
            ..Default::default()
        });
        renderer.draw();

        set_default_camera();
        let status = format!(
            "{} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );
        draw_text(&status, 16.0, 24.0, 20.0, Color::from_rgba(150, 150, 160, 255));
        draw_text(
            "RMB drag: orbit | Wheel: zoom",
            16.0,
            44.0,
            20.0,
            Color::from_rgba(150, 150, 160, 255),
        );

        next_frame().await
    }
}
