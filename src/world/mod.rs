//! World module - sector blueprints and mesh compilation
//!
//! A sector starts life as a `Blueprint` (2D contour, wall edges, heights,
//! materials), authored by hand or loaded from a RON file, and is compiled
//! once at load time into an immutable `SectorMesh` ready for upload.
//!
//! Note: the save path and a few accessors are API surface for external
//! tooling and tests rather than the viewer binary.

#![allow(dead_code)]

mod blueprint;
mod io;
mod mesh;
pub mod samples;

pub use blueprint::{validate_blueprint, Blueprint, MaterialRef, WallEdge};
pub use io::{
    load_blueprint, load_blueprint_from_str, save_blueprint, serialize_blueprint, BlueprintError,
};
pub use mesh::{build_sector, BuildError, MeshVertex, SectorMesh, TEXTURE_SCALE};
