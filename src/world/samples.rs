//! Built-in sample blueprints
//!
//! Small hand-authored sectors used by the demo viewer when no blueprint
//! file is given, and as fixtures in tests.

use crate::geom::Vec2;
use super::blueprint::{Blueprint, MaterialRef, WallEdge};

/// A plain 4x4 room with four walls, floor at 0, ceiling at 3
pub fn square_room() -> Blueprint {
    Blueprint {
        contour: vec![
            (0, Vec2::new(0.0, 0.0)),
            (1, Vec2::new(4.0, 0.0)),
            (2, Vec2::new(4.0, 4.0)),
            (3, Vec2::new(0.0, 4.0)),
        ],
        hole: Vec::new(),
        walls: vec![
            WallEdge::new(0, 1),
            WallEdge::new(1, 2),
            WallEdge::new(2, 3),
            WallEdge::new(3, 0),
        ],
        floor_height: 0.0,
        ceiling_height: 3.0,
        floor_material: MaterialRef::new("proto", "floor"),
        ceiling_material: MaterialRef::new("proto", "ceiling"),
        wall_material: MaterialRef::new("proto", "wall"),
    }
}

/// An 8x8 hall with a 2x2 pillar in the middle.
///
/// The pillar is the hole contour (clockwise) and carries its own four
/// walls, so it reads as a solid column from floor to ceiling.
pub fn courtyard() -> Blueprint {
    Blueprint {
        contour: vec![
            (0, Vec2::new(0.0, 0.0)),
            (1, Vec2::new(8.0, 0.0)),
            (2, Vec2::new(8.0, 8.0)),
            (3, Vec2::new(0.0, 8.0)),
        ],
        hole: vec![
            (4, Vec2::new(3.0, 3.0)),
            (5, Vec2::new(3.0, 5.0)),
            (6, Vec2::new(5.0, 5.0)),
            (7, Vec2::new(5.0, 3.0)),
        ],
        walls: vec![
            WallEdge::new(0, 1),
            WallEdge::new(1, 2),
            WallEdge::new(2, 3),
            WallEdge::new(3, 0),
            WallEdge::new(4, 5),
            WallEdge::new(5, 6),
            WallEdge::new(6, 7),
            WallEdge::new(7, 4),
        ],
        floor_height: 0.0,
        ceiling_height: 4.0,
        floor_material: MaterialRef::new("proto", "floor"),
        ceiling_material: MaterialRef::new("proto", "ceiling"),
        wall_material: MaterialRef::new("proto", "wall"),
    }
}
