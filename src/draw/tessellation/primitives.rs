//! Small 2D helpers shared by the builders

use glam::{Vec2, Vec3};

/// Default tolerance for `values_within_tolerance`
pub const DEFAULT_TOLERANCE: f32 = 0.001;

/// How close a segment must run to the tile border to count as on it
pub const TILE_EDGE_TOLERANCE: f32 = 0.0002;

const TILE_MIN: Vec2 = Vec2::new(-1.0, -1.0);
const TILE_MAX: Vec2 = Vec2::new(1.0, 1.0);

/// Perpendicular of the segment a -> b in the xy plane, pointing to its right.
/// Same length as the segment; callers normalize.
pub fn perp_2d(a: Vec3, b: Vec3) -> Vec2 {
    Vec2::new(b.y - a.y, a.x - b.x)
}

/// Rotate `v` counter-clockwise by `radians`
pub fn rotate(v: Vec2, radians: f32) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

pub fn values_within_tolerance(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() < tolerance
}

/// True when the segment a -> b lies along one of the four tile borders.
/// Used to drop outline edges that only exist because a feature was clipped.
pub fn is_on_tile_edge(a: Vec3, b: Vec3) -> bool {
    let both_near = |pa: f32, pb: f32, edge: f32| {
        values_within_tolerance(pa, edge, TILE_EDGE_TOLERANCE)
            && values_within_tolerance(pb, edge, TILE_EDGE_TOLERANCE)
    };

    both_near(a.x, b.x, TILE_MIN.x)
        || both_near(a.x, b.x, TILE_MAX.x)
        || both_near(a.y, b.y, TILE_MIN.y)
        || both_near(a.y, b.y, TILE_MAX.y)
}
