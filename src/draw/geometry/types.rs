//! Core geometry types for tile features
//!
//! Points live in the tile-local coordinate system (roughly [-1, 1] on x and y,
//! z carrying feature height). Lines and polygons are plain point containers.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A tile-space coordinate
pub type Point = Vec3;

/// An open polyline; needs at least 2 points to produce geometry
pub type Line = Vec<Point>;

/// A closed ring; the last point need not repeat the first
pub type Ring = Vec<Point>;

/// Outer ring first, holes after
pub type Polygon = Vec<Ring>;

/// Corners used by `CapType::Round` unless the style says otherwise
pub const DEFAULT_ROUND_CAP_CORNERS: u32 = 6;

/// Fan triangles used by `JoinType::Round` unless the style says otherwise
pub const DEFAULT_ROUND_JOIN_TRIANGLES: u32 = 5;

/// Line end style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapType {
    /// No geometry past the last vertex
    #[default]
    Butt,
    /// Two-corner fan
    Square,
    /// Fan with the given number of corners
    Round(u32),
}

impl CapType {
    pub fn round() -> Self {
        CapType::Round(DEFAULT_ROUND_CAP_CORNERS)
    }

    /// Number of corners swept by the cap fan; 0 disables the cap
    pub fn corner_count(self) -> u32 {
        match self {
            CapType::Butt => 0,
            CapType::Square => 2,
            CapType::Round(corners) => corners,
        }
    }
}

/// Line join style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    /// Sharp joint at the bisector; no extra triangles
    #[default]
    Miter,
    /// Single triangle across the outside of the turn
    Bevel,
    /// Fan with the given number of triangles
    Round(u32),
}

impl JoinType {
    pub fn round() -> Self {
        JoinType::Round(DEFAULT_ROUND_JOIN_TRIANGLES)
    }

    /// Number of fan triangles at each joint; 0 selects the plain miter
    pub fn triangle_count(self) -> u32 {
        match self {
            JoinType::Miter => 0,
            JoinType::Bevel => 1,
            JoinType::Round(triangles) => triangles,
        }
    }
}

/// Stroke style for `build_polyline`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyLineOptions {
    pub cap: CapType,
    pub join: JoinType,
    /// Half the ribbon thickness, in tile units
    pub half_width: f32,
}

impl PolyLineOptions {
    pub fn new(cap: CapType, join: JoinType, half_width: f32) -> Self {
        Self {
            cap,
            join,
            half_width,
        }
    }
}

impl Default for PolyLineOptions {
    fn default() -> Self {
        Self {
            cap: CapType::Butt,
            join: JoinType::Miter,
            half_width: 0.5,
        }
    }
}
