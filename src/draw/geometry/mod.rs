//! Geometry module for tile features
//!
//! # Submodules
//! - `types` - Points, lines, polygons and stroke styles
//! - `output` - The mesh accumulator written by every builder
//! - `bounds` - Axis-aligned bounds for texture coordinate mapping

mod types;
mod output;
mod bounds;

pub use types::{
    Point,
    Line,
    Ring,
    Polygon,
    CapType,
    JoinType,
    PolyLineOptions,
    DEFAULT_ROUND_CAP_CORNERS,
    DEFAULT_ROUND_JOIN_TRIANGLES,
};

pub use output::{
    MeshOutput,
    PolygonOutput,
    PolyLineOutput,
    UP,
};

pub use bounds::{
    Rectangle,
    map_value,
};
