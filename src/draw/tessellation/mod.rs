//! Tessellation module for tile features
//!
//! Turns tile-space polygons and polylines into triangle meshes appended to a
//! shared `MeshOutput`.
//!
//! # Submodules
//! - `primitives` - 2D vector helpers and the tile edge test
//! - `polygon` - Polygon triangulation using earcut, plus wall extrusion
//! - `polyline` - Polyline stroking with caps and joins
//! - `batch` - Serial and rayon-parallel meshing of feature lists

mod primitives;
mod polygon;
mod polyline;
mod batch;

pub use primitives::{
    perp_2d,
    rotate,
    values_within_tolerance,
    is_on_tile_edge,
    DEFAULT_TOLERANCE,
    TILE_EDGE_TOLERANCE,
};

pub use polygon::{
    build_polygon,
    build_polygon_extrusion,
};

pub use polyline::{
    build_polyline,
    add_polyline_vertex,
    add_fan,
    add_cap,
    index_pairs,
};

pub use batch::{
    build_polygons,
    build_polygon_extrusions,
    build_polylines,
    par_build_polygons,
    par_build_polylines,
};
