//! Mesh builders for vector map tiles
//!
//! Converts tile-local polygons and polylines into CPU-side triangle meshes:
//! parallel vertex, normal, texcoord and scaling-vector buffers plus a triangle
//! index list, ready to be uploaded by the renderer.
//!
//! - Polygons are triangulated (outer ring + holes) and can be extruded into
//!   vertical walls for 3D buildings.
//! - Polylines are stroked into ribbons with butt/square/round caps and
//!   miter/bevel/round joins.
//!
//! Every builder appends to a `MeshOutput` and offsets its indices by what is
//! already there, so a whole tile layer can be batched into one buffer.
//!
//! # Example
//! ```
//! use glam::Vec3;
//! use tile_builders::{build_polyline, CapType, JoinType, MeshOutput, PolyLineOptions};
//!
//! let line = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)];
//! let options = PolyLineOptions::new(CapType::Butt, JoinType::Miter, 1.0);
//! let mut out = MeshOutput::new().with_texcoords();
//!
//! build_polyline(&line, &options, &mut out);
//! assert_eq!(out.vertex_count(), 4);
//! assert_eq!(out.triangle_count(), 2);
//! ```

pub mod draw;
pub mod error;

pub use draw::geometry::{
    CapType,
    JoinType,
    Line,
    MeshOutput,
    Point,
    PolyLineOptions,
    PolyLineOutput,
    Polygon,
    PolygonOutput,
    Ring,
};

pub use draw::tessellation::{
    build_polygon,
    build_polygon_extrusion,
    build_polyline,
    build_polygons,
    build_polylines,
    is_on_tile_edge,
    par_build_polygons,
    par_build_polylines,
};

pub use error::{MeshError, MeshResult};
