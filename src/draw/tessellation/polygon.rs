//! Polygon triangulation and wall extrusion
//!
//! Filled polygons go through earcut (outer ring + holes). Extrusion builds the
//! vertical side walls of a footprint down to a base height; the roof itself is
//! a separate `build_polygon` call.

use glam::{Vec2, Vec3};
use tracing::{trace, warn};

use crate::draw::geometry::{map_value, MeshOutput, Polygon, Rectangle, UP};
use crate::error::{MeshError, MeshResult};

/// Coordinates per vertex handed to earcut; z rides along untouched
const TESS_DIMENSIONS: usize = 3;

/// Triangulate a filled polygon with holes into `out`.
///
/// Rings with fewer than 3 points are skipped. The first remaining ring is the
/// outer contour, the rest are holes. Every vertex gets an upward normal, and
/// when `out` has texcoords enabled, (x, y) is mapped into [0, 1] over the
/// polygon's bounds.
///
/// Returns `Err` without touching `out` when the polygon cannot be
/// triangulated; an empty polygon is not an error.
pub fn build_polygon(polygon: &Polygon, out: &mut MeshOutput) -> MeshResult<()> {
    let rings: Vec<&[Vec3]> = polygon
        .iter()
        .map(Vec::as_slice)
        .filter(|ring| ring.len() >= 3)
        .collect();

    if rings.is_empty() {
        trace!(rings = polygon.len(), "skipping polygon without a usable ring");
        return Ok(());
    }

    // Flat coordinate array + hole start indices for earcut
    let vertex_total: usize = rings.iter().map(|ring| ring.len()).sum();
    let mut flat_coords: Vec<f64> = Vec::with_capacity(vertex_total * TESS_DIMENSIONS);
    let mut hole_indices: Vec<usize> = Vec::with_capacity(rings.len() - 1);
    let mut vertices: Vec<Vec3> = Vec::with_capacity(vertex_total);

    for (ring_index, ring) in rings.iter().enumerate() {
        if ring_index > 0 {
            hole_indices.push(vertices.len());
        }
        for &p in ring.iter() {
            flat_coords.push(p.x as f64);
            flat_coords.push(p.y as f64);
            flat_coords.push(p.z as f64);
            vertices.push(p);
        }
    }

    let fail = |reason: String| {
        warn!(
            rings = rings.len(),
            vertices = vertices.len(),
            %reason,
            "tessellator cannot tessellate polygon"
        );
        Err(MeshError::tessellation(rings.len(), vertices.len(), reason))
    };

    if let Some(bad) = vertices.iter().position(|p| !p.is_finite()) {
        return fail(format!("non-finite coordinate at vertex {}", bad));
    }

    let triangles = match earcutr::earcut(&flat_coords, &hole_indices, TESS_DIMENSIONS) {
        Ok(triangles) => triangles,
        Err(err) => return fail(format!("{:?}", err)),
    };

    // Bounds are seeded at the very first point of the first ring, then grown
    // by every ring, degenerate ones included
    let bounds = out.texcoords.is_some().then(|| {
        let mut bounds = polygon
            .first()
            .and_then(|ring| ring.first())
            .map(|p| Rectangle::new(p.x, p.y, 0.0, 0.0))
            .unwrap_or_default();
        for ring in polygon {
            bounds.grow_to_include(ring);
        }
        bounds
    });

    let offset = out.index_offset();

    out.indices.reserve(triangles.len());
    out.indices.extend(triangles.iter().map(|&i| i as u32 + offset));

    out.points.reserve(vertices.len());
    out.normals.reserve(vertices.len());
    if let (Some(texcoords), Some(bounds)) = (out.texcoords.as_mut(), bounds) {
        texcoords.reserve(vertices.len());
        texcoords.extend(vertices.iter().map(|p| {
            Vec2::new(
                map_value(p.x, bounds.min.x, bounds.max.x, 0.0, 1.0),
                map_value(p.y, bounds.min.y, bounds.max.y, 0.0, 1.0),
            )
        }));
    }
    out.normals.extend(std::iter::repeat(UP).take(vertices.len()));
    out.points.extend(vertices);

    Ok(())
}

/// Build the side walls of `polygon`, from each ring's own heights down to
/// `min_height`.
///
/// Each pair of consecutive points becomes one quad (two triangles) with a
/// flat outward normal. Rings are not wrapped: repeat the first point at the
/// end of a ring to get its closing wall.
pub fn build_polygon_extrusion(polygon: &Polygon, min_height: f32, out: &mut MeshOutput) {
    let mut offset = out.index_offset();

    for ring in polygon {
        let segments = ring.len().saturating_sub(1);
        out.points.reserve(segments * 4);
        out.normals.reserve(segments * 4);
        out.indices.reserve(segments * 6);
        if let Some(texcoords) = out.texcoords.as_mut() {
            texcoords.reserve(segments * 4);
        }

        for edge in ring.windows(2) {
            let (top_a, top_b) = (edge[0], edge[1]);
            let normal = UP.cross(top_b - top_a).normalize_or_zero();

            out.points.push(top_a);
            out.points.push(top_b);
            out.points.push(Vec3::new(top_a.x, top_a.y, min_height));
            out.points.push(Vec3::new(top_b.x, top_b.y, min_height));
            out.normals.extend_from_slice(&[normal; 4]);

            out.indices.extend_from_slice(&[
                offset, offset + 1, offset + 2,
                offset + 1, offset + 3, offset + 2,
            ]);

            if let Some(texcoords) = out.texcoords.as_mut() {
                texcoords.extend_from_slice(&[
                    Vec2::new(1.0, 0.0),
                    Vec2::new(0.0, 0.0),
                    Vec2::new(1.0, 1.0),
                    Vec2::new(0.0, 1.0),
                ]);
            }

            offset += 4;
        }
    }
}
