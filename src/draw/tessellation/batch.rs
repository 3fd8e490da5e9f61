//! Batch meshing for many features at once
//!
//! The serial helpers write every feature into one accumulator and keep going
//! when a polygon fails to tessellate. The parallel helpers mesh each feature
//! into its own accumulator on the rayon pool and stitch the results together
//! in input order, so they produce exactly what the serial helpers would.

use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, warn};

use crate::draw::geometry::{Line, MeshOutput, PolyLineOptions, Polygon};
use super::polygon::{build_polygon, build_polygon_extrusion};
use super::polyline::build_polyline;

/// Triangulate every polygon into `out`.
/// Returns how many polygons failed; those contribute no geometry.
pub fn build_polygons(polygons: &[Polygon], out: &mut MeshOutput) -> usize {
    let start = Instant::now();
    let mut failures = 0;

    for (index, polygon) in polygons.iter().enumerate() {
        if let Err(err) = build_polygon(polygon, out) {
            warn!(feature = index, error = %err, "skipping polygon");
            failures += 1;
        }
    }

    debug!(
        polygons = polygons.len(),
        failures,
        vertices = out.vertex_count(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "built polygon batch"
    );

    failures
}

/// Build the walls of every polygon into `out`, all down to `min_height`
pub fn build_polygon_extrusions(polygons: &[Polygon], min_height: f32, out: &mut MeshOutput) {
    for polygon in polygons {
        build_polygon_extrusion(polygon, min_height, out);
    }
}

/// Stroke every line into `out` with the same style
pub fn build_polylines(lines: &[Line], options: &PolyLineOptions, out: &mut MeshOutput) {
    for line in lines {
        build_polyline(line, options, out);
    }
}

/// Parallel `build_polygons`. The result uses `template`'s channel layout.
/// Returns the merged mesh and the number of failed polygons.
pub fn par_build_polygons(polygons: &[Polygon], template: &MeshOutput) -> (MeshOutput, usize) {
    let start = Instant::now();

    let (out, failures) = polygons
        .par_iter()
        .enumerate()
        .map(|(index, polygon)| {
            let mut out = template.empty_like();
            match build_polygon(polygon, &mut out) {
                Ok(()) => (out, 0),
                Err(err) => {
                    warn!(feature = index, error = %err, "skipping polygon");
                    (out, 1)
                }
            }
        })
        .reduce(
            || (template.empty_like(), 0),
            |(mut merged, failed_a), (part, failed_b)| {
                merged.extend_same_layout(part);
                (merged, failed_a + failed_b)
            },
        );

    debug!(
        polygons = polygons.len(),
        failures,
        vertices = out.vertex_count(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "built polygon batch in parallel"
    );

    (out, failures)
}

/// Parallel `build_polylines`. The result uses `template`'s channel layout.
pub fn par_build_polylines(lines: &[Line], options: &PolyLineOptions, template: &MeshOutput) -> MeshOutput {
    let start = Instant::now();

    let out = lines
        .par_iter()
        .map(|line| {
            let mut out = template.empty_like();
            build_polyline(line, options, &mut out);
            out
        })
        .reduce(
            || template.empty_like(),
            |mut merged, part| {
                merged.extend_same_layout(part);
                merged
            },
        );

    debug!(
        lines = lines.len(),
        vertices = out.vertex_count(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "built polyline batch in parallel"
    );

    out
}
