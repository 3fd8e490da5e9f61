//! Polyline stroking and tessellation
//!
//! Expands a zero-width path into a ribbon of triangles, `half_width` to each
//! side, with fan caps at the ends and miter or fan joins at interior points.
//!
//! Vertices are always appended in pairs, right edge first then left edge, so
//! `index_pairs` can stitch the most recent pairs together as a strip.

use glam::{Vec2, Vec3};

use crate::draw::geometry::{MeshOutput, PolyLineOptions, UP};
use super::primitives::{perp_2d, rotate};

/// Append one ribbon vertex at `coord`, offset along `normal`.
///
/// With the scaling channel enabled the offset is left to the consumer: the
/// raw coordinate goes into `points` and `normal` into `scaling_vecs`.
/// Otherwise the offset is baked in as `coord + normal * half_width`.
pub fn add_polyline_vertex(coord: Vec3, normal: Vec2, uv: Vec2, half_width: f32, out: &mut MeshOutput) {
    if let Some(scaling_vecs) = out.scaling_vecs.as_mut() {
        out.points.push(coord);
        scaling_vecs.push(normal);
    } else {
        out.points.push(Vec3::new(
            coord.x + normal.x * half_width,
            coord.y + normal.y * half_width,
            coord.z,
        ));
    }
    out.normals.push(UP);

    if let Some(texcoords) = out.texcoords.as_mut() {
        texcoords.push(uv);
    }
}

/// Append indices for `pair_count` quads over the last `2 * (pair_count + 1)`
/// vertices, which must have been added as (right, left) pairs.
///
/// # Panics
/// When `vertex_count < 2 * (pair_count + 1)` the indices would underflow;
/// debug builds panic on that.
pub fn index_pairs(pair_count: u32, vertex_count: u32, indices: &mut Vec<u32>) {
    debug_assert!(
        pair_count == 0 || vertex_count >= 2 * (pair_count + 1),
        "index_pairs needs {} vertices for {} pairs, got {}",
        2 * (pair_count + 1),
        pair_count,
        vertex_count
    );
    indices.reserve(pair_count as usize * 6);
    for i in 0..pair_count {
        indices.push(vertex_count - 2 * i - 4);
        indices.push(vertex_count - 2 * i - 2);
        indices.push(vertex_count - 2 * i - 3);

        indices.push(vertex_count - 2 * i - 3);
        indices.push(vertex_count - 2 * i - 2);
        indices.push(vertex_count - 2 * i - 1);
    }
}

//  Fan of triangles around C     A       B
//  from direction CA to CB,       \ . . /
//  all sharing one uv              \   /
//                                   \./
//                                    C
/// Sweep `triangle_count` triangles around `center` from `dir_a` to `dir_b`
/// through the smaller angle between them.
///
/// Appends a center vertex, the `dir_a` vertex and one vertex per triangle.
pub fn add_fan(
    center: Vec3,
    dir_a: Vec2,
    dir_b: Vec2,
    uv: Vec2,
    triangle_count: u32,
    half_width: f32,
    out: &mut MeshOutput,
) {
    // Signed turn from A to B, in (-pi, pi]
    let cross = dir_a.x * dir_b.y - dir_a.y * dir_b.x;
    let angle = cross.atan2(dir_a.dot(dir_b));
    let step = angle / triangle_count as f32;

    let start = out.index_offset();

    add_polyline_vertex(center, Vec2::ZERO, uv, half_width, out);
    add_polyline_vertex(center, dir_a, uv, half_width, out);

    let mut radial = dir_a;
    for _ in 0..triangle_count {
        radial = rotate(radial, step);
        add_polyline_vertex(center, radial, uv, half_width, out);
    }

    for i in 0..triangle_count {
        out.indices.push(start);
        if angle > 0.0 {
            out.indices.push(start + i + 2);
            out.indices.push(start + i + 1);
        } else {
            out.indices.push(start + i + 1);
            out.indices.push(start + i + 2);
        }
    }
}

/// Half-disc cap at a line end, `2 * corner_count` triangles over 180 degrees.
///
/// Start caps sweep from `-normal` to `normal` behind the first point; end caps
/// sweep the other way past the last point. `corner_count == 0` is a butt cap
/// and appends nothing.
pub fn add_cap(coord: Vec3, normal: Vec2, corner_count: u32, is_start: bool, half_width: f32, out: &mut MeshOutput) {
    if corner_count < 1 {
        return;
    }

    let uv = Vec2::new(0.5, if is_start { 0.0 } else { 1.0 });
    let sign: f32 = if is_start { 1.0 } else { -1.0 };

    add_fan(coord, -sign * normal, sign * normal, uv, corner_count * 2, half_width, out);
}

/// Stroke `line` into a ribbon mesh appended to `out`.
///
/// Lines with fewer than 2 points produce nothing. Texcoords run u across the
/// ribbon (1 on the right edge, 0 on the left) and v from 0 at the start to 1
/// at the end, stepping by point index rather than by distance.
///
/// A joint where the line doubles back on itself (a 180 degree turn) has no
/// finite miter; its vertices come out as NaN.
pub fn build_polyline(line: &[Vec3], options: &PolyLineOptions, out: &mut MeshOutput) {
    let line_size = line.len();

    if line_size < 2 {
        return;
    }

    let half_width = options.half_width;
    let corners_on_cap = options.cap.corner_count();
    let triangles_on_join = options.join.triangle_count();

    let joins = line_size - 2;
    let cap_triangles = 2 * corners_on_cap as usize;
    let vertex_estimate = 4 + joins * (6 + triangles_on_join as usize) + 2 * (cap_triangles + 2);
    let index_estimate = 6 + joins * (12 + 3 * triangles_on_join as usize) + 2 * 3 * cap_triangles;
    out.points.reserve(vertex_estimate);
    out.normals.reserve(vertex_estimate);
    out.indices.reserve(index_estimate);
    if let Some(texcoords) = out.texcoords.as_mut() {
        texcoords.reserve(vertex_estimate);
    }
    if let Some(scaling_vecs) = out.scaling_vecs.as_mut() {
        scaling_vecs.reserve(vertex_estimate);
    }

    // First point, start cap then the opening pair
    let mut coord_curr = line[0];
    let mut coord_next = line[1];
    let mut norm_next = perp_2d(coord_curr, coord_next).normalize();

    add_cap(coord_curr, norm_next, corners_on_cap, true, half_width, out);
    add_polyline_vertex(coord_curr, norm_next, Vec2::new(1.0, 0.0), half_width, out);
    add_polyline_vertex(coord_curr, -norm_next, Vec2::new(0.0, 0.0), half_width, out);

    for i in 1..line_size - 1 {
        coord_curr = coord_next;
        coord_next = line[i + 1];

        let norm_prev = norm_next;
        norm_next = perp_2d(coord_curr, coord_next).normalize();

        // Bisector stretched so the ribbon keeps its width on both segments
        let mut miter = norm_prev + norm_next;
        let scale = (2.0 / (1.0 + norm_prev.dot(norm_next)) / miter.dot(miter)).sqrt();
        miter *= scale;

        let v = i as f32 / line_size as f32;

        if triangles_on_join == 0 {
            add_polyline_vertex(coord_curr, miter, Vec2::new(1.0, v), half_width, out);
            add_polyline_vertex(coord_curr, -miter, Vec2::new(0.0, v), half_width, out);
            index_pairs(1, out.index_offset(), &mut out.indices);
            continue;
        }

        // The fan goes on the outside of the turn, the inside edge meets at the miter
        let is_right_turn = norm_next.x * norm_prev.y - norm_next.y * norm_prev.x > 0.0;

        if is_right_turn {
            add_polyline_vertex(coord_curr, miter, Vec2::new(1.0, v), half_width, out);
            add_polyline_vertex(coord_curr, -norm_prev, Vec2::new(0.0, v), half_width, out);
            index_pairs(1, out.index_offset(), &mut out.indices);

            add_fan(coord_curr, -norm_prev, -norm_next, Vec2::new(0.0, v), triangles_on_join, half_width, out);

            add_polyline_vertex(coord_curr, miter, Vec2::new(1.0, v), half_width, out);
            add_polyline_vertex(coord_curr, -norm_next, Vec2::new(0.0, v), half_width, out);
            index_pairs(1, out.index_offset(), &mut out.indices);
        } else {
            add_polyline_vertex(coord_curr, norm_prev, Vec2::new(1.0, v), half_width, out);
            add_polyline_vertex(coord_curr, -miter, Vec2::new(0.0, v), half_width, out);
            index_pairs(1, out.index_offset(), &mut out.indices);

            add_fan(coord_curr, norm_prev, norm_next, Vec2::new(0.0, v), triangles_on_join, half_width, out);

            add_polyline_vertex(coord_curr, norm_next, Vec2::new(1.0, v), half_width, out);
            add_polyline_vertex(coord_curr, -miter, Vec2::new(0.0, v), half_width, out);
            index_pairs(1, out.index_offset(), &mut out.indices);
        }
    }

    // Last point, closing pair then the end cap
    add_polyline_vertex(coord_next, norm_next, Vec2::new(1.0, 1.0), half_width, out);
    add_polyline_vertex(coord_next, -norm_next, Vec2::new(0.0, 1.0), half_width, out);
    index_pairs(1, out.index_offset(), &mut out.indices);
    add_cap(coord_next, norm_next, corners_on_cap, false, half_width, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::geometry::{CapType, JoinType};
    use approx::assert_relative_eq;

    fn straight() -> Vec<Vec3> {
        vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0)]
    }

    #[test]
    fn test_short_line_is_noop() {
        let mut out = MeshOutput::new();
        build_polyline(&[], &PolyLineOptions::default(), &mut out);
        build_polyline(&[Vec3::ONE], &PolyLineOptions::default(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_straight_segment_quad() {
        let options = PolyLineOptions::new(CapType::Butt, JoinType::Miter, 0.5);
        let mut out = MeshOutput::new().with_texcoords();

        build_polyline(&straight(), &options, &mut out);

        assert_eq!(
            out.points,
            vec![
                Vec3::new(0.0, -0.5, 0.0),
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(4.0, -0.5, 0.0),
                Vec3::new(4.0, 0.5, 0.0),
            ]
        );
        assert_eq!(out.indices, vec![0, 2, 1, 1, 2, 3]);
        assert_eq!(
            out.texcoords,
            Some(vec![
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ])
        );
        assert!(out.validate().is_ok());
    }

    #[test]
    fn test_scaling_vecs_defer_width() {
        let options = PolyLineOptions::new(CapType::Butt, JoinType::Miter, 3.0);
        let mut out = MeshOutput::new().with_scaling_vecs();

        build_polyline(&straight(), &options, &mut out);

        // positions stay on the center line, offsets go to the scaling channel
        assert!(out.points.iter().all(|p| p.y == 0.0));
        assert_eq!(
            out.scaling_vecs,
            Some(vec![
                Vec2::new(0.0, -1.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(0.0, -1.0),
                Vec2::new(0.0, 1.0),
            ])
        );
        assert!(out.validate().is_ok());
    }

    #[test]
    fn test_cap_counts() {
        let mut out = MeshOutput::new();
        add_cap(Vec3::ZERO, Vec2::Y, 0, true, 1.0, &mut out);
        assert!(out.is_empty());

        for k in 1..5u32 {
            let mut out = MeshOutput::new();
            add_cap(Vec3::ZERO, Vec2::Y, k, true, 1.0, &mut out);
            assert_eq!(out.vertex_count(), (2 * k + 2) as usize);
            assert_eq!(out.indices.len(), (6 * k) as usize);
            assert!(out.validate().is_ok());
        }
    }

    #[test]
    fn test_cap_stays_behind_start() {
        // line heading +x has normal -y; start cap must bulge towards -x
        let mut out = MeshOutput::new();
        add_cap(Vec3::ZERO, Vec2::new(0.0, -1.0), 3, true, 1.0, &mut out);

        assert!(out.points.iter().all(|p| p.x <= 1e-6));
        let tip = out.points.iter().map(|p| p.x).fold(f32::MAX, f32::min);
        assert_relative_eq!(tip, -1.0, epsilon = 1e-5);
        for p in &out.points[1..] {
            assert_relative_eq!(p.truncate().length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_end_cap_points_forward() {
        let mut out = MeshOutput::new();
        add_cap(Vec3::ZERO, Vec2::new(0.0, -1.0), 3, false, 1.0, &mut out);

        assert!(out.points.iter().all(|p| p.x >= -1e-6));
        let tip = out.points.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert_relative_eq!(tip, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_fan_winding_follows_turn() {
        let mut ccw = MeshOutput::new();
        add_fan(Vec3::ZERO, Vec2::X, Vec2::Y, Vec2::ZERO, 2, 1.0, &mut ccw);
        assert_eq!(ccw.indices, vec![0, 2, 1, 0, 3, 2]);
        assert!(ccw.points[3].abs_diff_eq(Vec3::Y, 1e-6));

        let mut cw = MeshOutput::new();
        add_fan(Vec3::ZERO, Vec2::Y, Vec2::X, Vec2::ZERO, 2, 1.0, &mut cw);
        assert_eq!(cw.indices, vec![0, 1, 2, 0, 2, 3]);
        assert!(cw.points[3].abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_index_pairs_strip() {
        let mut indices = Vec::new();
        index_pairs(2, 6, &mut indices);
        assert_eq!(indices, vec![2, 4, 3, 3, 4, 5, 0, 2, 1, 1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "index_pairs needs")]
    #[cfg(debug_assertions)]
    fn test_index_pairs_rejects_short_buffer() {
        let mut indices = Vec::new();
        index_pairs(1, 2, &mut indices);
    }

    #[test]
    fn test_fan_join_counts() {
        let line = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 10.0, 0.0),
        ];
        let options = PolyLineOptions::new(CapType::Butt, JoinType::Round(5), 1.0);
        let mut out = MeshOutput::new().with_texcoords();

        build_polyline(&line, &options, &mut out);

        // 2 start + (2 + 7 fan + 2) joint + 2 end
        assert_eq!(out.vertex_count(), 15);
        // (6 + 15 + 6) joint + 6 end
        assert_eq!(out.indices.len(), 33);
        assert!(out.validate().is_ok());
    }

    #[test]
    fn test_left_turn_fans_the_outside() {
        let line = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 10.0, 0.0),
        ];
        let options = PolyLineOptions::new(CapType::Butt, JoinType::Round(4), 1.0);
        let mut out = MeshOutput::new();

        build_polyline(&line, &options, &mut out);

        // fan vertices (after the center) sit on the outer corner, at radius 1
        let center = Vec3::new(10.0, 0.0, 0.0);
        assert_eq!(out.points[4], center);
        for p in &out.points[5..10] {
            assert_relative_eq!((*p - center).length(), 1.0, epsilon = 1e-5);
            assert!(p.x >= 10.0 - 1e-5 && p.y <= 1e-5);
        }
    }

    #[test]
    fn test_bevel_join_single_triangle() {
        let line = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, -10.0, 0.0),
        ];
        let options = PolyLineOptions::new(CapType::Butt, JoinType::Bevel, 1.0);
        let mut out = MeshOutput::new();

        build_polyline(&line, &options, &mut out);

        // right turn: 2 start + (2 + 3 fan + 2) + 2 end
        assert_eq!(out.vertex_count(), 11);
        assert_eq!(out.indices.len(), 6 + 3 + 6 + 6);
        assert!(out.validate().is_ok());
    }
}
