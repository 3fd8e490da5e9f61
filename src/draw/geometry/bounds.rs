//! Axis-aligned bounds used to derive polygon texture coordinates

use glam::{Vec2, Vec3};

/// Axis-aligned rectangle in the xy plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rectangle {
    /// Rectangle with its corner at (x, y)
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn grow_to_include_point(&mut self, point: Vec3) {
        self.min = self.min.min(point.truncate());
        self.max = self.max.max(point.truncate());
    }

    pub fn grow_to_include(&mut self, points: &[Vec3]) {
        for &p in points {
            self.grow_to_include_point(p);
        }
    }
}

/// Linearly map `value` from [in_min, in_max] to [out_min, out_max].
/// An empty input range maps everything to `out_min`.
pub fn map_value(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if (in_max - in_min).abs() < f32::EPSILON {
        return out_min;
    }
    (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min
}
