//! Mesh accumulator shared by the polygon and polyline builders
//!
//! Every builder appends to a `MeshOutput` and offsets its new indices by the
//! vertex count it found on entry, so many features can be batched into one
//! buffer set. Texcoords and scaling vectors are optional channels: when a
//! channel is `None` the builders skip it.

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::error::{MeshError, MeshResult};

/// Face normal of flat tile geometry
pub const UP: Vec3 = Vec3::Z;

/// Append-only vertex/index buffers ready for upload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeshOutput {
    pub points: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texcoords: Option<Vec<Vec2>>,
    /// Per-vertex extrusion direction for lines widened in screen space
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaling_vecs: Option<Vec<Vec2>>,
    pub indices: Vec<u32>,
}

/// Output of the polygon builders
pub type PolygonOutput = MeshOutput;

/// Output of the polyline builder
pub type PolyLineOutput = MeshOutput;

impl MeshOutput {
    /// Accumulator with only positions, normals and indices
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the texcoord channel
    pub fn with_texcoords(mut self) -> Self {
        self.texcoords.get_or_insert_with(Vec::new);
        self
    }

    /// Enable the scaling vector channel; polyline widths are then left to the shader
    pub fn with_scaling_vecs(mut self) -> Self {
        self.scaling_vecs.get_or_insert_with(Vec::new);
        self
    }

    /// Empty accumulator with the same channels enabled
    pub fn empty_like(&self) -> Self {
        Self {
            points: Vec::new(),
            normals: Vec::new(),
            texcoords: self.texcoords.as_ref().map(|_| Vec::new()),
            scaling_vecs: self.scaling_vecs.as_ref().map(|_| Vec::new()),
            indices: Vec::new(),
        }
    }

    pub fn uses_texcoords(&self) -> bool {
        self.texcoords.is_some()
    }

    pub fn uses_scaling_vecs(&self) -> bool {
        self.scaling_vecs.is_some()
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.indices.is_empty()
    }

    /// Drop all geometry, keeping the channel layout and allocations
    pub fn clear(&mut self) {
        self.points.clear();
        self.normals.clear();
        if let Some(texcoords) = self.texcoords.as_mut() {
            texcoords.clear();
        }
        if let Some(scaling_vecs) = self.scaling_vecs.as_mut() {
            scaling_vecs.clear();
        }
        self.indices.clear();
    }

    /// Base index for geometry appended next
    pub(crate) fn index_offset(&self) -> u32 {
        self.points.len() as u32
    }

    /// True when both accumulators enable the same optional channels
    pub fn has_same_layout(&self, other: &MeshOutput) -> bool {
        self.texcoords.is_some() == other.texcoords.is_some()
            && self.scaling_vecs.is_some() == other.scaling_vecs.is_some()
    }

    /// Append another accumulator's geometry, rebasing its indices.
    ///
    /// Both sides must enable the same channels; otherwise nothing is
    /// appended and `MeshError::InvalidOutput` is returned.
    pub fn append(&mut self, other: MeshOutput) -> MeshResult<()> {
        if !self.has_same_layout(&other) {
            return Err(MeshError::invalid_output(format!(
                "cannot append a mesh with texcoords={} scaling_vecs={} to one with texcoords={} scaling_vecs={}",
                other.uses_texcoords(),
                other.uses_scaling_vecs(),
                self.uses_texcoords(),
                self.uses_scaling_vecs(),
            )));
        }
        self.extend_same_layout(other);
        Ok(())
    }

    /// `append` for accumulators known to share a layout, e.g. ones made by `empty_like`
    pub(crate) fn extend_same_layout(&mut self, other: MeshOutput) {
        debug_assert!(self.has_same_layout(&other), "mesh channel layouts differ");
        let offset = self.index_offset();

        self.points.extend(other.points);
        self.normals.extend(other.normals);
        if let (Some(texcoords), Some(theirs)) = (self.texcoords.as_mut(), other.texcoords) {
            texcoords.extend(theirs);
        }
        if let (Some(scaling_vecs), Some(theirs)) = (self.scaling_vecs.as_mut(), other.scaling_vecs) {
            scaling_vecs.extend(theirs);
        }
        self.indices.extend(other.indices.into_iter().map(|i| i + offset));
    }

    /// Check the buffer invariants downstream upload code relies on
    pub fn validate(&self) -> MeshResult<()> {
        let count = self.points.len();

        if self.normals.len() != count {
            return Err(MeshError::invalid_output(format!(
                "{} normals for {} points",
                self.normals.len(),
                count
            )));
        }
        if let Some(texcoords) = &self.texcoords {
            if texcoords.len() != count {
                return Err(MeshError::invalid_output(format!(
                    "{} texcoords for {} points",
                    texcoords.len(),
                    count
                )));
            }
        }
        if let Some(scaling_vecs) = &self.scaling_vecs {
            if scaling_vecs.len() != count {
                return Err(MeshError::invalid_output(format!(
                    "{} scaling vectors for {} points",
                    scaling_vecs.len(),
                    count
                )));
            }
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::invalid_output(format!(
                "{} indices is not a whole number of triangles",
                self.indices.len()
            )));
        }
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(MeshError::invalid_output(format!(
                "index {} out of range for {} points",
                bad, count
            )));
        }

        Ok(())
    }
}
