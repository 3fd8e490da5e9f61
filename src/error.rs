//! Error types for mesh building
//!
//! Degenerate input (short lines, empty polygons) is never an error; the
//! builders simply append nothing. Only the cases below are reported.

use thiserror::Error;

/// Result type for mesh building operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors reported by the mesh builders.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The triangulator could not produce triangles for a polygon.
    /// Nothing was appended to the output.
    #[error("polygon tessellation failed ({rings} rings, {vertices} vertices): {reason}")]
    Tessellation {
        rings: usize,
        vertices: usize,
        reason: String,
    },

    /// A mesh accumulator broke one of its buffer invariants.
    #[error("invalid mesh output: {message}")]
    InvalidOutput { message: String },
}

impl MeshError {
    pub fn tessellation(rings: usize, vertices: usize, reason: impl Into<String>) -> Self {
        Self::Tessellation {
            rings,
            vertices,
            reason: reason.into(),
        }
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput {
            message: message.into(),
        }
    }
}
