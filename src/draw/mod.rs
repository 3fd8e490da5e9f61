//! Geometry types and the builders that mesh them

pub mod geometry;
pub mod tessellation;
