//! Triangulation and attribute remapping
//!
//! This crate carries the geometry-correspondence half of the pipeline:
//! - fan triangulation of polygonal faces
//! - spatial lookup over original-mesh points and triangle centroids
//! - barycentric weight computation
//! - reconstruction of every primvar class onto simplified geometry

pub mod triangulate;
pub mod spatial;
pub mod barycentric;
pub mod remap;

pub use triangulate::*;
pub use spatial::*;
pub use barycentric::*;
pub use remap::*;
