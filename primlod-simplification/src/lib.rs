//! Mesh decimation oracles
//!
//! The simplification step of the pipeline is a pluggable capability: any
//! algorithm that maps a vertex/triangle pair to a smaller, consistent
//! vertex/triangle pair can stand behind [`DecimationOracle`]. This crate
//! ships one deterministic implementation, [`GridDecimator`], so the
//! pipeline works without an external decimation library.

pub mod grid;

pub use grid::*;

use primlod_core::{Point3f, Result, Triangle};

/// Geometry returned by a decimation oracle.
///
/// Consistency contract: every triangle indexes into `points`, and no
/// triangle repeats a vertex.
#[derive(Debug, Clone)]
pub struct Decimated {
    pub points: Vec<Point3f>,
    pub triangles: Vec<Triangle>,
}

impl Decimated {
    /// An empty result counts as a decimation failure at the pipeline level.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || self.triangles.is_empty()
    }
}

/// Capability interface for mesh decimation.
///
/// Callers guarantee `triangles` is non-empty. `target_triangle_count` is a
/// goal, not a hard bound; implementations come as close as their algorithm
/// allows without going over where possible.
pub trait DecimationOracle {
    fn decimate(
        &self,
        points: &[Point3f],
        triangles: &[Triangle],
        target_triangle_count: usize,
    ) -> Result<Decimated>;
}
