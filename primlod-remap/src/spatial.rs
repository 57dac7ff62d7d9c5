//! Spatial lookup over original-mesh geometry

use primlod_core::{Point3f, Triangle};
use rstar::RTree;

/// A point tagged with its index in the originating array, for spatial data
/// structures.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPoint {
    point: Point3f,
    index: usize,
}

impl rstar::Point for IndexedPoint {
    type Scalar = f32;
    const DIMENSIONS: usize = 3;

    fn generate(mut generator: impl FnMut(usize) -> Self::Scalar) -> Self {
        Self {
            point: Point3f::new(generator(0), generator(1), generator(2)),
            index: 0,
        }
    }

    fn nth(&self, index: usize) -> Self::Scalar {
        match index {
            0 => self.point.x,
            1 => self.point.y,
            2 => self.point.z,
            _ => panic!("Invalid dimension"),
        }
    }

    fn nth_mut(&mut self, index: usize) -> &mut Self::Scalar {
        match index {
            0 => &mut self.point.x,
            1 => &mut self.point.y,
            2 => &mut self.point.z,
            _ => panic!("Invalid dimension"),
        }
    }
}

/// Nearest-neighbor index over a fixed set of labeled positions.
///
/// Built fresh per remap operation and discarded afterward; queries return
/// the label (array index) of the nearest entry.
pub struct NearestIndex {
    tree: RTree<IndexedPoint>,
}

impl NearestIndex {
    /// Index a point array by position; labels are array indices.
    pub fn from_points(points: &[Point3f]) -> Self {
        let entries = points
            .iter()
            .enumerate()
            .map(|(index, &point)| IndexedPoint { point, index })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Index triangle centroids; labels are triangle indices.
    pub fn from_triangle_centroids(points: &[Point3f], triangles: &[Triangle]) -> Self {
        let entries = triangles
            .iter()
            .enumerate()
            .map(|(index, tri)| IndexedPoint {
                point: triangle_centroid(points, tri),
                index,
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Label of the nearest indexed entry, or `None` if the index is empty.
    pub fn nearest(&self, query: &Point3f) -> Option<usize> {
        let probe = IndexedPoint {
            point: *query,
            index: 0,
        };
        self.tree.nearest_neighbor(&probe).map(|entry| entry.index)
    }
}

/// Arithmetic mean of a triangle's three vertex positions.
pub fn triangle_centroid(points: &[Point3f], tri: &Triangle) -> Point3f {
    let a = points[tri[0]];
    let b = points[tri[1]];
    let c = points[tri[2]];
    Point3f::new(
        (a.x + b.x + c.x) / 3.0,
        (a.y + b.y + c.y) / 3.0,
        (a.z + b.z + c.z) / 3.0,
    )
}
