//! Uniform-grid vertex clustering decimation
//!
//! Implements the Rossignac & Borrel (1993) vertex clustering scheme:
//! vertices falling into the same grid cell collapse to the cell centroid,
//! and faces whose corners land in fewer than three distinct cells are
//! dropped. The cell size is refined over a few rounds to steer the result
//! toward the requested triangle count.

use crate::{Decimated, DecimationOracle};
use primlod_core::{Error, Point3f, Result, Triangle};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy)]
struct BBox {
    min: [f64; 3],
    max: [f64; 3],
}

impl BBox {
    fn from_points(points: &[Point3f]) -> Self {
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for p in points {
            for i in 0..3 {
                let c = p[i] as f64;
                if c < min[i] {
                    min[i] = c;
                }
                if c > max[i] {
                    max[i] = c;
                }
            }
        }
        BBox { min, max }
    }

    fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// Grid-clustering decimation oracle.
///
/// Deterministic: the same input and target always produce the same output.
#[derive(Debug, Clone)]
pub struct GridDecimator {
    /// Number of cell-size refinement rounds used to approach the target
    /// triangle count.
    pub refine_steps: usize,
}

impl Default for GridDecimator {
    fn default() -> Self {
        Self { refine_steps: 8 }
    }
}

impl GridDecimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate a starting cell size from the kept-triangle fraction and the
    /// mesh bounding box. Degenerate (planar/linear) meshes use only their
    /// non-degenerate dimensions.
    fn initial_cell_size(
        bbox: &BBox,
        num_points: usize,
        num_triangles: usize,
        target_triangles: usize,
    ) -> f64 {
        let keep = (target_triangles as f64 / num_triangles as f64).min(1.0);
        let target_clusters = (num_points as f64 * keep).max(1.0);

        let eps = 1e-6;
        let extents: Vec<f64> = bbox.size().iter().filter(|&&d| d > eps).copied().collect();
        let dim = extents.len();
        if dim == 0 {
            // All vertices coincide; any cell size works
            return 1.0;
        }

        let product: f64 = extents.iter().product();
        (product / target_clusters).powf(1.0 / dim as f64)
    }
}

/// Collapse vertices into grid cells of the given size and rebuild the
/// triangle list against the cell representatives.
fn cluster_once(
    points: &[Point3f],
    triangles: &[Triangle],
    bbox: &BBox,
    cell_size: f64,
) -> Decimated {
    let mut cells: HashMap<(i64, i64, i64), usize> = HashMap::new();
    let mut vertex_to_cluster: Vec<usize> = Vec::with_capacity(points.len());
    let mut sums: Vec<[f64; 3]> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();

    for p in points {
        let ix = ((p.x as f64 - bbox.min[0]) / cell_size).floor() as i64;
        let iy = ((p.y as f64 - bbox.min[1]) / cell_size).floor() as i64;
        let iz = ((p.z as f64 - bbox.min[2]) / cell_size).floor() as i64;

        let next = sums.len();
        let cluster = *cells.entry((ix, iy, iz)).or_insert(next);
        if cluster == next {
            sums.push([0.0; 3]);
            counts.push(0);
        }
        sums[cluster][0] += p.x as f64;
        sums[cluster][1] += p.y as f64;
        sums[cluster][2] += p.z as f64;
        counts[cluster] += 1;
        vertex_to_cluster.push(cluster);
    }

    // Remap faces, dropping collapsed and duplicate triangles
    let mut cluster_faces: Vec<Triangle> = Vec::new();
    let mut seen: HashSet<Triangle> = HashSet::new();
    for tri in triangles {
        let c0 = vertex_to_cluster[tri[0]];
        let c1 = vertex_to_cluster[tri[1]];
        let c2 = vertex_to_cluster[tri[2]];
        if c0 == c1 || c1 == c2 || c2 == c0 {
            continue;
        }
        let mut key = [c0, c1, c2];
        key.sort_unstable();
        if seen.insert(key) {
            cluster_faces.push([c0, c1, c2]);
        }
    }

    // Compact: keep only clusters referenced by a surviving face
    let mut cluster_to_new: HashMap<usize, usize> = HashMap::new();
    let mut new_points: Vec<Point3f> = Vec::new();
    let mut new_triangles: Vec<Triangle> = Vec::with_capacity(cluster_faces.len());
    for face in &cluster_faces {
        let mut mapped = [0usize; 3];
        for (slot, &cluster) in mapped.iter_mut().zip(face.iter()) {
            let next = new_points.len();
            let idx = *cluster_to_new.entry(cluster).or_insert(next);
            if idx == next {
                let n = counts[cluster] as f64;
                new_points.push(Point3f::new(
                    (sums[cluster][0] / n) as f32,
                    (sums[cluster][1] / n) as f32,
                    (sums[cluster][2] / n) as f32,
                ));
            }
            *slot = idx;
        }
        new_triangles.push(mapped);
    }

    Decimated {
        points: new_points,
        triangles: new_triangles,
    }
}

impl DecimationOracle for GridDecimator {
    fn decimate(
        &self,
        points: &[Point3f],
        triangles: &[Triangle],
        target_triangle_count: usize,
    ) -> Result<Decimated> {
        if triangles.is_empty() {
            return Err(Error::EmptyMesh(
                "decimation requested for a mesh with zero triangles".to_string(),
            ));
        }

        let bbox = BBox::from_points(points);
        let mut cell_size =
            Self::initial_cell_size(&bbox, points.len(), triangles.len(), target_triangle_count);

        // Walk the cell size toward the target: coarser when over, finer
        // when under. Keeps the best result at or below the target, and the
        // closest overshoot as a fallback.
        let mut best_under: Option<Decimated> = None;
        let mut best_over: Option<Decimated> = None;
        for _ in 0..self.refine_steps.max(1) {
            let candidate = cluster_once(points, triangles, &bbox, cell_size);
            let count = candidate.triangles.len();
            if count <= target_triangle_count {
                let improved = best_under
                    .as_ref()
                    .map_or(true, |b| count > b.triangles.len());
                if improved {
                    best_under = Some(candidate);
                }
                if count == target_triangle_count {
                    break;
                }
                cell_size *= 0.75;
            } else {
                let improved = best_over
                    .as_ref()
                    .map_or(true, |b| count < b.triangles.len());
                if improved {
                    best_over = Some(candidate);
                }
                cell_size *= 1.5;
            }
        }

        match (best_under, best_over) {
            (Some(under), _) if !under.triangles.is_empty() => Ok(under),
            (_, Some(over)) => Ok(over),
            (Some(under), None) => Ok(under),
            (None, None) => Err(Error::SimplificationFailed(
                "grid clustering produced no candidate meshes".to_string(),
            )),
        }
    }
}
