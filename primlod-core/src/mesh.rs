//! Source and output mesh representations

use crate::point::*;
use crate::primvar::Primvar;
use serde::{Deserialize, Serialize};

/// Three indices into a point set.
pub type Triangle = [usize; 3];

/// A mesh as extracted from the source scene: polygonal faces of arbitrary
/// size plus the primvars authored on the node.
///
/// Read once per processing pass and never mutated; the pipeline constructs
/// a fresh [`LodMesh`] as output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMesh {
    /// Scene-graph path of the mesh node.
    pub path: String,
    pub points: Vec<Point3f>,
    /// Vertex count of each face, in face order.
    pub face_vertex_counts: Vec<usize>,
    /// Concatenated vertex indices of all faces.
    pub face_vertex_indices: Vec<usize>,
    pub primvars: Vec<Primvar>,
}

impl SourceMesh {
    pub fn new(path: impl Into<String>, points: Vec<Point3f>) -> Self {
        Self {
            path: path.into(),
            points,
            face_vertex_counts: Vec::new(),
            face_vertex_indices: Vec::new(),
            primvars: Vec::new(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Check that the face buffers describe each other: the counts must sum
    /// to the index buffer length, and every index must address a point.
    pub fn face_data_consistent(&self) -> bool {
        let total: usize = self.face_vertex_counts.iter().sum();
        if total != self.face_vertex_indices.len() {
            return false;
        }
        self.face_vertex_indices.iter().all(|&i| i < self.points.len())
    }
}

/// A simplified triangle mesh ready to be written back to the scene.
///
/// Constructed fresh by the pipeline; primvars are remapped onto it one by
/// one, never inherited from the source node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LodMesh {
    /// Scene-graph path of the output mesh node.
    pub path: String,
    pub points: Vec<Point3f>,
    pub triangles: Vec<Triangle>,
    /// Recomputed vertex normals, area-weighted over incident triangles.
    pub normals: Option<Vec<Vector3f>>,
    pub primvars: Vec<Primvar>,
}

impl LodMesh {
    pub fn new(path: impl Into<String>, points: Vec<Point3f>, triangles: Vec<Triangle>) -> Self {
        Self {
            path: path.into(),
            points,
            triangles,
            normals: None,
            primvars: Vec::new(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Face vertex counts for the writer contract: uniformly 3.
    pub fn face_vertex_counts(&self) -> Vec<usize> {
        vec![3; self.triangles.len()]
    }

    /// Flattened triangle index buffer for the writer contract.
    pub fn face_vertex_indices(&self) -> Vec<usize> {
        self.triangles.iter().flat_map(|t| t.iter().copied()).collect()
    }

    /// Subdivision scheme for the writer contract. The output is a plain
    /// triangle mesh, not a subdivision surface.
    pub fn subdivision_scheme(&self) -> &'static str {
        "none"
    }

    /// Recompute per-vertex normals as the normalized sum of incident
    /// triangle cross products (area-weighted).
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vector3f::zeros(); self.points.len()];
        for tri in &self.triangles {
            let v0 = self.points[tri[0]];
            let v1 = self.points[tri[1]];
            let v2 = self.points[tri[2]];
            let face_normal = (v1 - v0).cross(&(v2 - v0));
            for &vi in tri {
                normals[vi] += face_normal;
            }
        }
        for n in &mut normals {
            let len = n.magnitude();
            if len > 1e-12 {
                *n /= len;
            }
        }
        self.normals = Some(normals);
    }
}
