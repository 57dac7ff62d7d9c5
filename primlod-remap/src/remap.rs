//! Primvar reconstruction onto simplified geometry
//!
//! After decimation the output vertex count, ordering, and triangle
//! topology no longer correspond 1:1 to the source mesh. This module
//! rebuilds each primvar on the new geometry according to its
//! interpolation class:
//!
//! - `constant` / `uniform`: copied verbatim, unaffected by geometry.
//! - `vertex`: remapped per new point, by nearest original point
//!   (values copied, never blended) or by barycentric interpolation
//!   against the nearest original triangle.
//! - `faceVarying`: always barycentric, with the triangle as the unit of
//!   correspondence; each new corner samples the three contiguous corner
//!   slots of the nearest original triangle.
//!
//! The face-varying path requires the source values to be laid out
//! triangle-major (three values per original triangle). That holds when
//! the source mesh was authored triangulated; face-varying data authored
//! on n-gon faces does not survive fan triangulation with a well-defined
//! corner order and fails the length precondition instead.

use crate::barycentric::barycentric_weights;
use crate::spatial::{triangle_centroid, NearestIndex};
use primlod_core::{Error, Interpolation, Point3f, Primvar, PrimvarValues, Result, Triangle};

/// Strategy for remapping `vertex`-interpolated primvars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexRemap {
    /// Copy the value of the nearest original point, unmodified.
    #[default]
    Nearest,
    /// Interpolate over the nearest original triangle's vertex values.
    Barycentric,
}

/// Correspondence between an original mesh and its simplified geometry.
///
/// Borrows both meshes for the duration of one remap operation; the
/// spatial indexes are built fresh on construction and discarded with the
/// context. No state survives across meshes.
pub struct RemapContext<'a> {
    orig_points: &'a [Point3f],
    orig_triangles: &'a [Triangle],
    new_points: &'a [Point3f],
    new_triangles: &'a [Triangle],
    point_index: NearestIndex,
    centroid_index: NearestIndex,
}

impl<'a> RemapContext<'a> {
    pub fn new(
        orig_points: &'a [Point3f],
        orig_triangles: &'a [Triangle],
        new_points: &'a [Point3f],
        new_triangles: &'a [Triangle],
    ) -> Self {
        Self {
            orig_points,
            orig_triangles,
            new_points,
            new_triangles,
            point_index: NearestIndex::from_points(orig_points),
            centroid_index: NearestIndex::from_triangle_centroids(orig_points, orig_triangles),
        }
    }

    /// Reconstruct one primvar on the new geometry.
    ///
    /// Returns an error when the primvar cannot be remapped; the caller
    /// records it as a diagnostic and skips this primvar only.
    pub fn remap(&self, primvar: &Primvar, strategy: VertexRemap) -> Result<Primvar> {
        match &primvar.interpolation {
            Interpolation::Constant | Interpolation::Uniform => Ok(primvar.clone()),
            Interpolation::Vertex => {
                if primvar.values.len() != self.orig_points.len() {
                    return Err(Error::AttributeLengthMismatch(format!(
                        "vertex primvar '{}' has {} values for {} original points",
                        primvar.name,
                        primvar.values.len(),
                        self.orig_points.len()
                    )));
                }
                let values = match strategy {
                    VertexRemap::Nearest => self.vertex_nearest(&primvar.values)?,
                    VertexRemap::Barycentric => self.vertex_barycentric(&primvar.values)?,
                };
                Ok(Primvar::new(
                    primvar.name.clone(),
                    Interpolation::Vertex,
                    values,
                ))
            }
            Interpolation::FaceVarying => {
                let expected = 3 * self.orig_triangles.len();
                if primvar.values.len() != expected {
                    return Err(Error::AttributeLengthMismatch(format!(
                        "faceVarying primvar '{}' has {} values, expected {} (3 per original triangle)",
                        primvar.name,
                        primvar.values.len(),
                        expected
                    )));
                }
                let values = self.face_varying(&primvar.values)?;
                Ok(Primvar::new(
                    primvar.name.clone(),
                    Interpolation::FaceVarying,
                    values,
                ))
            }
            Interpolation::Other(token) => Err(Error::UnknownInterpolation(format!(
                "primvar '{}' has unsupported interpolation '{}'",
                primvar.name, token
            ))),
        }
    }

    fn vertex_nearest(&self, values: &PrimvarValues) -> Result<PrimvarValues> {
        let mut indices = Vec::with_capacity(self.new_points.len());
        for p in self.new_points {
            let idx = self
                .point_index
                .nearest(p)
                .ok_or_else(|| Error::MissingGeometry("original point set is empty".to_string()))?;
            indices.push(idx);
        }
        Ok(values.gather(&indices))
    }

    fn vertex_barycentric(&self, values: &PrimvarValues) -> Result<PrimvarValues> {
        let mut samples = Vec::with_capacity(self.new_points.len());
        for p in self.new_points {
            let tri = self.nearest_original_triangle(p)?;
            let weights = self.weights_in_triangle(p, &tri);
            samples.push((tri, weights));
        }
        Ok(values.blend(&samples))
    }

    fn face_varying(&self, values: &PrimvarValues) -> Result<PrimvarValues> {
        let mut samples = Vec::with_capacity(3 * self.new_triangles.len());
        for tri in self.new_triangles {
            let centroid = triangle_centroid(self.new_points, tri);
            let orig_idx = self.centroid_index.nearest(&centroid).ok_or_else(|| {
                Error::MissingGeometry("original mesh has no triangles".to_string())
            })?;
            let orig = self.orig_triangles[orig_idx];
            let base = 3 * orig_idx;
            for &vi in tri {
                let weights = self.weights_in_triangle(&self.new_points[vi], &orig);
                samples.push(([base, base + 1, base + 2], weights));
            }
        }
        Ok(values.blend(&samples))
    }

    fn nearest_original_triangle(&self, p: &Point3f) -> Result<Triangle> {
        let idx = self
            .centroid_index
            .nearest(p)
            .ok_or_else(|| Error::MissingGeometry("original mesh has no triangles".to_string()))?;
        Ok(self.orig_triangles[idx])
    }

    fn weights_in_triangle(&self, p: &Point3f, tri: &Triangle) -> [f32; 3] {
        barycentric_weights(
            p,
            &self.orig_points[tri[0]],
            &self.orig_points[tri[1]],
            &self.orig_points[tri[2]],
        )
    }
}
