//! Primvar storage and interpolation classes
//!
//! A primvar is a named attribute attached to a mesh, classified by how its
//! values bind to the geometry (per mesh, per face, per vertex, or per face
//! corner). Values are stored in a tagged variant fixed at ingestion, so the
//! remapping code never has to probe element shapes at use time.

use serde::{Deserialize, Serialize};

/// How a primvar's values bind to mesh geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    /// One value for the whole mesh.
    Constant,
    /// One value per face.
    Uniform,
    /// One value per point, indexed identically to the point set.
    Vertex,
    /// One value per face corner, three contiguous values per triangle.
    FaceVarying,
    /// A classification this pipeline does not handle; carries the token.
    Other(String),
}

impl Interpolation {
    /// Parse a scene-description interpolation token.
    pub fn from_token(token: &str) -> Self {
        match token {
            "constant" => Interpolation::Constant,
            "uniform" => Interpolation::Uniform,
            "vertex" => Interpolation::Vertex,
            "faceVarying" => Interpolation::FaceVarying,
            other => Interpolation::Other(other.to_string()),
        }
    }

    /// The scene-description token for this classification.
    pub fn token(&self) -> &str {
        match self {
            Interpolation::Constant => "constant",
            Interpolation::Uniform => "uniform",
            Interpolation::Vertex => "vertex",
            Interpolation::FaceVarying => "faceVarying",
            Interpolation::Other(token) => token,
        }
    }
}

/// Typed primvar value storage.
///
/// The variant is determined once when the primvar is ingested from the
/// scene and is preserved through remapping: blending never changes the
/// element shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrimvarValues {
    /// Scalar elements (e.g. displacement, occlusion).
    Float(Vec<f32>),
    /// 2-component elements (e.g. texture coordinates).
    Float2(Vec<[f32; 2]>),
    /// 3-component elements (e.g. colors, normals).
    Float3(Vec<[f32; 3]>),
}

impl PrimvarValues {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            PrimvarValues::Float(v) => v.len(),
            PrimvarValues::Float2(v) => v.len(),
            PrimvarValues::Float3(v) => v.len(),
        }
    }

    /// Whether the value array is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a new array by copying the element at each given index.
    ///
    /// Elements are copied unmodified, so every output element is identical
    /// to some input element. Indices must be in bounds.
    pub fn gather(&self, indices: &[usize]) -> PrimvarValues {
        match self {
            PrimvarValues::Float(v) => {
                PrimvarValues::Float(indices.iter().map(|&i| v[i]).collect())
            }
            PrimvarValues::Float2(v) => {
                PrimvarValues::Float2(indices.iter().map(|&i| v[i]).collect())
            }
            PrimvarValues::Float3(v) => {
                PrimvarValues::Float3(indices.iter().map(|&i| v[i]).collect())
            }
        }
    }

    /// Build a new array where each output element is the weighted blend of
    /// three input elements, component-wise. Indices must be in bounds.
    pub fn blend(&self, samples: &[([usize; 3], [f32; 3])]) -> PrimvarValues {
        match self {
            PrimvarValues::Float(v) => PrimvarValues::Float(
                samples
                    .iter()
                    .map(|&([a, b, c], [u, s, w])| u * v[a] + s * v[b] + w * v[c])
                    .collect(),
            ),
            PrimvarValues::Float2(v) => PrimvarValues::Float2(
                samples
                    .iter()
                    .map(|&([a, b, c], [u, s, w])| {
                        [
                            u * v[a][0] + s * v[b][0] + w * v[c][0],
                            u * v[a][1] + s * v[b][1] + w * v[c][1],
                        ]
                    })
                    .collect(),
            ),
            PrimvarValues::Float3(v) => PrimvarValues::Float3(
                samples
                    .iter()
                    .map(|&([a, b, c], [u, s, w])| {
                        [
                            u * v[a][0] + s * v[b][0] + w * v[c][0],
                            u * v[a][1] + s * v[b][1] + w * v[c][1],
                            u * v[a][2] + s * v[b][2] + w * v[c][2],
                        ]
                    })
                    .collect(),
            ),
        }
    }
}

/// A named mesh attribute with its interpolation class and values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primvar {
    pub name: String,
    pub interpolation: Interpolation,
    pub values: PrimvarValues,
}

impl Primvar {
    pub fn new(name: impl Into<String>, interpolation: Interpolation, values: PrimvarValues) -> Self {
        Self {
            name: name.into(),
            interpolation,
            values,
        }
    }
}
