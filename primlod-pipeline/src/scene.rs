//! Scene-document collaborator contracts
//!
//! The pipeline reads extracted mesh data from a [`SceneReader`] and hands
//! finished geometry to a [`SceneWriter`]. Document formats, file paths,
//! and layer lifecycles are entirely the collaborator's concern; a failure
//! on either side is a [`primlod_core::Error::DocumentIo`] and aborts the
//! run.

use primlod_core::{LodMesh, Result, SourceMesh};

/// Source-scene collaborator: yields every mesh-typed node's extracted
/// geometry and primvars.
pub trait SceneReader: Send {
    fn meshes(&self) -> Result<Vec<SourceMesh>>;
}

/// Output-scene collaborator: accepts finished meshes and persists the
/// document.
///
/// `write_mesh` receives uniformly-triangulated geometry (see
/// [`LodMesh::face_vertex_counts`] and [`LodMesh::subdivision_scheme`])
/// with a freshly built primvar set.
pub trait SceneWriter: Send {
    fn write_mesh(&mut self, mesh: &LodMesh) -> Result<()>;

    /// Persist the output document. Called once, after all meshes.
    fn save(&mut self) -> Result<()>;
}

/// In-memory scene holding meshes as plain data.
///
/// Serves as the reference collaborator and as the test double for both
/// sides of the pipeline.
#[derive(Debug, Default)]
pub struct MemoryScene {
    meshes: Vec<SourceMesh>,
    written: Vec<LodMesh>,
    saved: bool,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meshes(meshes: Vec<SourceMesh>) -> Self {
        Self {
            meshes,
            written: Vec::new(),
            saved: false,
        }
    }

    pub fn push_mesh(&mut self, mesh: SourceMesh) {
        self.meshes.push(mesh);
    }

    /// Meshes written so far.
    pub fn written(&self) -> &[LodMesh] {
        &self.written
    }

    /// Whether `save` has been called.
    pub fn saved(&self) -> bool {
        self.saved
    }
}

impl SceneReader for MemoryScene {
    fn meshes(&self) -> Result<Vec<SourceMesh>> {
        Ok(self.meshes.clone())
    }
}

impl SceneWriter for MemoryScene {
    fn write_mesh(&mut self, mesh: &LodMesh) -> Result<()> {
        self.written.push(mesh.clone());
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.saved = true;
        Ok(())
    }
}
