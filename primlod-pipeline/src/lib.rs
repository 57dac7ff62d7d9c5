//! Scene decimation pipeline
//!
//! Sequences triangulation, decimation, and attribute remapping once per
//! mesh in a source scene, writing each surviving mesh to the output scene
//! and aggregating per-mesh diagnostics. Scene-document I/O stays behind
//! the [`SceneReader`] / [`SceneWriter`] collaborator traits; this crate
//! never touches files itself.

pub mod config;
pub mod scene;
pub mod orchestrator;

pub use config::*;
pub use scene::*;
pub use orchestrator::*;
