//! Diagnostics collected while processing a scene
//!
//! Skipped meshes and skipped primvars are reported as data rather than
//! raised as errors; a completed run returns its diagnostics alongside the
//! results.

use serde::{Deserialize, Serialize};

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

/// A non-fatal condition recorded during processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Scene-graph path of the mesh the condition was observed on.
    pub mesh_path: String,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn info(mesh_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            mesh_path: mesh_path.into(),
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(mesh_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            mesh_path: mesh_path.into(),
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}
