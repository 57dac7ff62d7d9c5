//! Error types for primlod

use thiserror::Error;

/// Main error type for primlod operations.
///
/// Mesh- and primvar-level variants are captured as diagnostics by the
/// pipeline and never unwind past it; only `DocumentIo` surfaces to the
/// caller as a hard failure.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing geometry: {0}")]
    MissingGeometry(String),

    #[error("Malformed face data: {0}")]
    MalformedFaceData(String),

    #[error("Empty mesh: {0}")]
    EmptyMesh(String),

    #[error("Simplification failed: {0}")]
    SimplificationFailed(String),

    #[error("Attribute length mismatch: {0}")]
    AttributeLengthMismatch(String),

    #[error("Unknown interpolation: {0}")]
    UnknownInterpolation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Document I/O error: {0}")]
    DocumentIo(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::DocumentIo(e.to_string())
    }
}
