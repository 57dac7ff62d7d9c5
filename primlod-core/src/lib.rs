//! Core data structures for primlod
//!
//! This crate provides the data model shared by the primlod pipeline:
//! source meshes as extracted from a scene description, simplified output
//! meshes, typed primvar storage, diagnostics, and error types.

pub mod point;
pub mod primvar;
pub mod mesh;
pub mod diagnostic;
pub mod error;

pub use point::*;
pub use primvar::*;
pub use mesh::*;
pub use diagnostic::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};

/// Common result type for primlod operations
pub type Result<T> = std::result::Result<T, Error>;
