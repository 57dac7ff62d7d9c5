//! # primlod
//!
//! Attribute-preserving mesh decimation for hierarchical scene descriptions.
//!
//! This is the umbrella crate that provides convenient access to the whole
//! pipeline. Use it to get everything in one place, or depend on individual
//! crates for more granular control:
//!
//! - **Core**: mesh, primvar, and diagnostic data structures
//! - **Simplification**: the decimation oracle interface and the built-in
//!   grid-clustering decimator
//! - **Remap**: triangulation and the attribute remapping engine
//! - **Pipeline**: scene-level orchestration and collaborator contracts
//!
//! ## Quick Start
//!
//! ```rust
//! use primlod::prelude::*;
//!
//! let mut source = MemoryScene::new();
//! // ... populate the scene with SourceMesh values extracted by your
//! // scene-document reader ...
//! let mut output = MemoryScene::new();
//!
//! let config = PipelineConfig::default();
//! let oracle = GridDecimator::new();
//! let summary = decimate_scene(&source, &mut output, &config, &oracle).unwrap();
//! assert_eq!(summary.skipped(), 0);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: enables simplification, remap, and pipeline
//! - `simplification`: decimation oracle interface and grid decimator
//! - `remap`: triangulation and primvar remapping
//! - `pipeline`: orchestration (pulls in the other two)

// Re-export core functionality
pub use primlod_core::*;

// Re-export sub-crates
#[cfg(feature = "simplification")]
pub use primlod_simplification as simplification;

#[cfg(feature = "remap")]
pub use primlod_remap as remap;

#[cfg(feature = "pipeline")]
pub use primlod_pipeline as pipeline;

/// Convenient imports for common use cases
pub mod prelude {
    pub use primlod_core::*;

    #[cfg(feature = "simplification")]
    pub use primlod_simplification::*;

    #[cfg(feature = "remap")]
    pub use primlod_remap::*;

    #[cfg(feature = "pipeline")]
    pub use primlod_pipeline::*;
}
