//! Run-wide pipeline configuration

use primlod_core::{Error, Result};
use primlod_remap::VertexRemap;

/// Configuration consumed by the pipeline core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Target fraction of the original triangle count, in `(0, 1]`.
    pub decimation_factor: f32,
    /// Strategy for remapping `vertex`-interpolated primvars.
    pub vertex_remap: VertexRemap,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            decimation_factor: 0.2,
            vertex_remap: VertexRemap::Nearest,
        }
    }
}

impl PipelineConfig {
    pub fn new(decimation_factor: f32, vertex_remap: VertexRemap) -> Self {
        Self {
            decimation_factor,
            vertex_remap,
        }
    }

    /// Reject factors outside `(0, 1]` (NaN included) before any mesh work
    /// starts.
    pub fn validate(&self) -> Result<()> {
        if !(self.decimation_factor > 0.0 && self.decimation_factor <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "decimation factor must be in (0, 1], got {}",
                self.decimation_factor
            )));
        }
        Ok(())
    }
}
