//! Benchmark setup error type.

use crate::source::SyntheticError;
use fibforest_core::MsfError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic input generation failed.
    #[error("synthetic source generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The forest computation failed.
    #[error("forest computation failed: {0}")]
    Msf(#[from] MsfError),
    /// A generated graph unexpectedly split into several components.
    #[error("generated graph with {vertex_count} vertices is disconnected")]
    DisconnectedGraph {
        /// Vertex count of the offending configuration.
        vertex_count: usize,
    },
}
