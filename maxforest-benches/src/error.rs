//! Benchmark setup error type.

use crate::source::SyntheticError;
use maxforest_core::ForestError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Configuring or computing the forest failed.
    #[error("forest computation failed: {0}")]
    Forest(#[from] ForestError),
}
