//! RHI-specific error types.

use thiserror::Error;

/// Error reported by a rendering backend when acquiring resources.
///
/// None of these are retried by the frame controller: graphics resource
/// failures are generally not transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RhiError {
    /// Shader lookup or compilation error
    #[error("Shader error: {0}")]
    ShaderError(String),

    /// Pipeline state creation error
    #[error("Pipeline error: {0}")]
    PipelineError(String),

    /// Texture creation or upload error
    #[error("Texture error: {0}")]
    TextureError(String),

    /// The device was lost and must be recreated by the application
    #[error("Device lost")]
    DeviceLost,
}

/// Result type alias for RHI operations.
pub type RhiResult<T> = std::result::Result<T, RhiError>;
