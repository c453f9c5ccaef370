//! Error types for camera and frustum configuration.

use thiserror::Error;

/// Error type for scene configuration problems.
///
/// These are caller bugs rather than transient conditions, so nothing in
/// the renderer retries or clamps them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Degenerate camera, light or clip parameters.
    #[error("Invalid camera configuration: {0}")]
    InvalidCameraConfig(String),
}

/// Result type alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
