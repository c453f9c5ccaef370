//! Frame lifecycle error types.

use framekit_rhi::RhiError;
use framekit_scene::SceneError;
use thiserror::Error;

/// Errors reported by the frame controller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// `begin_frame` while a frame is already open.
    #[error("begin_frame called while already in a frame")]
    AlreadyInFrame,

    /// `end_frame` without a matching `begin_frame`.
    #[error("end_frame called without a matching begin_frame")]
    NotInFrame,

    /// A pass transition that is not valid in the current phase.
    #[error("Invalid pass sequence: {0}")]
    InvalidPassSequence(String),

    /// Degenerate camera, clip range or light parameters.
    #[error("Camera error: {0}")]
    Camera(#[from] SceneError),

    /// Failure reported by the graphics backend.
    #[error("Backend error: {0}")]
    Backend(#[from] RhiError),
}

/// Result type alias for frame operations.
pub type FrameResult<T> = std::result::Result<T, FrameError>;
