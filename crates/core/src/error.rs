//! Error types shared across the workspace.

use thiserror::Error;

/// Main error type for window, configuration and startup failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Window creation or management errors
    #[error("Window error: {0}")]
    Window(String),

    /// The platform event loop could not be created or pumped
    #[error("Event loop error: {0}")]
    EventLoop(String),

    /// Invalid construction-time configuration
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using the workspace [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
