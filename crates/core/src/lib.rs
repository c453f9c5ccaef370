//! Core utilities shared by every framekit crate.
//!
//! This crate provides foundational types used across the renderer:
//! - Error types and result aliases
//! - Logging initialization
//! - Frame timing
//! - Construction-time renderer configuration

mod config;
mod error;
mod logging;
mod timer;

pub use config::{FRAME_COUNT, RendererConfig};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use timer::FrameTimer;
