//! Frame orchestration on top of a render backend.
//!
//! This crate owns the per-frame state a backend renders with:
//! - Buffer slot rotation for frames in flight
//! - The `Idle → ShadowPass → MainPass` frame state machine
//! - Camera and light frustums, recomputed every frame
//! - Perspective, orthographic and lighting constant buffers

mod error;

pub mod controller;
pub mod frame;
pub mod matrices;

pub use controller::{FrameController, FramePhase, ShadowFit};
pub use error::{FrameError, FrameResult};
pub use frame::FrameRing;
pub use matrices::{build_ortho_constants, build_pixel_constants, build_view_projection, ortho_projection};

pub use framekit_core::FRAME_COUNT;
