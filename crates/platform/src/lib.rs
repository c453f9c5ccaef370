//! Platform abstraction layer for the frame controller.
//!
//! This crate provides the window/surface capability the renderer consults
//! for its render-target size:
//! - The [`WindowSurface`] trait (size, event pump, resize notification,
//!   pass-through event listener)
//! - [`HeadlessSurface`], a scripted implementation for tests and tools
//! - [`WinitSurface`], a desktop window via winit (feature `winit`), with raw
//!   window handles for backend surface creation

mod headless;
mod surface;
#[cfg(feature = "winit")]
mod winit_window;

pub use headless::{HeadlessEvent, HeadlessSurface};
pub use surface::WindowSurface;
#[cfg(feature = "winit")]
pub use winit_window::WinitSurface;

// Re-export winit types that listeners match on
#[cfg(feature = "winit")]
pub use winit::event::WindowEvent;
