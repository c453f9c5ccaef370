//! Camera, light and frustum state for a single rendered frame.
//!
//! This crate provides the view-dependent math of the renderer:
//! - Camera state with a high-precision position
//! - Perspective camera frustums and orthographic shadow frustums
//! - Directional light definitions
//! - The large-world offset used to keep geometry near the origin

mod error;

pub mod camera;
pub mod frustum;
pub mod light;
pub mod offset;

pub use camera::{CameraBasis, CameraState, ClipRange};
pub use error::{SceneError, SceneResult};
pub use frustum::{
    Aabb, Frustum, LightFitTarget, Plane, Projection, compute_camera_frustum,
    compute_light_frustum,
};
pub use light::DirectionalLight;
pub use offset::{DAabb, LargeWorldOffset};
