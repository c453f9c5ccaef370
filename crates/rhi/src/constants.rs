//! Constant buffer layouts shared with shaders.
//!
//! These structures must match the shader constant buffer layouts exactly.
//! All structures use `#[repr(C)]` for predictable memory layout and implement
//! `Pod` and `Zeroable` for safe byte casting.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Vertex shader constants for one projection mode.
///
/// The frame keeps two of these: one for the perspective 3D pass and one for
/// orthographic overlay drawing.
///
/// # Memory Layout
///
/// - Offset 0: view matrix (64 bytes)
/// - Offset 64: projection matrix (64 bytes)
/// - Offset 128: light view matrix (64 bytes)
/// - Offset 192: light projection matrix (64 bytes)
/// - Total size: 256 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct VertexShaderConstants {
    /// View matrix (render space to view space).
    pub view: Mat4,
    /// Projection matrix (view space to clip space).
    pub projection: Mat4,
    /// Light view matrix used by the shadow pass and shadow lookups.
    pub light_view: Mat4,
    /// Light projection matrix.
    pub light_projection: Mat4,
}

impl VertexShaderConstants {
    /// Size of the struct in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Combined camera view-projection matrix.
    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Combined light view-projection matrix.
    #[inline]
    pub fn light_view_projection(&self) -> Mat4 {
        self.light_projection * self.light_view
    }
}

/// Pixel shader constants for lighting.
///
/// # Memory Layout
///
/// - Offset 0: camera position (12 bytes) + world scale (4 bytes)
/// - Offset 16: light position (12 bytes) + light intensity (4 bytes)
/// - Offset 32: light direction (12 bytes) + padding (4 bytes)
/// - Offset 48: light color (12 bytes) + padding (4 bytes)
/// - Total size: 64 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PixelShaderConstants {
    /// Camera position in render space.
    pub camera_position: Vec3,
    /// World scale the frame was begun with.
    pub world_scale: f32,
    /// Eye of the shadow volume in render space.
    pub light_position: Vec3,
    /// Light intensity.
    pub light_intensity: f32,
    /// Direction the light travels in.
    pub light_direction: Vec3,
    pub _pad0: f32,
    /// Light color.
    pub light_color: Vec3,
    pub _pad1: f32,
}

impl PixelShaderConstants {
    /// Size of the struct in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

/// All constants a backend needs at the start of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameConstants {
    /// Buffer slot for this frame, in `[0, pipeline_depth)`.
    pub frame_index: usize,
    /// Perspective vertex constants.
    pub vertex: VertexShaderConstants,
    /// Orthographic overlay vertex constants.
    pub vertex_ortho: VertexShaderConstants,
    /// Lighting constants.
    pub pixel: PixelShaderConstants,
}
