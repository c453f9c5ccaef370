//! Constant buffer contents for a frame.
//!
//! Builds the perspective and orthographic vertex constant sets and the
//! lighting constants from the frame's camera and light frustums.

use glam::{Mat4, Vec4};

use framekit_rhi::{ClipSpaceY, PixelShaderConstants, VertexShaderConstants};
use framekit_scene::{CameraState, DirectionalLight, Frustum, LargeWorldOffset, SceneResult};

/// Builds the perspective vertex constants.
///
/// The view matrix is looked up from the offset-adjusted camera position,
/// so the matrices only ever see render-space coordinates. The projection
/// takes its Y sign from the backend's clip-space convention.
///
/// # Errors
///
/// Fails if the camera's forward and up vectors are degenerate.
pub fn build_view_projection(
    camera: &CameraState,
    frustum: &Frustum,
    offset: &LargeWorldOffset,
    light_frustum: &Frustum,
    clip_space_y: ClipSpaceY,
) -> SceneResult<VertexShaderConstants> {
    let basis = camera.basis()?;
    let eye = offset.apply(camera.position);
    let y_sign = clip_space_y.sign();

    Ok(VertexShaderConstants {
        view: Mat4::look_at_rh(eye, eye + basis.forward, basis.up),
        projection: frustum.projection_matrix(y_sign),
        light_view: light_frustum.view_matrix(),
        light_projection: light_frustum.projection_matrix(y_sign),
    })
}

/// Projection mapping pixel coordinates to clip space.
///
/// `(0, 0)` is the top-left corner of the window and `(width, height)` the
/// bottom-right, whatever the backend's clip-space Y direction.
pub fn ortho_projection(width: u32, height: u32, clip_space_y: ClipSpaceY) -> Mat4 {
    let y_sign = clip_space_y.sign();
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;

    Mat4::from_cols(
        Vec4::new(2.0 / w, 0.0, 0.0, 0.0),
        Vec4::new(0.0, -y_sign * 2.0 / h, 0.0, 0.0),
        Vec4::new(0.0, 0.0, -1.0, 0.0),
        Vec4::new(-1.0, y_sign, 0.0, 1.0),
    )
}

/// Vertex constants for overlay drawing; every matrix except the
/// projection is identity.
pub fn build_ortho_constants(width: u32, height: u32, clip_space_y: ClipSpaceY) -> VertexShaderConstants {
    VertexShaderConstants {
        projection: ortho_projection(width, height, clip_space_y),
        ..Default::default()
    }
}

/// Lighting constants for the main pass.
pub fn build_pixel_constants(
    camera_frustum: &Frustum,
    light_frustum: &Frustum,
    light: &DirectionalLight,
    world_scale: f32,
) -> PixelShaderConstants {
    PixelShaderConstants {
        camera_position: camera_frustum.origin(),
        world_scale,
        light_position: light_frustum.origin(),
        light_intensity: light.intensity,
        light_direction: light.direction,
        _pad0: 0.0,
        light_color: light.color,
        _pad1: 0.0,
    }
}
