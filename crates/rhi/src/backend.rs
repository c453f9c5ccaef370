//! The capability contract implemented by graphics backends.
//!
//! A backend (rasterizer, ray tracer, software renderer, or the headless
//! [`NullBackend`](crate::NullBackend)) is picked once at process start. Its
//! resource types are associated types, so handles from one backend cannot
//! be passed to another.

use crate::constants::{FrameConstants, VertexShaderConstants};
use crate::error::RhiResult;
use crate::pipeline::{PipelineStateDesc, PrimitiveTopology};
use crate::surface::Surface;

/// Direction of +Y in a backend's clip space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClipSpaceY {
    /// +Y points up (Direct3D, OpenGL, Metal).
    #[default]
    Up,
    /// +Y points down (Vulkan).
    Down,
}

impl ClipSpaceY {
    /// Sign multiplied into the projection's Y scale.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            ClipSpaceY::Up => 1.0,
            ClipSpaceY::Down => -1.0,
        }
    }
}

/// Operations the frame controller requires from a graphics backend.
///
/// Frame hooks are always called in the order
/// `begin_frame → end_shadow_pass → end_frame`, from a single thread.
/// Between `begin_frame` and `end_frame` the backend must not overwrite
/// resources tagged with the frame index until its own fence confirms the
/// GPU finished with the previous occupant of that slot.
pub trait RenderBackend {
    /// Sampled texture.
    type Texture;
    /// Compiled vertex shader.
    type VertexShader;
    /// Compiled pixel shader.
    type PixelShader;
    /// Complete fixed-function and shader state.
    type PipelineState;
    /// Drawable vertex/index data of a single topology.
    type Primitive;
    /// Per-instance data for batched drawing.
    type Instances;

    /// Clip-space convention used when building projection matrices.
    fn clip_space_y(&self) -> ClipSpaceY;

    /// Creates a texture from an image.
    fn create_texture(&mut self, surface: &Surface) -> RhiResult<Self::Texture>;

    /// Loads and compiles a vertex shader by name.
    fn create_vertex_shader(&mut self, name: &str) -> RhiResult<Self::VertexShader>;

    /// Loads and compiles a pixel shader by name.
    fn create_pixel_shader(&mut self, name: &str) -> RhiResult<Self::PixelShader>;

    /// Creates a pipeline state object.
    fn create_pipeline_state(
        &mut self,
        desc: &PipelineStateDesc<'_, Self::VertexShader, Self::PixelShader>,
    ) -> RhiResult<Self::PipelineState>;

    /// Creates an empty primitive of the given topology.
    fn create_render_primitive(&mut self, topology: PrimitiveTopology) -> RhiResult<Self::Primitive>;

    /// Creates an empty instances buffer.
    fn create_render_instances(&mut self) -> RhiResult<Self::Instances>;

    /// The shadow map rendered during the shadow pass.
    fn shadow_map(&self) -> &Self::Texture;

    /// Side length of the square shadow map in texels.
    fn shadow_map_size(&self) -> u32;

    /// Starts a frame; the shadow pass begins immediately.
    fn begin_frame(&mut self, frame: &FrameConstants) -> RhiResult<()>;

    /// Finishes the shadow pass and starts the main pass.
    fn end_shadow_pass(&mut self, frame_index: usize) -> RhiResult<()>;

    /// Finishes the frame and submits it.
    fn end_frame(&mut self, frame_index: usize) -> RhiResult<()>;

    /// Switches subsequent draws to the perspective constants.
    fn set_projection_mode(&mut self, constants: &VertexShaderConstants) -> RhiResult<()>;

    /// Switches subsequent draws to the orthographic overlay constants.
    fn set_ortho_mode(&mut self, constants: &VertexShaderConstants) -> RhiResult<()>;

    /// Resizes back buffers after the window changed size.
    fn resize(&mut self, width: u32, height: u32) -> RhiResult<()>;
}
