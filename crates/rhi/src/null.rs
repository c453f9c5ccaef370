//! Headless backend that records calls instead of drawing.
//!
//! `NullBackend` satisfies the full [`RenderBackend`] contract without a GPU.
//! It is used for headless runs and for verifying the frame controller's
//! call sequence in tests.

use tracing::debug;

use crate::backend::{ClipSpaceY, RenderBackend};
use crate::constants::{FrameConstants, VertexShaderConstants};
use crate::error::{RhiError, RhiResult};
use crate::pipeline::{PipelineStateDesc, PrimitiveTopology};
use crate::shader::ShaderStage;
use crate::surface::Surface;

/// Texture handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullTexture {
    id: u64,
    width: u32,
    height: u32,
}

impl NullTexture {
    /// Unique handle id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Width in texels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Shader handle used for both stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullShader {
    id: u64,
    name: String,
    stage: ShaderStage,
}

impl NullShader {
    /// Unique handle id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Name the shader was created from.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pipeline stage the shader was created for.
    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

/// Pipeline state handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullPipelineState {
    id: u64,
}

impl NullPipelineState {
    /// Unique handle id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Primitive handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullPrimitive {
    id: u64,
    topology: PrimitiveTopology,
}

impl NullPrimitive {
    /// Unique handle id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Topology the primitive was created with.
    #[inline]
    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }
}

/// Instances handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullInstances {
    id: u64,
}

impl NullInstances {
    /// Unique handle id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// One frame hook invocation recorded by [`NullBackend`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BackendCall {
    /// `begin_frame` with the frame's buffer slot
    BeginFrame { frame_index: usize },
    /// `end_shadow_pass`
    EndShadowPass { frame_index: usize },
    /// `end_frame`
    EndFrame { frame_index: usize },
    /// `set_projection_mode`
    SetProjectionMode,
    /// `set_ortho_mode`
    SetOrthoMode,
    /// `resize` with the new back buffer size
    Resize { width: u32, height: u32 },
}

/// Backend that validates inputs and records frame hooks.
#[derive(Debug)]
pub struct NullBackend {
    clip_space_y: ClipSpaceY,
    shadow_map: NullTexture,
    known_shaders: Option<Vec<String>>,
    next_id: u64,
    device_lost: bool,
    calls: Vec<BackendCall>,
    last_frame: Option<FrameConstants>,
}

impl NullBackend {
    /// Creates a backend with the given clip-space convention and a square
    /// shadow map of `shadow_map_size` texels.
    pub fn new(clip_space_y: ClipSpaceY, shadow_map_size: u32) -> Self {
        debug!(?clip_space_y, shadow_map_size, "Creating null backend");
        Self {
            clip_space_y,
            shadow_map: NullTexture {
                id: 0,
                width: shadow_map_size,
                height: shadow_map_size,
            },
            known_shaders: None,
            next_id: 1,
            device_lost: false,
            calls: Vec::new(),
            last_frame: None,
        }
    }

    /// Restricts shader creation to the given names. Any other name fails
    /// with [`RhiError::ShaderError`].
    pub fn with_shaders<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_shaders = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Makes every following frame hook fail with [`RhiError::DeviceLost`].
    pub fn set_device_lost(&mut self, lost: bool) {
        self.device_lost = lost;
    }

    /// Frame hooks recorded so far.
    #[inline]
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Drains the recorded frame hooks.
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Constants passed to the most recent successful `begin_frame`.
    #[inline]
    pub fn last_frame(&self) -> Option<&FrameConstants> {
        self.last_frame.as_ref()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn check_device(&self) -> RhiResult<()> {
        if self.device_lost {
            return Err(RhiError::DeviceLost);
        }
        Ok(())
    }

    fn create_shader(&mut self, name: &str, stage: ShaderStage) -> RhiResult<NullShader> {
        if name.is_empty() {
            return Err(RhiError::ShaderError(format!("Empty {} shader name", stage)));
        }
        let unknown = self
            .known_shaders
            .as_ref()
            .is_some_and(|known| !known.iter().any(|n| n == name));
        if unknown {
            return Err(RhiError::ShaderError(format!("{} shader '{}' not found", stage, name)));
        }

        let id = self.allocate_id();
        debug!(id, name, %stage, "Created shader");
        Ok(NullShader {
            id,
            name: name.to_owned(),
            stage,
        })
    }
}

impl RenderBackend for NullBackend {
    type Texture = NullTexture;
    type VertexShader = NullShader;
    type PixelShader = NullShader;
    type PipelineState = NullPipelineState;
    type Primitive = NullPrimitive;
    type Instances = NullInstances;

    fn clip_space_y(&self) -> ClipSpaceY {
        self.clip_space_y
    }

    fn create_texture(&mut self, surface: &Surface) -> RhiResult<NullTexture> {
        let id = self.allocate_id();
        debug!(id, width = surface.width(), height = surface.height(), "Created texture");
        Ok(NullTexture {
            id,
            width: surface.width(),
            height: surface.height(),
        })
    }

    fn create_vertex_shader(&mut self, name: &str) -> RhiResult<NullShader> {
        self.create_shader(name, ShaderStage::Vertex)
    }

    fn create_pixel_shader(&mut self, name: &str) -> RhiResult<NullShader> {
        self.create_shader(name, ShaderStage::Pixel)
    }

    fn create_pipeline_state(
        &mut self,
        desc: &PipelineStateDesc<'_, NullShader, NullShader>,
    ) -> RhiResult<NullPipelineState> {
        if desc.vertex_shader.stage != ShaderStage::Vertex {
            return Err(RhiError::PipelineError(format!(
                "'{}' is not a vertex shader",
                desc.vertex_shader.name
            )));
        }
        if desc.pixel_shader.stage != ShaderStage::Pixel {
            return Err(RhiError::PipelineError(format!(
                "'{}' is not a pixel shader",
                desc.pixel_shader.name
            )));
        }
        if desc.input_layout.is_empty() {
            return Err(RhiError::PipelineError("Empty input layout".to_string()));
        }

        let id = self.allocate_id();
        debug!(
            id,
            pass = ?desc.draw_pass,
            topology = ?desc.topology,
            "Created pipeline state"
        );
        Ok(NullPipelineState { id })
    }

    fn create_render_primitive(&mut self, topology: PrimitiveTopology) -> RhiResult<NullPrimitive> {
        let id = self.allocate_id();
        Ok(NullPrimitive { id, topology })
    }

    fn create_render_instances(&mut self) -> RhiResult<NullInstances> {
        let id = self.allocate_id();
        Ok(NullInstances { id })
    }

    fn shadow_map(&self) -> &NullTexture {
        &self.shadow_map
    }

    fn shadow_map_size(&self) -> u32 {
        self.shadow_map.width
    }

    fn begin_frame(&mut self, frame: &FrameConstants) -> RhiResult<()> {
        self.check_device()?;
        self.calls.push(BackendCall::BeginFrame {
            frame_index: frame.frame_index,
        });
        self.last_frame = Some(*frame);
        Ok(())
    }

    fn end_shadow_pass(&mut self, frame_index: usize) -> RhiResult<()> {
        self.check_device()?;
        self.calls.push(BackendCall::EndShadowPass { frame_index });
        Ok(())
    }

    fn end_frame(&mut self, frame_index: usize) -> RhiResult<()> {
        self.check_device()?;
        self.calls.push(BackendCall::EndFrame { frame_index });
        Ok(())
    }

    fn set_projection_mode(&mut self, _constants: &VertexShaderConstants) -> RhiResult<()> {
        self.check_device()?;
        self.calls.push(BackendCall::SetProjectionMode);
        Ok(())
    }

    fn set_ortho_mode(&mut self, _constants: &VertexShaderConstants) -> RhiResult<()> {
        self.check_device()?;
        self.calls.push(BackendCall::SetOrthoMode);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RhiResult<()> {
        self.check_device()?;
        debug!(width, height, "Resizing null backend");
        self.calls.push(BackendCall::Resize { width, height });
        Ok(())
    }
}
