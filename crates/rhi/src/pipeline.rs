//! Pipeline state description.
//!
//! A pipeline state object fixes everything about how a primitive is drawn:
//! shaders, vertex input layout, which pass it belongs to, fill mode,
//! topology, depth testing, blending and culling. Backends turn a
//! [`PipelineStateDesc`] into their native object in
//! [`RenderBackend::create_pipeline_state`](crate::RenderBackend::create_pipeline_state).
//!
//! # Example
//!
//! ```
//! use framekit_rhi::{
//!     BlendMode, ClipSpaceY, CullMode, DrawPass, InputElement, NullBackend, PipelineStateDesc,
//!     RenderBackend,
//! };
//!
//! # fn example() -> Result<(), framekit_rhi::RhiError> {
//! let mut backend = NullBackend::new(ClipSpaceY::Up, 1024);
//! let vs = backend.create_vertex_shader("TriangleVertexShader")?;
//! let ps = backend.create_pixel_shader("TrianglePixelShader")?;
//! let layout = [InputElement::Position, InputElement::Normal, InputElement::Color];
//!
//! let desc = PipelineStateDesc::new(&vs, &layout, &ps)
//!     .draw_pass(DrawPass::Shadow)
//!     .blend_mode(BlendMode::Write)
//!     .cull_mode(CullMode::Front);
//! let _state = backend.create_pipeline_state(&desc)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::vertex::InputElement;

/// Which pass of the frame a pipeline state renders in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawPass {
    /// Depth-only rendering from the light into the shadow map.
    Shadow,
    /// Regular shaded rendering from the camera.
    #[default]
    Main,
    /// Screen-space overlay drawn with the orthographic constants.
    Overlay,
}

/// Primitive topology for input assembly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    /// Independent points.
    PointList,
    /// Independent lines.
    LineList,
    /// Connected lines with each vertex after the first starting a new line.
    LineStrip,
    /// Independent triangles.
    #[default]
    TriangleList,
    /// Connected triangles with shared edges.
    TriangleStrip,
}

/// Polygon rasterization mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillMode {
    /// Fill the polygon interior.
    #[default]
    Solid,
    /// Draw polygon edges as lines.
    Wireframe,
}

/// Depth buffer usage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DepthTest {
    /// No depth test and no depth writes.
    Off,
    /// Test against and write to the depth buffer.
    #[default]
    On,
}

/// Color blending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Overwrite the destination.
    #[default]
    Write,
    /// Standard source-alpha blending.
    AlphaBlend,
}

/// Face culling mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CullMode {
    /// Do not cull any faces.
    None,
    /// Cull back-facing triangles.
    #[default]
    Back,
    /// Cull front-facing triangles.
    Front,
}

/// Everything needed to create a pipeline state object.
///
/// `VS` and `PS` are the backend's shader handle types, so a description
/// can only ever be built from shaders of the backend that will consume it.
#[derive(Debug)]
pub struct PipelineStateDesc<'a, VS, PS> {
    /// Vertex shader
    pub vertex_shader: &'a VS,
    /// Vertex and instance stream layout
    pub input_layout: &'a [InputElement],
    /// Pixel shader
    pub pixel_shader: &'a PS,
    /// Pass the state is used in
    pub draw_pass: DrawPass,
    /// Rasterization fill mode
    pub fill_mode: FillMode,
    /// Input assembly topology
    pub topology: PrimitiveTopology,
    /// Depth testing
    pub depth_test: DepthTest,
    /// Color blending
    pub blend_mode: BlendMode,
    /// Face culling
    pub cull_mode: CullMode,
}

impl<'a, VS, PS> PipelineStateDesc<'a, VS, PS> {
    /// Creates a description with default fixed-function state: main pass,
    /// solid triangles, depth test on, no blending, back-face culling.
    pub fn new(vertex_shader: &'a VS, input_layout: &'a [InputElement], pixel_shader: &'a PS) -> Self {
        Self {
            vertex_shader,
            input_layout,
            pixel_shader,
            draw_pass: DrawPass::default(),
            fill_mode: FillMode::default(),
            topology: PrimitiveTopology::default(),
            depth_test: DepthTest::default(),
            blend_mode: BlendMode::default(),
            cull_mode: CullMode::default(),
        }
    }

    /// Sets the draw pass.
    pub fn draw_pass(mut self, pass: DrawPass) -> Self {
        self.draw_pass = pass;
        self
    }

    /// Sets the fill mode.
    pub fn fill_mode(mut self, mode: FillMode) -> Self {
        self.fill_mode = mode;
        self
    }

    /// Sets the primitive topology.
    pub fn topology(mut self, topology: PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Sets the depth test mode.
    pub fn depth_test(mut self, test: DepthTest) -> Self {
        self.depth_test = test;
        self
    }

    /// Sets the blend mode.
    pub fn blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    /// Sets the cull mode.
    pub fn cull_mode(mut self, mode: CullMode) -> Self {
        self.cull_mode = mode;
        self
    }
}
