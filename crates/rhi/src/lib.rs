//! Render hardware interface: what the frame controller needs from a backend.
//!
//! This crate holds everything shared between the backend-independent frame
//! controller and a concrete graphics backend:
//! - The [`RenderBackend`] capability trait
//! - Pipeline state vocabulary (topology, fill, depth, blend, cull, draw pass)
//! - Vertex input layouts
//! - GPU constant buffer layouts
//! - A CPU-side [`Surface`] image for texture creation
//! - [`NullBackend`], a headless backend for tests and tooling

mod error;

pub mod backend;
pub mod constants;
pub mod null;
pub mod pipeline;
pub mod shader;
pub mod surface;
pub mod vertex;

pub use backend::{ClipSpaceY, RenderBackend};
pub use constants::{FrameConstants, PixelShaderConstants, VertexShaderConstants};
pub use error::{RhiError, RhiResult};
pub use null::{BackendCall, NullBackend};
pub use pipeline::{
    BlendMode, CullMode, DepthTest, DrawPass, FillMode, PipelineStateDesc, PrimitiveTopology,
};
pub use shader::ShaderStage;
pub use surface::Surface;
pub use vertex::{DebugVertex, InputElement, InputRate};
