//! Frame lifecycle state machine.
//!
//! [`FrameController`] drives one frame at a time through
//! `Idle → ShadowPass → MainPass → Idle`. Beginning a frame picks the next
//! buffer slot, computes the camera and light frustums and fills the constant
//! buffers; those values stay fixed until the frame ends.
//!
//! Window resizes and offset changes that arrive mid-frame are queued and
//! applied at the next `begin_frame`.
//!
//! # Example
//!
//! ```
//! use framekit_core::RendererConfig;
//! use framekit_renderer::FrameController;
//! use framekit_rhi::{ClipSpaceY, NullBackend};
//! use framekit_scene::CameraState;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RendererConfig::default();
//! let backend = NullBackend::new(ClipSpaceY::Up, config.shadow_map_size);
//! let mut frames = FrameController::new(backend, &config)?;
//!
//! frames.begin_frame(&CameraState::default(), 1.0)?;
//! // Shadow pass draws use frames.light_frustum()
//! frames.end_shadow_pass()?;
//! // Main pass draws use frames.camera_frustum()
//! let slot = frames.end_frame()?;
//! assert_eq!(slot, 0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use glam::DVec3;
use tracing::{debug, info, warn};

use framekit_core::RendererConfig;
use framekit_rhi::{FrameConstants, PixelShaderConstants, RenderBackend, VertexShaderConstants};
use framekit_scene::{
    CameraState, ClipRange, DAabb, DirectionalLight, Frustum, LargeWorldOffset, LightFitTarget,
    compute_camera_frustum, compute_light_frustum,
};

use crate::error::{FrameError, FrameResult};
use crate::frame::FrameRing;
use crate::matrices::{build_ortho_constants, build_pixel_constants, build_view_projection};

/// Where a frame is in its pass sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FramePhase {
    /// Between frames.
    #[default]
    Idle,
    /// Rendering the shadow map from the light.
    ShadowPass,
    /// Rendering the scene from the camera.
    MainPass,
}

impl FramePhase {
    /// Whether a frame is open.
    #[inline]
    pub fn in_frame(self) -> bool {
        self != FramePhase::Idle
    }
}

/// What the shadow volume is fitted around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShadowFit {
    /// The camera frustum cut off at `max_distance` world units (scaled by
    /// the frame's world scale).
    CameraFrustum { max_distance: f32 },
    /// Fixed scene bounds in world space.
    WorldBounds(DAabb),
}

/// Values computed by `begin_frame` and frozen for the rest of the frame.
#[derive(Clone, Copy, Debug)]
struct FrameContext {
    camera: CameraState,
    camera_frustum: Frustum,
    light_frustum: Frustum,
    constants: FrameConstants,
    world_scale: f32,
}

/// Drives frames through the shadow and main passes of a backend.
pub struct FrameController<B: RenderBackend> {
    backend: B,
    config: RendererConfig,
    ring: FrameRing,
    phase: FramePhase,
    context: Option<FrameContext>,
    window_width: u32,
    window_height: u32,
    pending_resize: Option<(u32, u32)>,
    offset: LargeWorldOffset,
    pending_offset: Option<DVec3>,
    light: DirectionalLight,
    shadow_fit: ShadowFit,
}

impl<B: RenderBackend> FrameController<B> {
    /// Creates a controller for a window of the configured size.
    ///
    /// # Errors
    ///
    /// Returns [`framekit_core::Error::Config`] if the configuration is invalid.
    pub fn new(backend: B, config: &RendererConfig) -> framekit_core::Result<Self> {
        config.validate()?;

        info!(
            "Frame controller created: {}x{}, {} frames in flight, {}px shadow map",
            config.window_width,
            config.window_height,
            config.pipeline_depth,
            backend.shadow_map_size()
        );

        Ok(Self {
            backend,
            config: config.clone(),
            ring: FrameRing::new(config.pipeline_depth),
            phase: FramePhase::Idle,
            context: None,
            window_width: config.window_width,
            window_height: config.window_height,
            pending_resize: None,
            offset: LargeWorldOffset::default(),
            pending_offset: None,
            light: DirectionalLight::default(),
            shadow_fit: ShadowFit::CameraFrustum {
                max_distance: config.shadow_distance,
            },
        })
    }

    /// The backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably, for resource creation and drawing.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Configuration the controller was built with.
    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Current pass sequence state.
    #[inline]
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Window width used for the current (or next) frame.
    #[inline]
    pub fn window_width(&self) -> u32 {
        self.window_width
    }

    /// Window height used for the current (or next) frame.
    #[inline]
    pub fn window_height(&self) -> u32 {
        self.window_height
    }

    /// Offset in effect for the current (or next) frame.
    ///
    /// A change requested mid-frame is not visible here until it is applied.
    #[inline]
    pub fn base_offset(&self) -> DVec3 {
        self.offset.get()
    }

    /// Sets the floating origin.
    ///
    /// Between frames the offset changes immediately; during a frame the
    /// change is applied at the next `begin_frame`.
    pub fn set_base_offset(&mut self, offset: DVec3) {
        if self.phase.in_frame() {
            debug!("Offset change to {} deferred to next frame", offset);
            self.pending_offset = Some(offset);
        } else {
            // A newer value supersedes anything queued during the last frame
            self.pending_offset = None;
            self.apply_offset(offset);
        }
    }

    /// The light used for the shadow pass and lighting constants.
    #[inline]
    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    /// Replaces the light. Takes effect at the next `begin_frame`.
    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    /// What the shadow volume is fitted around.
    #[inline]
    pub fn shadow_fit(&self) -> ShadowFit {
        self.shadow_fit
    }

    /// Changes what the shadow volume is fitted around. Takes effect at the
    /// next `begin_frame`.
    pub fn set_shadow_fit(&mut self, fit: ShadowFit) {
        self.shadow_fit = fit;
    }

    /// Handles a window size change.
    ///
    /// Applied at once between frames and queued until the next
    /// `begin_frame` otherwise. A zero dimension (minimized window) is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Backend`] if the backend fails to resize.
    pub fn on_window_resize(&mut self, width: u32, height: u32) -> FrameResult<()> {
        if width == 0 || height == 0 {
            warn!("Ignoring resize to zero dimensions: {}x{}", width, height);
            return Ok(());
        }

        if self.phase.in_frame() {
            debug!("Resize to {}x{} deferred to next frame", width, height);
            self.pending_resize = Some((width, height));
            return Ok(());
        }

        self.pending_resize = None;
        self.apply_resize(width, height)
    }

    /// Opens a frame and enters the shadow pass.
    ///
    /// Applies queued resizes and offset changes, claims the next buffer
    /// slot, computes the camera and light frustums and hands the constant
    /// buffers to the backend.
    ///
    /// On failure the controller stays idle and the slot is not consumed.
    ///
    /// # Errors
    ///
    /// - [`FrameError::AlreadyInFrame`] if a frame is open
    /// - [`FrameError::Camera`] for a degenerate camera, light or world scale
    /// - [`FrameError::Backend`] if the backend rejects the frame
    pub fn begin_frame(&mut self, camera: &CameraState, world_scale: f32) -> FrameResult<()> {
        if self.phase.in_frame() {
            return Err(FrameError::AlreadyInFrame);
        }

        // Kept queued until the backend accepts it
        if let Some((width, height)) = self.pending_resize {
            self.apply_resize(width, height)?;
            self.pending_resize = None;
        }
        if let Some(offset) = self.pending_offset.take() {
            self.apply_offset(offset);
        }

        let clip = ClipRange::for_world_scale(
            world_scale,
            self.config.near_per_world_scale,
            self.config.far_per_world_scale,
        )?;
        let camera_frustum = compute_camera_frustum(
            camera,
            &self.offset,
            self.window_width,
            self.window_height,
            clip,
        )?;

        let target = match self.shadow_fit {
            ShadowFit::CameraFrustum { max_distance } => LightFitTarget::CameraFrustum {
                frustum: &camera_frustum,
                max_distance: max_distance * world_scale,
            },
            ShadowFit::WorldBounds(bounds) => LightFitTarget::Bounds(self.offset.apply_aabb(&bounds)),
        };
        let light_frustum = compute_light_frustum(
            self.light.direction,
            target,
            self.backend.shadow_map_size(),
        )?;

        let clip_space_y = self.backend.clip_space_y();
        let constants = FrameConstants {
            frame_index: self.ring.peek(),
            vertex: build_view_projection(
                camera,
                &camera_frustum,
                &self.offset,
                &light_frustum,
                clip_space_y,
            )?,
            vertex_ortho: build_ortho_constants(self.window_width, self.window_height, clip_space_y),
            pixel: build_pixel_constants(&camera_frustum, &light_frustum, &self.light, world_scale),
        };

        self.backend.begin_frame(&constants)?;

        self.ring.advance();
        self.context = Some(FrameContext {
            camera: *camera,
            camera_frustum,
            light_frustum,
            constants,
            world_scale,
        });
        self.phase = FramePhase::ShadowPass;
        Ok(())
    }

    /// Leaves the shadow pass and enters the main pass.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidPassSequence`] unless the frame is in the
    /// shadow pass, or [`FrameError::Backend`] if the backend fails.
    pub fn end_shadow_pass(&mut self) -> FrameResult<()> {
        if self.phase != FramePhase::ShadowPass {
            return Err(FrameError::InvalidPassSequence(format!(
                "end_shadow_pass called during {:?}",
                self.phase
            )));
        }

        let frame_index = self.frame_context().constants.frame_index;
        self.backend.end_shadow_pass(frame_index)?;
        self.phase = FramePhase::MainPass;
        Ok(())
    }

    /// Closes the frame and returns the slot it used.
    ///
    /// The slot tells the backend which resources it may recycle once its
    /// fence for that slot signals. The controller is idle afterwards even if
    /// the backend reports an error.
    ///
    /// # Errors
    ///
    /// - [`FrameError::NotInFrame`] without a matching `begin_frame`
    /// - [`FrameError::InvalidPassSequence`] if the shadow pass was not ended
    /// - [`FrameError::Backend`] if the backend fails to submit
    pub fn end_frame(&mut self) -> FrameResult<usize> {
        match self.phase {
            FramePhase::Idle => return Err(FrameError::NotInFrame),
            FramePhase::ShadowPass => {
                return Err(FrameError::InvalidPassSequence(
                    "end_frame called before end_shadow_pass".to_string(),
                ));
            }
            FramePhase::MainPass => {}
        }

        let frame_index = self.frame_context().constants.frame_index;
        self.phase = FramePhase::Idle;
        self.backend.end_frame(frame_index)?;
        Ok(frame_index)
    }

    /// Switches main-pass drawing to the perspective constants.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidPassSequence`] outside the main pass.
    pub fn set_projection_mode(&mut self) -> FrameResult<()> {
        let constants = self.main_pass_context("set_projection_mode")?.constants.vertex;
        self.backend.set_projection_mode(&constants)?;
        Ok(())
    }

    /// Switches main-pass drawing to the orthographic overlay constants.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidPassSequence`] outside the main pass.
    pub fn set_ortho_mode(&mut self) -> FrameResult<()> {
        let constants = self.main_pass_context("set_ortho_mode")?.constants.vertex_ortho;
        self.backend.set_ortho_mode(&constants)?;
        Ok(())
    }

    /// Camera the frame was begun with.
    ///
    /// # Panics
    ///
    /// Panics outside a `begin_frame`/`end_frame` pair. The same holds for
    /// every frame-scoped accessor below.
    pub fn camera_state(&self) -> &CameraState {
        &self.frame_context().camera
    }

    /// Camera frustum of the current frame, in render space.
    pub fn camera_frustum(&self) -> &Frustum {
        &self.frame_context().camera_frustum
    }

    /// Light frustum of the current frame, in render space.
    pub fn light_frustum(&self) -> &Frustum {
        &self.frame_context().light_frustum
    }

    /// Buffer slot of the current frame.
    pub fn current_frame_index(&self) -> usize {
        self.frame_context().constants.frame_index
    }

    /// World scale the current frame was begun with.
    pub fn world_scale(&self) -> f32 {
        self.frame_context().world_scale
    }

    /// Perspective vertex constants of the current frame.
    pub fn vertex_constants(&self) -> &VertexShaderConstants {
        &self.frame_context().constants.vertex
    }

    /// Orthographic overlay vertex constants of the current frame.
    pub fn ortho_constants(&self) -> &VertexShaderConstants {
        &self.frame_context().constants.vertex_ortho
    }

    /// Lighting constants of the current frame.
    pub fn pixel_constants(&self) -> &PixelShaderConstants {
        &self.frame_context().constants.pixel
    }

    fn frame_context(&self) -> &FrameContext {
        match &self.context {
            Some(context) if self.phase.in_frame() => context,
            _ => panic!("frame state accessed outside begin_frame/end_frame"),
        }
    }

    fn main_pass_context(&self, operation: &str) -> FrameResult<&FrameContext> {
        if self.phase != FramePhase::MainPass {
            return Err(FrameError::InvalidPassSequence(format!(
                "{} called during {:?}",
                operation, self.phase
            )));
        }
        Ok(self.frame_context())
    }

    fn apply_resize(&mut self, width: u32, height: u32) -> FrameResult<()> {
        if (width, height) == (self.window_width, self.window_height) {
            return Ok(());
        }

        debug!(
            "Resize applied: {}x{} -> {}x{}",
            self.window_width, self.window_height, width, height
        );
        self.backend.resize(width, height)?;
        self.window_width = width;
        self.window_height = height;
        Ok(())
    }

    fn apply_offset(&mut self, offset: DVec3) {
        if offset != self.offset.get() {
            debug!("Base offset set to {}", offset);
            self.offset.set(offset);
        }
    }
}

impl<B: RenderBackend + std::fmt::Debug> std::fmt::Debug for FrameController<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameController")
            .field("backend", &self.backend)
            .field("phase", &self.phase)
            .field("next_slot", &self.ring.peek())
            .field("window", &(self.window_width, self.window_height))
            .field("offset", &self.offset.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framekit_rhi::{BackendCall, ClipSpaceY, NullBackend};
    use glam::Vec3;

    fn controller() -> FrameController<NullBackend> {
        let config = RendererConfig::default().with_shadow_map_size(1024);
        FrameController::new(NullBackend::new(ClipSpaceY::Up, 1024), &config).unwrap()
    }

    fn run_frame(frames: &mut FrameController<NullBackend>) -> usize {
        frames.begin_frame(&CameraState::default(), 1.0).unwrap();
        frames.end_shadow_pass().unwrap();
        frames.end_frame().unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RendererConfig::default().with_pipeline_depth(0);
        let result = FrameController::new(NullBackend::new(ClipSpaceY::Up, 1024), &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_phase_transitions() {
        let mut frames = controller();
        assert_eq!(frames.phase(), FramePhase::Idle);

        frames.begin_frame(&CameraState::default(), 1.0).unwrap();
        assert_eq!(frames.phase(), FramePhase::ShadowPass);

        frames.end_shadow_pass().unwrap();
        assert_eq!(frames.phase(), FramePhase::MainPass);

        frames.end_frame().unwrap();
        assert_eq!(frames.phase(), FramePhase::Idle);
    }

    #[test]
    fn test_end_shadow_pass_twice() {
        let mut frames = controller();
        frames.begin_frame(&CameraState::default(), 1.0).unwrap();
        frames.end_shadow_pass().unwrap();

        assert!(matches!(
            frames.end_shadow_pass(),
            Err(FrameError::InvalidPassSequence(_))
        ));
    }

    #[test]
    fn test_end_shadow_pass_outside_frame() {
        let mut frames = controller();
        assert!(matches!(
            frames.end_shadow_pass(),
            Err(FrameError::InvalidPassSequence(_))
        ));
    }

    #[test]
    fn test_end_frame_in_shadow_pass() {
        let mut frames = controller();
        frames.begin_frame(&CameraState::default(), 1.0).unwrap();

        assert!(matches!(
            frames.end_frame(),
            Err(FrameError::InvalidPassSequence(_))
        ));
        // Still open
        assert_eq!(frames.phase(), FramePhase::ShadowPass);
    }

    #[test]
    fn test_mode_switch_only_in_main_pass() {
        let mut frames = controller();
        assert!(frames.set_ortho_mode().is_err());

        frames.begin_frame(&CameraState::default(), 1.0).unwrap();
        assert!(frames.set_projection_mode().is_err());

        frames.end_shadow_pass().unwrap();
        frames.set_ortho_mode().unwrap();
        frames.set_projection_mode().unwrap();
        frames.end_frame().unwrap();

        let calls = frames.backend_mut().take_calls();
        assert_eq!(
            calls,
            vec![
                BackendCall::BeginFrame { frame_index: 0 },
                BackendCall::EndShadowPass { frame_index: 0 },
                BackendCall::SetOrthoMode,
                BackendCall::SetProjectionMode,
                BackendCall::EndFrame { frame_index: 0 },
            ]
        );
    }

    #[test]
    fn test_degenerate_camera_leaves_idle() {
        let mut frames = controller();
        let bad = CameraState::default().with_fov_y(0.0);

        assert!(matches!(
            frames.begin_frame(&bad, 1.0),
            Err(FrameError::Camera(_))
        ));
        assert_eq!(frames.phase(), FramePhase::Idle);

        // The failed frame did not consume a slot
        assert_eq!(run_frame(&mut frames), 0);
    }

    #[test]
    fn test_invalid_world_scale() {
        let mut frames = controller();
        assert!(frames.begin_frame(&CameraState::default(), 0.0).is_err());
        assert!(frames.begin_frame(&CameraState::default(), f32::NAN).is_err());
        assert_eq!(frames.phase(), FramePhase::Idle);
    }

    #[test]
    fn test_backend_failure_leaves_idle() {
        let mut frames = controller();
        frames.backend_mut().set_device_lost(true);

        assert!(matches!(
            frames.begin_frame(&CameraState::default(), 1.0),
            Err(FrameError::Backend(_))
        ));
        assert_eq!(frames.phase(), FramePhase::Idle);

        frames.backend_mut().set_device_lost(false);
        assert_eq!(run_frame(&mut frames), 0);
    }

    #[test]
    fn test_world_scale_sets_clip_range() {
        let mut frames = controller();
        frames.begin_frame(&CameraState::default(), 10.0).unwrap();

        let frustum = frames.camera_frustum();
        assert!((frustum.near() - 0.1).abs() < 1e-6);
        assert!((frustum.far() - 10_000.0).abs() < 1e-2);
        assert_eq!(frames.world_scale(), 10.0);
        assert_eq!(frames.pixel_constants().world_scale, 10.0);
    }

    #[test]
    fn test_offset_deferred_in_frame() {
        let mut frames = controller();
        frames.begin_frame(&CameraState::default(), 1.0).unwrap();
        frames.set_base_offset(DVec3::new(100.0, 0.0, 0.0));

        assert_eq!(frames.base_offset(), DVec3::ZERO);
        assert_eq!(frames.camera_frustum().origin(), Vec3::ZERO);

        frames.end_shadow_pass().unwrap();
        frames.end_frame().unwrap();
        assert_eq!(frames.base_offset(), DVec3::ZERO);

        frames.begin_frame(&CameraState::default(), 1.0).unwrap();
        assert_eq!(frames.base_offset(), DVec3::new(100.0, 0.0, 0.0));
        assert_eq!(frames.camera_frustum().origin(), Vec3::new(-100.0, 0.0, 0.0));
    }

    #[test]
    fn test_offset_between_frames_immediate() {
        let mut frames = controller();
        frames.set_base_offset(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(frames.base_offset(), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_zero_resize_ignored() {
        let mut frames = controller();
        frames.on_window_resize(0, 720).unwrap();
        assert_eq!((frames.window_width(), frames.window_height()), (1920, 1080));
        assert!(frames.backend().calls().is_empty());
    }

    #[test]
    fn test_resize_between_frames() {
        let mut frames = controller();
        frames.on_window_resize(1280, 720).unwrap();

        assert_eq!((frames.window_width(), frames.window_height()), (1280, 720));
        assert_eq!(
            frames.backend().calls(),
            &[BackendCall::Resize {
                width: 1280,
                height: 720
            }]
        );
    }

    #[test]
    fn test_resize_between_frames_replaces_queued() {
        let mut frames = controller();
        frames.begin_frame(&CameraState::default(), 1.0).unwrap();
        frames.on_window_resize(800, 600).unwrap();
        frames.end_shadow_pass().unwrap();
        frames.end_frame().unwrap();

        frames.on_window_resize(1024, 768).unwrap();
        frames.begin_frame(&CameraState::default(), 1.0).unwrap();

        assert_eq!((frames.window_width(), frames.window_height()), (1024, 768));
        assert!((frames.camera_frustum().aspect().unwrap() - 1024.0 / 768.0).abs() < 1e-5);

        let resizes: Vec<BackendCall> = frames
            .backend()
            .calls()
            .iter()
            .copied()
            .filter(|call| matches!(call, BackendCall::Resize { .. }))
            .collect();
        assert_eq!(
            resizes,
            vec![BackendCall::Resize {
                width: 1024,
                height: 768
            }]
        );
    }

    #[test]
    fn test_offset_between_frames_replaces_queued() {
        let mut frames = controller();
        frames.begin_frame(&CameraState::default(), 1.0).unwrap();
        frames.set_base_offset(DVec3::new(1.0, 0.0, 0.0));
        frames.end_shadow_pass().unwrap();
        frames.end_frame().unwrap();

        frames.set_base_offset(DVec3::new(2.0, 0.0, 0.0));
        frames.begin_frame(&CameraState::default(), 1.0).unwrap();

        assert_eq!(frames.base_offset(), DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(frames.camera_frustum().origin(), Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn test_failed_deferred_resize_stays_queued() {
        let mut frames = controller();
        frames.begin_frame(&CameraState::default(), 1.0).unwrap();
        frames.on_window_resize(1280, 720).unwrap();
        frames.end_shadow_pass().unwrap();
        frames.end_frame().unwrap();

        frames.backend_mut().set_device_lost(true);
        assert!(matches!(
            frames.begin_frame(&CameraState::default(), 1.0),
            Err(FrameError::Backend(_))
        ));
        assert_eq!((frames.window_width(), frames.window_height()), (1920, 1080));

        frames.backend_mut().set_device_lost(false);
        frames.begin_frame(&CameraState::default(), 1.0).unwrap();
        assert_eq!((frames.window_width(), frames.window_height()), (1280, 720));
    }

    #[test]
    fn test_light_frustum_world_bounds() {
        let mut frames = controller();
        let bounds = DAabb::new(DVec3::new(990.0, -10.0, -10.0), DVec3::new(1010.0, 10.0, 10.0));
        frames.set_base_offset(DVec3::new(1000.0, 0.0, 0.0));
        frames.set_shadow_fit(ShadowFit::WorldBounds(bounds));
        frames.set_light(DirectionalLight::default().with_direction(Vec3::NEG_Y));

        frames.begin_frame(&CameraState::default(), 1.0).unwrap();
        let light = frames.light_frustum();

        // The bounds are centered on the render-space origin after the offset
        assert!(light.contains_point(Vec3::ZERO));
        assert!(light.contains_point(Vec3::new(9.0, 9.0, 9.0)));
        assert!(light.forward().dot(Vec3::NEG_Y) > 0.999);
    }

    #[test]
    fn test_constants_match_frame() {
        let mut frames = controller();
        frames.begin_frame(&CameraState::default(), 1.0).unwrap();

        let sent = frames.backend().last_frame().copied().unwrap();
        assert_eq!(sent.vertex, *frames.vertex_constants());
        assert_eq!(sent.vertex_ortho, *frames.ortho_constants());
        assert_eq!(sent.frame_index, frames.current_frame_index());
        assert_eq!(frames.camera_state(), &CameraState::default());
    }

    #[test]
    #[should_panic(expected = "outside begin_frame/end_frame")]
    fn test_accessor_after_end_panics() {
        let mut frames = controller();
        run_frame(&mut frames);
        let _ = frames.light_frustum();
    }
}
