//! framekit - frame loop demo
//!
//! Opens a window and drives the frame controller against the headless null
//! backend. The camera flies across a world far from the origin, so the
//! floating origin has to be recentered every few seconds to keep render-space
//! coordinates small.

use anyhow::Result;
use glam::{DVec3, Vec3};
use raw_window_handle::HasWindowHandle;
use tracing::{debug, info};

use framekit_core::{FrameTimer, RendererConfig};
use framekit_platform::{WindowEvent, WindowSurface, WinitSurface};
use framekit_renderer::FrameController;
use framekit_rhi::{
    ClipSpaceY, CullMode, DebugVertex, DrawPass, NullBackend, PipelineStateDesc, RenderBackend,
};
use framekit_scene::{CameraState, LargeWorldOffset};

/// Where the flight starts, about a billion units from the origin.
const START_POSITION: DVec3 = DVec3::new(1.0e9, 120.0, -2.5e8);

/// Camera speed in world units per second.
const CAMERA_SPEED: f64 = 400.0;

/// Distance from the floating origin that triggers a recenter.
const RECENTER_DISTANCE: f64 = 2_000.0;

const WORLD_SCALE: f32 = 1.0;

/// Frames between FPS log lines.
const STATS_INTERVAL: u64 = 600;

fn main() -> Result<()> {
    framekit_core::init_logging();
    info!("Starting framekit");

    let config = RendererConfig::default();
    let mut window = WinitSurface::new("framekit", config.window_width, config.window_height)?;
    if let Ok(handle) = window.window_handle() {
        debug!("Native window handle: {:?}", handle.as_raw());
    }

    window.set_event_listener(Box::new(|event| {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            debug!("Key {:?} {:?}", event.physical_key, event.state);
        }
    }));

    let backend = NullBackend::new(ClipSpaceY::Down, config.shadow_map_size);
    let mut frames = FrameController::new(backend, &config)?;
    create_pipelines(frames.backend_mut())?;

    let (width, height) = window.size();
    frames.on_window_resize(width, height)?;

    let mut origin = LargeWorldOffset::new(START_POSITION);
    frames.set_base_offset(origin.get());

    let mut timer = FrameTimer::new();
    let mut position = START_POSITION;
    let forward = Vec3::new(1.0, -0.2, 0.0).normalize();

    info!("Entering main loop");
    while window.poll_events() {
        if let Some((width, height)) = window.take_resize() {
            frames.on_window_resize(width, height)?;
        }

        let delta = timer.tick().as_secs_f64();
        position.x += CAMERA_SPEED * delta;
        if origin.recenter_if_beyond(position, RECENTER_DISTANCE) {
            info!("Recentered floating origin at {}", origin.get());
            frames.set_base_offset(origin.get());
        }

        let camera = CameraState::new(position, forward, Vec3::Y, 70_f32.to_radians());
        frames.begin_frame(&camera, WORLD_SCALE)?;
        frames.end_shadow_pass()?;
        frames.set_ortho_mode()?;
        frames.set_projection_mode()?;
        let slot = frames.end_frame()?;

        // Nothing inspects the recorded calls here
        frames.backend_mut().take_calls();

        if timer.frame_count() % STATS_INTERVAL == 0 {
            info!(
                fps = timer.average_fps(),
                slot,
                elapsed = ?timer.elapsed(),
                "Frame stats"
            );
        }
    }

    info!("Shutting down after {} frames", timer.frame_count());
    Ok(())
}

/// Creates the shadow and main pass pipelines the demo would draw with.
fn create_pipelines(backend: &mut NullBackend) -> Result<()> {
    let vs = backend.create_vertex_shader("TriangleVertexShader")?;
    let ps = backend.create_pixel_shader("TrianglePixelShader")?;
    let depth_vs = backend.create_vertex_shader("TriangleDepthVertexShader")?;
    let depth_ps = backend.create_pixel_shader("TriangleDepthPixelShader")?;

    let shadow = PipelineStateDesc::new(&depth_vs, &DebugVertex::LAYOUT, &depth_ps)
        .draw_pass(DrawPass::Shadow)
        .cull_mode(CullMode::Front);
    backend.create_pipeline_state(&shadow)?;

    let main = PipelineStateDesc::new(&vs, &DebugVertex::LAYOUT, &ps);
    backend.create_pipeline_state(&main)?;

    info!("Pipelines created");
    Ok(())
}
