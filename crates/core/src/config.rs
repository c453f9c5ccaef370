//! Construction-time renderer configuration.
//!
//! None of these values are runtime flags: they are fixed when the frame
//! controller is created and stay constant for the life of the process.

use crate::{Error, Result};

/// Default number of frames that can be in flight simultaneously.
pub const FRAME_COUNT: usize = 2;

/// Configuration consumed when building a frame controller.
#[derive(Clone, Debug, PartialEq)]
pub struct RendererConfig {
    /// Initial window width in pixels.
    pub window_width: u32,
    /// Initial window height in pixels.
    pub window_height: u32,
    /// Number of frames that may be in flight before a buffer slot is reused.
    pub pipeline_depth: usize,
    /// Width and height of the square shadow map in texels.
    pub shadow_map_size: u32,
    /// How far from the camera the shadow volume reaches, in world units
    /// before world scaling.
    pub shadow_distance: f32,
    /// Near plane distance per unit of world scale.
    pub near_per_world_scale: f32,
    /// Far plane distance per unit of world scale.
    pub far_per_world_scale: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            window_width: 1920,
            window_height: 1080,
            pipeline_depth: FRAME_COUNT,
            shadow_map_size: 4096,
            shadow_distance: 250.0,
            near_per_world_scale: 0.01,
            far_per_world_scale: 1000.0,
        }
    }
}

impl RendererConfig {
    /// Sets the initial window size.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Sets the number of pipelined frames.
    pub fn with_pipeline_depth(mut self, depth: usize) -> Self {
        self.pipeline_depth = depth;
        self
    }

    /// Sets the shadow map resolution.
    pub fn with_shadow_map_size(mut self, size: u32) -> Self {
        self.shadow_map_size = size;
        self
    }

    /// Sets the distance covered by the shadow volume.
    pub fn with_shadow_distance(mut self, distance: f32) -> Self {
        self.shadow_distance = distance;
        self
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(Error::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.pipeline_depth == 0 {
            return Err(Error::Config("pipeline depth must be at least 1".into()));
        }
        if self.shadow_map_size == 0 {
            return Err(Error::Config("shadow map size must be non-zero".into()));
        }
        if !(self.shadow_distance.is_finite() && self.shadow_distance > 0.0) {
            return Err(Error::Config(format!(
                "shadow distance must be positive, got {}",
                self.shadow_distance
            )));
        }
        if !(self.near_per_world_scale > 0.0
            && self.near_per_world_scale < self.far_per_world_scale
            && self.far_per_world_scale.is_finite())
        {
            return Err(Error::Config(format!(
                "clip range must satisfy 0 < near < far, got near={} far={}",
                self.near_per_world_scale, self.far_per_world_scale
            )));
        }
        Ok(())
    }
}
