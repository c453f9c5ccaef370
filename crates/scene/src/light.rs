//! Light definitions for the shadow and main passes.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A directional light (sun-like) that casts the frame's shadows.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct DirectionalLight {
    /// Direction the light travels in (normalized)
    pub direction: Vec3,
    pub _pad0: f32,
    /// Light color
    pub color: Vec3,
    /// Light intensity
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        // Shining from (+X, +Y, +Z) down towards the origin.
        Self::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE, 1.0)
    }
}

impl DirectionalLight {
    /// Creates a light. `direction` is normalized; a zero vector is kept
    /// as is and rejected later when the shadow frustum is computed.
    pub fn new(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            _pad0: 0.0,
            color,
            intensity,
        }
    }

    /// Returns a copy pointing in a different direction.
    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = direction.normalize_or_zero();
        self
    }
}
