//! Floating origin support for very large worlds.
//!
//! World positions are stored in `f64`. Before anything reaches a
//! single-precision transform, the current base offset is subtracted so
//! that the geometry being drawn sits close to the origin where `f32` still
//! has sub-millimetre resolution.
//!
//! # Example
//!
//! ```
//! use framekit_scene::LargeWorldOffset;
//! use glam::{DVec3, Vec3};
//!
//! let mut offset = LargeWorldOffset::default();
//! offset.recenter(DVec3::new(4.0e9, 0.0, 0.0));
//!
//! let local = offset.apply(DVec3::new(4.0e9 + 0.25, 0.0, 0.0));
//! assert_eq!(local, Vec3::new(0.25, 0.0, 0.0));
//! ```

use glam::{DVec3, Vec3};

use crate::frustum::Aabb;

/// Translation subtracted from world positions before rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LargeWorldOffset {
    offset: DVec3,
}

impl LargeWorldOffset {
    /// Creates an offset at the given world position.
    pub fn new(offset: DVec3) -> Self {
        Self { offset }
    }

    /// Current offset in world space.
    #[inline]
    pub fn get(&self) -> DVec3 {
        self.offset
    }

    /// Replaces the offset.
    pub fn set(&mut self, offset: DVec3) {
        self.offset = offset;
    }

    /// Converts a world position to render space.
    ///
    /// The subtraction happens in `f64`; only the result is narrowed.
    #[inline]
    pub fn apply(&self, world_position: DVec3) -> Vec3 {
        (world_position - self.offset).as_vec3()
    }

    /// Converts world-space bounds to render space.
    pub fn apply_aabb(&self, bounds: &DAabb) -> Aabb {
        Aabb::new(self.apply(bounds.min), self.apply(bounds.max))
    }

    /// Moves the offset onto `position`.
    pub fn recenter(&mut self, position: DVec3) {
        self.offset = position;
    }

    /// Recenters on `position` once it is further than `threshold` from the
    /// current offset. Returns true if the offset changed.
    ///
    /// Recentering rarely avoids visible popping of shading that depends on
    /// render-space positions.
    pub fn recenter_if_beyond(&mut self, position: DVec3, threshold: f64) -> bool {
        if position.distance_squared(self.offset) > threshold * threshold {
            self.recenter(position);
            true
        } else {
            false
        }
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DAabb {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl DAabb {
    /// Creates a box spanning the two corners in any order.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }
}
