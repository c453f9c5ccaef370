//! Camera state consumed by the frame controller.

use std::f32::consts::PI;

use glam::{DVec3, Vec3};

use crate::error::{SceneError, SceneResult};

/// Minimum length of `forward × up` before the two are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Camera pose and lens for one frame.
///
/// The position is kept in double precision because world coordinates may
/// exceed what `f32` can represent accurately. Orientation vectors do not
/// need to be normalized; they are renormalized by [`basis`](Self::basis).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Camera position in world space
    pub position: DVec3,
    /// Viewing direction
    pub forward: Vec3,
    /// Approximate up direction, must not be parallel to `forward`
    pub up: Vec3,
    /// Vertical field of view in radians, in the open range (0, π)
    pub fov_y: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_y: 70.0_f32.to_radians(),
        }
    }
}

/// Orthonormal camera axes derived from a [`CameraState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    /// Unit viewing direction
    pub forward: Vec3,
    /// Unit up vector, orthogonal to `forward`
    pub up: Vec3,
    /// Unit right vector (`forward × up`)
    pub right: Vec3,
}

impl CameraBasis {
    /// Builds an orthonormal basis from a forward and an approximate up vector.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidCameraConfig`] when either vector is zero,
    /// non-finite, or the two are parallel.
    pub fn from_forward_up(forward: Vec3, up: Vec3) -> SceneResult<Self> {
        let forward = forward.try_normalize().ok_or_else(|| {
            SceneError::InvalidCameraConfig(format!("forward vector {forward} is degenerate"))
        })?;
        let up_hint = up.try_normalize().ok_or_else(|| {
            SceneError::InvalidCameraConfig(format!("up vector {up} is degenerate"))
        })?;

        let right = forward.cross(up_hint);
        if right.length() < PARALLEL_EPSILON {
            return Err(SceneError::InvalidCameraConfig(format!(
                "forward {forward} and up {up_hint} are parallel"
            )));
        }
        let right = right.normalize();

        Ok(Self {
            forward,
            up: right.cross(forward),
            right,
        })
    }
}

impl CameraState {
    /// Creates a camera state from its components.
    pub fn new(position: DVec3, forward: Vec3, up: Vec3, fov_y: f32) -> Self {
        Self {
            position,
            forward,
            up,
            fov_y,
        }
    }

    /// Creates a camera at `position` looking at `target`.
    pub fn looking_at(position: DVec3, target: DVec3, up: Vec3) -> Self {
        Self {
            position,
            forward: (target - position).as_vec3(),
            up,
            ..Self::default()
        }
    }

    /// Returns a copy with a different vertical field of view.
    pub fn with_fov_y(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self
    }

    /// Checks the camera for degenerate parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidCameraConfig`] if the field of view is
    /// outside (0, π), the position is not finite, or the orientation
    /// vectors cannot form a basis.
    pub fn validate(&self) -> SceneResult<()> {
        self.basis().map(|_| ())
    }

    /// Validates the camera and returns its renormalized axes.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn basis(&self) -> SceneResult<CameraBasis> {
        if !(self.fov_y.is_finite() && self.fov_y > 0.0 && self.fov_y < PI) {
            return Err(SceneError::InvalidCameraConfig(format!(
                "vertical field of view must be in (0, π), got {}",
                self.fov_y
            )));
        }
        if !self.position.is_finite() {
            return Err(SceneError::InvalidCameraConfig(format!(
                "camera position {} is not finite",
                self.position
            )));
        }
        CameraBasis::from_forward_up(self.forward, self.up)
    }
}

/// Near and far clip distances in render units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRange {
    /// Near plane distance
    pub near: f32,
    /// Far plane distance
    pub far: f32,
}

impl ClipRange {
    /// Creates a clip range.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidCameraConfig`] unless `0 < near < far`.
    pub fn new(near: f32, far: f32) -> SceneResult<Self> {
        if !(near > 0.0 && near < far && far.is_finite()) {
            return Err(SceneError::InvalidCameraConfig(format!(
                "clip range must satisfy 0 < near < far, got near={near} far={far}"
            )));
        }
        Ok(Self { near, far })
    }

    /// Scales per-unit near and far distances by the world scale.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidCameraConfig`] if `world_scale` is not a
    /// positive finite number or the scaled range is degenerate.
    pub fn for_world_scale(world_scale: f32, near: f32, far: f32) -> SceneResult<Self> {
        if !(world_scale.is_finite() && world_scale > 0.0) {
            return Err(SceneError::InvalidCameraConfig(format!(
                "world scale must be positive, got {world_scale}"
            )));
        }
        Self::new(near * world_scale, far * world_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    #[test]
    fn test_default_camera() {
        let camera = CameraState::default();
        assert_eq!(camera.position, DVec3::ZERO);
        assert_eq!(camera.forward, Vec3::NEG_Z);
        assert_eq!(camera.up, Vec3::Y);
        assert!((camera.fov_y.to_degrees() - 70.0).abs() < 1e-4);
        assert!(camera.validate().is_ok());
    }

    #[test]
    fn test_basis_is_renormalized() {
        let camera = CameraState::new(DVec3::ZERO, Vec3::new(0.0, 0.0, -4.0), Vec3::new(0.0, 3.0, 1.0), 1.0);
        let basis = camera.basis().unwrap();

        assert!(approx_eq_vec3(basis.forward, Vec3::NEG_Z));
        assert!(approx_eq_vec3(basis.up, Vec3::Y));
        assert!(approx_eq_vec3(basis.right, Vec3::X));
    }

    #[test]
    fn test_parallel_forward_and_up_rejected() {
        let camera = CameraState::new(DVec3::ZERO, Vec3::Y, Vec3::new(0.0, 2.0, 0.0), 1.0);
        assert!(matches!(
            camera.validate(),
            Err(SceneError::InvalidCameraConfig(_))
        ));
    }

    #[test]
    fn test_degenerate_fov_rejected() {
        for fov in [0.0, -0.5, PI, 4.0, f32::NAN] {
            let camera = CameraState::default().with_fov_y(fov);
            assert!(camera.validate().is_err(), "fov {fov} should be rejected");
        }
    }

    #[test]
    fn test_non_finite_position_rejected() {
        let camera = CameraState {
            position: DVec3::new(f64::INFINITY, 0.0, 0.0),
            ..CameraState::default()
        };
        assert!(camera.validate().is_err());
    }

    #[test]
    fn test_looking_at() {
        let camera = CameraState::looking_at(
            DVec3::new(1.0e9, 0.0, 10.0),
            DVec3::new(1.0e9, 0.0, 0.0),
            Vec3::Y,
        );
        let basis = camera.basis().unwrap();
        assert!(approx_eq_vec3(basis.forward, Vec3::NEG_Z));
    }

    #[test]
    fn test_clip_range_for_world_scale() {
        let range = ClipRange::for_world_scale(2.0, 0.01, 1000.0).unwrap();
        assert!((range.near - 0.02).abs() < EPSILON);
        assert!((range.far - 2000.0).abs() < EPSILON);

        assert!(ClipRange::for_world_scale(0.0, 0.01, 1000.0).is_err());
        assert!(ClipRange::for_world_scale(f32::NAN, 0.01, 1000.0).is_err());
        assert!(ClipRange::new(1.0, 1.0).is_err());
    }
}
