//! View frustums for the camera and shadow passes.
//!
//! A [`Frustum`] is a convex volume bounded by six inward-facing planes. The
//! camera frustum is a symmetric perspective volume; the light frustum is an
//! orthographic box fitted around whatever the shadow pass has to cover.
//!
//! All frustums live in render space, i.e. world space with the
//! [`LargeWorldOffset`] already subtracted.
//!
//! # Example
//!
//! ```
//! use framekit_scene::{CameraState, ClipRange, LargeWorldOffset, compute_camera_frustum};
//!
//! let camera = CameraState::default();
//! let clip = ClipRange::new(0.01, 1000.0).unwrap();
//! let frustum = compute_camera_frustum(&camera, &LargeWorldOffset::default(), 1920, 1080, clip).unwrap();
//!
//! assert!(frustum.near() < frustum.far());
//! ```

use glam::{Mat4, Vec3};

use crate::camera::{CameraBasis, CameraState, ClipRange};
use crate::error::{SceneError, SceneResult};
use crate::offset::LargeWorldOffset;

/// Threshold above which the light direction is considered aligned with +Y.
const LIGHT_UP_ALIGNMENT: f32 = 0.95;

/// Smallest radius of a fitted shadow volume.
const MIN_SHADOW_RADIUS: f32 = 1e-3;

/// Distance the light eye is pulled back behind the fitted volume.
const SHADOW_EYE_PADDING: f32 = 1.0;

/// A plane in Hessian normal form. Points with a non-negative signed
/// distance are on the inner side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the frustum
    pub normal: Vec3,
    /// Signed offset along the normal
    pub distance: f32,
}

impl Plane {
    /// Creates the plane through `point` facing along `normal`.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// Signed distance from the plane to `point`.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Projection that produced a frustum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Perspective projection
    Perspective {
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    /// Orthographic projection
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    /// Near plane distance.
    pub fn near(&self) -> f32 {
        match *self {
            Projection::Perspective { near, .. } | Projection::Orthographic { near, .. } => near,
        }
    }

    /// Far plane distance.
    pub fn far(&self) -> f32 {
        match *self {
            Projection::Perspective { far, .. } | Projection::Orthographic { far, .. } => far,
        }
    }

    /// Right-handed projection matrix with a `[0, 1]` depth range.
    ///
    /// `y_sign` is multiplied into the Y scale so that backends whose clip
    /// space points Y down (`-1.0`) get a correctly oriented image.
    pub fn matrix(&self, y_sign: f32) -> Mat4 {
        let mut proj = match *self {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov_y, aspect, near, far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4::orthographic_rh(left, right, bottom, top, near, far),
        };
        proj.y_axis.y *= y_sign;
        proj
    }
}

/// Axis-aligned bounding box in render space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box spanning the two corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
        ]
    }
}

/// Six-plane view volume computed once per frame.
///
/// Plane order is left, right, bottom, top, near, far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    origin: Vec3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,
    projection: Projection,
    planes: [Plane; 6],
}

impl Frustum {
    /// Builds a symmetric perspective frustum.
    ///
    /// The horizontal field of view is derived from `fov_y` and `aspect`.
    pub fn perspective(origin: Vec3, basis: &CameraBasis, fov_y: f32, aspect: f32, clip: ClipRange) -> Self {
        let CameraBasis { forward, up, right } = *basis;
        let half_y = 0.5 * fov_y;
        let half_x = 0.5 * horizontal_fov(fov_y, aspect);
        let (sin_x, cos_x) = half_x.sin_cos();
        let (sin_y, cos_y) = half_y.sin_cos();

        let planes = [
            Plane::from_point_normal(origin, right * cos_x + forward * sin_x),
            Plane::from_point_normal(origin, -right * cos_x + forward * sin_x),
            Plane::from_point_normal(origin, up * cos_y + forward * sin_y),
            Plane::from_point_normal(origin, -up * cos_y + forward * sin_y),
            Plane::from_point_normal(origin + forward * clip.near, forward),
            Plane::from_point_normal(origin + forward * clip.far, -forward),
        ];

        Self {
            origin,
            forward,
            up,
            right,
            projection: Projection::Perspective {
                fov_y,
                aspect,
                near: clip.near,
                far: clip.far,
            },
            planes,
        }
    }

    /// Builds an orthographic box frustum.
    ///
    /// Extents are measured along the right, up and forward axes from
    /// `origin`, matching `Mat4::orthographic_rh` applied after
    /// `Mat4::look_at_rh`.
    #[allow(clippy::too_many_arguments)]
    pub fn orthographic(
        origin: Vec3,
        basis: &CameraBasis,
        left: f32,
        right_extent: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let CameraBasis { forward, up, right } = *basis;
        let planes = [
            Plane::from_point_normal(origin + right * left, right),
            Plane::from_point_normal(origin + right * right_extent, -right),
            Plane::from_point_normal(origin + up * bottom, up),
            Plane::from_point_normal(origin + up * top, -up),
            Plane::from_point_normal(origin + forward * near, forward),
            Plane::from_point_normal(origin + forward * far, -forward),
        ];

        Self {
            origin,
            forward,
            up,
            right,
            projection: Projection::Orthographic {
                left,
                right: right_extent,
                bottom,
                top,
                near,
                far,
            },
            planes,
        }
    }

    /// Eye position in render space.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit viewing direction.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit up vector.
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit right vector.
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Projection parameters.
    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Bounding planes: left, right, bottom, top, near, far.
    #[inline]
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Near plane distance.
    pub fn near(&self) -> f32 {
        self.projection.near()
    }

    /// Far plane distance.
    pub fn far(&self) -> f32 {
        self.projection.far()
    }

    /// Width over height, for perspective frustums.
    pub fn aspect(&self) -> Option<f32> {
        match self.projection {
            Projection::Perspective { aspect, .. } => Some(aspect),
            Projection::Orthographic { .. } => None,
        }
    }

    /// Vertical field of view, for perspective frustums.
    pub fn fov_y(&self) -> Option<f32> {
        match self.projection {
            Projection::Perspective { fov_y, .. } => Some(fov_y),
            Projection::Orthographic { .. } => None,
        }
    }

    /// Horizontal field of view, for perspective frustums.
    pub fn fov_x(&self) -> Option<f32> {
        match self.projection {
            Projection::Perspective { fov_y, aspect, .. } => Some(horizontal_fov(fov_y, aspect)),
            Projection::Orthographic { .. } => None,
        }
    }

    /// Right-handed view matrix looking from the origin along `forward`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.origin, self.origin + self.forward, self.up)
    }

    /// Projection matrix, see [`Projection::matrix`].
    pub fn projection_matrix(&self, y_sign: f32) -> Mat4 {
        self.projection.matrix(y_sign)
    }

    /// The eight corners of the volume, near face first.
    pub fn corners(&self) -> [Vec3; 8] {
        self.corners_within(f32::INFINITY)
    }

    /// Corners of the volume with the far plane pulled in to at most
    /// `max_distance` (never closer than the near plane).
    pub fn corners_within(&self, max_distance: f32) -> [Vec3; 8] {
        let (o, f, u, r) = (self.origin, self.forward, self.up, self.right);
        match self.projection {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => {
                let far = far.min(max_distance).max(near);
                let tan_y = (0.5 * fov_y).tan();
                let slice = |d: f32| {
                    let center = o + f * d;
                    let half_h = u * (d * tan_y);
                    let half_w = r * (d * tan_y * aspect);
                    [
                        center - half_w - half_h,
                        center + half_w - half_h,
                        center + half_w + half_h,
                        center - half_w + half_h,
                    ]
                };
                let [a, b, c, d] = slice(near);
                let [e, g, h, i] = slice(far);
                [a, b, c, d, e, g, h, i]
            }
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => {
                let far = far.min(max_distance).max(near);
                let at = |x: f32, y: f32, z: f32| o + r * x + u * y + f * z;
                [
                    at(left, bottom, near),
                    at(right, bottom, near),
                    at(right, top, near),
                    at(left, top, near),
                    at(left, bottom, far),
                    at(right, bottom, far),
                    at(right, top, far),
                    at(left, top, far),
                ]
            }
        }
    }

    /// Returns true if `point` lies inside or on the boundary.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|p| p.signed_distance(point) >= 0.0)
    }

    /// Returns true if the sphere touches the volume.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|p| p.signed_distance(center) >= -radius)
    }

    /// Returns true if the box touches the volume (conservative).
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.planes.iter().all(|plane| {
            let n = plane.normal;
            let positive = Vec3::new(
                if n.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if n.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if n.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );
            plane.signed_distance(positive) >= 0.0
        })
    }
}

/// Horizontal field of view implied by a vertical one and an aspect ratio.
#[inline]
fn horizontal_fov(fov_y: f32, aspect: f32) -> f32 {
    2.0 * ((0.5 * fov_y).tan() * aspect).atan()
}

/// Computes the camera frustum for the current window size.
///
/// The frustum origin is the camera position with `offset` subtracted.
///
/// # Errors
///
/// Returns [`SceneError::InvalidCameraConfig`] if the camera is degenerate
/// or either window dimension is zero.
pub fn compute_camera_frustum(
    camera: &CameraState,
    offset: &LargeWorldOffset,
    width: u32,
    height: u32,
    clip: ClipRange,
) -> SceneResult<Frustum> {
    let basis = camera.basis()?;
    if width == 0 || height == 0 {
        return Err(SceneError::InvalidCameraConfig(format!(
            "render target size must be non-zero, got {width}x{height}"
        )));
    }
    let aspect = width as f32 / height as f32;
    let origin = offset.apply(camera.position);

    Ok(Frustum::perspective(origin, &basis, camera.fov_y, aspect, clip))
}

/// What the shadow volume has to enclose.
#[derive(Clone, Copy, Debug)]
pub enum LightFitTarget<'a> {
    /// The camera frustum, truncated at `max_distance` from the camera.
    CameraFrustum {
        frustum: &'a Frustum,
        max_distance: f32,
    },
    /// Explicit scene bounds in render space.
    Bounds(Aabb),
}

/// Computes the orthographic frustum used by the shadow pass.
///
/// The box is centered on the bounding sphere of the target, so its size
/// does not change as the camera rotates, and its center is snapped to whole
/// shadow-map texels so that shadow edges do not shimmer while moving.
///
/// # Errors
///
/// Returns [`SceneError::InvalidCameraConfig`] if the light direction is
/// degenerate or `shadow_map_size` is zero.
pub fn compute_light_frustum(
    light_direction: Vec3,
    target: LightFitTarget<'_>,
    shadow_map_size: u32,
) -> SceneResult<Frustum> {
    if shadow_map_size == 0 {
        return Err(SceneError::InvalidCameraConfig(
            "shadow map size must be non-zero".into(),
        ));
    }
    let direction = light_direction.try_normalize().ok_or_else(|| {
        SceneError::InvalidCameraConfig(format!(
            "light direction {light_direction} is degenerate"
        ))
    })?;
    let up_hint = if direction.dot(Vec3::Y).abs() > LIGHT_UP_ALIGNMENT {
        Vec3::X
    } else {
        Vec3::Y
    };
    let basis = CameraBasis::from_forward_up(direction, up_hint)?;

    let points = match target {
        LightFitTarget::CameraFrustum {
            frustum,
            max_distance,
        } => frustum.corners_within(max_distance),
        LightFitTarget::Bounds(aabb) => aabb.corners(),
    };

    let center = points.iter().copied().sum::<Vec3>() / points.len() as f32;
    let radius = points
        .iter()
        .map(|p| p.distance(center))
        .fold(MIN_SHADOW_RADIUS, f32::max);

    let texel = 2.0 * radius / shadow_map_size as f32;
    let snap = |v: f32| (v / texel).floor() * texel;
    let snapped = basis.right * snap(center.dot(basis.right))
        + basis.up * snap(center.dot(basis.up))
        + basis.forward * center.dot(basis.forward);

    let half = radius + texel;
    let depth = radius + SHADOW_EYE_PADDING;
    let eye = snapped - basis.forward * depth;

    Ok(Frustum::orthographic(eye, &basis, -half, half, -half, half, 0.0, 2.0 * depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn default_frustum(width: u32, height: u32) -> Frustum {
        let clip = ClipRange::new(0.01, 1000.0).unwrap();
        compute_camera_frustum(
            &CameraState::default(),
            &LargeWorldOffset::default(),
            width,
            height,
            clip,
        )
        .unwrap()
    }

    #[test]
    fn test_default_camera_frustum() {
        let frustum = default_frustum(1920, 1080);

        assert!(approx_eq(frustum.aspect().unwrap(), 1920.0 / 1080.0));
        assert!(approx_eq(frustum.fov_y().unwrap().to_degrees(), 70.0));
        assert!(frustum.near() < frustum.far());

        let expected = 2.0 * ((35.0_f32.to_radians()).tan() * 1920.0 / 1080.0).atan();
        assert!(approx_eq(frustum.fov_x().unwrap(), expected));
    }

    #[test]
    fn test_horizontal_fov_matches_aspect() {
        for (w, h) in [(1, 1), (800, 600), (1080, 1920), (3440, 1440)] {
            let frustum = default_frustum(w, h);
            let aspect = w as f32 / h as f32;
            let fov_y = frustum.fov_y().unwrap();
            let expected = 2.0 * ((fov_y / 2.0).tan() * aspect).atan();
            assert!(approx_eq(frustum.fov_x().unwrap(), expected));
            assert!(frustum.near() < frustum.far());
        }
    }

    #[test]
    fn test_perspective_planes_bound_the_view() {
        let frustum = default_frustum(1920, 1080);

        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -10.0)));
        // Behind the camera
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)));
        // Beyond the far plane
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -2000.0)));
        // Closer than the near plane
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -0.001)));
        // Far off to the side
        assert!(!frustum.contains_point(Vec3::new(100.0, 0.0, -10.0)));
    }

    #[test]
    fn test_corners_lie_on_the_boundary() {
        let frustum = default_frustum(1280, 720);
        for corner in frustum.corners() {
            for plane in frustum.planes() {
                assert!(plane.signed_distance(corner) > -1e-2);
            }
        }
    }

    #[test]
    fn test_offset_moves_frustum_origin() {
        let camera = CameraState {
            position: DVec3::new(1.0e9, 2.0e9, -3.0e9),
            ..CameraState::default()
        };
        let offset = LargeWorldOffset::new(DVec3::new(1.0e9, 2.0e9, -3.0e9 + 5.0));
        let clip = ClipRange::new(0.01, 1000.0).unwrap();
        let frustum = compute_camera_frustum(&camera, &offset, 1920, 1080, clip).unwrap();

        assert_eq!(frustum.origin(), Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_zero_window_rejected() {
        let clip = ClipRange::new(0.01, 1000.0).unwrap();
        let result = compute_camera_frustum(
            &CameraState::default(),
            &LargeWorldOffset::default(),
            1920,
            0,
            clip,
        );
        assert!(matches!(result, Err(SceneError::InvalidCameraConfig(_))));
    }

    #[test]
    fn test_degenerate_fov_rejected() {
        let clip = ClipRange::new(0.01, 1000.0).unwrap();
        let camera = CameraState::default().with_fov_y(std::f32::consts::PI);
        let result = compute_camera_frustum(&camera, &LargeWorldOffset::default(), 1920, 1080, clip);
        assert!(matches!(result, Err(SceneError::InvalidCameraConfig(_))));
    }

    #[test]
    fn test_sphere_and_aabb_queries() {
        let frustum = default_frustum(1920, 1080);

        assert!(frustum.intersects_sphere(Vec3::new(0.0, 0.0, -50.0), 1.0));
        // Sphere straddling the near plane from behind
        assert!(frustum.intersects_sphere(Vec3::new(0.0, 0.0, 0.5), 1.0));
        assert!(!frustum.intersects_sphere(Vec3::new(0.0, 0.0, 50.0), 1.0));

        let inside = Aabb::new(Vec3::new(-1.0, -1.0, -20.0), Vec3::new(1.0, 1.0, -10.0));
        let behind = Aabb::new(Vec3::new(-1.0, -1.0, 10.0), Vec3::new(1.0, 1.0, 20.0));
        assert!(frustum.intersects_aabb(&inside));
        assert!(!frustum.intersects_aabb(&behind));
    }

    #[test]
    fn test_light_frustum_encloses_camera_frustum() {
        let camera = default_frustum(1920, 1080);
        let light = compute_light_frustum(
            Vec3::new(-1.0, -1.0, -1.0),
            LightFitTarget::CameraFrustum {
                frustum: &camera,
                max_distance: 100.0,
            },
            4096,
        )
        .unwrap();

        assert!(matches!(light.projection(), Projection::Orthographic { .. }));
        assert!(light.near() < light.far());
        for corner in camera.corners_within(100.0) {
            assert!(light.contains_point(corner), "corner {corner} outside light frustum");
        }
    }

    #[test]
    fn test_light_frustum_encloses_bounds() {
        let bounds = Aabb::new(Vec3::new(-10.0, 0.0, -10.0), Vec3::new(10.0, 5.0, 10.0));
        // Straight down exercises the alternate up vector
        let light = compute_light_frustum(Vec3::NEG_Y, LightFitTarget::Bounds(bounds), 1024).unwrap();

        assert!(approx_eq(light.forward().y, -1.0));
        for corner in bounds.corners() {
            assert!(light.contains_point(corner));
        }
        assert!(!light.contains_point(Vec3::new(100.0, 0.0, 0.0)));
    }

    #[test]
    fn test_light_frustum_is_stable_under_camera_rotation() {
        let clip = ClipRange::new(0.01, 1000.0).unwrap();
        let offset = LargeWorldOffset::default();
        let a = CameraState::default();
        let b = CameraState {
            forward: Vec3::new(1.0, 0.0, -1.0),
            ..CameraState::default()
        };
        let fa = compute_camera_frustum(&a, &offset, 1920, 1080, clip).unwrap();
        let fb = compute_camera_frustum(&b, &offset, 1920, 1080, clip).unwrap();

        let fit = |f: &Frustum| {
            compute_light_frustum(
                Vec3::new(0.3, -1.0, 0.2),
                LightFitTarget::CameraFrustum {
                    frustum: f,
                    max_distance: 50.0,
                },
                2048,
            )
            .unwrap()
        };
        let (la, lb) = (fit(&fa), fit(&fb));
        let width = |f: &Frustum| match *f.projection() {
            Projection::Orthographic { left, right, .. } => right - left,
            Projection::Perspective { .. } => unreachable!(),
        };
        assert!(approx_eq(width(&la), width(&lb)));
    }

    #[test]
    fn test_light_frustum_rejects_bad_input() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(compute_light_frustum(Vec3::ZERO, LightFitTarget::Bounds(bounds), 4096).is_err());
        assert!(compute_light_frustum(Vec3::NEG_Y, LightFitTarget::Bounds(bounds), 0).is_err());
    }

    #[test]
    fn test_projection_y_sign() {
        let frustum = default_frustum(1920, 1080);
        let up = frustum.projection_matrix(1.0);
        let down = frustum.projection_matrix(-1.0);
        assert!(approx_eq(up.y_axis.y, -down.y_axis.y));
        assert_eq!(up.x_axis, down.x_axis);
    }
}
