//! Pinhole camera for primary ray generation.

use crate::Ray;
use glint_core::CameraSpec;
use glint_math::Vec3;

/// Camera for generating rays into the scene.
///
/// All fields are derived at construction; change the view by building a
/// new camera.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,

    // Orthonormal basis
    right: Vec3,
    up: Vec3,
    forward: Vec3,
}

impl Camera {
    /// Create a camera looking from `look_from` toward `look_at`.
    ///
    /// `vfov` is the vertical field of view in degrees; `aspect` is
    /// width / height. The viewport sits one unit in front of the origin.
    pub fn new(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f32, aspect: f32) -> Self {
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect * viewport_height;

        // Forward points back toward the viewer (right-handed, looking down -forward)
        let forward = (look_from - look_at).normalize();
        let right = vup.cross(forward).normalize();
        let up = forward.cross(right);

        let horizontal = right * viewport_width;
        let vertical = up * viewport_height;
        let lower_left_corner = look_from - horizontal / 2.0 - vertical / 2.0 - forward;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            right,
            up,
            forward,
        }
    }

    /// Create a camera from a scene description entry.
    pub fn from_spec(spec: &CameraSpec, aspect: f32) -> Self {
        Self::new(spec.look_from, spec.look_at, spec.up, spec.fov, aspect)
    }

    /// Ray through viewport coordinates `(s, t)`, both in [0, 1].
    ///
    /// `(0, 0)` is the lower-left corner of the viewport, `(1, 1)` the
    /// upper-right.
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin, target - self.origin)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Basis vectors `(right, up, forward)`.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.right, self.up, self.forward)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_spec(&CameraSpec::default(), 1.0)
    }
}
