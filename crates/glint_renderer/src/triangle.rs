//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use glint_math::{Interval, Vec3};

/// Determinants smaller than this mean the ray is (nearly) in the triangle's plane.
const DETERMINANT_EPSILON: f32 = 1e-8;

/// A triangle primitive.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed edges from v0
    edge1: Vec3,
    edge2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    /// Material
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The face normal follows the winding: `(v1 - v0) × (v2 - v0)`.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        Self {
            v0,
            v1,
            v2,
            edge1,
            edge2,
            normal: edge1.cross(edge2).normalize_or_zero(),
            material,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Barycentric `(u, v)` and distance `t` of the ray's crossing with the
    /// triangle's plane, when it falls inside the triangle.
    fn intersect(&self, ray: &Ray) -> Option<(f32, f32, f32)> {
        let h = ray.direction().cross(self.edge2);
        let a = self.edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < DETERMINANT_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(self.edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.edge2.dot(q);
        Some((u, v, t))
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let (_, _, t) = self.intersect(ray)?;
        if !ray_t.contains(t) {
            return None;
        }

        // Flat shading: the stored face normal, not an interpolated one
        Some(HitRecord::new(ray, t, self.normal, self.material))
    }
}
