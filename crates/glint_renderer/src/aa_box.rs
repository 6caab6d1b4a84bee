//! Axis-aligned box primitive.
//!
//! Uses the slab method: the ray's parametric window is narrowed by the
//! pair of planes bounding each axis in turn.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use glint_math::{Interval, Vec3};

/// Direction components smaller than this are treated as parallel to the slab.
const PARALLEL_EPSILON: f32 = 1e-8;

/// An axis-aligned box between two corners.
#[derive(Debug, Clone, Copy)]
pub struct AaBox {
    min: Vec3,
    max: Vec3,
    material: Material,
}

impl AaBox {
    /// Create a box from two opposite corners (in any order).
    pub fn new(a: Vec3, b: Vec3, material: Material) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            material,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Unit normal of the face on `axis`, pointing to -axis or +axis.
fn face_normal(axis: usize, positive: bool) -> Vec3 {
    let mut normal = Vec3::ZERO;
    normal[axis] = if positive { 1.0 } else { -1.0 };
    normal
}

impl Hittable for AaBox {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut t_near = ray_t.min;
        let mut t_far = ray_t.max;
        // Face normals of the slabs that last moved each end of the window
        let mut entry_normal: Option<Vec3> = None;
        let mut exit_normal: Option<Vec3> = None;

        for axis in 0..3 {
            if direction[axis].abs() < PARALLEL_EPSILON {
                // Parallel to this slab: the origin must already lie between the planes
                if origin[axis] < self.min[axis] || origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv_d = 1.0 / direction[axis];
            let mut t0 = (self.min[axis] - origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - origin[axis]) * inv_d;

            // Entering through the min plane unless the ray runs toward -axis
            let mut enters_max = false;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
                enters_max = true;
            }

            if t0 > t_near {
                t_near = t0;
                entry_normal = Some(face_normal(axis, enters_max));
            }
            if t1 < t_far {
                t_far = t1;
                exit_normal = Some(face_normal(axis, !enters_max));
            }

            if t_near > t_far || t_far < ray_t.min {
                return None;
            }
        }

        if t_near > ray_t.max {
            return None;
        }

        match (entry_normal, exit_normal) {
            (Some(normal), _) => Some(HitRecord::new(ray, t_near, normal, self.material)),
            // Window starts inside the box: the hit is where the ray leaves it
            (None, Some(normal)) => Some(HitRecord::new(ray, t_far, normal, self.material)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AaBox {
        AaBox::new(Vec3::splat(-1.0), Vec3::splat(1.0), Material::default())
    }

    fn on_boundary(aa_box: &AaBox, p: Vec3) -> bool {
        let eps = 1e-4;
        (0..3).any(|axis| {
            (p[axis] - aa_box.min()[axis]).abs() < eps || (p[axis] - aa_box.max()[axis]).abs() < eps
        })
    }

    #[test]
    fn test_box_hit_front_face() {
        let aa_box = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let rec = aa_box.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_box_normal_sign_follows_entry_slab() {
        let aa_box = unit_box();

        // From -X the ray enters through the min plane
        let ray = Ray::new(Vec3::new(-5.0, 0.2, 0.1), Vec3::X);
        let rec = aa_box.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert_eq!(rec.normal, -Vec3::X);
        assert!(rec.front_face);

        // From +Y the ray enters through the max plane
        let ray = Ray::new(Vec3::new(0.3, 5.0, -0.2), -Vec3::Y);
        let rec = aa_box.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert_eq!(rec.normal, Vec3::Y);
        assert!(rec.front_face);
    }

    #[test]
    fn test_ray_toward_center_hits_boundary() {
        let aa_box = AaBox::new(
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(3.0, 1.0, 2.0),
            Material::default(),
        );
        let origins = [
            Vec3::new(10.0, 7.0, -4.0),
            Vec3::new(-6.0, 0.3, 9.0),
            Vec3::new(2.0, -15.0, 1.0),
        ];

        for origin in origins {
            let ray = Ray::new(origin, aa_box.center() - origin);
            let rec = aa_box.hit(&ray, Interval::from_min(0.001)).unwrap();

            let center_t = (aa_box.center() - origin).length();
            assert!(rec.t < center_t, "entry must precede the center");
            assert!(on_boundary(&aa_box, rec.p), "hit point {:?} not on a face", rec.p);
            assert!((rec.normal.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_parallel_ray_outside_slab_misses() {
        let aa_box = unit_box();

        // Moving along Z, but x is outside [-1, 1]
        let ray = Ray::new(Vec3::new(2.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(aa_box.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_parallel_ray_inside_slab_hits() {
        let aa_box = unit_box();

        let ray = Ray::new(Vec3::new(0.5, -0.5, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = aa_box.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_box_miss_and_behind() {
        let aa_box = unit_box();

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 0.0, -0.1));
        assert!(aa_box.hit(&ray, Interval::from_min(0.001)).is_none());

        // Box entirely behind the origin
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(aa_box.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_box_beyond_window_max() {
        let aa_box = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        assert!(aa_box.hit(&ray, Interval::new(0.001, 3.0)).is_none());
    }

    #[test]
    fn test_origin_inside_hits_exit_face() {
        let aa_box = unit_box();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = aa_box.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        // Facing back toward the ray
        assert_eq!(rec.normal, -Vec3::X);
    }
}
