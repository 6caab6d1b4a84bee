//! Blinn-Phong local illumination with hard shadows.

use glint_math::{Interval, Vec3};

use crate::{Color, HitRecord, Light, Ray, Scene};

/// Offset along the normal for secondary ray origins, and the margin
/// trimmed from both ends of a shadow ray's window.
pub const SHADOW_EPSILON: f32 = 0.001;

/// Local color at a hit: ambient plus the unoccluded diffuse and specular
/// terms of every light, clamped to at most 1 per channel.
///
/// `ray` is the ray that produced `rec`; its direction is the view vector.
pub fn illuminate(scene: &Scene, rec: &HitRecord, ray: &Ray) -> Color {
    let material = &rec.material;
    let mut color = material.color * material.ambient;

    for light in scene.lights() {
        color += light_contribution(scene, rec, ray, light);
    }

    color.min(Color::ONE)
}

/// Diffuse plus specular from one light, or zero when something lies
/// strictly between the hit point and the light.
fn light_contribution(scene: &Scene, rec: &HitRecord, ray: &Ray, light: &Light) -> Color {
    let to_light = light.position - rec.p;
    let distance = to_light.length();
    let light_dir = to_light.normalize_or_zero();

    let shadow_ray = Ray::new(rec.p + rec.normal * SHADOW_EPSILON, light_dir);
    let shadow_t = Interval::new(SHADOW_EPSILON, distance - SHADOW_EPSILON);
    if scene.hit(&shadow_ray, shadow_t).is_some() {
        return Color::ZERO;
    }

    let material = &rec.material;

    let diffuse_factor = rec.normal.dot(light_dir).max(0.0);
    let diffuse =
        material.color * light.color * (diffuse_factor * material.diffuse * light.intensity);

    let half_vector = (light_dir - ray.direction()).normalize_or_zero();
    let specular_factor = rec.normal.dot(half_vector).max(0.0).powf(material.shininess);
    let specular = light.color * (specular_factor * material.specular * light.intensity);

    diffuse + specular
}

/// Mirror `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
