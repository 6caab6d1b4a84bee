//! Core recursive ray tracer.
//!
//! Implements Whitted-style tracing with:
//! - Blinn-Phong local shading with hard shadows
//! - Mirror reflection bounded by an explicit depth
//! - Sky gradient backdrop for rays that escape the scene
//! - Parallel bucket rendering via rayon

use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::shading::{illuminate, reflect, SHADOW_EPSILON};
use crate::{Camera, Color, ImageBuffer, Ray, RenderDefaults, Scene};
use glint_math::Interval;

/// Lower bound of the window for primary and reflection rays.
pub const T_MIN: f32 = 0.001;

/// Render configuration.
///
/// Passed by reference into every render call; nothing about a render is
/// held anywhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Maximum reflection depth
    pub max_depth: u32,
    /// Whether reflective materials spawn mirror rays
    pub reflections: bool,
    /// Backdrop color at the bottom of the sky gradient
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from_defaults(800, 600, &RenderDefaults::default())
    }
}

impl RenderConfig {
    /// Config for a `width` x `height` image with default shading settings.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Config seeded from the settings a scene carries.
    pub fn from_defaults(width: u32, height: u32, defaults: &RenderDefaults) -> Self {
        Self {
            width,
            height,
            max_depth: defaults.max_depth,
            reflections: defaults.reflections,
            background: defaults.background,
        }
    }

    pub fn with_reflections(mut self, reflections: bool) -> Self {
        self.reflections = reflections;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Compute the color seen by a ray with `depth` reflection levels left.
///
/// Depth 0 is black without touching the scene. A miss returns the
/// backdrop. Reflective hits blend the local color with the color seen
/// along the mirror direction, weighted by the material's reflectivity.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, config: &RenderConfig) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::from_min(T_MIN)) else {
        return backdrop(ray, config.background);
    };

    let direct = illuminate(scene, &rec, ray);
    if !config.reflections || !rec.material.is_reflective() {
        return direct;
    }

    let reflected_ray = Ray::new(
        rec.p + rec.normal * SHADOW_EPSILON,
        reflect(ray.direction(), rec.normal),
    );
    let reflected = ray_color(&reflected_ray, scene, depth - 1, config);

    let r = rec.material.reflectivity;
    direct * (1.0 - r) + reflected * r
}

/// Color for a primary ray under `config`.
///
/// With reflections disabled this is local shading only, whatever
/// `max_depth` says.
pub fn trace(ray: &Ray, scene: &Scene, config: &RenderConfig) -> Color {
    let depth = if config.reflections { config.max_depth } else { 1 };
    ray_color(ray, scene, depth, config)
}

/// Vertical gradient from white (looking down) to `background` (looking up).
pub fn backdrop(ray: &Ray, background: Color) -> Color {
    let a = 0.5 * (ray.direction().y + 1.0);
    Color::ONE * (1.0 - a) + background * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
///
/// Channels are clamped to at most 1, gamma corrected, then scaled by
/// 255.99 and truncated. Negative channels come out as 0.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (255.99 * linear_to_gamma(c.min(1.0))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Map pixel `i` of `n` onto [0, 1]; a single pixel maps to 0.
#[inline]
fn pixel_fraction(i: u32, n: u32) -> f32 {
    if n > 1 {
        i as f32 / (n - 1) as f32
    } else {
        0.0
    }
}

/// Render a single pixel. Row 0 is the top of the image.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let s = pixel_fraction(x, config.width);
    let t = 1.0 - pixel_fraction(y, config.height);

    let ray = camera.get_ray(s, t);
    trace(&ray, scene, config).min(Color::ONE)
}

/// Render the scene from its own camera.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let camera = Camera::from_spec(scene.camera(), config.aspect_ratio());
    render_with_camera(&camera, scene, config)
}

/// Render the entire image in parallel buckets.
pub fn render_with_camera(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let buckets = generate_buckets(config.width, config.height, DEFAULT_BUCKET_SIZE);
    log::info!(
        "Rendering {}x{} in {} buckets (reflections: {}, max depth: {})",
        config.width,
        config.height,
        buckets.len(),
        config.reflections,
        config.max_depth
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, camera, scene, config);
            log::debug!("Bucket {} done", bucket.index);
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.write_bucket(result);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Light, Material, Vec3};
    use glint_core::CameraSpec;

    fn close(a: Color, b: Color, eps: f32) -> bool {
        (a - b).abs().max_element() < eps
    }

    /// Sphere radius 1 at the origin under one white light.
    fn lit_sphere_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::ZERO, 1.0, Material::default());
        scene.add_light(Light::default());
        scene
    }

    #[test]
    fn test_depth_zero_is_black() {
        let scene = lit_sphere_scene();
        let config = RenderConfig::default().with_reflections(true);

        // Even a ray that would hit
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        assert_eq!(ray_color(&ray, &scene, 0, &config), Color::ZERO);

        let miss = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Y);
        assert_eq!(ray_color(&miss, &scene, 0, &config), Color::ZERO);
    }

    #[test]
    fn test_backdrop_endpoints() {
        let background = Color::new(0.2, 0.2, 0.4);

        let down = Ray::new(Vec3::ZERO, -Vec3::Y);
        assert!(close(backdrop(&down, background), Color::ONE, 1e-6));

        let up = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(close(backdrop(&up, background), background, 1e-6));
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-0.5), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::splat(4.0)), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(-1.0, 0.25, 1.0)), [0, 127, 255]);
    }

    #[test]
    fn test_sphere_center_whiter_than_corners() {
        let scene = lit_sphere_scene();
        let config = RenderConfig::new(64, 48);

        let image = render(&scene, &config);

        let center = image.get(32, 24);
        let corner = image.get(0, 0);

        // Grey sphere under a white light stays neutral; the backdrop is tinted
        let tint = |c: Color| c.z - c.x;
        assert!(tint(center).abs() < 1e-5, "center {:?}", center);
        assert!(tint(corner) > 0.05, "corner {:?}", corner);

        // Corner ray misses and shows the backdrop
        let camera = Camera::from_spec(scene.camera(), config.aspect_ratio());
        let corner_ray = camera.get_ray(0.0, 1.0);
        assert!(close(corner, backdrop(&corner_ray, config.background), 1e-5));

        // Center is lit: well above the ambient floor
        let ambient = Material::default().color * Material::default().ambient;
        assert!(center.x > ambient.x * 3.0);
    }

    #[test]
    fn test_empty_scene_stays_on_backdrop_segment() {
        let scene = Scene::new();
        let background = Color::new(0.2, 0.2, 0.4);
        let config = RenderConfig::new(16, 12).with_background(background);

        let image = render(&scene, &config);

        let segment = background - Color::ONE;
        for y in 0..config.height {
            for x in 0..config.width {
                let c = image.get(x, y);
                // c = white + a * (background - white) for some a in [0, 1]
                let a = (c - Color::ONE).dot(segment) / segment.length_squared();
                assert!((-1e-5..=1.0 + 1e-5).contains(&a));
                assert!(close(c, Color::ONE + segment * a, 1e-5));
            }
        }

        // Upward rays blend further toward the background
        let top = image.get(8, 0);
        let bottom = image.get(8, 11);
        assert!((top - background).length() < (bottom - background).length());
    }

    #[test]
    fn test_mirror_reflects_neighbor_color() {
        let mut scene = Scene::new();
        let light = Light::white(Vec3::new(0.0, 0.0, 10.0));
        scene.add_light(light);

        let mirror = Material::new(Color::new(0.9, 0.9, 0.9), 0.0, 0.0, 0.0, 128.0, 1.0);
        scene.add_sphere(Vec3::ZERO, 1.0, mirror);
        let red = Material::new(Color::new(1.0, 0.0, 0.0), 0.2, 0.6, 0.0, 32.0, 0.0);
        scene.add_sphere(Vec3::new(0.0, 0.0, 4.0), 1.0, red);

        let config = RenderConfig::default().with_reflections(true).with_max_depth(2);

        // Looking at the mirror's +Z pole from the side, the bounce goes
        // straight at the red sphere
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.5), -Vec3::Z);
        let seen = ray_color(&ray, &scene, 2, &config);

        let bounce = Ray::new(Vec3::new(0.0, 0.0, 1.0 + SHADOW_EPSILON), Vec3::Z);
        let rec = scene.hit(&bounce, Interval::from_min(T_MIN)).unwrap();
        let red_local = illuminate(&scene, &rec, &bounce);

        assert!(close(seen, red_local, 1e-4), "{:?} vs {:?}", seen, red_local);
        assert!(seen.x > seen.y && seen.x > seen.z);

        // One level of depth leaves nothing for the bounce
        let shallow = ray_color(&ray, &scene, 1, &config);
        assert_eq!(shallow, Color::ZERO);
    }

    #[test]
    fn test_reflections_disabled_ignores_depth() {
        let mut scene = Scene::new();
        scene.add_light(Light::default());
        scene.add_sphere(Vec3::ZERO, 1.0, Material::default().with_reflectivity(1.0));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let config = RenderConfig::default().with_max_depth(0);

        let rec = scene.hit(&ray, Interval::from_min(T_MIN)).unwrap();
        assert_eq!(trace(&ray, &scene, &config), illuminate(&scene, &rec, &ray));
    }

    #[test]
    fn test_single_pixel_image() {
        let scene = Scene::new();
        let mut config = RenderConfig::new(1, 1);
        config.background = Color::new(0.0, 0.0, 1.0);

        let image = render(&scene, &config);
        assert_eq!(image.width(), 1);
        assert_eq!(image.height(), 1);

        // (s, t) = (0, 1): the upper-left corner ray
        let camera = Camera::from_spec(&CameraSpec::default(), 1.0);
        let expected = backdrop(&camera.get_ray(0.0, 1.0), config.background);
        assert!(close(image.get(0, 0), expected, 1e-6));
    }

    #[test]
    fn test_from_defaults() {
        let defaults = RenderDefaults {
            background: Color::splat(0.5),
            reflections: true,
            max_depth: 7,
        };
        let config = RenderConfig::from_defaults(320, 240, &defaults);

        assert_eq!(config.width, 320);
        assert_eq!(config.max_depth, 7);
        assert!(config.reflections);
        assert_eq!(config.background, Color::splat(0.5));
        assert!((config.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }
}
