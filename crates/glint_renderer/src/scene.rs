//! The renderable scene: primitives, lights, and camera placement.

use std::path::{Path, PathBuf};

use glint_core::{
    parse_scene_file, read_off, CameraSpec, Mesh, ObjectSpec, OffError, SceneDescription,
    SceneFileError,
};
use glint_math::{Interval, Vec3};
use thiserror::Error;

use crate::{
    AaBox, Color, HitRecord, Hittable, HittableList, Light, Material, Primitive, Ray, Sphere,
    Triangle,
};

/// Errors that can occur while building a scene from a description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error(transparent)]
    File(#[from] SceneFileError),

    #[error("Failed to load mesh {path:?}: {source}")]
    Mesh {
        path: PathBuf,
        #[source]
        source: OffError,
    },
}

/// Render settings a scene file can suggest.
///
/// These only seed a [`crate::RenderConfig`]; the render itself reads the
/// config it is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderDefaults {
    /// Backdrop color at the bottom of the sky gradient
    pub background: Color,
    /// Whether mirror reflections are traced
    pub reflections: bool,
    /// Maximum reflection depth
    pub max_depth: u32,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            background: Color::new(0.2, 0.2, 0.4),
            reflections: false,
            max_depth: 3,
        }
    }
}

/// A scene owns its primitives and lights.
///
/// Rendering borrows the scene immutably, so it cannot change while a
/// render is running.
#[derive(Default)]
pub struct Scene {
    world: HittableList,
    lights: Vec<Light>,
    camera: CameraSpec,
    defaults: RenderDefaults,
}

impl Scene {
    /// Create an empty scene with the default camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read, parse, and build a scene file.
    ///
    /// Either the whole file loads (including every referenced mesh) or an
    /// error is returned and nothing is built.
    pub fn load(path: impl AsRef<Path>) -> Result<Scene, SceneError> {
        let description = parse_scene_file(path)?;
        Self::from_description(&description)
    }

    /// Build a scene from a parsed description, loading referenced meshes.
    pub fn from_description(description: &SceneDescription) -> Result<Scene, SceneError> {
        let mut scene = Scene::new();

        for object in &description.objects {
            match object {
                ObjectSpec::Sphere {
                    center,
                    radius,
                    material,
                } => scene.add_sphere(*center, *radius, Material::from(*material)),
                ObjectSpec::Box { min, max, material } => {
                    scene.add_box(*min, *max, Material::from(*material))
                }
                ObjectSpec::Triangle { vertices, material } => scene.add_triangle(
                    vertices[0],
                    vertices[1],
                    vertices[2],
                    Material::from(*material),
                ),
                ObjectSpec::Mesh {
                    path,
                    scale,
                    material,
                } => {
                    let resolved = description.resolve_path(path);
                    let mesh = read_off(&resolved).map_err(|source| SceneError::Mesh {
                        path: resolved.clone(),
                        source,
                    })?;
                    let mesh = mesh.transformed(*scale, Vec3::ZERO);
                    scene.add_mesh(&mesh, Material::from(*material));
                }
            }
        }

        for light in &description.lights {
            scene.add_light(Light::from(*light));
        }

        if let Some(camera) = description.camera {
            scene.set_camera(camera);
        }

        let mut defaults = RenderDefaults::default();
        if let Some(background) = description.background {
            defaults.background = background;
        }
        if let Some(reflections) = description.reflections {
            defaults.reflections = reflections.enabled;
            defaults.max_depth = reflections.max_depth;
        }
        scene.set_defaults(defaults);

        log::info!(
            "Built scene: {} primitives, {} lights",
            scene.len(),
            scene.lights.len()
        );

        Ok(scene)
    }

    /// Append any primitive.
    pub fn add(&mut self, object: impl Into<Primitive>) {
        self.world.add(object);
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: Material) {
        self.add(Sphere::new(center, radius, material));
    }

    pub fn add_box(&mut self, min: Vec3, max: Vec3, material: Material) {
        self.add(AaBox::new(min, max, material));
    }

    pub fn add_triangle(&mut self, v0: Vec3, v1: Vec3, v2: Vec3, material: Material) {
        self.add(Triangle::new(v0, v1, v2, material));
    }

    /// Append a mesh as one group of triangles sharing `material`.
    ///
    /// Returns the number of triangles added.
    pub fn add_mesh(&mut self, mesh: &Mesh, material: Material) -> usize {
        let mut triangles = HittableList::new();
        for [v0, v1, v2] in mesh.extract_triangle_vertices() {
            triangles.add(Triangle::new(v0, v1, v2, material));
        }

        let count = triangles.len();
        log::info!(
            "Added mesh with {} vertices and {} triangles",
            mesh.vertex_count(),
            count
        );

        if count > 0 {
            self.add(triangles);
        }
        count
    }

    /// Append a light. Lights are shaded in insertion order.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn set_camera(&mut self, camera: CameraSpec) {
        self.camera = camera;
    }

    pub fn set_defaults(&mut self, defaults: RenderDefaults) {
        self.defaults = defaults;
    }

    /// Drop every primitive and light.
    pub fn clear(&mut self) {
        self.world.clear();
        self.lights.clear();
    }

    pub fn camera(&self) -> &CameraSpec {
        &self.camera
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn world(&self) -> &HittableList {
        &self.world
    }

    pub fn defaults(&self) -> &RenderDefaults {
        &self.defaults
    }

    /// Number of top-level primitives (a mesh counts once).
    pub fn len(&self) -> usize {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    /// Nearest hit along `ray` within `ray_t`.
    ///
    /// Used for primary, shadow, and reflection rays alike.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.world.hit(ray, ray_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::parse_scene;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_add_and_clear() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::ZERO, 1.0, Material::default());
        scene.add_box(Vec3::splat(-1.0), Vec3::ONE, Material::default());
        scene.add_light(Light::default());

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.lights().len(), 1);

        scene.clear();
        assert!(scene.is_empty());
        assert!(scene.lights().is_empty());
    }

    #[test]
    fn test_add_mesh_groups_triangles() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE],
            vec![0, 1, 2, 1, 3, 2],
        );

        let mut scene = Scene::new();
        assert_eq!(scene.add_mesh(&mesh, Material::default()), 2);
        assert_eq!(scene.len(), 1);

        // Hits the second triangle through the group
        let ray = Ray::new(Vec3::new(0.8, 0.8, 3.0), -Vec3::Z);
        assert!(scene.hit(&ray, Interval::from_min(0.001)).is_some());
    }

    #[test]
    fn test_from_description() {
        let desc = parse_scene(
            "camera 0 1 6  0 0 0  0 1 0  40\n\
             sphere 0 0 0 1  1 0 0  0.1 0.7 0.3 32 0.5\n\
             triangle 0 0 0  1 0 0  0 1 0  0 1 0  0.1 0.7 0.3 32 0\n\
             background 0.1 0.1 0.1\n\
             reflections 1 5\n",
        )
        .unwrap();

        let scene = Scene::from_description(&desc).unwrap();

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.lights(), &[Light::default()]);
        assert_eq!(scene.camera().fov, 40.0);
        assert_eq!(
            scene.defaults(),
            &RenderDefaults {
                background: Color::splat(0.1),
                reflections: true,
                max_depth: 5,
            }
        );
    }

    #[test]
    fn test_load_with_relative_mesh() {
        let dir = temp_dir("glint_scene_load_test");
        std::fs::write(
            dir.join("quad.off"),
            "OFF\n4 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n",
        )
        .unwrap();
        // Red channel 0.4 gives scale 2
        std::fs::write(
            dir.join("mesh.scene"),
            "off_model quad.off  0.4 0.4 0.4  0.1 0.7 0.3 32 0\nlight 0 0 10  1 1 1  1\n",
        )
        .unwrap();

        let scene = Scene::load(dir.join("mesh.scene")).unwrap();
        assert_eq!(scene.len(), 1);

        // Scaled quad spans [0, 2]
        let ray = Ray::new(Vec3::new(1.8, 1.8, 5.0), -Vec3::Z);
        let rec = scene.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_missing_mesh_fails_whole_load() {
        let dir = temp_dir("glint_scene_missing_mesh_test");
        std::fs::write(
            dir.join("broken.scene"),
            "sphere 0 0 0 1  1 0 0  0.1 0.7 0.3 32 0\noff_model nope.off  0.2 0.2 0.2  0.1 0.7 0.3 32 0\n",
        )
        .unwrap();

        let err = Scene::load(dir.join("broken.scene")).err().unwrap();
        assert!(matches!(err, SceneError::Mesh { .. }));
    }

    #[test]
    fn test_malformed_file_is_file_error() {
        let dir = temp_dir("glint_scene_malformed_test");
        std::fs::write(dir.join("bad.scene"), "sphere 0 0 0\n").unwrap();

        let err = Scene::load(dir.join("bad.scene")).err().unwrap();
        assert!(matches!(
            err,
            SceneError::File(SceneFileError::MissingField { field: "radius", .. })
        ));
    }
}
