//! Built-in showcase scenes.

use std::path::Path;

use glint_core::{read_off, CameraSpec};
use glint_math::Vec3;

use crate::{Color, Light, Material, RenderDefaults, Scene, SceneError};

/// Spheres, boxes, and a small prism under two colored lights.
///
/// Reflections are on by default (depth 4) so the mirror sphere on its
/// pedestal picks up the rest of the scene.
pub fn simple_scene() -> Scene {
    let mut scene = Scene::new();

    // Warm key, cool fill
    scene.add_light(Light::new(Vec3::new(10.0, 10.0, 10.0), Color::new(1.0, 0.9, 0.8), 0.8));
    scene.add_light(Light::new(Vec3::new(-10.0, 5.0, -5.0), Color::new(0.4, 0.5, 0.9), 0.6));

    let red = Material::new(Color::new(0.9, 0.2, 0.2), 0.1, 0.7, 0.4, 32.0, 0.1);
    let blue = Material::new(Color::new(0.2, 0.3, 0.9), 0.1, 0.7, 0.6, 48.0, 0.0);
    let green = Material::new(Color::new(0.2, 0.8, 0.2), 0.1, 0.8, 0.2, 16.0, 0.0);
    let gold = Material::new(Color::new(0.9, 0.7, 0.2), 0.2, 0.5, 0.8, 64.0, 0.3);
    let mirror = Material::new(Color::new(0.9, 0.9, 0.9), 0.0, 0.0, 1.0, 128.0, 0.9);
    let glass = Material::new(Color::new(0.8, 0.9, 1.0), 0.1, 0.2, 0.8, 64.0, 0.6);
    let purple = Material::new(Color::new(0.6, 0.2, 0.8), 0.1, 0.7, 0.5, 32.0, 0.2);

    // Floor
    scene.add_box(Vec3::new(-10.0, -2.0, -10.0), Vec3::new(10.0, -1.97, 10.0), green);

    scene.add_sphere(Vec3::new(0.0, 0.0, 0.0), 1.0, red);
    scene.add_sphere(Vec3::new(2.2, 0.0, -1.0), 0.7, gold);
    scene.add_sphere(Vec3::new(-1.8, -0.2, -0.8), 0.8, blue);
    scene.add_sphere(Vec3::new(0.8, -0.9, -2.5), 1.1, purple);

    // Mirror sphere on a pedestal
    scene.add_sphere(Vec3::new(0.0, 2.5, -2.0), 0.8, mirror);
    scene.add_box(Vec3::new(-0.4, -2.0, -2.4), Vec3::new(0.4, 2.0, -1.6), blue);

    // Tetrahedral prism
    let base_a = Vec3::new(3.0, -2.0, -3.0);
    let base_b = Vec3::new(4.5, -2.0, -4.0);
    let base_c = Vec3::new(2.5, -2.0, -4.5);
    let apex = Vec3::new(3.5, 1.0, -3.5);
    scene.add_triangle(base_a, base_b, apex, glass);
    scene.add_triangle(base_a, apex, base_c, glass);
    scene.add_triangle(base_c, apex, base_b, glass);
    scene.add_triangle(base_a, base_c, base_b, glass);

    scene.set_defaults(RenderDefaults {
        background: Color::new(0.3, 0.5, 0.8),
        reflections: true,
        max_depth: 4,
    });
    scene.set_camera(CameraSpec {
        look_from: Vec3::new(5.0, 3.0, 8.0),
        look_at: Vec3::new(0.0, 0.0, -1.0),
        up: Vec3::Y,
        fov: 50.0,
    });

    scene
}

/// An OFF model at half scale on a wide floor.
///
/// Fails if the model cannot be read; nothing is built in that case.
pub fn mesh_scene(path: impl AsRef<Path>) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let mesh = read_off(path).map_err(|source| SceneError::Mesh {
        path: path.to_path_buf(),
        source,
    })?;

    let mut scene = Scene::new();

    scene.add_light(Light::new(Vec3::new(20.0, 30.0, 20.0), Color::ONE, 1.0));
    scene.add_light(Light::new(Vec3::new(-20.0, 10.0, -10.0), Color::new(0.5, 0.5, 0.7), 0.5));

    let model = Material::new(Color::new(0.7, 0.5, 0.3), 0.2, 0.6, 0.4, 32.0, 0.0);
    let floor = Material::new(Color::new(0.8, 0.8, 0.8), 0.1, 0.7, 0.2, 16.0, 0.0);

    scene.add_box(Vec3::new(-50.0, -10.0, -50.0), Vec3::new(50.0, -9.0, 50.0), floor);
    scene.add_mesh(&mesh.transformed(0.5, Vec3::ZERO), model);

    scene.set_defaults(RenderDefaults {
        background: Color::new(0.2, 0.3, 0.4),
        reflections: true,
        max_depth: 2,
    });
    scene.set_camera(CameraSpec {
        look_from: Vec3::new(0.0, 5.0, 20.0),
        look_at: Vec3::ZERO,
        up: Vec3::Y,
        fov: 45.0,
    });

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render, RenderConfig};

    #[test]
    fn test_simple_scene_contents() {
        let scene = simple_scene();

        // Floor, four spheres, mirror, pedestal, four prism faces
        assert_eq!(scene.len(), 11);
        assert_eq!(scene.lights().len(), 2);
        assert!(scene.defaults().reflections);
        assert_eq!(scene.defaults().max_depth, 4);
        assert_eq!(scene.camera().fov, 50.0);
    }

    #[test]
    fn test_simple_scene_renders() {
        let scene = simple_scene();
        let config = RenderConfig::from_defaults(40, 30, scene.defaults());

        let image = render(&scene, &config);
        let bytes = image.to_rgb8();
        assert_eq!(bytes.len(), 40 * 30 * 3);

        // Not a flat backdrop
        let first = &bytes[0..3];
        assert!(bytes.chunks_exact(3).any(|px| px != first));
    }

    #[test]
    fn test_mesh_scene() {
        let dir = std::env::temp_dir().join("glint_demo_mesh_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tetra.off");
        std::fs::write(
            &path,
            "OFF\n4 4 6\n0 0 0\n2 0 0\n0 2 0\n0 0 2\n3 0 2 1\n3 0 1 3\n3 0 3 2\n3 1 2 3\n",
        )
        .unwrap();

        let scene = mesh_scene(&path).unwrap();
        assert_eq!(scene.len(), 2); // floor + mesh group
        assert_eq!(scene.defaults().max_depth, 2);
    }

    #[test]
    fn test_mesh_scene_missing_model() {
        let result = mesh_scene("definitely/not/here.off");
        assert!(matches!(result, Err(SceneError::Mesh { .. })));
    }
}
