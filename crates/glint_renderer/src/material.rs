//! Surface materials for Blinn-Phong shading.

use glint_core::MaterialSpec;
use glint_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Phong-family surface description.
///
/// Materials are plain values: every primitive owns its own copy and hit
/// records carry a copy of the material that was hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color
    pub color: Color,
    /// Ambient coefficient
    pub ambient: f32,
    /// Diffuse coefficient
    pub diffuse: f32,
    /// Specular coefficient
    pub specular: f32,
    /// Specular exponent
    pub shininess: f32,
    /// Fraction of the final color taken from the mirror bounce (0-1)
    pub reflectivity: f32,
}

impl Material {
    /// Create a new material.
    pub fn new(
        color: Color,
        ambient: f32,
        diffuse: f32,
        specular: f32,
        shininess: f32,
        reflectivity: f32,
    ) -> Self {
        Self {
            color,
            ambient,
            diffuse,
            specular,
            shininess,
            reflectivity,
        }
    }

    /// Matte material with the default coefficients and no reflection.
    pub fn matte(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Same material with a different reflectivity.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// True if shading this material spawns a reflection ray.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }
}

impl Default for Material {
    /// Light grey, mostly diffuse.
    fn default() -> Self {
        MaterialSpec::default().into()
    }
}

impl From<MaterialSpec> for Material {
    fn from(spec: MaterialSpec) -> Self {
        Self::new(
            spec.color,
            spec.ambient,
            spec.diffuse,
            spec.specular,
            spec.shininess,
            spec.reflectivity,
        )
    }
}
