//! Point lights.

use glint_core::LightSpec;
use glint_math::Vec3;

use crate::Color;

/// A point light with a color and scalar intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// White light of intensity 1 at `position`.
    pub fn white(position: Vec3) -> Self {
        Self::new(position, Color::ONE, 1.0)
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::from(LightSpec::default())
    }
}

impl From<LightSpec> for Light {
    fn from(spec: LightSpec) -> Self {
        Self::new(spec.position, spec.color, spec.intensity)
    }
}
