//! Lighting types for the renderer.

use crate::colors;
use crate::math::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel. Shading is flat: one intensity per
/// face, never per vertex or per pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    pub direction: Vec3,
    /// Lower bound for the intensity, so faces turned away stay visible.
    pub ambient_intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, -1.0, 1.0))
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
            ambient_intensity: 0.1,
        }
    }

    pub fn with_ambient(mut self, ambient: f32) -> Self {
        self.ambient_intensity = ambient;
        self
    }

    /// Calculate light intensity for flat shading.
    ///
    /// Returns intensity in [ambient, 1.0] based on the angle between the
    /// surface normal and the light direction.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        // Negate direction: light pointing at surface = positive dot product
        (-self.direction)
            .dot(normal.normalize())
            .max(self.ambient_intensity)
            .min(1.0)
    }

    /// Opaque grey for a face with the given normal.
    pub fn shade(&self, normal: Vec3) -> u32 {
        colors::grey(self.intensity(normal))
    }
}
