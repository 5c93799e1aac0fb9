//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for all perspective
//! projection parameters (FOV, aspect ratio, near/far planes). Its constructor
//! checks the parameters the matrix divides by, so a `Projection` always
//! yields a finite matrix.

use crate::config::{validate_projection, ConfigError, RenderConfig};
use crate::math::Mat4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    fov_degrees: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    /// Near plane distance of the depth mapping.
    z_near: f32,
    /// Far plane distance of the depth mapping.
    z_far: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees, in (0, 180)
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near plane distance (must be > 0)
    /// * `z_far` - Far plane distance (must be > z_near)
    pub fn new(
        fov_degrees: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Result<Self, ConfigError> {
        validate_projection(fov_degrees, z_near, z_far)?;
        Ok(Self {
            fov_degrees,
            aspect_ratio,
            z_near,
            z_far,
        })
    }

    pub fn from_config(config: &RenderConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.fov_degrees,
            config.aspect_ratio(),
            config.z_near,
            config.z_far,
        )
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Returns the vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    /// Returns the horizontal field of view in radians.
    ///
    /// Computed from the vertical FOV and aspect ratio.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio * (self.fov_y() / 2.0).tan()).atan()
    }

    /// Returns the aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Updates the aspect ratio (typically called on resize).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Generates the left-handed perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::projection(self.fov_degrees, self.aspect_ratio, self.z_near, self.z_far)
    }
}
