//! Render settings loaded from RON.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```text
//! (
//!     width: 640,
//!     height: 480,
//!     fov_degrees: 75.0,
//!     render_mode: FilledWireframe,
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::colors;
use crate::engine::{RenderMode, TextureMode};
use crate::math::Vec3;
use crate::texture::WrapMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    /// The projection needs `0 < near < far`.
    #[error("clip range must satisfy 0 < near < far (near = {near}, far = {far})")]
    InvalidClipRange { near: f32, far: f32 },

    #[error("viewport must be at least 1x1 (got {width}x{height})")]
    InvalidViewport { width: u32, height: u32 },

    #[error("field of view must be between 0 and 180 degrees (got {0})")]
    InvalidFov(f32),

    #[error("near clip distance must be positive (got {0})")]
    InvalidNearClip(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Distance of the view-space clip plane in front of the camera.
    pub near_clip: f32,
    /// Direction the light travels in.
    pub light_direction: Vec3,
    pub ambient: f32,
    pub background: u32,
    pub backface_culling: bool,
    pub render_mode: RenderMode,
    pub texture_mode: TextureMode,
    pub wrap_mode: WrapMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 240,
            fov_degrees: 90.0,
            z_near: 0.1,
            z_far: 1000.0,
            near_clip: 0.1,
            light_direction: Vec3::new(0.0, -1.0, 1.0),
            ambient: 0.1,
            background: colors::BACKGROUND,
            backface_culling: true,
            render_mode: RenderMode::default(),
            texture_mode: TextureMode::default(),
            wrap_mode: WrapMode::default(),
        }
    }
}

impl RenderConfig {
    /// Parse and validate a config from RON text.
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded render config");
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        validate_projection(self.fov_degrees, self.z_near, self.z_far)?;
        if self.near_clip.is_nan() || self.near_clip <= 0.0 {
            return Err(ConfigError::InvalidNearClip(self.near_clip));
        }
        Ok(())
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Checks the parameters a perspective matrix divides by.
pub(crate) fn validate_projection(fov_degrees: f32, near: f32, far: f32) -> Result<(), ConfigError> {
    let fov_ok = fov_degrees > 0.0 && fov_degrees < 180.0;
    if !fov_ok {
        return Err(ConfigError::InvalidFov(fov_degrees));
    }
    // Comparisons with NaN are false, so NaN is rejected too.
    let range_ok = near > 0.0 && near < far;
    if !range_ok {
        return Err(ConfigError::InvalidClipRange { near, far });
    }
    Ok(())
}
