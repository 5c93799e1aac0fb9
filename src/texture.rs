//! Texture sources for the textured triangle rasterizer.
//!
//! The rasterizer only knows the [`Sampler`] contract: give it normalized
//! `(u, v)` and get back an ARGB color. How coordinates outside `[0, 1]` are
//! handled is up to the sampler, not the rasterizer.

use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Something that can be sampled at normalized texture coordinates.
pub trait Sampler {
    /// Returns the ARGB color at `(u, v)`, where `(0, 0)` is the top-left
    /// texel and `(1, 1)` the bottom-right.
    fn sample(&self, u: f32, v: f32) -> u32;
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load texture: {0}")]
    Image(#[from] image::ImageError),
    #[error("texture data has {actual} texels, expected {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
    #[error("texture must be at least 1x1")]
    Empty,
}

/// How out-of-range coordinates are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WrapMode {
    /// Tile the texture (`u = 1.25` samples like `u = 0.25`).
    #[default]
    Repeat,
    /// Stick to the nearest edge texel.
    Clamp,
}

impl WrapMode {
    #[inline]
    fn apply(self, c: f32) -> f32 {
        match self {
            WrapMode::Repeat => c.rem_euclid(1.0),
            WrapMode::Clamp => c.clamp(0.0, 1.0),
        }
    }
}

/// Represents a 2D texture for texture mapping.
pub struct Texture {
    data: Vec<u32>, // The pixel data of the texture in ARGB format.
    width: u32,     // The width of the texture in pixels.
    height: u32,    // The height of the texture in pixels.
    wrap: WrapMode,
}

impl Texture {
    /// Build a texture from row-major ARGB texels.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        if data.len() != (width * height) as usize {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            wrap: WrapMode::default(),
        })
    }

    // Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?.to_rgba8();
        let texture = Self::from_image(&img)?;
        tracing::info!(
            path = %path.as_ref().display(),
            width = texture.width,
            height = texture.height,
            "loaded texture"
        );
        Ok(texture)
    }

    pub fn from_image(img: &RgbaImage) -> Result<Self, TextureError> {
        let (width, height) = img.dimensions();

        // Convert RGBA bytes to ARGB u32
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        Self::from_pixels(width, height, data)
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Sampler for Texture {
    /// Nearest-neighbour lookup. V is not flipped here; OBJ texture
    /// coordinates are flipped once when the mesh is loaded.
    #[inline]
    fn sample(&self, u: f32, v: f32) -> u32 {
        let u = self.wrap.apply(u);
        let v = self.wrap.apply(v);

        // Convert normalized UV to pixel coordinates [0, width-1]
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);

        self.data[(y * self.width + x) as usize]
    }
}

/// A sampler returning one color everywhere. Used for untextured meshes so
/// they still go through the depth-tested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidColor(pub u32);

impl Sampler for SolidColor {
    #[inline]
    fn sample(&self, _u: f32, _v: f32) -> u32 {
        self.0
    }
}

/// Procedural checkerboard with `cells` squares along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkerboard {
    pub cells: u32,
    pub light: u32,
    pub dark: u32,
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self {
            cells: 8,
            light: 0xFFC0C0C0,
            dark: 0xFF404040,
        }
    }
}

impl Sampler for Checkerboard {
    #[inline]
    fn sample(&self, u: f32, v: f32) -> u32 {
        let cx = (u.rem_euclid(1.0) * self.cells as f32) as u32;
        let cy = (v.rem_euclid(1.0) * self.cells as f32) as u32;
        if (cx ^ cy) & 1 == 0 {
            self.light
        } else {
            self.dark
        }
    }
}
