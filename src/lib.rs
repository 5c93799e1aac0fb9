//! A CPU-based software rasterizer.
//!
//! Meshes are transformed, culled, lit, clipped and projected on the CPU and
//! scan converted into plain `u32` ARGB buffers with a `1/z` depth buffer.
//! Textured triangles are perspective correct. Alongside the 3D path the
//! crate has flat 2D fills: triangles, circles, ellipses and polygons.
//!
//! # Quick Start
//!
//! ```ignore
//! use softraster::prelude::*;
//!
//! let config = RenderConfig::default();
//! let mut engine = Engine::new(&config)?;
//! engine.transform_mut().set_position_xyz(-0.5, -0.5, 3.0);
//! engine.update();
//! engine.render();
//! engine.renderer().to_image().save("cube.png")?;
//! ```

pub mod camera;
pub mod clipper;
pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod texture;
pub mod transform;
pub mod triangle;

// Re-export commonly needed types at crate root for convenience
pub use config::{ConfigError, RenderConfig};
pub use engine::{Engine, RenderMode, TextureMode};
pub use mesh::{Mesh, MeshError};
pub use pipeline::{Pipeline, RenderContext};
pub use projection::Projection;
pub use transform::Transform;
pub use triangle::{TexCoord, Triangle};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softraster::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::camera::Camera;
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::Mesh;
    pub use crate::transform::Transform;

    // Engine
    pub use crate::config::RenderConfig;
    pub use crate::engine::{Engine, RenderMode, TextureMode};
    pub use crate::pipeline::{Pipeline, RenderContext};
    pub use crate::projection::Projection;

    // Math
    pub use crate::math::{Mat4, Vec2, Vec3, Vec4};

    // Rendering
    pub use crate::render::{FrameBuffer, Renderer};
    pub use crate::texture::{Checkerboard, Sampler, SolidColor, Texture, WrapMode};
    pub use crate::triangle::{TexCoord, Triangle};
}
