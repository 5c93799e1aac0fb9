//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It owns
//! the frame buffers, the camera, one mesh with its transform and texture,
//! and drives the pipeline and rasterizer once per frame.

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::colors;
use crate::config::{ConfigError, RenderConfig};
use crate::mesh::Mesh;
use crate::pipeline::{Pipeline, RenderContext};
use crate::render::rasterizer::textured;
use crate::render::Renderer;
use crate::texture::{Checkerboard, Sampler};
use crate::transform::Transform;
use crate::triangle::Triangle;

/// What gets drawn for each triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Wireframe only
    Wireframe,
    /// Textured fill only
    #[default]
    Filled,
    /// Textured fill with a wireframe overlay
    FilledWireframe,
}

/// How the flat light shade combines with texture samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureMode {
    /// Texture color as is, lighting ignored.
    Replace,
    /// Texture color multiplied by the face's shade.
    #[default]
    Modulate,
}

pub struct Engine {
    renderer: Renderer,
    context: RenderContext,
    camera: Camera,
    mesh: Mesh,
    transform: Transform,
    sampler: Box<dyn Sampler>,
    triangles_to_render: Vec<Triangle>,
    render_mode: RenderMode,
    texture_mode: TextureMode,
    background: u32,
}

impl Engine {
    /// Creates an engine showing the unit cube through a camera at the
    /// origin. Fails if the config does not describe a usable projection.
    pub fn new(config: &RenderConfig) -> Result<Self, ConfigError> {
        let camera = Camera::default();
        let context = RenderContext::new(config, &camera)?;
        Ok(Self {
            renderer: Renderer::new(config.width, config.height),
            context,
            camera,
            mesh: Mesh::unit_cube(),
            transform: Transform::default(),
            sampler: Box::new(Checkerboard::default()),
            triangles_to_render: Vec::new(),
            render_mode: config.render_mode,
            texture_mode: config.texture_mode,
            background: config.background,
        })
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_texture_mode(&mut self, mode: TextureMode) {
        self.texture_mode = mode;
    }

    pub fn texture_mode(&self) -> TextureMode {
        self.texture_mode
    }

    pub fn set_texture(&mut self, sampler: impl Sampler + 'static) {
        self.sampler = Box::new(sampler);
    }

    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::warn!(width, height, "ignoring resize to an empty viewport");
            return;
        }
        self.renderer.resize(width, height);
        self.context.resize(width, height);
    }

    /// Screen-space triangles produced by the last [`Engine::update`].
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles_to_render
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    /// Runs the mesh through the geometry pipeline for the current camera
    /// and transform.
    pub fn update(&mut self) {
        self.context.update_camera(&self.camera);
        let world = self.transform.to_matrix();

        self.triangles_to_render.clear();
        let stats = Pipeline::process_into(
            &self.context,
            &self.mesh,
            &world,
            &mut self.triangles_to_render,
        );
        tracing::debug!(
            submitted = stats.submitted,
            culled = stats.culled,
            emitted = stats.emitted,
            "pipeline pass"
        );
    }

    /// Render the current frame
    pub fn render(&mut self) {
        self.renderer.clear(self.background);
        // Once per frame, before any triangle is drawn.
        self.renderer.clear_depth();

        let (draw_filled, draw_wireframe) = match self.render_mode {
            RenderMode::Wireframe => (false, true),
            RenderMode::Filled => (true, false),
            RenderMode::FilledWireframe => (true, true),
        };

        if draw_filled {
            let mut fb = self.renderer.as_framebuffer();
            for triangle in &self.triangles_to_render {
                let shade = match self.texture_mode {
                    TextureMode::Replace => None,
                    TextureMode::Modulate => Some(triangle.color),
                };
                textured::draw_triangle(&mut fb, triangle, self.sampler.as_ref(), shade);
            }
        }

        if draw_wireframe {
            for triangle in &self.triangles_to_render {
                self.renderer
                    .draw_triangle_wireframe(triangle, colors::WIREFRAME);
            }
        }
    }
}
