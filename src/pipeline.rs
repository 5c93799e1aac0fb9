//! The per-frame geometry pipeline.
//!
//! One mesh goes in as model-space triangles and comes out as screen-space
//! triangles ready for the textured rasterizer. Each triangle passes through,
//! in order:
//!
//! 1. world transform
//! 2. backface cull against the camera position
//! 3. view transform
//! 4. flat lighting from the world-space face normal
//! 5. near-plane clip in view space
//! 6. projection and perspective divide (`u/w, v/w, 1/w` into the tex slots)
//! 7. viewport transform
//! 8. screen-edge clip fan-out
//!
//! No step ever goes back to an earlier one. Geometry that cannot be
//! processed (degenerate faces, undefined plane crossings) is dropped.

use crate::camera::Camera;
use crate::clipper::{clip_triangle, Plane, ScreenClipper};
use crate::config::{ConfigError, RenderConfig};
use crate::light::DirectionalLight;
use crate::math::{Mat4, Vec3, Vec4};
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::triangle::{TexCoord, Triangle};

/// Everything the pipeline needs to know about the current frame.
///
/// Built from a [`RenderConfig`] once and refreshed from the camera each
/// frame. Nothing here is global; two contexts can render two views of the
/// same mesh side by side.
#[derive(Debug, Clone)]
pub struct RenderContext {
    projection: Projection,
    projection_matrix: Mat4,
    view_matrix: Mat4,
    camera_position: Vec3,
    pub light: DirectionalLight,
    width: u32,
    height: u32,
    near_plane: Plane,
    screen: ScreenClipper,
    pub backface_culling: bool,
}

impl RenderContext {
    pub fn new(config: &RenderConfig, camera: &Camera) -> Result<Self, ConfigError> {
        config.validate()?;
        let projection = Projection::from_config(config)?;
        Ok(Self {
            projection,
            projection_matrix: projection.matrix(),
            view_matrix: camera.view_matrix(),
            camera_position: camera.position(),
            light: DirectionalLight::new(config.light_direction).with_ambient(config.ambient),
            width: config.width,
            height: config.height,
            near_plane: Plane::near(config.near_clip),
            screen: ScreenClipper::new(config.width, config.height),
            backface_culling: config.backface_culling,
        })
    }

    /// Picks up the camera's current position and orientation.
    pub fn update_camera(&mut self, camera: &Camera) {
        self.view_matrix = camera.view_matrix();
        self.camera_position = camera.position();
    }

    /// Adapts the projection and screen edges to a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.projection.set_aspect_ratio(width as f32 / height as f32);
        self.projection_matrix = self.projection.matrix();
        self.screen = ScreenClipper::new(width, height);
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn near_plane(&self) -> &Plane {
        &self.near_plane
    }

    /// Projects a view-space triangle and maps it to pixel coordinates.
    ///
    /// After this the points hold screen `x, y`, normalized depth in `z` and
    /// the view depth in `w`; the tex slots hold `u/w, v/w, 1/w`.
    pub fn project(&self, tri: &Triangle) -> Triangle {
        let half_w = 0.5 * self.width as f32;
        let half_h = 0.5 * self.height as f32;
        let mut out = *tri;
        for (point, tex) in out.points.iter_mut().zip(out.tex.iter_mut()) {
            let clip = *point * self.projection_matrix;
            let w = clip.w;
            *tex = TexCoord {
                u: tex.u / w,
                v: tex.v / w,
                w: 1.0 / w,
            };
            let ndc = clip.perspective_divide();
            // Screen y grows downwards; x is flipped along with it.
            *point = Vec4::new(
                (1.0 - ndc.x) * half_w,
                (1.0 - ndc.y) * half_h,
                ndc.z,
                w,
            );
        }
        out
    }
}

/// Triangle counts for one pass through the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub submitted: usize,
    pub culled: usize,
    pub emitted: usize,
}

/// Stateless driver for the per-triangle stages.
pub struct Pipeline;

impl Pipeline {
    /// Runs `mesh` through every stage with `world` as its model matrix and
    /// returns the screen-space triangles.
    pub fn process(ctx: &RenderContext, mesh: &Mesh, world: &Mat4) -> Vec<Triangle> {
        let mut out = Vec::with_capacity(mesh.len());
        Self::process_into(ctx, mesh, world, &mut out);
        out
    }

    /// Like [`Pipeline::process`] but appends to a caller-owned list, so the
    /// allocation can be reused across frames.
    pub fn process_into(
        ctx: &RenderContext,
        mesh: &Mesh,
        world: &Mat4,
        out: &mut Vec<Triangle>,
    ) -> PipelineStats {
        let start = out.len();
        let mut stats = PipelineStats {
            submitted: mesh.len(),
            ..Default::default()
        };

        for source in mesh.triangles() {
            let world_tri = source.transformed(world);

            let normal = world_tri.normal();
            if ctx.backface_culling
                && normal.dot(world_tri.points[0].xyz() - ctx.camera_position) >= 0.0
            {
                stats.culled += 1;
                continue;
            }

            let mut view_tri = world_tri.transformed(&ctx.view_matrix);
            view_tri.color = ctx.light.shade(normal);

            for clipped in clip_triangle(&ctx.near_plane, &view_tri) {
                let projected = ctx.project(&clipped);
                ctx.screen.clip_into(&projected, out);
            }
        }

        stats.emitted = out.len() - start;
        stats
    }
}
