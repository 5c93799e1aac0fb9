//! Owned color and depth buffers.
//!
//! Provides the [`Renderer`] struct which owns the buffers for one frame and
//! implements the drawing operations that work on a whole triangle, like
//! wireframes. Everything pixel-level goes through a [`FrameBuffer`] view.

use super::framebuffer::FrameBuffer;
use crate::colors;
use crate::triangle::Triangle;

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![0.0; size], // 0.0 = infinitely far (1/z where z -> infinity)
            width,
            height,
        }
    }

    /// Reallocate both buffers for a new size. Contents are lost.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        tracing::debug!(width, height, "resizing frame buffers");
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.depth_buffer = vec![0.0; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    /// Clear the depth buffer to prepare for a new frame.
    /// Sets all depths to 0.0 (infinitely far, since we store 1/z).
    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(0.0);
    }

    /// Draws the edges of a screen-space triangle, depth tested against the
    /// triangle's own `1/z` values.
    pub fn draw_triangle_wireframe(&mut self, triangle: &Triangle, color: u32) {
        let mut fb = self.as_framebuffer();
        for i in 0..3 {
            let (a, b) = (triangle.points[i], triangle.points[(i + 1) % 3]);
            let (da, db) = (triangle.tex[i].w, triangle.tex[(i + 1) % 3].w);
            fb.draw_line_with_depth(
                a.x as i32, a.y as i32, da, b.x as i32, b.y as i32, db, color,
            );
        }
    }

    /// Draws a line without depth testing.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        self.as_framebuffer().draw_line(x0, y0, x1, y1, color);
    }

    /// The color buffer, row-major ARGB.
    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// The color buffer as native-endian bytes, four per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8, and the
        // slice covers exactly the Vec's initialized elements.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// The color buffer converted to an RGBA image.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let c = self.color_buffer[(y * self.width + x) as usize];
            image::Rgba([(c >> 16) as u8, (c >> 8) as u8, c as u8, (c >> 24) as u8])
        })
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }
}
