//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a safe view into color and depth buffers with bounds-checked access.
//! The depth buffer enables proper hidden surface removal via z-buffer algorithm.

/// Depth bias so wireframes render slightly in front of filled triangles.
pub const WIREFRAME_DEPTH_BIAS: f32 = 0.0001;

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass buffers + dimensions together.
///
/// # Depth Buffer
///
/// The depth buffer stores `1/z` of the nearest fragment drawn so far, where
/// `z` is the view-space depth. `1/z` interpolates linearly in screen space.
/// Larger values are closer to the camera and `0.0` means nothing has been
/// drawn there yet (infinitely far).
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    ///
    /// Buffer lengths must match `width * height` (checked in debug builds).
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            (width * height) as usize,
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            (width * height) as usize,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if the depth value is greater than the existing
    /// depth at that location (closer to camera, since we store 1/z).
    /// Silently ignores out-of-bounds coordinates.
    ///
    /// # Arguments
    /// * `x`, `y` - Pixel coordinates
    /// * `depth` - The 1/z value for this pixel (larger = closer)
    /// * `color` - The color to write if depth test passes
    ///
    /// Returns whether the pixel was written.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: u32) -> bool {
        match self.index(x, y) {
            // Depth test: larger 1/z means closer to camera
            Some(idx) if depth > self.depth_buffer[idx] => {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = color;
                true
            }
            _ => false,
        }
    }

    /// Depth test only, without writing. Lets callers skip an expensive
    /// texture sample for hidden fragments.
    #[inline]
    pub fn depth_test(&self, x: i32, y: i32, depth: f32) -> bool {
        self.index(x, y)
            .is_some_and(|idx| depth > self.depth_buffer[idx])
    }

    /// Set a pixel without depth testing (for overlays, UI, etc.)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the stored `1/z` at (x, y), or None if out of bounds.
    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    /// Fill the inclusive span `x0..=x1` on row `y`, clamped to the buffer.
    /// The endpoints may be given in either order.
    #[inline]
    pub fn fill_scanline(&mut self, y: i32, x0: i32, x1: i32, color: u32) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let start = x0.max(0);
        let end = x1.min(self.width as i32 - 1);
        if start > end {
            return;
        }
        let row = (y as u32 * self.width) as usize;
        self.color_buffer[row + start as usize..=row + end as usize].fill(color);
    }

    /// Draws a line between two points using Bresenham's line algorithm, with
    /// no depth test.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        bresenham(x0, y0, x1, y1, |x, y, _| self.set_pixel(x, y, color));
    }

    /// Draws a line with depth testing.
    ///
    /// `depth0` and `depth1` are the `1/z` values at the endpoints; they are
    /// interpolated linearly along the line and biased by
    /// [`WIREFRAME_DEPTH_BIAS`] so edges win against their own faces.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_line_with_depth(
        &mut self,
        x0: i32,
        y0: i32,
        depth0: f32,
        x1: i32,
        y1: i32,
        depth1: f32,
        color: u32,
    ) {
        let d0 = depth0 + WIREFRAME_DEPTH_BIAS;
        let d1 = depth1 + WIREFRAME_DEPTH_BIAS;
        bresenham(x0, y0, x1, y1, |x, y, t| {
            self.set_pixel_with_depth(x, y, d0 + t * (d1 - d0), color);
        });
    }
}

/// Walks the pixels of a line with Bresenham's algorithm.
///
/// Only integer arithmetic decides the pixels: an error term tracks the
/// distance between the ideal line and the current pixel, and once it passes
/// a threshold the walk also steps along the minor axis. `plot` receives each
/// pixel and its fraction `t` of the way along the line.
fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(i32, i32, f32)) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let steps = dx.max(dy);
    if steps == 0 {
        plot(x0, y0, 0.0);
        return;
    }

    let x_incr_direction = if x0 < x1 { 1 } else { -1 };
    let y_incr_direction = if y0 < y1 { 1 } else { -1 };

    // Positive error favors x movement, negative favors y.
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);
    let mut step = 0;

    loop {
        plot(x, y, step as f32 / steps as f32);
        if x == x1 && y == y1 {
            break;
        }
        step += 1;

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += x_incr_direction;
        }
        // Both branches can fire, giving a diagonal step.
        if e2 < dx {
            err += dx;
            y += y_incr_direction;
        }
    }
}
