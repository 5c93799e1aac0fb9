//! Perspective-correct textured triangle fill with a `1/z` depth test.
//!
//! Vertices arrive in screen space carrying `u/z, v/z, 1/z`. Those three are
//! linear in screen space, so they are walked down the edges and across each
//! span with plain linear steps. Each pixel divides `u` and `v` back by the
//! interpolated `1/z` just before sampling, which undoes the perspective
//! distortion that a screen-linear `u, v` would show.
//!
//! The triangle is sorted by `y` and split at the middle vertex into an upper
//! and a lower half. Both halves share the long edge from the top vertex to
//! the bottom vertex.

use crate::colors;
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Sampler;
use crate::triangle::{TexCoord, Triangle};

/// A triangle corner snapped to the pixel grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenVertex {
    pub x: i32,
    pub y: i32,
    /// `u/z, v/z, 1/z`.
    pub tex: TexCoord,
}

impl ScreenVertex {
    pub fn new(x: i32, y: i32, tex: TexCoord) -> Self {
        Self { x, y, tex }
    }

    /// The corners of a screen-space triangle, truncated to whole pixels.
    pub fn from_triangle(tri: &Triangle) -> [ScreenVertex; 3] {
        [0, 1, 2].map(|i| Self::new(tri.points[i].x as i32, tri.points[i].y as i32, tri.tex[i]))
    }
}

/// Per-scanline increments of one edge.
#[derive(Clone, Copy, Default)]
struct EdgeStep {
    x: f32,
    u: f32,
    v: f32,
    w: f32,
}

impl EdgeStep {
    /// Steps from `a` to `b` per scanline. A horizontal edge keeps all steps
    /// at zero instead of dividing by zero.
    fn between(a: &ScreenVertex, b: &ScreenVertex) -> Self {
        let dy = i64::from(b.y) - i64::from(a.y);
        if dy == 0 {
            return Self::default();
        }
        let rows = dy.abs() as f32;
        Self {
            x: (i64::from(b.x) - i64::from(a.x)) as f32 / rows,
            u: (b.tex.u - a.tex.u) / rows,
            v: (b.tex.v - a.tex.v) / rows,
            w: (b.tex.w - a.tex.w) / rows,
        }
    }

    /// Edge position and attributes at scanline `y`, walking down from
    /// `origin`.
    #[inline]
    fn at(&self, origin: &ScreenVertex, y: i32) -> (i32, TexCoord) {
        let r = (i64::from(y) - i64::from(origin.y)) as f32;
        (
            (origin.x as f32 + r * self.x) as i32,
            TexCoord {
                u: origin.tex.u + r * self.u,
                v: origin.tex.v + r * self.v,
                w: origin.tex.w + r * self.w,
            },
        )
    }
}

/// Fill a screen-space triangle, sampling `sampler` at perspective-correct
/// coordinates.
///
/// # Arguments
/// * `fb` - Target color and depth buffers
/// * `vertices` - Corners with `u/z, v/z, 1/z` attributes, any order
/// * `sampler` - Texture source, sampled with normalized `(u, v)`
/// * `shade` - Optional flat color multiplied into every sample
///
/// Spans cover `ax <= x < bx`; the right end is exclusive. A triangle with
/// all corners on one row draws nothing. Corners may lie anywhere in the
/// `i32` range; only rows and columns inside the buffer are walked.
pub fn draw_textured_triangle<S: Sampler + ?Sized>(
    fb: &mut FrameBuffer,
    vertices: [ScreenVertex; 3],
    sampler: &S,
    shade: Option<u32>,
) {
    let [mut p1, mut p2, mut p3] = vertices;
    if p2.y < p1.y {
        std::mem::swap(&mut p1, &mut p2);
    }
    if p3.y < p1.y {
        std::mem::swap(&mut p1, &mut p3);
    }
    if p3.y < p2.y {
        std::mem::swap(&mut p2, &mut p3);
    }

    let long = EdgeStep::between(&p1, &p3);
    let last_row = i32::try_from(fb.height()).unwrap_or(i32::MAX) - 1;

    // Upper half: p1 -> p2 against the long edge.
    if p2.y != p1.y {
        let short = EdgeStep::between(&p1, &p2);
        for y in p1.y.max(0)..=p2.y.min(last_row) {
            let (ax, start) = short.at(&p1, y);
            let (bx, end) = long.at(&p1, y);
            draw_span(fb, y, (ax, start), (bx, end), sampler, shade);
        }
    }

    // Lower half: p2 -> p3 against the long edge.
    if p3.y != p2.y {
        let short = EdgeStep::between(&p2, &p3);
        for y in p2.y.max(0)..=p3.y.min(last_row) {
            let (ax, start) = short.at(&p2, y);
            let (bx, end) = long.at(&p1, y);
            draw_span(fb, y, (ax, start), (bx, end), sampler, shade);
        }
    }
}

/// Convenience wrapper taking a pipeline triangle directly.
pub fn draw_triangle<S: Sampler + ?Sized>(
    fb: &mut FrameBuffer,
    tri: &Triangle,
    sampler: &S,
    shade: Option<u32>,
) {
    draw_textured_triangle(fb, ScreenVertex::from_triangle(tri), sampler, shade);
}

#[inline]
fn draw_span<S: Sampler + ?Sized>(
    fb: &mut FrameBuffer,
    y: i32,
    a: (i32, TexCoord),
    b: (i32, TexCoord),
    sampler: &S,
    shade: Option<u32>,
) {
    // Always scan left to right.
    let ((ax, start), (bx, end)) = if a.0 > b.0 { (b, a) } else { (a, b) };
    if bx <= ax {
        return;
    }

    let t_step = 1.0 / (i64::from(bx) - i64::from(ax)) as f32;
    let first = ax.max(0);
    let last = bx.min(i32::try_from(fb.width()).unwrap_or(i32::MAX));
    let mut t = (i64::from(first) - i64::from(ax)) as f32 * t_step;
    for x in first..last {
        let tex = start.lerp(end, t);
        t += t_step;

        if !fb.depth_test(x, y, tex.w) {
            continue;
        }
        let texel = sampler.sample(tex.u / tex.w, tex.v / tex.w);
        let color = match shade {
            Some(shade) => colors::multiply(texel, shade),
            None => texel,
        };
        fb.set_pixel_with_depth(x, y, tex.w, color);
    }
}
