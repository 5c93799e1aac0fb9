//! Solid triangle fill by dual edge walking.
//!
//! The vertices are sorted by `y`. The long edge runs from the top vertex to
//! the bottom one and is walked for every scanline; the two short edges are
//! walked for the upper and lower half. Each walker steps with integer math
//! only: a whole-pixel slope plus a remainder that accumulates like the error
//! term of Bresenham's line algorithm. That keeps the exact edge crossing
//! available as a floor and a ceiling, so every span covers precisely the
//! pixels inside the closed triangle.
//!
//! Pixel `(x, y)` is sampled at its integer coordinate. No depth test is
//! applied; this is the 2D fill.

use crate::render::framebuffer::FrameBuffer;

/// Walks one edge from `start` to `end` (with `end.1 > start.1`), one
/// scanline at a time. The exact crossing at the current row is
/// `x + rem / dy` with `0 <= rem < dy`. Kept in `i64` so edges spanning the
/// whole `i32` range cannot overflow.
struct EdgeWalker {
    x: i64,
    rem: i64,
    step: i64,
    step_rem: i64,
    dy: i64,
}

impl EdgeWalker {
    fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        let dx = i64::from(end.0) - i64::from(start.0);
        let dy = i64::from(end.1) - i64::from(start.1);
        debug_assert!(dy > 0);
        Self {
            x: i64::from(start.0),
            rem: 0,
            step: dx.div_euclid(dy),
            step_rem: dx.rem_euclid(dy),
            dy,
        }
    }

    #[inline]
    fn floor(&self) -> i64 {
        self.x
    }

    #[inline]
    fn ceil(&self) -> i64 {
        self.x + i64::from(self.rem > 0)
    }

    #[inline]
    fn advance(&mut self) {
        self.x += self.step;
        self.rem += self.step_rem;
        if self.rem >= self.dy {
            self.rem -= self.dy;
            self.x += 1;
        }
    }
}

/// Fill the closed triangle `p0, p1, p2` with `color`.
///
/// Works for either winding. Pixels on an edge are included. A triangle with
/// zero area draws nothing.
pub fn fill_triangle(
    fb: &mut FrameBuffer,
    p0: (i32, i32),
    p1: (i32, i32),
    p2: (i32, i32),
    color: u32,
) {
    let mut v = [p0, p1, p2];
    v.sort_by_key(|p| p.1);
    let [top, mid, bottom] = v;

    // Which side of the long edge the middle vertex lies on. Zero means the
    // three points are collinear.
    let d = |a: i32, b: i32| i64::from(a) - i64::from(b);
    let side = i128::from(d(mid.0, top.0)) * i128::from(d(bottom.1, top.1))
        - i128::from(d(mid.1, top.1)) * i128::from(d(bottom.0, top.0));
    if side == 0 {
        return;
    }
    let short_on_left = side < 0;

    // Inclusive pixel range between the long edge and a short edge crossing
    // given as (ceil, floor).
    let bounds = |long: &EdgeWalker, short: (i64, i64)| {
        if short_on_left {
            (short.0, long.floor())
        } else {
            (long.ceil(), short.1)
        }
    };
    let mut long = EdgeWalker::new(top, bottom);

    if top.1 < mid.1 {
        let mut short = EdgeWalker::new(top, mid);
        for y in top.1..mid.1 {
            emit(fb, y, bounds(&long, (short.ceil(), short.floor())), color);
            long.advance();
            short.advance();
        }
    }

    if mid.1 < bottom.1 {
        let mut short = EdgeWalker::new(mid, bottom);
        for y in mid.1..=bottom.1 {
            emit(fb, y, bounds(&long, (short.ceil(), short.floor())), color);
            long.advance();
            short.advance();
        }
    } else {
        // Flat bottom: the last row runs along the horizontal edge.
        let x = i64::from(mid.0);
        emit(fb, bottom.1, bounds(&long, (x, x)), color);
    }
}

#[inline]
fn emit(fb: &mut FrameBuffer, y: i32, (left, right): (i64, i64), color: u32) {
    if left <= right {
        let clamp = |x: i64| x.clamp(-1, i64::from(fb.width())) as i32;
        fb.fill_scanline(y, clamp(left), clamp(right), color);
    }
}
