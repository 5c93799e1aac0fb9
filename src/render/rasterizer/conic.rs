//! Filled circles and ellipses by the midpoint method.
//!
//! Both walk one octant (circle) or quadrant (ellipse) with an integer
//! decision variable and emit horizontal spans between mirrored points, so the
//! work is proportional to the radius rather than its square.

use crate::render::framebuffer::FrameBuffer;

/// Fill a circle of radius `r` centered on `(cx, cy)`.
///
/// `r == 0` draws the center pixel. A negative radius, or a circle entirely
/// outside the buffer, draws nothing.
pub fn fill_circle(fb: &mut FrameBuffer, cx: i32, cy: i32, r: i32, color: u32) {
    let (w, h) = (fb.width() as i32, fb.height() as i32);
    if r < 0 || cx < -r || cy < -r || cx - w > r || cy - h > r {
        return;
    }
    if r == 0 {
        fb.set_pixel(cx, cy, color);
        return;
    }

    let (mut x, mut y) = (0, r);
    let mut d = 3 - 2 * r;

    while y >= x {
        // Spans through the octant points nearest the horizontal axis.
        fb.fill_scanline(cy - x, cx - y, cx + y, color);
        if x > 0 {
            fb.fill_scanline(cy + x, cx - y, cx + y, color);
        }

        if d < 0 {
            d += 4 * x + 6;
        } else {
            // y is about to shrink, so rows cy +- y are final.
            if x != y {
                fb.fill_scanline(cy - y, cx - x, cx + x, color);
                fb.fill_scanline(cy + y, cx - x, cx + x, color);
            }
            d += 4 * (x - y) + 10;
            y -= 1;
        }
        x += 1;
    }
}

/// Fill an axis-aligned ellipse with radii `rx`, `ry` centered on `(cx, cy)`.
///
/// A zero radius degenerates to a line; a negative one draws nothing.
pub fn fill_ellipse(fb: &mut FrameBuffer, cx: i32, cy: i32, rx: i32, ry: i32, color: u32) {
    if rx < 0 || ry < 0 {
        return;
    }
    if ry == 0 {
        fb.fill_scanline(cy, cx - rx, cx + rx, color);
        return;
    }
    if rx == 0 {
        for y in cy - ry..=cy + ry {
            fb.set_pixel(cx, y, color);
        }
        return;
    }

    let mut span = |x: i64, y: i64| {
        let (x, y) = (x as i32, y as i32);
        fb.fill_scanline(cy - y, cx - x, cx + x, color);
        if y != 0 {
            fb.fill_scanline(cy + y, cx - x, cx + x, color);
        }
    };

    let (rx2, ry2) = (i64::from(rx) * i64::from(rx), i64::from(ry) * i64::from(ry));
    let (mut x, mut y) = (0i64, i64::from(ry));
    // Gradient terms 2*ry^2*x and 2*rx^2*y.
    let mut dx = 0i64;
    let mut dy = 2 * rx2 * y;

    // Region 1: slope shallower than -1, x steps every iteration. Decision
    // values are scaled by 4 to stay integral.
    let mut d1 = 4 * ry2 - 4 * rx2 * y + rx2;
    while dx < dy {
        if d1 < 0 {
            x += 1;
            dx += 2 * ry2;
            d1 += 4 * (dx + ry2);
        } else {
            span(x, y);
            x += 1;
            y -= 1;
            dx += 2 * ry2;
            dy -= 2 * rx2;
            d1 += 4 * (dx - dy + ry2);
        }
    }

    // Region 2: steeper than -1, y steps every iteration.
    let mut d2 = ry2 * (4 * x * x + 4 * x + 1) + 4 * rx2 * (y - 1) * (y - 1) - 4 * rx2 * ry2;
    while y >= 0 {
        span(x, y);
        if d2 > 0 {
            y -= 1;
            dy -= 2 * rx2;
            d2 += 4 * (rx2 - dy);
        } else {
            x += 1;
            y -= 1;
            dx += 2 * ry2;
            dy -= 2 * rx2;
            d2 += 4 * (dx - dy + rx2);
        }
    }

    // Very flat ellipses can leave region 2 short of the vertices on the
    // horizontal diameter.
    fb.fill_scanline(cy, cx - rx, cx + rx, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: u32 = 40;

    fn draw(f: impl FnOnce(&mut FrameBuffer)) -> Vec<u32> {
        let mut color = vec![0u32; (SIZE * SIZE) as usize];
        let mut depth = vec![0.0f32; (SIZE * SIZE) as usize];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, SIZE, SIZE);
        f(&mut fb);
        color
    }

    fn lit(buf: &[u32], x: i32, y: i32) -> bool {
        buf[(y * SIZE as i32 + x) as usize] != 0
    }

    #[test]
    fn circle_covers_disc_and_extremes() {
        let buf = draw(|fb| fill_circle(fb, 20, 20, 8, 1));
        for (x, y) in [(20, 20), (12, 20), (28, 20), (20, 12), (20, 28)] {
            assert!(lit(&buf, x, y), "({x}, {y})");
        }
        // Nothing outside the bounding square, and the shape is symmetric.
        for y in 0..SIZE as i32 {
            for x in 0..SIZE as i32 {
                if lit(&buf, x, y) {
                    assert!((x - 20).abs() <= 8 && (y - 20).abs() <= 8);
                    assert!(lit(&buf, 40 - x, y) && lit(&buf, x, 40 - y));
                }
            }
        }
        // Corners of the bounding square are outside the disc.
        assert!(!lit(&buf, 12, 12));
    }

    #[test]
    fn circle_degenerate_radii() {
        let single = draw(|fb| fill_circle(fb, 5, 5, 0, 1));
        assert_eq!(single.iter().filter(|&&c| c != 0).count(), 1);
        assert!(lit(&single, 5, 5));

        let none = draw(|fb| fill_circle(fb, 5, 5, -3, 1));
        assert!(none.iter().all(|&c| c == 0));

        let off = draw(|fb| fill_circle(fb, -20, 5, 4, 1));
        assert!(off.iter().all(|&c| c == 0));
    }

    #[test]
    fn ellipse_reaches_its_radii() {
        let buf = draw(|fb| fill_ellipse(fb, 20, 20, 12, 5, 1));
        for (x, y) in [(20, 20), (8, 20), (32, 20), (20, 15), (20, 25)] {
            assert!(lit(&buf, x, y), "({x}, {y})");
        }
        for y in 0..SIZE as i32 {
            for x in 0..SIZE as i32 {
                if lit(&buf, x, y) {
                    let (dx, dy) = ((x - 20) as f32 / 12.0, (y - 20) as f32 / 5.0);
                    assert!(dx * dx + dy * dy <= 1.3, "({x}, {y})");
                    assert!(lit(&buf, 40 - x, y) && lit(&buf, x, 40 - y));
                }
            }
        }
        assert!(!lit(&buf, 8, 15));
    }

    #[test]
    fn ellipse_with_equal_radii_is_close_to_circle() {
        let ellipse = draw(|fb| fill_ellipse(fb, 20, 20, 10, 10, 1));
        let circle = draw(|fb| fill_circle(fb, 20, 20, 10, 1));
        let differ = ellipse
            .iter()
            .zip(&circle)
            .filter(|(a, b)| a != b)
            .count();
        assert!(differ <= 16, "{differ} pixels differ");
    }

    #[test]
    fn flat_ellipse_is_a_line() {
        let buf = draw(|fb| fill_ellipse(fb, 10, 10, 4, 0, 1));
        assert_eq!(buf.iter().filter(|&&c| c != 0).count(), 9);
    }
}
