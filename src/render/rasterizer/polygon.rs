//! Point-in-polygon fill for small 2D outline models.
//!
//! Every pixel in the bounding box is tested by summing the signed angles the
//! polygon's edges subtend at that pixel. The sum is about `±2π` inside and
//! about `0` outside, regardless of the polygon's winding or convexity. This
//! costs `O(width * height * vertices)`, fine for sprites and ship outlines,
//! not for anything large.

use std::f32::consts::PI;

use crate::math::Vec2;
use crate::render::framebuffer::FrameBuffer;

/// Sum of the signed angles between consecutive vertices as seen from `p`.
pub fn winding_angle_sum(p: Vec2, polygon: &[Vec2]) -> f32 {
    let n = polygon.len();
    (0..n)
        .map(|i| {
            let a = polygon[i] - p;
            let b = polygon[(i + 1) % n] - p;
            let cross = a.x * b.y - a.y * b.x;
            let dot = a.x * b.x + a.y * b.y;
            cross.atan2(dot)
        })
        .sum()
}

/// Whether `p` lies inside `polygon`. Needs at least three vertices.
pub fn contains_point(p: Vec2, polygon: &[Vec2]) -> bool {
    polygon.len() >= 3 && winding_angle_sum(p, polygon).abs() > PI
}

/// Fill every pixel whose integer coordinate lies inside `polygon`.
pub fn fill_polygon(fb: &mut FrameBuffer, polygon: &[Vec2], color: u32) {
    if polygon.len() < 3 {
        return;
    }
    let (mut min, mut max) = (polygon[0], polygon[0]);
    for p in polygon {
        min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
        max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
    }

    let x0 = (min.x.floor() as i32).max(0);
    let y0 = (min.y.floor() as i32).max(0);
    let x1 = (max.x.ceil() as i32).min(fb.width() as i32 - 1);
    let y1 = (max.y.ceil() as i32).min(fb.height() as i32 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            if contains_point(Vec2::new(x as f32, y as f32), polygon) {
                fb.set_pixel(x, y, color);
            }
        }
    }
}

/// A closed outline in model space, drawn at a position, rotation and scale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WireframeModel {
    pub points: Vec<Vec2>,
}

impl WireframeModel {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Model points rotated by `rotation` (radians), scaled by `scale` and
    /// moved to `position`, in that order.
    pub fn transformed(&self, position: Vec2, rotation: f32, scale: f32) -> Vec<Vec2> {
        self.points
            .iter()
            .map(|&p| p.rotate(rotation) * scale + position)
            .collect()
    }

    /// Draw the closed outline with Bresenham lines.
    pub fn draw(&self, fb: &mut FrameBuffer, position: Vec2, rotation: f32, scale: f32, color: u32) {
        let points = self.transformed(position, rotation, scale);
        let n = points.len();
        for i in 0..n {
            let (a, b) = (points[i], points[(i + 1) % n]);
            fb.draw_line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, color);
        }
    }

    /// Fill the outline's interior.
    pub fn fill(&self, fb: &mut FrameBuffer, position: Vec2, rotation: f32, scale: f32, color: u32) {
        fill_polygon(fb, &self.transformed(position, rotation, scale), color);
    }
}
