//! Screen-edge clipping after the viewport transform.

use crate::math::Vec3;
use crate::triangle::Triangle;

use super::plane::{clip_triangle, Plane};

/// The four screen edges of a `width x height` viewport, clipped in the order
/// top, bottom, left, right.
#[derive(Clone, Debug)]
pub struct ScreenClipper {
    planes: [Plane; 4],
}

impl ScreenClipper {
    pub fn new(width: u32, height: u32) -> Self {
        let right = width.saturating_sub(1) as f32;
        let bottom = height.saturating_sub(1) as f32;
        Self {
            planes: [
                Plane::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)),
                Plane::new(Vec3::new(0.0, bottom, 0.0), Vec3::new(0.0, -1.0, 0.0)),
                Plane::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)),
                Plane::new(Vec3::new(right, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)),
            ],
        }
    }

    /// Clips one screen-space triangle against every edge in turn and appends
    /// the survivors to `out`.
    ///
    /// Each pass takes every triangle produced by the previous pass, so one
    /// input can fan out into several output triangles.
    pub fn clip_into(&self, tri: &Triangle, out: &mut Vec<Triangle>) {
        let mut current = vec![*tri];
        let mut next = Vec::with_capacity(4);
        for plane in &self.planes {
            for t in current.drain(..) {
                next.extend(clip_triangle(plane, &t));
            }
            std::mem::swap(&mut current, &mut next);
            if current.is_empty() {
                return;
            }
        }
        out.append(&mut current);
    }

    pub fn clip_to_screen(&self, tri: &Triangle) -> Vec<Triangle> {
        let mut out = Vec::new();
        self.clip_into(tri, &mut out);
        out
    }
}
