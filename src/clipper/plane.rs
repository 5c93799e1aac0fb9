//! Single-plane triangle clipping.
//!
//! A triangle is classified against a half-space by the signed distance of
//! its corners (`d >= 0` is inside) and re-triangulated into zero, one or two
//! triangles. New corners are placed on the plane and their texture
//! coordinates are interpolated with the same parameter as the position.
//!
//! Outputs keep the winding of the input, so the signed areas of the pieces
//! add up to the signed area of the part of the input on the inside.

use smallvec::SmallVec;

use crate::math::{Vec3, Vec4};
use crate::triangle::{TexCoord, Triangle};

/// Denominators smaller than this are treated as a segment parallel to the
/// plane.
pub const PARALLEL_EPSILON: f32 = 1e-9;

/// Result of clipping a triangle against one plane. Never more than two.
pub type ClipOutput = SmallVec<[Triangle; 2]>;

/// A half-space boundary. Points with a non-negative signed distance are
/// inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    /// The normal is normalized here; it must not be the zero vector.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// View-space near plane at `z = near`, keeping everything in front.
    pub fn near(near: f32) -> Self {
        Self::new(Vec3::new(0.0, 0.0, near), Vec3::FORWARD)
    }

    #[inline]
    pub fn signed_distance(&self, p: Vec4) -> f32 {
        p.dot3(self.normal) - self.normal.dot(self.point)
    }

    /// Intersects the segment `start -> end` with the plane.
    ///
    /// Returns the intersection point and its parameter `t` along the
    /// segment, or `None` when the segment is parallel to the plane. `t` is
    /// not restricted to `[0, 1]`; the line is intersected, not the segment.
    pub fn intersect_segment(&self, start: Vec4, end: Vec4) -> Option<(Vec4, f32)> {
        let (ds, de) = (self.signed_distance(start), self.signed_distance(end));
        if (ds - de).abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = crossing_param(ds, de)?;
        Some((start.lerp(end, t), t))
    }
}

/// Parameter along a segment whose ends sit at signed distances `ds` and
/// `de` where it meets the plane, or `None` if it is not finite.
#[inline]
fn crossing_param(ds: f32, de: f32) -> Option<f32> {
    let t = ds / (ds - de);
    t.is_finite().then_some(t)
}

/// Clip `tri` against `plane`.
///
/// - no corner inside: nothing
/// - all corners inside: `tri` itself
/// - one inside: one smaller triangle
/// - two inside: the remaining quad split into two triangles
///
/// A triangle whose crossing cannot be computed (non-finite distances) is
/// dropped.
pub fn clip_triangle(plane: &Plane, tri: &Triangle) -> ClipOutput {
    let mut out = ClipOutput::new();
    let d = tri.points.map(|p| plane.signed_distance(p));
    let inside = d.map(|d| d >= 0.0);

    match inside.iter().filter(|&&i| i).count() {
        3 => out.push(*tri),
        1 => {
            let Some(i) = inside.iter().position(|&i| i) else {
                return out;
            };
            let (j, k) = ((i + 1) % 3, (i + 2) % 3);
            if let (Some(a), Some(b)) = (crossing(tri, &d, i, j), crossing(tri, &d, i, k)) {
                out.push(Triangle {
                    points: [tri.points[i], a.0, b.0],
                    tex: [tri.tex[i], a.1, b.1],
                    color: tri.color,
                });
            }
        }
        2 => {
            let Some(o) = inside.iter().position(|&i| !i) else {
                return out;
            };
            let (a, b) = ((o + 1) % 3, (o + 2) % 3);
            if let (Some(xa), Some(xb)) = (crossing(tri, &d, a, o), crossing(tri, &d, b, o)) {
                out.push(Triangle {
                    points: [tri.points[a], tri.points[b], xb.0],
                    tex: [tri.tex[a], tri.tex[b], xb.1],
                    color: tri.color,
                });
                out.push(Triangle {
                    points: [tri.points[a], xb.0, xa.0],
                    tex: [tri.tex[a], xb.1, xa.1],
                    color: tri.color,
                });
            }
        }
        _ => {}
    }

    out
}

/// Point where the edge from inside corner `from` to outside corner `to`
/// meets the plane, with its interpolated texture coordinate.
///
/// Uses the same parameter as [`Plane::intersect_segment`] but without the
/// parallel cutoff: `d[from] >= 0 > d[to]`, so the edge always straddles the
/// plane and a corner lying on it still yields a crossing.
fn crossing(tri: &Triangle, d: &[f32; 3], from: usize, to: usize) -> Option<(Vec4, TexCoord)> {
    let Some(t) = crossing_param(d[from], d[to]) else {
        tracing::trace!(from = d[from], to = d[to], "dropping triangle with undefined crossing");
        return None;
    };
    Some((
        tri.points[from].lerp(tri.points[to], t),
        tri.tex[from].lerp(tri.tex[to], t),
    ))
}
