use crate::math::{Mat4, Vec3, Vec4};

/// Texture coordinate carried by each triangle corner.
///
/// Until projection `w` is 1 and `u, v` are plain texture coordinates. After
/// the perspective divide the pipeline stores `u/z, v/z, 1/z` so the
/// rasterizer can interpolate linearly in screen space and divide back per
/// pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexCoord {
    pub u: f32,
    pub v: f32,
    pub w: f32,
}

impl Default for TexCoord {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl TexCoord {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v, w: 1.0 }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            u: self.u + (other.u - self.u) * t,
            v: self.v + (other.v - self.v) * t,
            w: self.w + (other.w - self.w) * t,
        }
    }
}

// A triangle as it moves through the pipeline: three homogeneous points,
// their texture coordinates and one flat color for the whole face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec4; 3],
    pub tex: [TexCoord; 3],
    pub color: u32,
}

impl Default for Triangle {
    fn default() -> Self {
        Self {
            points: [Vec4::default(); 3],
            tex: [TexCoord::default(); 3],
            color: crate::colors::FILL,
        }
    }
}

impl Triangle {
    pub fn new(points: [Vec4; 3], tex: [TexCoord; 3], color: u32) -> Self {
        Self { points, tex, color }
    }

    /// A triangle without meaningful texture coordinates.
    pub fn from_points(points: [Vec4; 3], color: u32) -> Self {
        Self {
            points,
            tex: [TexCoord::default(); 3],
            color,
        }
    }

    /// Returns a copy with every point multiplied by `m`. Texture coordinates
    /// and color are carried over untouched.
    pub fn transformed(&self, m: &Mat4) -> Self {
        Self {
            points: self.points.map(|p| p * *m),
            ..*self
        }
    }

    /// Unnormalized face normal `(p1 - p0) x (p2 - p0)`.
    pub fn normal(&self) -> Vec3 {
        let line1 = self.points[1] - self.points[0];
        let line2 = self.points[2] - self.points[0];
        line1.cross(line2)
    }

    /// Signed area of the x/y projection. Positive for counter-clockwise
    /// order in a y-up frame, which is clockwise on a y-down screen.
    pub fn signed_area_2d(&self) -> f32 {
        let [a, b, c] = self.points;
        0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
    }
}
