//! 4x4 transformation matrix using the row-vector convention.
//!
//! # Convention
//! - Vectors are **row vectors** on the left: `Vec4 * Mat4`
//! - Translation is stored in the **last row**
//! - Transforms chain **left-to-right**: `v * A * B` applies A first, then B
//!
//! Every matrix in the pipeline (world, view, projection) is built for this
//! convention. Mixing in a column-vector matrix silently transposes the
//! rotation and moves the translation into the perspective row.
//!
//! # Example
//! ```ignore
//! let world = Mat4::rotation_y(angle) * Mat4::translation(0.0, 0.0, 5.0);
//! let moved = Vec4::point(1.0, 0.0, 0.0) * world; // rotated, then pushed back
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored row-major as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix. Translation lives in the last row.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis (radians).
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis (radians).
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis (radians).
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a left-handed perspective projection.
    ///
    /// `aspect_ratio` is width / height. After `v * P` the result's `w` holds
    /// the view-space `z`, so the perspective divide maps `z = near` to depth 0
    /// and `z = far` to depth 1.
    ///
    /// Requires `0 < near < far`; use [`Projection`](crate::projection::Projection)
    /// to get that checked instead of dividing by `far - near = 0`.
    pub fn projection(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        debug_assert!(0.0 < near && near < far, "projection needs 0 < near < far");
        let f = 1.0 / (fov_degrees.to_radians() * 0.5).tan();
        let q = far / (far - near);
        Mat4::new([
            [f / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, q, 1.0],
            [0.0, 0.0, -near * q, 0.0],
        ])
    }

    /// Builds the camera-to-world matrix for a camera at `pos` looking at
    /// `target`. `up` is re-orthogonalised against the forward direction.
    ///
    /// `target` must differ from `pos`.
    pub fn point_at(pos: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - pos).normalize();
        let new_up = (up - forward * up.dot(forward)).normalize();
        let right = new_up.cross(forward);

        Mat4::new([
            [right.x, right.y, right.z, 0.0],
            [new_up.x, new_up.y, new_up.z, 0.0],
            [forward.x, forward.y, forward.z, 0.0],
            [pos.x, pos.y, pos.z, 1.0],
        ])
    }

    /// Inverts a rotation + translation matrix by transposing the rotation
    /// block and rotating the negated translation.
    ///
    /// Only valid for matrices without scale or shear, such as the output of
    /// [`Mat4::point_at`]. Anything else gives a wrong result, not an error.
    pub fn quick_inverse(&self) -> Self {
        let m = &self.data;
        let mut r = [[0.0f32; 4]; 4];
        for row in 0..3 {
            for col in 0..3 {
                r[row][col] = m[col][row];
            }
        }
        for col in 0..3 {
            r[3][col] = -(m[3][0] * r[0][col] + m[3][1] * r[1][col] + m[3][2] * r[2][col]);
        }
        r[3][3] = 1.0;
        Mat4::new(r)
    }

    pub fn transpose(&self) -> Self {
        let mut r = [[0.0f32; 4]; 4];
        for (row, values) in r.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4::new(r)
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: `A * B` applies A first, then B.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a homogeneous point: `Vec4 * Mat4` (row vector).
///
/// No perspective divide is applied; `w` is returned as computed.
impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    fn mul(self, m: Mat4) -> Self::Output {
        let d = &m.data;
        Vec4::new(
            self.x * d[0][0] + self.y * d[1][0] + self.z * d[2][0] + self.w * d[3][0],
            self.x * d[0][1] + self.y * d[1][1] + self.z * d[2][1] + self.w * d[3][1],
            self.x * d[0][2] + self.y * d[1][2] + self.z * d[2][2] + self.w * d[3][2],
            self.x * d[0][3] + self.y * d[1][3] + self.z * d[2][3] + self.w * d[3][3],
        )
    }
}
