//! First-person camera
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles. The look direction is derived
//! from them on demand, and the view matrix is the fast inverse of the
//! "point at" matrix built from position and look direction.
//!
//! - **Yaw**: Rotation around Y-axis (horizontal look, positive = look right)
//! - **Pitch**: Rotation around X-axis (vertical look, positive = look up)

use crate::math::{Mat4, Vec3, Vec4};

/// First-person camera with position and yaw/pitch orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,   // Rotation around Y-axis (radians)
    pitch: f32, // Rotation around X-axis (radians)

    pitch_limit: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Creates a new camera at the given position, looking along +Z axis.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            pitch_limit: 89.0_f32.to_radians(),
        }
    }

    /// Creates a camera at `position` looking toward `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self::new(position);
        camera.look_at(target);
        camera
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// Rotates the camera horizontally (around Y-axis).
    /// Positive values rotate right, negative values rotate left.
    pub fn rotate_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(std::f32::consts::TAU);
    }

    /// Rotates the camera vertically. Clamped short of straight up or down,
    /// where the look direction would be parallel to the up vector.
    pub fn rotate_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Points the camera at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        let horizontal_len = (direction.x * direction.x + direction.z * direction.z).sqrt();

        if horizontal_len > f32::EPSILON {
            self.yaw = direction.x.atan2(direction.z);
        }
        if direction.magnitude() > f32::EPSILON {
            self.pitch = direction
                .y
                .atan2(horizontal_len)
                .clamp(-self.pitch_limit, self.pitch_limit);
        }
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves the camera along its look direction.
    pub fn move_forward(&mut self, distance: f32) {
        self.position = self.position + self.look_dir() * distance;
    }

    /// Moves the camera sideways, parallel to the ground.
    pub fn move_right(&mut self, distance: f32) {
        self.position = self.position + self.right() * distance;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit vector the camera looks along: +Z pitched, then yawed.
    pub fn look_dir(&self) -> Vec3 {
        let forward = Vec4::new(0.0, 0.0, 1.0, 0.0);
        (forward * Mat4::rotation_x(-self.pitch) * Mat4::rotation_y(-self.yaw)).xyz()
    }

    /// Horizontal right vector.
    pub fn right(&self) -> Vec3 {
        Vec3::UP.cross(self.look_dir()).normalize()
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// World to view transform: the inverse of the camera's own placement.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::point_at(self.position, self.position + self.look_dir(), Vec3::UP).quick_inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn camera_starts_looking_forward() {
        let camera = Camera::new(Vec3::ZERO);
        assert_relative_eq!(camera.look_dir(), Vec3::FORWARD, epsilon = 1e-6);
        assert_relative_eq!(camera.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn yaw_rotates_horizontally() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.rotate_yaw(FRAC_PI_2); // 90 degrees right
        assert_relative_eq!(camera.look_dir(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.rotate_pitch(std::f32::consts::PI);
        assert!(camera.pitch() < FRAC_PI_2);
        assert!(camera.look_dir().y > 0.99);
    }

    #[test]
    fn move_forward_changes_position() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.move_forward(5.0);
        assert_relative_eq!(camera.position().z, 5.0, epsilon = 1e-5);
        camera.move_right(2.0);
        assert_relative_eq!(camera.position().x, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn view_matrix_puts_target_on_the_z_axis() {
        let camera = Camera::looking_at(Vec3::new(3.0, 1.0, -4.0), Vec3::new(0.0, 1.0, 0.0));
        let target = Vec4::point(0.0, 1.0, 0.0) * camera.view_matrix();
        assert_relative_eq!(target, Vec4::point(0.0, 0.0, 5.0), epsilon = 1e-4);
    }

    #[test]
    fn default_view_is_translation() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        let p = Vec4::point(1.0, 2.0, 10.0) * camera.view_matrix();
        assert_relative_eq!(p, Vec4::point(0.0, 0.0, 7.0), epsilon = 1e-5);
    }
}
