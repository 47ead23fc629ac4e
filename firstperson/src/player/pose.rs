use std::f32::consts::FRAC_PI_2;

use crate::math_prelude::*;

/// Camera position plus yaw/pitch orientation.
///
/// Yaw is applied before pitch so the camera never rolls. Yaw 0 looks down
/// -Z, positive yaw turns left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl CameraPose {
    pub const MIN_PITCH: f32 = -FRAC_PI_2;
    pub const MAX_PITCH: f32 = FRAC_PI_2;

    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_orientation(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(Self::MIN_PITCH, Self::MAX_PITCH),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Applies a mouse delta. Moving right turns right, moving down looks down.
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw -= dx * sensitivity;
        self.pitch = (self.pitch - dy * sensitivity).clamp(Self::MIN_PITCH, Self::MAX_PITCH);
    }

    /// Turns the camera towards `point`. Does nothing if the point is the
    /// camera position.
    pub fn look_at(&mut self, point: Vec3) {
        let dir = point - self.position;
        let len = dir.length();
        if len <= f32::EPSILON {
            return;
        }
        self.yaw = (-dir.x).atan2(-dir.z);
        self.pitch = (dir.y / len)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(Self::MIN_PITCH, Self::MAX_PITCH);
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Unit view direction.
    pub fn facing(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    /// Facing projected onto the ground plane and renormalized.
    pub fn horizontal_forward(&self) -> Vec3 {
        let facing = self.facing();
        let flat = Vec3::new(facing.x, 0.0, facing.z);
        if flat.length_squared() > 1e-8 {
            flat.normalize()
        } else {
            // looking straight up or down, the heading is all that is left
            Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }
}
