use firstperson::math_prelude::*;
use firstperson::CameraPose;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Perspective camera over a [`CameraPose`].
#[derive(Debug, Clone)]
pub struct Camera {
    pub pose: CameraPose,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    viewport: Viewport,
}

impl Camera {
    // 75 deg
    pub const DEFAULT_FOV: f32 = 1.308_997;

    pub fn new(pose: CameraPose, viewport: Viewport) -> Self {
        Self {
            pose,
            fov: Self::DEFAULT_FOV,
            near: 0.1,
            far: 1000.0,
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.aspect()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn generate_matrix(&self) -> Mat4 {
        self.generate_projection_matrix() * self.generate_view_matrix()
    }

    pub fn generate_projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect(), self.near, self.far)
    }

    pub fn generate_view_matrix(&self) -> Mat4 {
        self.pose.view_matrix()
    }

    /// Pixel position of `point` under `matrix` (see [`Camera::generate_matrix`]),
    /// `None` when it is behind the near plane.
    pub fn project_with(&self, matrix: &Mat4, point: Vec3) -> Option<Vec2> {
        let clip = *matrix * Vec4::new(point.x, point.y, point.z, 1.0);
        if clip.w < self.near {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        let x = (ndc.x + 1.0) / 2.0 * self.viewport.width as f32;
        let y = (1.0 - ndc.y) / 2.0 * self.viewport.height as f32;
        Some(Vec2::new(x, y))
    }
}
