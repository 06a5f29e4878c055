use glam::{Mat4, Vec3};

/// Perspective look-at camera. Produces the matrix handed to [`Renderer::use_program`].
///
/// [`Renderer::use_program`]: crate::Renderer::use_program
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_degrees: 60.0,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// `projection * view`.
    pub fn camera_matrix(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// [`camera_matrix`](Self::camera_matrix) as the column-major array GL expects.
    pub fn to_gl(&self) -> [f32; 16] {
        self.camera_matrix().to_cols_array()
    }
}
