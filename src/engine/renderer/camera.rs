// Screen-space camera: maps window pixels to clip space

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec4};

/// Orthographic camera covering the window, origin top-left, y down
#[derive(Debug, Clone)]
pub struct Camera {
    viewport_width: f32,
    viewport_height: f32,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    fn update_view_proj(&mut self) {
        // Bottom and top swapped so pixel y grows downward
        self.view_proj = Mat4::orthographic_rh(
            0.0,
            self.viewport_width.max(1.0),
            self.viewport_height.max(1.0),
            0.0,
            -1.0,
            1.0,
        );
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_view_proj();
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Convert a window pixel position to normalized device coordinates
    pub fn screen_to_ndc(&self, screen_pos: Vec2) -> Vec2 {
        let clip = self.view_proj * Vec4::new(screen_pos.x, screen_pos.y, 0.0, 1.0);
        Vec2::new(clip.x, clip.y)
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_corners_map_to_clip_space() {
        let camera = Camera::new(800.0, 600.0);

        let top_left = camera.screen_to_ndc(Vec2::ZERO);
        assert_relative_eq!(top_left.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(top_left.y, 1.0, epsilon = 1e-5);

        let bottom_right = camera.screen_to_ndc(Vec2::new(800.0, 600.0));
        assert_relative_eq!(bottom_right.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(bottom_right.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_resize_moves_centre() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.resize(400.0, 200.0);
        assert_eq!(camera.viewport(), Vec2::new(400.0, 200.0));

        let centre = camera.screen_to_ndc(Vec2::new(200.0, 100.0));
        assert_relative_eq!(centre.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(centre.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_size_does_not_produce_nan() {
        let camera = Camera::new(0.0, 0.0);
        assert!(camera.view_proj_matrix().is_finite());
    }
}
