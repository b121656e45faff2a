use glam::{Mat4, Vec2, Vec3};

/// Camera distance from the tile plane
const CAMERA_Z: f32 = 1.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;

/// Ray in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Orthographic camera looking down -z at the origin. One world unit is one
/// logical pixel and the viewport centre is the world origin.
pub struct Camera {
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    pub fn has_area(&self) -> bool {
        self.viewport_width > 0.0 && self.viewport_height > 0.0
    }

    /// Screen point (top-left origin, y down) to normalized device coordinates.
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x / self.viewport_width) * 2.0 - 1.0,
            -(screen.y / self.viewport_height) * 2.0 + 1.0,
        )
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let half_width = self.viewport_width / 2.0;
        let half_height = self.viewport_height / 2.0;

        Mat4::orthographic_rh_gl(
            -half_width,
            half_width,
            -half_height,
            half_height,
            CAMERA_NEAR,
            CAMERA_FAR,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_Z), Vec3::ZERO, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray from the near plane through `ndc` toward the far plane.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));

        Ray {
            origin: near,
            direction: (far - near).normalize_or_zero(),
        }
    }
}
