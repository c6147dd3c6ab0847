//! 3D camera defined by an eye position, a look-at target and an up vector
//!
//! # Coordinate System
//!
//! Right-handed, OpenGL clip space:
//! - +X is right
//! - +Y is up
//! - the camera looks from `position` towards `target`

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::ray::Ray;

/// Near clipping plane distance
pub const NEAR_PLANE: f32 = 0.01;
/// Far clipping plane distance
pub const FAR_PLANE: f32 = 1000.0;

/// Default vertical field of view in degrees
pub const DEFAULT_FOVY: f32 = 45.0;

// ============================================================================
// Projection
// ============================================================================

/// Camera projection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Perspective,
    /// `fovy` is the height of the view volume in world units
    Orthographic,
}

// ============================================================================
// Camera
// ============================================================================

/// Look-at camera
///
/// # Examples
///
/// ```
/// use wanderer_core::Camera;
/// use glam::{Vec2, Vec3};
///
/// let camera = Camera::default();
/// let viewport = Vec2::new(1080.0, 780.0);
/// let ray = camera.screen_ray(viewport * 0.5, viewport);
/// let forward = (camera.target - camera.position).normalize();
/// assert!(ray.direction.dot(forward) > 0.999);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovy: f32,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(10.0, 15.0, 10.0),
            target: Vec3::new(0.0, 2.0, 2.0),
            up: Vec3::Y,
            fovy: DEFAULT_FOVY,
            projection: Projection::Perspective,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    /// Normalized view direction
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective => {
                Mat4::perspective_rh_gl(self.fovy.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
            }
            Projection::Orthographic => {
                let half_h = self.fovy * 0.5;
                let half_w = half_h * aspect;
                Mat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, NEAR_PLANE, FAR_PLANE)
            }
        }
    }

    /// Combined projection * view for a viewport size in pixels
    pub fn view_projection(&self, viewport: Vec2) -> Mat4 {
        let aspect = if viewport.y > 0.0 {
            viewport.x / viewport.y
        } else {
            1.0
        };
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World-space ray through a window pixel (origin top-left)
    ///
    /// A zero-sized viewport yields the view direction ray.
    pub fn screen_ray(&self, pointer: Vec2, viewport: Vec2) -> Ray {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return Ray::new(self.position, self.forward());
        }

        let ndc_x = 2.0 * pointer.x / viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * pointer.y / viewport.y;
        let aspect = viewport.x / viewport.y;

        let (forward, right, up) = self.basis();
        match self.projection {
            Projection::Perspective => {
                let half_h = (self.fovy.to_radians() * 0.5).tan();
                let half_w = half_h * aspect;
                let direction = forward + right * (ndc_x * half_w) + up * (ndc_y * half_h);
                Ray::new(self.position, direction)
            }
            Projection::Orthographic => {
                let half_h = self.fovy * 0.5;
                let half_w = half_h * aspect;
                let origin = self.position + right * (ndc_x * half_w) + up * (ndc_y * half_h);
                Ray::new(origin, forward)
            }
        }
    }

    /// Orthonormal forward/right/up, matching [`Camera::view_matrix`]
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.forward();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (forward, right, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1080.0, 780.0);

    #[test]
    fn test_default_camera() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(10.0, 15.0, 10.0));
        assert_eq!(camera.target, Vec3::new(0.0, 2.0, 2.0));
        assert_eq!(camera.up, Vec3::Y);
        assert_eq!(camera.fovy, 45.0);
        assert_eq!(camera.projection, Projection::Perspective);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::default();
        let ray = camera.screen_ray(VIEWPORT * 0.5, VIEWPORT);
        assert!((ray.origin - camera.position).length() < 1e-4);
        assert!(ray.direction.dot(camera.forward()) > 0.9999);
    }

    #[test]
    fn test_left_edge_ray_turns_left() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let ray = camera.screen_ray(Vec2::new(0.0, VIEWPORT.y * 0.5), VIEWPORT);
        assert!(ray.direction.x < 0.0);
        assert!(ray.direction.z < 0.0);
    }

    #[test]
    fn test_top_edge_ray_turns_up() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let ray = camera.screen_ray(Vec2::new(VIEWPORT.x * 0.5, 0.0), VIEWPORT);
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn test_ray_projects_back_to_pointer() {
        let camera = Camera::default();
        let pointer = Vec2::new(200.0, 600.0);
        let ray = camera.screen_ray(pointer, VIEWPORT);
        let clip = camera.view_projection(VIEWPORT) * ray.at(5.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        let px = (ndc.x + 1.0) * 0.5 * VIEWPORT.x;
        let py = (1.0 - ndc.y) * 0.5 * VIEWPORT.y;
        assert!((px - pointer.x).abs() < 0.05);
        assert!((py - pointer.y).abs() < 0.05);
    }

    #[test]
    fn test_zero_viewport_falls_back_to_forward() {
        let camera = Camera::default();
        let ray = camera.screen_ray(Vec2::new(5.0, 5.0), Vec2::ZERO);
        assert_eq!(ray.origin, camera.position);
        assert!((ray.direction - camera.forward()).length() < 1e-6);
    }

    #[test]
    fn test_orthographic_rays_are_parallel() {
        let camera = Camera {
            projection: Projection::Orthographic,
            fovy: 10.0,
            ..Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
        };
        let a = camera.screen_ray(Vec2::new(100.0, 100.0), VIEWPORT);
        let b = camera.screen_ray(Vec2::new(900.0, 600.0), VIEWPORT);
        assert!(a.direction.dot(b.direction) > 0.9999);
        assert!((a.origin - b.origin).length() > 1.0);
    }
}
