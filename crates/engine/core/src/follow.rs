//! Third-person follow camera
//!
//! Keeps the camera at `target + offset`. Scrolling subtracts the wheel delta
//! from every offset axis at once, so zoom slides the camera along the
//! diagonal (1,1,1) rather than along the view direction. The offset is not
//! clamped and may pass through zero.

use glam::Vec3;

use crate::camera::Camera;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera {
    camera: Camera,
    offset: Vec3,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl FollowCamera {
    /// Start following with the offset implied by the camera's pose
    pub fn new(camera: Camera) -> Self {
        Self {
            offset: camera.position - camera.target,
            camera,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Apply one frame's scroll and re-centre on `target`
    pub fn update(&mut self, target: Vec3, scroll_delta: f32) {
        self.offset -= Vec3::splat(scroll_delta);
        self.camera.position = target + self.offset;
        self.camera.target = target;
    }
}
