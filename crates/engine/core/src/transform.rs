//! Transform composition
//!
//! A [`Transform3D`] composes into `T * R * S`: a point is scaled first, then
//! rotated, then translated (column vectors, rightmost applied first).

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Translation matrix for `position`
pub fn translation_matrix(position: Vec3) -> Mat4 {
    Mat4::from_translation(position)
}

/// Rotation matrix for a unit quaternion
pub fn rotation_matrix(rotation: Quat) -> Mat4 {
    Mat4::from_quat(rotation)
}

/// Diagonal scale matrix
pub fn scale_matrix(scale: Vec3) -> Mat4 {
    Mat4::from_scale(scale)
}

/// Compose `translate(position) * rotate(rotation) * scale(scale)`
///
/// Pure; non-finite inputs propagate into the result.
pub fn to_matrix(position: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    translation_matrix(position) * rotation_matrix(rotation) * scale_matrix(scale)
}

/// Position, rotation and scale of an object in world space
///
/// The rotation is kept normalized by every constructor and setter.
///
/// # Examples
///
/// ```
/// use wanderer_core::Transform3D;
/// use glam::{Quat, Vec3};
///
/// let t = Transform3D::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, Vec3::ONE);
/// assert_eq!(t.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3D {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
            scale,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
    }

    /// World matrix for this transform
    pub fn to_matrix(&self) -> Mat4 {
        to_matrix(self.position, self.rotation, self.scale)
    }

    /// Apply the full transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.to_matrix().transform_point3(point)
    }
}
