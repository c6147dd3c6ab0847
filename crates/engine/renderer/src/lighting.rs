//! Lighting constants shared by the lit shaders

use glam::Vec3;

/// Directional light direction (normalized)
///
/// Pre-normalized: normalize(0.5, 1.0, 0.3)
pub const LIGHT_DIR: Vec3 = Vec3::new(0.431934, 0.863868, 0.259161);

/// Ambient lighting term (0.0-1.0)
pub const AMBIENT: f32 = 0.45;

/// Diffuse lighting strength multiplier
pub const DIFFUSE_STRENGTH: f32 = 0.55;
