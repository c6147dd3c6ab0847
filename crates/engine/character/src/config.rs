//! Player tuning parameters

use std::path::PathBuf;

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use wanderer_core::transform;

use crate::clips::ClipBindings;

/// Player configuration (`[player]` section of the game config)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Walking speed in units per second
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,

    /// Running speed in units per second
    #[serde(default = "default_run_speed")]
    pub run_speed: f32,

    /// Distance to the destination below which the player stops
    #[serde(default = "default_arrive_threshold")]
    pub arrive_threshold: f32,

    /// Seconds a triggered breakdance lasts
    #[serde(default = "default_breakdance_duration")]
    pub breakdance_duration: f32,

    /// Movement is blocked while the breakdance timer is at or above this
    #[serde(default = "default_breakdance_move_gate")]
    pub breakdance_move_gate: f32,

    /// Facing slerp rate per second
    #[serde(default = "default_turn_rate")]
    pub turn_rate: f32,

    /// Starting position
    #[serde(default)]
    pub spawn: Vec3,

    /// Character model (glTF or GLB)
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Uniform scale applied to the model mesh
    #[serde(default = "default_model_scale")]
    pub model_scale: f32,

    /// Euler angles (radians, XYZ) baked into the model before the player
    /// transform
    #[serde(default = "default_model_rotation")]
    pub model_rotation: [f32; 3],

    #[serde(default)]
    pub clips: ClipBindings,
}

fn default_walk_speed() -> f32 {
    2.5
}

fn default_run_speed() -> f32 {
    7.0
}

fn default_arrive_threshold() -> f32 {
    0.1
}

fn default_breakdance_duration() -> f32 {
    4.8
}

fn default_breakdance_move_gate() -> f32 {
    0.1
}

fn default_turn_rate() -> f32 {
    5.0
}

fn default_model_path() -> PathBuf {
    PathBuf::from("resources/models/mixamo/model1.glb")
}

fn default_model_scale() -> f32 {
    0.02
}

fn default_model_rotation() -> [f32; 3] {
    [96.0, 0.0, 0.0]
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: default_walk_speed(),
            run_speed: default_run_speed(),
            arrive_threshold: default_arrive_threshold(),
            breakdance_duration: default_breakdance_duration(),
            breakdance_move_gate: default_breakdance_move_gate(),
            turn_rate: default_turn_rate(),
            spawn: Vec3::ZERO,
            model_path: default_model_path(),
            model_scale: default_model_scale(),
            model_rotation: default_model_rotation(),
            clips: ClipBindings::default(),
        }
    }
}

impl PlayerConfig {
    pub fn model_rotation_quat(&self) -> Quat {
        let [x, y, z] = self.model_rotation;
        Quat::from_euler(EulerRot::XYZ, x, y, z)
    }

    /// Mesh-space correction: `scale * rotation`
    pub fn model_base_matrix(&self) -> Mat4 {
        transform::scale_matrix(Vec3::splat(self.model_scale))
            * transform::rotation_matrix(self.model_rotation_quat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clips::ClipRef;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PlayerConfig = toml::from_str("").unwrap();
        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.walk_speed, 2.5);
        assert_eq!(config.run_speed, 7.0);
        assert_eq!(config.breakdance_duration, 4.8);
        assert_eq!(config.model_scale, 0.02);
    }

    #[test]
    fn test_partial_override() {
        let config: PlayerConfig = toml::from_str(
            r#"
            run_speed = 9.0
            model_path = "assets/hero.gltf"

            [clips]
            Breakdance = "Dance"
            "#,
        )
        .unwrap();
        assert_eq!(config.run_speed, 9.0);
        assert_eq!(config.walk_speed, 2.5);
        assert_eq!(config.model_path, PathBuf::from("assets/hero.gltf"));
        assert_eq!(config.clips.breakdance, ClipRef::Name("Dance".to_string()));
    }

    #[test]
    fn test_base_matrix_scales_mesh() {
        let config = PlayerConfig {
            model_rotation: [0.0; 3],
            ..Default::default()
        };
        let p = config.model_base_matrix().transform_point3(Vec3::new(100.0, 0.0, 0.0));
        assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }
}
