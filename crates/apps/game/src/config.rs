//! Game configuration loaded from `config.toml`
//!
//! Every section and field is optional; anything left out keeps the value
//! the demo ships with.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wanderer_character::PlayerConfig;
use wanderer_core::{Camera, Projection};
use wanderer_devices::ActionBindings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub ground: GroundConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub controls: ActionBindings,
    #[serde(default)]
    pub debug: DebugDrawConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// MSAA samples; 0 disables multisampling
    pub msaa_samples: u8,
    /// Frame rate cap; 0 means uncapped (vsync only)
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "3D Engine".to_string(),
            width: 1080,
            height: 780,
            msaa_samples: 4,
            target_fps: 60,
        }
    }
}

/// Initial camera pose; the follow offset is `position - target`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovy: f32,
    pub projection: Projection,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            position: camera.position,
            target: camera.target,
            up: camera.up,
            fovy: camera.fovy,
            projection: camera.projection,
        }
    }
}

impl CameraConfig {
    pub fn to_camera(&self) -> Camera {
        Camera {
            position: self.position,
            target: self.target,
            up: self.up,
            fovy: self.fovy,
            projection: self.projection,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    /// Plane width and length in world units
    pub size: [f32; 2],
    /// Subdivisions along X and Z
    pub resolution: [u32; 2],
    /// Height the plane is drawn at
    pub y: f32,
    /// Checker cells per side
    pub tiles: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            vertex_shader: PathBuf::from("resources/checkerboard.vs"),
            fragment_shader: PathBuf::from("resources/checkerboard.fs"),
            size: [40.0, 40.0],
            resolution: [10, 10],
            y: -0.01,
            tiles: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub slices: u32,
    pub spacing: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            slices: 40,
            spacing: 1.0,
        }
    }
}

/// Path line and destination marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugDrawConfig {
    /// Height added to both ends of the path line
    pub path_lift: f32,
    pub marker_radius: f32,
}

impl Default for DebugDrawConfig {
    fn default() -> Self {
        Self {
            path_lift: 0.5,
            marker_radius: 0.2,
        }
    }
}

/// Parse a config from TOML text
pub fn parse_config(text: &str, path: &Path) -> Result<GameConfig, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config at `path`
///
/// A missing file is not an error: defaults are used and a warning logged.
/// An unreadable or malformed file is.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Config {} not found, using defaults", path.display());
            return Ok(GameConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let config = parse_config(&text, path)?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wanderer_character::{AnimState, ClipRef};
    use wanderer_devices::{Action, Binding, Key};

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.window.width, 1080);
        assert_eq!(config.window.height, 780);
        assert_eq!(config.window.title, "3D Engine");
        assert_eq!(config.player.walk_speed, 2.5);
        assert_eq!(config.ground.size, [40.0, 40.0]);
        assert_eq!(config.grid.slices, 40);
    }

    #[test]
    fn test_default_camera_offset() {
        let camera = CameraConfig::default().to_camera();
        assert_eq!(camera.position - camera.target, Vec3::new(10.0, 13.0, 8.0));
    }

    #[test]
    fn test_partial_sections() {
        let text = r#"
            [window]
            width = 640

            [player]
            run_speed = 9.0

            [player.clips]
            idle = "Idle"
            walk = 4

            [controls]
            breakdance = ["Enter", "Space"]
        "#;
        let config = parse_config(text, Path::new("partial.toml")).unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 780);
        assert_eq!(config.player.run_speed, 9.0);
        assert_eq!(config.player.walk_speed, 2.5);
        assert_eq!(
            config.player.clips.get(AnimState::Idle),
            &ClipRef::Name("Idle".to_string())
        );
        assert_eq!(config.player.clips.get(AnimState::Walk), &ClipRef::Index(4));
        assert_eq!(config.player.clips.get(AnimState::Run), &ClipRef::Index(2));
        assert_eq!(
            config.controls.get(Action::Breakdance),
            &[Binding::Key(Key::Enter), Binding::Key(Key::Space)]
        );
    }

    #[test]
    fn test_camera_section() {
        let text = r#"
            [camera]
            position = [0.0, 10.0, 10.0]
            target = [0.0, 0.0, 0.0]
            fovy = 60.0
        "#;
        let config = parse_config(text, Path::new("camera.toml")).unwrap();
        let camera = config.camera.to_camera();
        assert_eq!(camera.position, Vec3::new(0.0, 10.0, 10.0));
        assert_eq!(camera.up, Vec3::Y);
        assert_eq!(camera.fovy, 60.0);
    }

    #[test]
    fn test_malformed_config_is_error() {
        let err = parse_config("[window]\nwidth = \"wide\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_key_binding_is_error() {
        let err = parse_config("[controls]\nsprint = [\"Hyper\"]", Path::new("bad.toml"));
        assert!(err.is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\nslices = 10\nspacing = 2.0").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.grid, GridConfig { slices: 10, spacing: 2.0 });
    }
}
