//! The config file shipped with the game must match the built-in defaults

use std::path::{Path, PathBuf};

use wanderer_game::{load_config, GameConfig};

fn manifest_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

fn repo_root() -> PathBuf {
    manifest_dir().join("../../..")
}

#[test]
fn test_shipped_config_matches_defaults() {
    let config = load_config(&manifest_dir().join("config.toml")).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_ground_shaders_exist() {
    let config = GameConfig::default();
    assert!(repo_root().join(&config.ground.vertex_shader).is_file());
    assert!(repo_root().join(&config.ground.fragment_shader).is_file());
}
