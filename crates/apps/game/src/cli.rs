//! Command line arguments
//!
//! Flags override the matching config file values.

use std::path::PathBuf;

use clap::Parser;

use crate::config::GameConfig;

pub const DEFAULT_CONFIG_PATH: &str = "crates/apps/game/config.toml";

#[derive(Parser, Debug, Clone)]
#[command(name = "wanderer")]
#[command(about = "Click-to-move 3D character demo", long_about = None)]
pub struct Args {
    /// Config file (TOML)
    #[arg(long, short = 'c', value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Character model (glTF or GLB), overrides `player.model_path`
    #[arg(long, short = 'm', value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Run N frames then exit
    #[arg(long, value_name = "FRAMES")]
    pub frames: Option<u64>,

    /// Log filter when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Window width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    pub height: Option<u32>,
}

impl Args {
    /// Apply overrides on top of a loaded config
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(model) = &self.model {
            config.player.model_path = model.clone();
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        config
    }
}
