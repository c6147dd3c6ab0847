//! Wanderer demo application
//!
//! A player character walks (or runs) to wherever the ground is clicked,
//! breakdances on request and is followed by a third-person camera.
//!
//! - [`config`]: TOML configuration
//! - [`cli`]: command line overrides
//! - [`game`]: window-independent per-frame logic
//! - [`app`]: winit/glutin event loop and drawing

pub mod app;
pub mod cli;
pub mod config;
pub mod game;
pub mod hud;
pub mod input_map;

pub use app::WandererApp;
pub use config::{load_config, ConfigError, GameConfig};
pub use game::Game;
