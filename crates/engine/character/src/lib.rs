//! Player character controller
//!
//! Click-to-move locomotion driving a four state animation machine
//! (Idle, Walk, Run, Breakdance) over an [`AnimatedModel`].
//!
//! # Modules
//!
//! - [`state`]: Animation states and transition selection
//! - [`clips`]: Mapping from states to model clips
//! - [`locomotion`]: Movement direction and facing helpers
//! - [`config`]: Tunable player parameters
//! - [`player`]: The per-frame controller
//!
//! [`AnimatedModel`]: wanderer_assets::AnimatedModel

pub mod clips;
pub mod config;
pub mod error;
pub mod locomotion;
pub mod player;
pub mod state;

pub use clips::{ClipBindings, ClipRef, ResolvedClips};
pub use config::PlayerConfig;
pub use error::{CharacterError, Result};
pub use player::Player;
pub use state::{select_state, AnimState};
