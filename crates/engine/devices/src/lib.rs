//! Input device abstractions for Wanderer
//!
//! Platform-agnostic keyboard and mouse state plus named actions. The window
//! backend feeds raw events in; gameplay code only asks about [`Action`]s.
//!
//! # Modules
//!
//! - [`keyboard`]: Key codes and keyboard state tracking
//! - [`mouse`]: Mouse buttons, pointer position and wheel accumulation
//! - [`action`]: Named actions and their configurable bindings
//! - [`input`]: Combined per-frame input state queried by gameplay code

pub mod action;
pub mod error;
pub mod input;
pub mod keyboard;
pub mod mouse;

// Re-export commonly used types at crate root
pub use action::{Action, ActionBindings, Binding};
pub use error::BindingParseError;
pub use input::InputState;
pub use keyboard::{Key, KeyboardState};
pub use mouse::{MouseButton, MouseState};
