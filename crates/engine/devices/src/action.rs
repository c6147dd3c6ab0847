//! Named actions and the bindings that trigger them
//!
//! Bindings are written as names in configuration files:
//!
//! ```toml
//! select = ["MouseLeft"]
//! sprint = ["ShiftLeft", "ShiftRight"]
//! breakdance = ["Space"]
//! toggle_borderless = ["F10"]
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BindingParseError;
use crate::keyboard::Key;
use crate::mouse::MouseButton;

// ============================================================================
// Action
// ============================================================================

/// Something the player can ask for, independent of the physical input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Pick a destination under the pointer
    Select,
    /// Run instead of walk while held
    Sprint,
    /// Start the breakdance
    Breakdance,
    /// Switch between windowed and borderless fullscreen
    ToggleBorderless,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Select,
        Action::Sprint,
        Action::Breakdance,
        Action::ToggleBorderless,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Select => "select",
            Action::Sprint => "sprint",
            Action::Breakdance => "breakdance",
            Action::ToggleBorderless => "toggle_borderless",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = BindingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| BindingParseError::UnknownAction(s.to_string()))
    }
}

// ============================================================================
// Binding
// ============================================================================

/// A single physical input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Binding {
    Key(Key),
    Mouse(MouseButton),
}

impl FromStr for Binding {
    type Err = BindingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let is_mouse = s.len() > 5 && s.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("mouse"));
        if is_mouse {
            s.parse().map(Binding::Mouse)
        } else {
            s.parse().map(Binding::Key)
        }
    }
}

impl TryFrom<String> for Binding {
    type Error = BindingParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Binding> for String {
    fn from(binding: Binding) -> Self {
        binding.to_string()
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Key(key) => key.fmt(f),
            Binding::Mouse(button) => button.fmt(f),
        }
    }
}

// ============================================================================
// Action Bindings
// ============================================================================

fn default_select() -> Vec<Binding> {
    vec![Binding::Mouse(MouseButton::Left)]
}

fn default_sprint() -> Vec<Binding> {
    vec![Binding::Key(Key::ShiftLeft)]
}

fn default_breakdance() -> Vec<Binding> {
    vec![Binding::Key(Key::Space)]
}

fn default_toggle_borderless() -> Vec<Binding> {
    vec![Binding::Key(Key::F10)]
}

/// Action to bindings table; an action fires if any of its bindings does
///
/// Actions missing from a config file keep their default bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBindings {
    #[serde(default = "default_select")]
    pub select: Vec<Binding>,
    #[serde(default = "default_sprint")]
    pub sprint: Vec<Binding>,
    #[serde(default = "default_breakdance")]
    pub breakdance: Vec<Binding>,
    #[serde(default = "default_toggle_borderless")]
    pub toggle_borderless: Vec<Binding>,
}

impl Default for ActionBindings {
    fn default() -> Self {
        Self {
            select: default_select(),
            sprint: default_sprint(),
            breakdance: default_breakdance(),
            toggle_borderless: default_toggle_borderless(),
        }
    }
}

impl ActionBindings {
    pub fn get(&self, action: Action) -> &[Binding] {
        match action {
            Action::Select => &self.select,
            Action::Sprint => &self.sprint,
            Action::Breakdance => &self.breakdance,
            Action::ToggleBorderless => &self.toggle_borderless,
        }
    }

    /// Replace the bindings of one action
    pub fn set(&mut self, action: Action, bindings: Vec<Binding>) {
        let slot = match action {
            Action::Select => &mut self.select,
            Action::Sprint => &mut self.sprint,
            Action::Breakdance => &mut self.breakdance,
            Action::ToggleBorderless => &mut self.toggle_borderless,
        };
        *slot = bindings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = ActionBindings::default();
        assert_eq!(bindings.get(Action::Select), &[Binding::Mouse(MouseButton::Left)]);
        assert_eq!(bindings.get(Action::Sprint), &[Binding::Key(Key::ShiftLeft)]);
        assert_eq!(bindings.get(Action::Breakdance), &[Binding::Key(Key::Space)]);
        assert_eq!(bindings.get(Action::ToggleBorderless), &[Binding::Key(Key::F10)]);
    }

    #[test]
    fn test_parse_binding() {
        assert_eq!("Space".parse::<Binding>().unwrap(), Binding::Key(Key::Space));
        assert_eq!(
            "MouseRight".parse::<Binding>().unwrap(),
            Binding::Mouse(MouseButton::Right)
        );
        assert_eq!(
            "Mouse".parse::<Binding>(),
            Err(BindingParseError::UnknownKey("Mouse".to_string()))
        );
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let bindings: ActionBindings =
            toml::from_str(r#"sprint = ["ShiftLeft", "ShiftRight"]"#).unwrap();
        assert_eq!(
            bindings.sprint,
            vec![Binding::Key(Key::ShiftLeft), Binding::Key(Key::ShiftRight)]
        );
        assert_eq!(bindings.breakdance, default_breakdance());
    }

    #[test]
    fn test_unknown_binding_rejected() {
        let result: Result<ActionBindings, _> = toml::from_str(r#"select = ["Pedal"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_action_names() {
        assert_eq!("toggle_borderless".parse::<Action>().unwrap(), Action::ToggleBorderless);
        assert!("jump".parse::<Action>().is_err());
    }
}
