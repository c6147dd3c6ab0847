//! Keyboard input abstraction
//!
//! Platform-independent key codes and a per-frame keyboard state tracker.
//! Window backends map their native key codes onto [`Key`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::BindingParseError;

/// Platform-independent key codes
///
/// Only the keys the demo can bind are listed; backends drop everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Letters
    A,
    D,
    S,
    W,

    // Function keys
    F1,
    F10,
    F11,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    // Special
    Escape,
    Space,
    Enter,
    Tab,
}

impl Key {
    /// Every key, in declaration order
    pub const ALL: [Key; 17] = [
        Key::A,
        Key::D,
        Key::S,
        Key::W,
        Key::F1,
        Key::F10,
        Key::F11,
        Key::ShiftLeft,
        Key::ShiftRight,
        Key::ControlLeft,
        Key::ControlRight,
        Key::AltLeft,
        Key::AltRight,
        Key::Escape,
        Key::Space,
        Key::Enter,
        Key::Tab,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::A => "A",
            Key::D => "D",
            Key::S => "S",
            Key::W => "W",
            Key::F1 => "F1",
            Key::F10 => "F10",
            Key::F11 => "F11",
            Key::ShiftLeft => "ShiftLeft",
            Key::ShiftRight => "ShiftRight",
            Key::ControlLeft => "ControlLeft",
            Key::ControlRight => "ControlRight",
            Key::AltLeft => "AltLeft",
            Key::AltRight => "AltRight",
            Key::Escape => "Escape",
            Key::Space => "Space",
            Key::Enter => "Enter",
            Key::Tab => "Tab",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = BindingParseError;

    /// Parse a key by name, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BindingParseError::UnknownKey(s.to_string()))
    }
}

/// Keyboard state tracker
///
/// Tracks held keys plus the transitions that happened since the last
/// [`KeyboardState::update`].
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Set of currently held keys
    down: HashSet<Key>,
    /// Keys that went down this frame
    pressed: HashSet<Key>,
    /// Keys that went up this frame
    released: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press event
    ///
    /// OS key repeat does not count as a new press.
    pub fn press(&mut self, key: Key) {
        if self.down.insert(key) {
            self.pressed.insert(key);
        }
    }

    /// Record a key release event
    pub fn release(&mut self, key: Key) {
        if self.down.remove(&key) {
            self.released.insert(key);
        }
    }

    /// Clear per-frame transitions; call once at the end of every frame
    pub fn update(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn was_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    pub fn is_shift_down(&self) -> bool {
        self.is_down(Key::ShiftLeft) || self.is_down(Key::ShiftRight)
    }

    pub fn any_down(&self) -> bool {
        !self.down.is_empty()
    }

    /// Release everything without recording transitions (focus loss)
    pub fn clear(&mut self) {
        self.down.clear();
        self.pressed.clear();
        self.released.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_state() {
        let mut kb = KeyboardState::new();
        assert!(!kb.any_down());

        kb.press(Key::Space);
        kb.press(Key::ShiftLeft);
        assert!(kb.is_down(Key::Space));
        assert!(kb.was_pressed(Key::Space));
        assert!(kb.is_shift_down());

        kb.update();
        assert!(kb.is_down(Key::Space));
        assert!(!kb.was_pressed(Key::Space));

        kb.release(Key::Space);
        assert!(!kb.is_down(Key::Space));
        assert!(kb.was_released(Key::Space));

        kb.update();
        assert!(!kb.was_released(Key::Space));
    }

    #[test]
    fn test_repeat_is_not_a_press() {
        let mut kb = KeyboardState::new();
        kb.press(Key::F10);
        kb.update();
        kb.press(Key::F10);
        assert!(!kb.was_pressed(Key::F10));
    }

    #[test]
    fn test_release_without_press_ignored() {
        let mut kb = KeyboardState::new();
        kb.release(Key::W);
        assert!(!kb.was_released(Key::W));
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in Key::ALL {
            assert_eq!(key.name().parse::<Key>().unwrap(), key);
        }
        assert_eq!("space".parse::<Key>().unwrap(), Key::Space);
        assert!("Hyper".parse::<Key>().is_err());
    }
}
