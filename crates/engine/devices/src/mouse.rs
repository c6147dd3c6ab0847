//! Mouse and pointer input types

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use crate::error::BindingParseError;

/// Mouse button type for event handling and bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button (primary)
    Left,
    /// Right mouse button (secondary/context)
    Right,
    /// Middle mouse button (scroll wheel click)
    Middle,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    /// Binding name, e.g. `MouseLeft`
    pub fn name(self) -> &'static str {
        match self {
            MouseButton::Left => "MouseLeft",
            MouseButton::Right => "MouseRight",
            MouseButton::Middle => "MouseMiddle",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MouseButton {
    type Err = BindingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MouseButton::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BindingParseError::UnknownMouseButton(s.to_string()))
    }
}

/// Mouse state for the current frame
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// Pointer position in window pixels, `None` while outside the window
    position: Option<Vec2>,
    /// Wheel movement accumulated this frame, positive away from the user
    scroll: f32,
    down: [bool; 3],
    pressed: [bool; 3],
    released: [bool; 3],
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = Some(position);
    }

    /// Pointer left the window
    pub fn clear_position(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn add_scroll(&mut self, delta: f32) {
        self.scroll += delta;
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn press(&mut self, button: MouseButton) {
        let i = button.index();
        if !self.down[i] {
            self.pressed[i] = true;
        }
        self.down[i] = true;
    }

    pub fn release(&mut self, button: MouseButton) {
        let i = button.index();
        if self.down[i] {
            self.released[i] = true;
        }
        self.down[i] = false;
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.down[button.index()]
    }

    pub fn was_pressed(&self, button: MouseButton) -> bool {
        self.pressed[button.index()]
    }

    pub fn was_released(&self, button: MouseButton) -> bool {
        self.released[button.index()]
    }

    /// Clear per-frame transitions and the wheel accumulator
    pub fn update(&mut self) {
        self.pressed = [false; 3];
        self.released = [false; 3];
        self.scroll = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_state_default() {
        let mouse = MouseState::default();
        assert!(mouse.position().is_none());
        assert_eq!(mouse.scroll(), 0.0);
        assert!(!mouse.is_down(MouseButton::Left));
    }

    #[test]
    fn test_button_transitions() {
        let mut mouse = MouseState::new();
        mouse.press(MouseButton::Left);
        assert!(mouse.is_down(MouseButton::Left));
        assert!(mouse.was_pressed(MouseButton::Left));
        assert!(!mouse.is_down(MouseButton::Right));

        mouse.update();
        assert!(mouse.is_down(MouseButton::Left));
        assert!(!mouse.was_pressed(MouseButton::Left));

        mouse.release(MouseButton::Left);
        assert!(mouse.was_released(MouseButton::Left));
    }

    #[test]
    fn test_scroll_accumulates_per_frame() {
        let mut mouse = MouseState::new();
        mouse.add_scroll(1.0);
        mouse.add_scroll(0.5);
        assert_eq!(mouse.scroll(), 1.5);
        mouse.update();
        assert_eq!(mouse.scroll(), 0.0);
    }

    #[test]
    fn test_parse_button() {
        assert_eq!("MouseLeft".parse::<MouseButton>().unwrap(), MouseButton::Left);
        assert_eq!("mousemiddle".parse::<MouseButton>().unwrap(), MouseButton::Middle);
        assert!("Mouse4".parse::<MouseButton>().is_err());
    }
}
