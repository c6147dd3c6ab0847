//! Combined per-frame input state

use glam::Vec2;

use crate::action::{Action, ActionBindings, Binding};
use crate::keyboard::{Key, KeyboardState};
use crate::mouse::{MouseButton, MouseState};

/// Keyboard and mouse state resolved through action bindings
///
/// The window backend records events during a frame, gameplay reads actions,
/// and [`InputState::end_frame`] clears the per-frame transitions.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    bindings: ActionBindings,
}

impl InputState {
    pub fn new(bindings: ActionBindings) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            bindings,
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.keyboard.press(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.keyboard.release(key);
    }

    pub fn button_down(&mut self, button: MouseButton) {
        self.mouse.press(button);
    }

    pub fn button_up(&mut self, button: MouseButton) {
        self.mouse.release(button);
    }

    /// True while any binding of `action` is held
    pub fn is_action_down(&self, action: Action) -> bool {
        self.bindings.get(action).iter().any(|b| match *b {
            Binding::Key(key) => self.keyboard.is_down(key),
            Binding::Mouse(button) => self.mouse.is_down(button),
        })
    }

    /// True if any binding of `action` went down this frame
    pub fn was_action_pressed(&self, action: Action) -> bool {
        self.bindings.get(action).iter().any(|b| match *b {
            Binding::Key(key) => self.keyboard.was_pressed(key),
            Binding::Mouse(button) => self.mouse.was_pressed(button),
        })
    }

    /// Pointer position in window pixels
    pub fn pointer(&self) -> Option<Vec2> {
        self.mouse.position()
    }

    /// Wheel delta accumulated this frame
    pub fn scroll_delta(&self) -> f32 {
        self.mouse.scroll()
    }

    /// Drop held state after focus loss
    pub fn reset(&mut self) {
        self.keyboard.clear();
        self.mouse = MouseState::new();
    }

    pub fn end_frame(&mut self) {
        self.keyboard.update();
        self.mouse.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_resolution() {
        let mut input = InputState::default();
        assert!(!input.is_action_down(Action::Sprint));

        input.key_down(Key::ShiftLeft);
        input.button_down(MouseButton::Left);
        assert!(input.is_action_down(Action::Sprint));
        assert!(input.is_action_down(Action::Select));
        assert!(input.was_action_pressed(Action::Select));
        assert!(!input.is_action_down(Action::Breakdance));

        input.end_frame();
        assert!(input.is_action_down(Action::Select));
        assert!(!input.was_action_pressed(Action::Select));
    }

    #[test]
    fn test_custom_bindings() {
        let mut bindings = ActionBindings::default();
        bindings.set(Action::Breakdance, vec![Binding::Key(Key::Enter)]);
        let mut input = InputState::new(bindings);

        input.key_down(Key::Space);
        assert!(!input.was_action_pressed(Action::Breakdance));
        input.key_down(Key::Enter);
        assert!(input.was_action_pressed(Action::Breakdance));
    }

    #[test]
    fn test_scroll_cleared_at_end_of_frame() {
        let mut input = InputState::default();
        input.mouse.add_scroll(2.0);
        assert_eq!(input.scroll_delta(), 2.0);
        input.end_frame();
        assert_eq!(input.scroll_delta(), 0.0);
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut input = InputState::default();
        input.key_down(Key::ShiftLeft);
        input.mouse.set_position(Vec2::new(4.0, 4.0));
        input.reset();
        assert!(!input.is_action_down(Action::Sprint));
        assert!(input.pointer().is_none());
    }
}
