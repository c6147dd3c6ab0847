//! Animation states

use std::fmt;
use std::str::FromStr;

use crate::error::CharacterError;

/// Animation state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Run,
    Breakdance,
}

impl AnimState {
    pub const ALL: [AnimState; 4] = [
        AnimState::Idle,
        AnimState::Walk,
        AnimState::Run,
        AnimState::Breakdance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnimState::Idle => "Idle",
            AnimState::Walk => "Walk",
            AnimState::Run => "Run",
            AnimState::Breakdance => "Breakdance",
        }
    }
}

impl fmt::Display for AnimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimState {
    type Err = CharacterError;

    /// Case-insensitive state name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimState::ALL
            .into_iter()
            .find(|state| state.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CharacterError::UnknownState(s.to_string()))
    }
}

/// Pick the state for this frame; the first matching rule wins
///
/// 1. moving and sprinting: `Run`
/// 2. moving: `Walk`
/// 3. breakdance timer still running: `Breakdance`
/// 4. otherwise `Idle`
pub fn select_state(on_move: bool, sprint: bool, breakdance_timer: f32) -> AnimState {
    if on_move && sprint {
        AnimState::Run
    } else if on_move {
        AnimState::Walk
    } else if breakdance_timer > 0.0 {
        AnimState::Breakdance
    } else {
        AnimState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_state_priority() {
        assert_eq!(select_state(true, true, 3.0), AnimState::Run);
        assert_eq!(select_state(true, false, 3.0), AnimState::Walk);
        assert_eq!(select_state(false, true, 3.0), AnimState::Breakdance);
        assert_eq!(select_state(false, true, 0.0), AnimState::Idle);
        assert_eq!(select_state(false, false, -0.2), AnimState::Idle);
    }

    #[test]
    fn test_parse_state() {
        assert_eq!("breakdance".parse::<AnimState>().unwrap(), AnimState::Breakdance);
        assert_eq!("Run".parse::<AnimState>().unwrap(), AnimState::Run);
        assert_eq!(
            "Jump".parse::<AnimState>(),
            Err(CharacterError::UnknownState("Jump".to_string()))
        );
    }
}
