use thiserror::Error;

use crate::state::AnimState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharacterError {
    #[error("model has no animation clips")]
    NoClips,

    #[error("{state} is bound to clip {index} but the model has {count} clips")]
    ClipIndexOutOfRange {
        state: AnimState,
        index: usize,
        count: usize,
    },

    #[error("{state} is bound to clip {name:?} which the model does not contain")]
    UnknownClip { state: AnimState, name: String },

    #[error("{state} is bound to clip {clip} which has no frames")]
    EmptyClip { state: AnimState, clip: usize },

    #[error("unknown animation state: {0}")]
    UnknownState(String),
}

pub type Result<T> = std::result::Result<T, CharacterError>;
