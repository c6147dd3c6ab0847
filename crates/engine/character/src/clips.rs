//! State to clip bindings
//!
//! The defaults match the bundled Mixamo character, whose clips are stored as
//! `[Breakdance, Idle, Run, Walk]`. Other models bind clips by index or name:
//!
//! ```toml
//! [player.clips]
//! Idle = "Idle"
//! Walk = 3
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use wanderer_assets::AnimatedModel;

use crate::error::{CharacterError, Result};
use crate::state::AnimState;

/// Clip reference: position in the model's clip list or clip name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClipRef {
    Index(usize),
    Name(String),
}

impl fmt::Display for ClipRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipRef::Index(i) => write!(f, "#{i}"),
            ClipRef::Name(name) => write!(f, "{name:?}"),
        }
    }
}

/// Clip bound to each animation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, ClipRef>", into = "BTreeMap<String, ClipRef>")]
pub struct ClipBindings {
    pub idle: ClipRef,
    pub walk: ClipRef,
    pub run: ClipRef,
    pub breakdance: ClipRef,
}

impl Default for ClipBindings {
    fn default() -> Self {
        Self {
            idle: ClipRef::Index(1),
            walk: ClipRef::Index(3),
            run: ClipRef::Index(2),
            breakdance: ClipRef::Index(0),
        }
    }
}

impl From<BTreeMap<String, ClipRef>> for ClipBindings {
    /// Missing states keep their default; unknown state names are skipped
    fn from(map: BTreeMap<String, ClipRef>) -> Self {
        let mut bindings = Self::default();
        for (name, clip) in map {
            match name.parse::<AnimState>() {
                Ok(state) => *bindings.get_mut(state) = clip,
                Err(_) => tracing::warn!("Ignoring clip binding for unknown state {:?}", name),
            }
        }
        bindings
    }
}

impl From<ClipBindings> for BTreeMap<String, ClipRef> {
    fn from(bindings: ClipBindings) -> Self {
        AnimState::ALL
            .into_iter()
            .map(|state| (state.name().to_string(), bindings.get(state).clone()))
            .collect()
    }
}

impl ClipBindings {
    pub fn get(&self, state: AnimState) -> &ClipRef {
        match state {
            AnimState::Idle => &self.idle,
            AnimState::Walk => &self.walk,
            AnimState::Run => &self.run,
            AnimState::Breakdance => &self.breakdance,
        }
    }

    pub fn get_mut(&mut self, state: AnimState) -> &mut ClipRef {
        match state {
            AnimState::Idle => &mut self.idle,
            AnimState::Walk => &mut self.walk,
            AnimState::Run => &mut self.run,
            AnimState::Breakdance => &mut self.breakdance,
        }
    }

    /// Check every binding against `model` and turn it into clip indices
    ///
    /// Fails if the model has no clips, or if a binding points at a missing
    /// or empty clip.
    pub fn resolve(&self, model: &AnimatedModel) -> Result<ResolvedClips> {
        let count = model.clip_count();
        if count == 0 {
            return Err(CharacterError::NoClips);
        }

        let mut indices = [0usize; 4];
        for (slot, state) in indices.iter_mut().zip(AnimState::ALL) {
            let index = match self.get(state) {
                ClipRef::Index(index) if *index < count => *index,
                ClipRef::Index(index) => {
                    return Err(CharacterError::ClipIndexOutOfRange {
                        state,
                        index: *index,
                        count,
                    })
                }
                ClipRef::Name(name) => {
                    model
                        .clip_index(name)
                        .ok_or_else(|| CharacterError::UnknownClip {
                            state,
                            name: name.clone(),
                        })?
                }
            };
            if model.clips[index].frame_count() == 0 {
                return Err(CharacterError::EmptyClip { state, clip: index });
            }
            *slot = index;
        }
        Ok(ResolvedClips(indices))
    }
}

/// Validated clip index per state, in [`AnimState::ALL`] order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedClips([usize; 4]);

impl ResolvedClips {
    pub fn get(&self, state: AnimState) -> usize {
        self.0[state as usize]
    }
}
