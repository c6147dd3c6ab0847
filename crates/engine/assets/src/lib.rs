//! Animated model assets for Wanderer
//!
//! Loads a skinned glTF/GLB character, bakes each of its animations into a
//! fixed-rate sequence of joint palettes and skins vertices on the CPU.
//!
//! # Modules
//!
//! - [`model`]: Mesh, skeleton, pose and clip types
//! - [`tracks`]: Keyframe tracks, sampling and clip baking
//! - [`skinning`]: Linear blend skinning into drawable vertices
//! - [`gltf_loader`]: glTF/GLB import

pub mod error;
pub mod gltf_loader;
pub mod model;
pub mod skinning;
pub mod tracks;

pub use error::{AssetError, Result};
pub use gltf_loader::load_animated_model;
pub use model::{
    AnimatedModel, AnimationClip, NodeTransform, Pose, PosedVertex, Skeleton, SkinnedMesh,
    SkinnedVertex,
};
pub use skinning::skin_vertices;
pub use tracks::{KeyframeClip, NodeTracks, Track, BAKE_FPS};
