//! OpenGL renderers for Wanderer
//!
//! All renderers follow the same lifecycle: construct, `init_gl()` with a
//! current context, draw every frame, `destroy_gl()` before the context goes
//! away.
//!
//! - [`SkinnedModelRenderer`] - CPU-skinned character mesh, re-uploaded per frame
//! - [`GroundPlane`] - Subdivided ground plane drawn with file-based shaders
//! - [`DebugRenderer`] - Immediate-mode lines, spheres and the floor grid

pub mod color;
pub mod debug_draw;
pub mod error;
pub mod ground;
pub mod lighting;
pub mod model_renderer;
pub mod shader_utils;

pub use color::Color;
pub use debug_draw::DebugRenderer;
pub use error::RenderError;
pub use ground::GroundPlane;
pub use model_renderer::SkinnedModelRenderer;
