//! Core math for Wanderer - generic components shared by every other crate
//!
//! # Modules
//!
//! - [`transform`]: Position/rotation/scale composition into a world matrix
//! - [`ray`]: Rays, planes and ray-plane intersection
//! - [`camera`]: 3D perspective camera with view/projection and screen rays
//! - [`follow`]: Camera follower with an accumulated, scroll-driven offset
//! - [`frame`]: Per-frame timing and viewport context

pub mod camera;
pub mod follow;
pub mod frame;
pub mod ray;
pub mod transform;

pub use camera::{Camera, Projection};
pub use follow::FollowCamera;
pub use frame::FrameContext;
pub use ray::{Plane, Ray};
pub use transform::Transform3D;
