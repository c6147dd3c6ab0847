//! Per-frame context handed to update functions

use glam::Vec2;

/// Timing and viewport information for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Seconds since startup
    pub elapsed: f32,
    /// Frame number, starting at 0
    pub frame: u64,
    /// Drawable size in pixels
    pub viewport: Vec2,
}

impl FrameContext {
    pub fn new(delta_time: f32, viewport: Vec2) -> Self {
        Self {
            delta_time: delta_time.max(0.0),
            elapsed: 0.0,
            frame: 0,
            viewport,
        }
    }

    /// Context for the next frame
    pub fn advance(&self, delta_time: f32, viewport: Vec2) -> Self {
        let delta_time = delta_time.max(0.0);
        Self {
            delta_time,
            elapsed: self.elapsed + delta_time,
            frame: self.frame + 1,
            viewport,
        }
    }
}
