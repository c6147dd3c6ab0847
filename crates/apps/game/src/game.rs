//! Per-frame game logic, independent of the window and GL
//!
//! One [`Game::step`] re-centres the follow camera on the player (applying
//! the frame's scroll), then updates the player with that camera.

use glam::Vec3;
use wanderer_character::Player;
use wanderer_core::{Camera, FollowCamera, FrameContext};
use wanderer_devices::InputState;

use crate::config::DebugDrawConfig;
use crate::hud::HudStats;

pub struct Game {
    follow: FollowCamera,
    player: Player,
    debug: DebugDrawConfig,
}

impl Game {
    pub fn new(camera: Camera, player: Player, debug: DebugDrawConfig) -> Self {
        Self {
            follow: FollowCamera::new(camera),
            player,
            debug,
        }
    }

    pub fn camera(&self) -> &Camera {
        self.follow.camera()
    }

    pub fn follow(&self) -> &FollowCamera {
        &self.follow
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn step(&mut self, input: &InputState, frame: &FrameContext) {
        self.follow.update(self.player.position(), input.scroll_delta());
        self.player.update(self.follow.camera(), input, frame);
    }

    /// Line from the player to its destination, lifted off the ground
    pub fn path_line(&self) -> (Vec3, Vec3) {
        let lift = Vec3::new(0.0, self.debug.path_lift, 0.0);
        (self.player.position() + lift, self.player.destination() + lift)
    }

    /// Destination marker centre and radius, at the path line's height
    pub fn destination_marker(&self) -> (Vec3, f32) {
        let lift = Vec3::new(0.0, self.debug.path_lift, 0.0);
        (self.player.destination() + lift, self.debug.marker_radius)
    }

    pub fn hud_stats(&self, fps: f32) -> HudStats {
        HudStats {
            fps,
            state: self.player.anim_state(),
            frame: self.player.anim_frame(),
            breakdance_timer: self.player.breakdance_timer(),
            position: self.player.position(),
            destination: self.player.destination(),
        }
    }
}
