//! Player controller
//!
//! One [`Player::update`] per frame:
//!
//! 1. a held Select action ray-casts the pointer onto the ground and moves
//!    the destination there
//! 2. the movement direction and the next [`AnimState`] are chosen
//! 3. the state's action runs (clip choice, speed, breakdance countdown)
//! 4. a moving player turns towards and steps along the direction
//! 5. a Breakdance press while standing still restarts the countdown
//! 6. the animation advances one frame and the mesh is re-skinned

use glam::{Mat4, Quat, Vec3};
use wanderer_assets::{skin_vertices, AnimatedModel, AnimationClip, PosedVertex};
use wanderer_core::{Camera, FrameContext, Plane, Ray, Transform3D};
use wanderer_devices::{Action, InputState};

use crate::clips::ResolvedClips;
use crate::config::PlayerConfig;
use crate::error::Result;
use crate::locomotion;
use crate::state::{select_state, AnimState};

pub struct Player {
    config: PlayerConfig,
    model: AnimatedModel,
    clips: ResolvedClips,
    model_base: Mat4,

    transform: Transform3D,
    destination: Vec3,
    speed: f32,

    state: AnimState,
    clip: usize,
    frame: usize,
    breakdance_timer: f32,

    world: Mat4,
    posed: Vec<PosedVertex>,
}

impl Player {
    /// Create a player standing idle at the configured spawn point
    ///
    /// Fails if the model lacks a clip any state is bound to.
    pub fn new(model: AnimatedModel, config: PlayerConfig) -> Result<Self> {
        let clips = config.clips.resolve(&model)?;
        let transform = Transform3D::from_position(config.spawn);
        let mut player = Self {
            model_base: config.model_base_matrix(),
            clip: clips.get(AnimState::Idle),
            destination: config.spawn,
            world: transform.to_matrix(),
            transform,
            speed: 0.0,
            state: AnimState::Idle,
            frame: 0,
            breakdance_timer: 0.0,
            posed: Vec::with_capacity(model.mesh.vertices.len()),
            clips,
            model,
            config,
        };
        player.skin();
        tracing::info!(
            "Player ready at {:?} with clips idle={} walk={} run={} breakdance={}",
            player.transform.position(),
            clips.get(AnimState::Idle),
            clips.get(AnimState::Walk),
            clips.get(AnimState::Run),
            clips.get(AnimState::Breakdance),
        );
        Ok(player)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    pub fn rotation(&self) -> Quat {
        self.transform.rotation()
    }

    pub fn anim_state(&self) -> AnimState {
        self.state
    }

    pub fn anim_frame(&self) -> usize {
        self.frame
    }

    /// Index of the clip currently playing
    pub fn clip_index(&self) -> usize {
        self.clip
    }

    pub fn current_clip(&self) -> &AnimationClip {
        &self.model.clips[self.clip]
    }

    pub fn movement_speed(&self) -> f32 {
        self.speed
    }

    pub fn breakdance_timer(&self) -> f32 {
        self.breakdance_timer
    }

    pub fn transform(&self) -> &Transform3D {
        &self.transform
    }

    /// Player transform as a matrix, refreshed at the end of every update
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// Matrix to draw the posed mesh with: world * model scale * model rotation
    pub fn model_matrix(&self) -> Mat4 {
        self.world * self.model_base
    }

    /// Mesh vertices skinned for the current frame
    pub fn posed_vertices(&self) -> &[PosedVertex] {
        &self.posed
    }

    pub fn model(&self) -> &AnimatedModel {
        &self.model
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub fn set_destination(&mut self, destination: Vec3) {
        if destination != self.destination {
            tracing::debug!("Destination -> {:?}", destination);
        }
        self.destination = destination;
    }

    /// Move the destination to where `ray` meets the ground
    ///
    /// Rays parallel to the ground leave the destination unchanged.
    pub fn select_with_ray(&mut self, ray: &Ray) -> bool {
        match ray.intersect_plane(&Plane::GROUND) {
            Some(hit) => {
                self.set_destination(hit);
                true
            }
            None => false,
        }
    }

    /// Switch state by name; unknown names are logged and ignored
    pub fn set_anim_state_by_name(&mut self, name: &str) {
        match name.parse::<AnimState>() {
            Ok(state) => self.set_anim_state(state),
            Err(e) => tracing::warn!("{e}; staying in {}", self.state),
        }
    }

    /// Restart the breakdance countdown
    pub fn trigger_breakdance(&mut self) {
        self.breakdance_timer = self.config.breakdance_duration;
        tracing::debug!("Breakdance triggered ({}s)", self.breakdance_timer);
    }

    fn set_anim_state(&mut self, state: AnimState) {
        if state == self.state {
            return;
        }
        tracing::debug!("Anim state {} -> {}", self.state, state);
        self.state = state;
        self.clip = self.clips.get(state);
        self.frame = 0;
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    pub fn movement_direction(&self) -> Vec3 {
        locomotion::movement_direction(
            self.transform.position(),
            self.destination,
            self.config.arrive_threshold,
            self.breakdance_timer,
            self.config.breakdance_move_gate,
        )
    }

    pub fn update(&mut self, camera: &Camera, input: &InputState, frame: &FrameContext) {
        if input.is_action_down(Action::Select) {
            if let Some(pointer) = input.pointer() {
                self.select_with_ray(&camera.screen_ray(pointer, frame.viewport));
            }
        }

        let dt = frame.delta_time;
        let direction = self.movement_direction();
        let on_move = direction != Vec3::ZERO;

        let next = select_state(on_move, input.is_action_down(Action::Sprint), self.breakdance_timer);
        self.set_anim_state(next);
        self.run_state_action(dt);

        if on_move {
            let rotation = locomotion::turn_towards(
                self.transform.rotation(),
                direction,
                self.config.turn_rate,
                dt,
            );
            self.transform.set_rotation(rotation);
            self.transform
                .set_position(self.transform.position() + direction * self.speed * dt);
        }

        if input.was_action_pressed(Action::Breakdance) && !on_move {
            self.trigger_breakdance();
        }

        self.advance_frame();
        self.world = self.transform.to_matrix();
    }

    fn run_state_action(&mut self, dt: f32) {
        self.clip = self.clips.get(self.state);
        match self.state {
            AnimState::Idle => {}
            AnimState::Walk => self.speed = self.config.walk_speed,
            AnimState::Run => self.speed = self.config.run_speed,
            AnimState::Breakdance => {
                if self.breakdance_timer > 0.0 {
                    self.breakdance_timer -= dt;
                }
            }
        }
    }

    fn advance_frame(&mut self) {
        let count = self.current_clip().frame_count();
        self.frame = (self.frame + 1) % count;
        self.skin();
    }

    fn skin(&mut self) {
        let clip = &self.model.clips[self.clip];
        if let Some(pose) = clip.frame(self.frame) {
            skin_vertices(&self.model.mesh, pose, &mut self.posed);
        }
    }
}
