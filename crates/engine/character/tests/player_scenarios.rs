//! Player controller scenarios
//!
//! Drives [`Player::update`] with synthetic input and a hand-built model whose
//! clips are stored as `[Breakdance, Idle, Run, Walk]`, matching the default
//! clip bindings.

use glam::{Mat4, Vec2, Vec3};
use wanderer_assets::{AnimatedModel, AnimationClip, Pose, Skeleton, SkinnedMesh, SkinnedVertex};
use wanderer_character::{AnimState, Player, PlayerConfig};
use wanderer_core::{Camera, FrameContext, Ray};
use wanderer_devices::{InputState, Key, MouseButton};

const VIEWPORT: Vec2 = Vec2::new(1080.0, 780.0);

const BREAKDANCE_FRAMES: usize = 8;
const IDLE_FRAMES: usize = 3;
const RUN_FRAMES: usize = 5;
const WALK_FRAMES: usize = 6;

fn clip(name: &str, frames: usize) -> AnimationClip {
    AnimationClip::new(name, vec![Pose { joints: vec![Mat4::IDENTITY] }; frames])
}

fn test_model() -> AnimatedModel {
    AnimatedModel::new(
        SkinnedMesh {
            vertices: vec![
                SkinnedVertex::rigid(Vec3::ZERO, Vec3::Y),
                SkinnedVertex::rigid(Vec3::X, Vec3::Y),
                SkinnedVertex::rigid(Vec3::Z, Vec3::Y),
            ],
            indices: vec![0, 1, 2],
        },
        Skeleton::single_joint(),
        vec![
            clip("Breakdance", BREAKDANCE_FRAMES),
            clip("Idle", IDLE_FRAMES),
            clip("Run", RUN_FRAMES),
            clip("Walk", WALK_FRAMES),
        ],
    )
}

fn player() -> Player {
    Player::new(test_model(), PlayerConfig::default()).unwrap()
}

fn frame(dt: f32) -> FrameContext {
    FrameContext::new(dt, VIEWPORT)
}

fn step(player: &mut Player, input: &mut InputState, dt: f32) {
    player.update(&Camera::default(), input, &frame(dt));
    input.end_frame();
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

// ============================================================================
// Locomotion
// ============================================================================

#[test]
fn test_walk_one_second_towards_destination() {
    let mut player = player();
    let mut input = InputState::default();
    player.set_destination(Vec3::new(10.0, 0.0, 0.0));

    step(&mut player, &mut input, 1.0);

    assert_eq!(player.anim_state(), AnimState::Walk);
    assert_eq!(player.movement_speed(), 2.5);
    assert!(approx(player.position(), Vec3::new(2.5, 0.0, 0.0)));
    assert_eq!(player.anim_frame(), 1);
    assert_eq!(player.clip_index(), 3);
    // turn factor 5 * 1s clamps to a full turn towards +X
    assert!(approx(player.rotation() * Vec3::Z, Vec3::X));
}

#[test]
fn test_sprint_runs() {
    let mut player = player();
    let mut input = InputState::default();
    input.key_down(Key::ShiftLeft);
    player.set_destination(Vec3::new(0.0, 0.0, -20.0));

    step(&mut player, &mut input, 1.0);

    assert_eq!(player.anim_state(), AnimState::Run);
    assert_eq!(player.movement_speed(), 7.0);
    assert!(approx(player.position(), Vec3::new(0.0, 0.0, -7.0)));
    assert_eq!(player.clip_index(), 2);
}

#[test]
fn test_first_sprint_frame_moves_at_run_speed() {
    let mut player = player();
    let mut input = InputState::default();
    player.set_destination(Vec3::new(100.0, 0.0, 0.0));

    step(&mut player, &mut input, 1.0);
    assert_eq!(player.anim_state(), AnimState::Walk);
    assert!(approx(player.position(), Vec3::new(2.5, 0.0, 0.0)));

    // Speed is picked up from the new state before the move, not a frame late
    input.key_down(Key::ShiftLeft);
    step(&mut player, &mut input, 1.0);
    assert_eq!(player.anim_state(), AnimState::Run);
    assert_eq!(player.movement_speed(), 7.0);
    assert!(approx(player.position(), Vec3::new(9.5, 0.0, 0.0)));
}

#[test]
fn test_releasing_sprint_walks_again() {
    let mut player = player();
    let mut input = InputState::default();
    player.set_destination(Vec3::new(100.0, 0.0, 0.0));

    input.key_down(Key::ShiftLeft);
    step(&mut player, &mut input, 0.5);
    assert_eq!(player.anim_state(), AnimState::Run);

    input.key_up(Key::ShiftLeft);
    step(&mut player, &mut input, 0.5);
    assert_eq!(player.anim_state(), AnimState::Walk);
    assert!(approx(player.position(), Vec3::new(3.5 + 1.25, 0.0, 0.0)));
}

#[test]
fn test_within_threshold_stays_idle() {
    let mut player = player();
    let mut input = InputState::default();
    player.set_destination(Vec3::new(0.05, 0.0, 0.05));
    input.key_down(Key::ShiftLeft);

    for _ in 0..10 {
        step(&mut player, &mut input, 0.1);
        assert_eq!(player.anim_state(), AnimState::Idle);
        assert_eq!(player.position(), Vec3::ZERO);
    }
}

#[test]
fn test_stops_near_destination() {
    let mut player = player();
    let mut input = InputState::default();
    player.set_destination(Vec3::new(2.0, 0.0, 0.0));

    for _ in 0..200 {
        step(&mut player, &mut input, 1.0 / 60.0);
    }

    assert_eq!(player.anim_state(), AnimState::Idle);
    assert!(player.position().distance(player.destination()) <= 0.1);
}

// ============================================================================
// Breakdance
// ============================================================================

#[test]
fn test_breakdance_countdown() {
    let mut player = player();
    let mut input = InputState::default();

    input.key_down(Key::Space);
    step(&mut player, &mut input, 1.0);
    assert_eq!(player.anim_state(), AnimState::Idle);
    assert_eq!(player.breakdance_timer(), 4.8);
    input.key_up(Key::Space);

    let mut last = player.breakdance_timer();
    for _ in 0..5 {
        step(&mut player, &mut input, 1.0);
        assert_eq!(player.anim_state(), AnimState::Breakdance);
        assert_eq!(player.clip_index(), 0);
        assert!((last - player.breakdance_timer() - 1.0).abs() < 1e-5);
        last = player.breakdance_timer();
    }
    assert!(player.breakdance_timer() <= 0.0);

    step(&mut player, &mut input, 1.0);
    assert_eq!(player.anim_state(), AnimState::Idle);
}

#[test]
fn test_breakdance_holding_key_does_not_retrigger() {
    let mut player = player();
    let mut input = InputState::default();

    input.key_down(Key::Space);
    step(&mut player, &mut input, 0.5);
    step(&mut player, &mut input, 0.5);
    step(&mut player, &mut input, 0.5);

    assert_eq!(player.anim_state(), AnimState::Breakdance);
    assert!((player.breakdance_timer() - 3.8).abs() < 1e-5);
}

#[test]
fn test_breakdance_retrigger_restores_full_duration() {
    let mut player = player();
    let mut input = InputState::default();

    input.key_down(Key::Space);
    step(&mut player, &mut input, 1.0);
    input.key_up(Key::Space);
    step(&mut player, &mut input, 1.0);
    step(&mut player, &mut input, 1.0);
    assert!((player.breakdance_timer() - 2.8).abs() < 1e-5);

    input.key_down(Key::Space);
    step(&mut player, &mut input, 1.0);
    assert_eq!(player.breakdance_timer(), 4.8);
}

#[test]
fn test_breakdance_ignored_while_moving() {
    let mut player = player();
    let mut input = InputState::default();
    player.set_destination(Vec3::new(10.0, 0.0, 0.0));

    input.key_down(Key::Space);
    step(&mut player, &mut input, 0.1);

    assert_eq!(player.anim_state(), AnimState::Walk);
    assert_eq!(player.breakdance_timer(), 0.0);
}

#[test]
fn test_breakdance_blocks_movement() {
    let mut player = player();
    let mut input = InputState::default();

    input.key_down(Key::Space);
    step(&mut player, &mut input, 0.1);
    input.key_up(Key::Space);

    player.set_destination(Vec3::new(5.0, 0.0, 5.0));
    for _ in 0..10 {
        step(&mut player, &mut input, 0.1);
        assert_eq!(player.anim_state(), AnimState::Breakdance);
        assert_eq!(player.position(), Vec3::ZERO);
    }
}

// ============================================================================
// Pointer selection
// ============================================================================

#[test]
fn test_click_sets_destination_on_ground() {
    let mut player = player();
    let mut input = InputState::default();
    input.mouse.set_position(VIEWPORT * 0.5);
    input.button_down(MouseButton::Left);

    player.update(&Camera::default(), &input, &frame(0.0));

    // centre ray from (10,15,10) through (0,2,2) reaches y = 0 at t = 15/13
    let expected = Vec3::new(10.0 - 150.0 / 13.0, 0.0, 10.0 - 120.0 / 13.0);
    assert!(approx(player.destination(), expected));
}

#[test]
fn test_click_without_pointer_does_nothing() {
    let mut player = player();
    let mut input = InputState::default();
    input.button_down(MouseButton::Left);

    step(&mut player, &mut input, 0.1);
    assert_eq!(player.destination(), Vec3::ZERO);
}

#[test]
fn test_parallel_ray_leaves_destination() {
    let mut player = player();
    player.set_destination(Vec3::new(1.0, 0.0, 1.0));

    let hit = player.select_with_ray(&Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X));

    assert!(!hit);
    assert_eq!(player.destination(), Vec3::new(1.0, 0.0, 1.0));
}

// ============================================================================
// Animation frames
// ============================================================================

#[test]
fn test_frame_wraps_within_clip() {
    let mut player = player();
    let mut input = InputState::default();

    let mut seen = Vec::new();
    for _ in 0..7 {
        step(&mut player, &mut input, 0.016);
        seen.push(player.anim_frame());
    }
    assert_eq!(seen, vec![1, 2, 0, 1, 2, 0, 1]);
}

#[test]
fn test_frame_resets_on_state_change() {
    let mut player = player();
    let mut input = InputState::default();

    step(&mut player, &mut input, 0.016);
    step(&mut player, &mut input, 0.016);
    assert_eq!(player.anim_frame(), 2);

    player.set_destination(Vec3::new(0.0, 0.0, 30.0));
    step(&mut player, &mut input, 0.016);
    assert_eq!(player.anim_state(), AnimState::Walk);
    assert_eq!(player.anim_frame(), 1);

    step(&mut player, &mut input, 0.016);
    assert_eq!(player.anim_frame(), 2);
}

#[test]
fn test_frame_stays_in_range_across_states() {
    let mut player = player();
    let mut input = InputState::default();
    let limits = |state| match state {
        AnimState::Idle => IDLE_FRAMES,
        AnimState::Walk => WALK_FRAMES,
        AnimState::Run => RUN_FRAMES,
        AnimState::Breakdance => BREAKDANCE_FRAMES,
    };

    for i in 0..400 {
        match i % 100 {
            0 => player.set_destination(Vec3::new(i as f32 * 0.1, 0.0, 3.0)),
            30 => input.key_down(Key::ShiftLeft),
            60 => input.key_up(Key::ShiftLeft),
            80 => input.key_down(Key::Space),
            81 => input.key_up(Key::Space),
            _ => {}
        }
        step(&mut player, &mut input, 1.0 / 30.0);
        assert!(player.anim_frame() < limits(player.anim_state()));
    }
}

#[test]
fn test_world_matrix_tracks_position() {
    let mut player = player();
    let mut input = InputState::default();
    player.set_destination(Vec3::new(0.0, 0.0, 10.0));

    step(&mut player, &mut input, 1.0);

    let origin = player.world_matrix().transform_point3(Vec3::ZERO);
    assert!(approx(origin, player.position()));
    assert!(approx(origin, Vec3::new(0.0, 0.0, 2.5)));
}
