//! Movement helpers

use glam::{Quat, Vec3};

/// Unit vector towards `destination`, or zero when the player should stay put
///
/// The player stands still once within `arrive_threshold` of the destination
/// and while `breakdance_timer` is at or above `move_gate`.
pub fn movement_direction(
    position: Vec3,
    destination: Vec3,
    arrive_threshold: f32,
    breakdance_timer: f32,
    move_gate: f32,
) -> Vec3 {
    if position.distance(destination) > arrive_threshold && breakdance_timer < move_gate {
        (destination - position).normalize_or_zero()
    } else {
        Vec3::ZERO
    }
}

/// Yaw rotation turning the model's +Z forward onto `direction`
///
/// Returns `None` for directions without a horizontal component.
pub fn facing(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(flat.x.atan2(flat.z)))
}

/// Step `current` towards facing `direction` at `turn_rate` per second
pub fn turn_towards(current: Quat, direction: Vec3, turn_rate: f32, delta_time: f32) -> Quat {
    match facing(direction) {
        Some(goal) => current
            .slerp(goal, (turn_rate * delta_time).clamp(0.0, 1.0))
            .normalize(),
        None => current,
    }
}
