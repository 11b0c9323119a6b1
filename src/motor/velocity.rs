//! Velocity integration: friction, capped acceleration, and jumps. All pure
//! functions over `Vec3`, called once per fixed step by the motor.

use bevy::prelude::*;

/// Accelerates `prev_velocity` along `wish_dir`, capping the speed gained so
/// the component along `wish_dir` never exceeds `max_speed`. A zero wish
/// direction returns the velocity unchanged; slowing down is friction's job.
pub fn accelerate(
    wish_dir: Vec3,
    prev_velocity: Vec3,
    accel: f32,
    max_speed: f32,
    dt: f32,
) -> Vec3 {
    let projected_speed = prev_velocity.dot(wish_dir);
    let mut accel_delta = accel * dt;

    // Cap the gain along the wish direction. Already past the cap means a
    // negative delta, which brakes rather than speeding up further.
    if projected_speed + accel_delta > max_speed {
        accel_delta = max_speed - projected_speed;
    }

    prev_velocity + wish_dir * accel_delta
}

/// Ground movement: friction first, then capped acceleration.
pub fn move_ground(
    wish_dir: Vec3,
    prev_velocity: Vec3,
    ground_friction: f32,
    ground_accel: f32,
    max_ground_speed: f32,
    dt: f32,
) -> Vec3 {
    let mut velocity = prev_velocity;
    let speed = velocity.length();
    if speed != 0.0 {
        // To avoid divide by zero errors
        let drop = speed * ground_friction * dt;
        velocity *= (speed - drop).max(0.0) / speed;
    }

    accelerate(wish_dir, velocity, ground_accel, max_ground_speed, dt)
}

/// Air movement: capped acceleration only, no friction.
pub fn move_air(
    wish_dir: Vec3,
    prev_velocity: Vec3,
    air_accel: f32,
    max_air_speed: f32,
    dt: f32,
) -> Vec3 {
    accelerate(wish_dir, prev_velocity, air_accel, max_air_speed, dt)
}

/// Adds the jump impulse along +Y when grounded; an airborne jump request is
/// dropped, not queued. The caller clears the pending-jump flag either way.
pub fn jump(prev_velocity: Vec3, is_grounded: bool, jump_force: f32) -> Vec3 {
    if is_grounded {
        prev_velocity + Vec3::Y * jump_force
    } else {
        prev_velocity
    }
}

/// Launch speed that peaks at `height` under constant `gravity`, from
/// v^2 = 2 * g * h.
pub fn jump_force_from_height(height: f32, gravity: f32) -> f32 {
    (2.0 * height * gravity).sqrt()
}

/// Removes the component of `v` along a unit `normal`.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * v.dot(normal)
}
