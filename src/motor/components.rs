use bevy::prelude::*;

/// Buffered movement input. Per-frame input systems add into it; the motor
/// drains and clears it exactly once per fixed step. Double-clearing or
/// skipping the clear is a correctness bug, not a tuning issue.
#[derive(Component, Default, Debug)]
pub struct MovementInput {
    pub move_forward: f32,
    pub move_right: f32,
    pub jump: bool,
}

impl MovementInput {
    pub fn add_move_forward(&mut self, value: f32) {
        self.move_forward += value;
    }

    pub fn add_move_right(&mut self, value: f32) {
        self.move_right += value;
    }

    pub fn request_jump(&mut self) {
        self.jump = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Movement tunables plus the per-step state the motor owns. `is_grounded`
/// and `actual_velocity` are the surface read by downstream consumers such as
/// the HUD.
#[derive(Component, Debug)]
pub struct PlayerMotor {
    pub ground_acceleration: f32,
    pub max_ground_speed: f32,
    pub ground_friction: f32,
    pub air_acceleration: f32,
    pub max_air_speed: f32,
    /// Peak height of a jump; the impulse is derived from it and gravity.
    pub jump_height: f32,
    /// Steepest surface tilt from +Y that still counts as ground, in radians.
    pub max_slope_angle: f32,

    pub target_velocity: Vec3,
    pub last_velocity: Vec3,
    pub actual_velocity: Vec3,
    pub is_grounded: bool,
    pub ground_normal: Vec3,
    pub last_ground_point: Vec3,
    /// Position at the start of the last step, for observed-velocity readers.
    pub previous_position: Vec3,
}

impl Default for PlayerMotor {
    fn default() -> Self {
        Self {
            ground_acceleration: 300.0,
            max_ground_speed: 10.0,
            ground_friction: 3.0,
            air_acceleration: 100.0,
            max_air_speed: 15.0,
            jump_height: 1.2,
            max_slope_angle: 45_f32.to_radians(),

            target_velocity: Vec3::ZERO,
            last_velocity: Vec3::ZERO,
            actual_velocity: Vec3::ZERO,
            is_grounded: false,
            ground_normal: Vec3::ZERO,
            last_ground_point: Vec3::ZERO,
            previous_position: Vec3::ZERO,
        }
    }
}
