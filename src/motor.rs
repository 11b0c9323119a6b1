pub mod collision;
pub mod components;
pub mod ground;
pub mod input;
pub mod velocity;

use avian3d::prelude::*;
use bevy::prelude::*;

use components::{MovementInput, PlayerMotor};

/// Drives [`PlayerMotor`] bodies: buffered input comes in per frame, and once
/// per fixed step the motor classifies the ground, integrates velocity, and
/// resolves the resulting position out of any overlapping geometry.
pub struct MotorPlugin;

impl Plugin for MotorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (validate_motor_colliders, input::keyboard_input))
            .add_systems(FixedUpdate, update_motor);
    }
}

/// The motor issues box overlap queries against its own collider, so only a
/// cuboid shape is supported. Anything else is a setup mistake worth failing
/// loudly on, rather than misbehaving one query at a time.
fn validate_motor_colliders(motors: Query<(Entity, &Collider), Added<PlayerMotor>>) {
    for (entity, collider) in &motors {
        if collider.shape_scaled().as_cuboid().is_none() {
            panic!(
                "PlayerMotor on {entity} has an unsupported collider; only cuboid colliders work"
            );
        }
    }
}

/// One fixed simulation step per motor, in order: ground classification,
/// velocity integration from buffered input, gravity while airborne, position
/// integration, overlap resolution, and finally the observed velocity.
fn update_motor(
    time: Res<Time>,
    gravity: Res<Gravity>,
    query_pipeline: Res<SpatialQueryPipeline>,
    geometry: collision::StaticGeometry,
    mut motors: Query<(
        Entity,
        &Collider,
        &Rotation,
        &mut Position,
        &mut PlayerMotor,
        &mut MovementInput,
    )>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let gravity_magnitude = gravity.0.length();

    for (entity, collider, rotation, mut position, mut motor, mut input) in &mut motors {
        // 1. Ground classification from the current position. Never cached
        // across steps.
        let check_length = ground::check_length(gravity_magnitude, dt);
        match ground::classify(
            &query_pipeline,
            entity,
            collider,
            position.0,
            rotation.0,
            check_length,
        ) {
            ground::GroundCheck::Swept { normal, point } => {
                motor.is_grounded = ground::is_walkable(normal, motor.max_slope_angle);
                motor.ground_normal = normal;
                motor.last_ground_point = point;
            }
            ground::GroundCheck::Overlapping => {
                // Overlap contacts carry no usable normal; keep the last
                // swept one so slope projection still has something to use.
                motor.is_grounded = true;
            }
            ground::GroundCheck::Airborne => {
                motor.is_grounded = false;
                motor.ground_normal = Vec3::ZERO;
            }
        }

        // 2. Drain the input accumulator, exactly once per step.
        let local_wish = Vec3::new(input.move_right, 0.0, -input.move_forward);
        let jump_requested = input.jump;
        input.clear();

        let mut wish_dir = rotation.0 * local_wish.normalize_or_zero();
        if motor.is_grounded && motor.ground_normal != Vec3::ZERO {
            wish_dir = velocity::project_on_plane(wish_dir, motor.ground_normal);
        }

        // 3. Accelerate; the kinematic body carries no engine velocity, so
        // last step's computed velocity is the previous-velocity input.
        let prev_velocity = motor.last_velocity;
        let mut new_velocity = if motor.is_grounded {
            velocity::move_ground(
                wish_dir,
                prev_velocity,
                motor.ground_friction,
                motor.ground_acceleration,
                motor.max_ground_speed,
                dt,
            )
        } else {
            velocity::move_air(
                wish_dir,
                prev_velocity,
                motor.air_acceleration,
                motor.max_air_speed,
                dt,
            )
        };

        if jump_requested {
            let jump_force = velocity::jump_force_from_height(motor.jump_height, gravity_magnitude);
            new_velocity = velocity::jump(new_velocity, motor.is_grounded, jump_force);
        }

        // `target_velocity` is the velocity model's output, before gravity.
        motor.target_velocity = new_velocity;

        // 4. Gravity only contributes while airborne; on the ground it would
        // just fight the contact. It accrues into the carried velocity so
        // falls and jump arcs accumulate across steps.
        if !motor.is_grounded {
            new_velocity += gravity.0 * dt;
        }

        motor.last_velocity = new_velocity;

        // 5. Integrate, then push the desired position out of anything solid.
        let start_position = position.0;
        let desired = start_position + new_velocity * dt;
        let resolved = collision::resolve(&query_pipeline, &geometry, collider, desired, rotation.0);

        // 6. Commit and derive the observed velocity.
        position.0 = resolved;
        motor.previous_position = start_position;
        motor.actual_velocity = (resolved - start_position) / dt;
    }
}
