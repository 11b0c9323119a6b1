//! End-to-end motor steps against a headless app with real spatial queries.
//!
//! The spatial query pipeline is rebuilt by the physics schedule after the
//! motor runs, so the first tick after spawning sees an empty world; tests
//! always run at least a couple of ticks before asserting.

use std::time::Duration;

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use strafebox::motor::MotorPlugin;
use strafebox::motor::components::{MovementInput, PlayerMotor};

const FIXED_DT: f64 = 0.02;

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(TransformPlugin);
    app.insert_resource(bevy::scene::SceneSpawner::default());
    // The collider backend reads mesh assets even when no meshes exist.
    app.init_resource::<Assets<Mesh>>();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.add_plugins(PhysicsPlugins::default());
    app.add_plugins(MotorPlugin);
    app.insert_resource(Time::<Fixed>::from_seconds(FIXED_DT));
    // Manual clock control: every update advances exactly one fixed tick.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        FIXED_DT,
    )));
    app.finish();
    app.cleanup();

    // The very first update only starts the clock (zero delta).
    app.update();
    app
}

fn step(app: &mut App) {
    app.update();
}

fn spawn_ground(app: &mut App) {
    app.world_mut().spawn((
        RigidBody::Static,
        Collider::cuboid(40.0, 1.0, 40.0),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));
}

fn spawn_player(app: &mut App, transform: Transform) -> Entity {
    app.world_mut()
        .spawn((
            RigidBody::Kinematic,
            Collider::cuboid(0.8, 1.8, 0.8),
            PlayerMotor::default(),
            MovementInput::default(),
            transform,
        ))
        .id()
}

fn motor<'a>(app: &'a App, entity: Entity) -> &'a PlayerMotor {
    app.world().get::<PlayerMotor>(entity).unwrap()
}

#[test]
fn body_at_rest_on_flat_ground_is_grounded_with_zero_velocity() {
    let mut app = test_app();
    spawn_ground(&mut app);
    // feet 0.05 above the surface, well inside ground-check range
    let player = spawn_player(&mut app, Transform::from_xyz(0.0, 0.95, 0.0));

    for _ in 0..120 {
        step(&mut app);
    }

    let motor = motor(&app, player);
    assert!(motor.is_grounded, "resting body must classify as grounded");
    assert!(
        motor.actual_velocity.length() < 0.05,
        "resting body should not move, actual velocity {:?}",
        motor.actual_velocity
    );
}

#[test]
fn airborne_acceleration_reaches_accel_times_dt_in_one_step() {
    let mut app = test_app();
    // no geometry anywhere near: the body stays airborne
    let player = spawn_player(&mut app, Transform::from_xyz(0.0, 50.0, 0.0));
    // one tick for the physics backend to attach its components
    step(&mut app);

    app.world_mut()
        .get_mut::<MovementInput>(player)
        .unwrap()
        .add_move_forward(1.0);
    step(&mut app);

    let motor = motor(&app, player);
    assert!(!motor.is_grounded);
    // forward input with identity rotation wishes along -Z
    let horizontal = motor.target_velocity.with_y(0.0);
    assert!(
        (horizontal.length() - 2.0).abs() < 1e-3,
        "air accel 100 over dt 0.02 should reach speed 2.0, got {:?}",
        horizontal
    );
    assert!(horizontal.z < 0.0);
    // gravity stays out of the model output and accrues into the carried
    // velocity instead
    assert!(motor.target_velocity.y.abs() < 1e-6);
    assert!(motor.last_velocity.y < 0.0);
}

#[test]
fn grounded_jump_launches_with_derived_impulse() {
    let mut app = test_app();
    spawn_ground(&mut app);
    let player = spawn_player(&mut app, Transform::from_xyz(0.0, 0.95, 0.0));

    // settle until friction has bled off the residual fall velocity
    for _ in 0..100 {
        step(&mut app);
    }
    assert!(motor(&app, player).is_grounded);

    app.world_mut()
        .get_mut::<MovementInput>(player)
        .unwrap()
        .request_jump();
    step(&mut app);

    let m = motor(&app, player);
    let expected = (2.0_f32 * m.jump_height * 9.81).sqrt();
    assert!(
        (m.target_velocity.y - expected).abs() < 1e-2,
        "jump should launch at {expected}, got {}",
        m.target_velocity.y
    );

    // the request was consumed, not queued
    assert!(!app.world().get::<MovementInput>(player).unwrap().jump);
}

#[test]
fn airborne_jump_request_is_dropped() {
    let mut app = test_app();
    let player = spawn_player(&mut app, Transform::from_xyz(0.0, 50.0, 0.0));

    // one tick to attach physics components, one falling tick
    step(&mut app);
    step(&mut app);
    let falling_y = motor(&app, player).last_velocity.y;
    assert!(falling_y < 0.0);

    app.world_mut()
        .get_mut::<MovementInput>(player)
        .unwrap()
        .request_jump();
    step(&mut app);

    let m = motor(&app, player);
    assert!(
        m.last_velocity.y < falling_y,
        "an airborne jump must not add upward velocity"
    );
    assert!(!app.world().get::<MovementInput>(player).unwrap().jump);
}

#[test]
fn penetrating_spawn_is_pushed_out_of_the_ground() {
    let mut app = test_app();
    spawn_ground(&mut app);
    // center at 0.7: the box bottom sits 0.2 below the ground surface
    let player = spawn_player(&mut app, Transform::from_xyz(0.0, 0.7, 0.0));

    for _ in 0..10 {
        step(&mut app);
    }

    let position = app.world().get::<Position>(player).unwrap().0;
    assert!(
        (position.y - 0.9).abs() < 0.05,
        "body should rest with its bottom on the surface, center y {}",
        position.y
    );
}

#[test]
fn walkable_ramp_classifies_as_ground_with_its_normal() {
    let mut app = test_app();
    let angle = 20_f32.to_radians();
    app.world_mut().spawn((
        RigidBody::Static,
        Collider::cuboid(40.0, 1.0, 40.0),
        Transform::from_xyz(0.0, 0.0, 0.0).with_rotation(Quat::from_rotation_z(angle)),
    ));
    let player = spawn_player(&mut app, Transform::from_xyz(0.0, 1.65, 0.0));

    for _ in 0..3 {
        step(&mut app);
    }

    let m = motor(&app, player);
    assert!(m.is_grounded, "a 20 degree ramp is walkable");
    let tilt = m.ground_normal.angle_between(Vec3::Y);
    assert!(
        (tilt - angle).abs() < 0.05,
        "ground normal should tilt with the ramp, got {tilt}"
    );
}

#[test]
fn steep_ramp_does_not_classify_as_ground() {
    let mut app = test_app();
    let angle = 60_f32.to_radians();
    app.world_mut().spawn((
        RigidBody::Static,
        Collider::cuboid(40.0, 1.0, 40.0),
        Transform::from_xyz(0.0, 0.0, 0.0).with_rotation(Quat::from_rotation_z(angle)),
    ));
    // hover with a small gap above the inclined surface at x = 0
    let surface_y = (0.5 + 0.4 * angle.sin()) / angle.cos();
    let player = spawn_player(
        &mut app,
        Transform::from_xyz(0.0, surface_y + 0.9 + 0.05, 0.0),
    );

    // two ticks: one to build the query pipeline, one to classify
    step(&mut app);
    step(&mut app);

    let m = motor(&app, player);
    assert!(
        !m.is_grounded,
        "a 60 degree surface is past the max slope angle"
    );
    // the sweep still reports the contact normal even when too steep
    let tilt = m.ground_normal.angle_between(Vec3::Y);
    assert!(
        (tilt - angle).abs() < 0.05,
        "contact normal should still be recorded, got {tilt}"
    );
}
