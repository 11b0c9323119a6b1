use bevy::prelude::*;

use strafebox::{camera, hud, motor, physics, player, world};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Strafebox".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(physics::PhysicsPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(motor::MotorPlugin)
        .add_plugins(camera::CameraPlugin)
        .add_plugins(hud::HudPlugin)
        .run();
}
