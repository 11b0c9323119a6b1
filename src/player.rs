use avian3d::prelude::{Collider, RigidBody};
use bevy::prelude::*;
use rand::seq::IteratorRandom;

use crate::camera::{FirstPersonCamera, LookInput};
use crate::motor::components::{MovementInput, PlayerMotor};
use crate::world::PlayerStart;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // PostStartup so the world's spawn points exist
        app.add_systems(PostStartup, spawn_player);
    }
}

#[derive(Component)]
pub struct Player;

/// Full extents of the player's box collider. The motor only supports a
/// single box shape per body.
pub const PLAYER_BOX: Vec3 = Vec3::new(0.8, 1.8, 0.8);

/// Camera height above the body's center.
const EYE_HEIGHT: f32 = 0.65;

fn spawn_player(
    mut commands: Commands,
    starts: Query<&Transform, With<PlayerStart>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::thread_rng();
    let spawn = starts
        .iter()
        .choose(&mut rng)
        .copied()
        .unwrap_or_else(|| Transform::from_xyz(0.0, 1.2, 0.0));

    info!("spawning player at {}", spawn.translation);

    commands
        .spawn((
            Player,
            RigidBody::Kinematic,
            Collider::cuboid(PLAYER_BOX.x, PLAYER_BOX.y, PLAYER_BOX.z),
            PlayerMotor::default(),
            MovementInput::default(),
            LookInput::default(),
            Mesh3d(meshes.add(Cuboid::from_size(PLAYER_BOX))),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.6, 0.3))),
            spawn,
        ))
        .with_children(|parent| {
            parent.spawn((
                FirstPersonCamera::default(),
                Camera3d::default(),
                Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
            ));
        });
}
