use std::f32::consts::PI;

use avian3d::prelude::{Collider, RigidBody};
use bevy::pbr::CascadeShadowConfigBuilder;
use bevy::prelude::*;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup);
    }
}

/// Marks a transform the player may be spawned at.
#[derive(Component)]
pub struct PlayerStart;

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_material = materials.add(Color::srgb(0.35, 0.5, 0.35));
    let block_material = materials.add(Color::srgb(0.8, 0.7, 0.6));
    let ramp_material = materials.add(Color::srgb(0.5, 0.55, 0.7));

    // Ground slab
    commands.spawn((
        RigidBody::Static,
        Collider::cuboid(100.0, 0.5, 100.0),
        Mesh3d(meshes.add(Cuboid::new(100.0, 0.5, 100.0))),
        MeshMaterial3d(ground_material),
        Transform::from_xyz(0.0, -0.25, 0.0),
    ));

    // Boxes to bump into and jump onto
    for (size, position) in [
        (Vec3::new(2.0, 1.0, 2.0), Vec3::new(4.0, 0.5, -3.0)),
        (Vec3::new(1.0, 2.0, 4.0), Vec3::new(-5.0, 1.0, -2.0)),
        (Vec3::new(3.0, 0.6, 3.0), Vec3::new(0.0, 0.3, -8.0)),
    ] {
        commands.spawn((
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(block_material.clone()),
            Transform::from_translation(position),
        ));
    }

    // A walkable ramp and one too steep to stand on
    commands.spawn((
        RigidBody::Static,
        Collider::cuboid(8.0, 0.5, 4.0),
        Mesh3d(meshes.add(Cuboid::new(8.0, 0.5, 4.0))),
        MeshMaterial3d(ramp_material.clone()),
        Transform::from_xyz(8.0, 1.0, 4.0).with_rotation(Quat::from_rotation_z(PI / 9.0)),
    ));
    commands.spawn((
        RigidBody::Static,
        Collider::cuboid(8.0, 0.5, 4.0),
        Mesh3d(meshes.add(Cuboid::new(8.0, 0.5, 4.0))),
        MeshMaterial3d(ramp_material),
        Transform::from_xyz(-9.0, 2.0, 6.0).with_rotation(Quat::from_rotation_z(-PI / 3.0)),
    ));

    // Light
    commands.spawn((
        Transform::from_rotation(Quat::from_euler(EulerRot::ZYX, 0.0, 1.0, -PI / 4.)),
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        CascadeShadowConfigBuilder {
            first_cascade_far_bound: 200.0,
            maximum_distance: 400.0,
            ..default()
        }
        .build(),
    ));

    // Spawn points for the player
    commands.spawn((PlayerStart, Transform::from_xyz(0.0, 1.2, 6.0)));
    commands.spawn((
        PlayerStart,
        Transform::from_xyz(-3.0, 1.2, -4.0).with_rotation(Quat::from_rotation_y(PI)),
    ));
}
