use avian3d::PhysicsPlugins;
use avian3d::math::Vector;
use avian3d::prelude::Gravity;
use bevy::prelude::*;

/// Physics setup. The engine is used as a geometry query provider and
/// component store only; the player body is kinematic and the motor moves it
/// itself, so gravity here matters solely for the motor's own math.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PhysicsPlugins::default())
            .insert_resource(Gravity(Vector::NEG_Y * 9.81));
    }
}
