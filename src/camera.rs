use avian3d::prelude::Rotation;
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::player::Player;

/// First-person head camera. Yaw goes to the player body so aim and movement
/// share one orientation; pitch stays on the camera child and is clamped.
#[derive(Component)]
pub struct FirstPersonCamera {
    pub pitch: f32,
    /// Rotation rate in degrees per second at sensitivity 1.
    pub degrees_per_second: f32,
    pub sensitivity: f32,
    pub pitch_limit: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            degrees_per_second: 68.8,
            sensitivity: 1.0,
            pitch_limit: 1.5,
        }
    }
}

/// Mouse-look accumulator on the player entity. Input systems add to it over
/// the frame; it is applied and cleared once per frame.
#[derive(Component, Default)]
pub struct LookInput {
    look_up: f32,
    turn_right: f32,
}

impl LookInput {
    pub fn add_look_up(&mut self, value: f32) {
        self.look_up += value;
    }

    pub fn add_turn_right(&mut self, value: f32) {
        self.turn_right += value;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, grab_cursor)
            .add_systems(Update, (mouse_look_input, apply_look).chain());
    }
}

fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::Locked;
    window.cursor_options.visible = false;
}

fn mouse_look_input(
    mut mouse_motion: EventReader<MouseMotion>,
    mut looks: Query<&mut LookInput>,
) {
    let Ok(mut look) = looks.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        look.add_turn_right(event.delta.x);
        look.add_look_up(-event.delta.y);
    }
}

/// Applies the buffered look input: yaw on the player's physics rotation,
/// pitch on the head camera. Writing the avian `Rotation` directly keeps the
/// motor (which reads it for the wish direction) and the renderer in sync
/// without competing transform writes.
fn apply_look(
    time: Res<Time>,
    mut players: Query<(&mut Rotation, &mut LookInput), With<Player>>,
    mut cameras: Query<(&mut Transform, &mut FirstPersonCamera), Without<Player>>,
) {
    let Ok((mut rotation, mut look)) = players.single_mut() else {
        return;
    };
    let Ok((mut camera_transform, mut camera)) = cameras.single_mut() else {
        return;
    };

    let step = camera.degrees_per_second.to_radians() * camera.sensitivity * time.delta_secs();

    rotation.0 = Quat::from_rotation_y(-look.turn_right * step) * rotation.0;

    camera.pitch = (camera.pitch + look.look_up * step).clamp(-camera.pitch_limit, camera.pitch_limit);
    camera_transform.rotation = Quat::from_rotation_x(camera.pitch);

    look.clear();
}
