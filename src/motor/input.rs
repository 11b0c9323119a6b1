use bevy::prelude::*;

use super::components::MovementInput;

/// Feeds the fixed movement channels from the keyboard each rendered frame.
/// Values accumulate until the next fixed step drains them; only the
/// direction matters since the motor normalizes the result.
pub fn keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut inputs: Query<&mut MovementInput>,
) {
    for mut input in &mut inputs {
        let forward = keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]);
        let back = keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]);
        let left = keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
        let right = keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);

        input.add_move_forward((forward as i8 - back as i8) as f32);
        input.add_move_right((right as i8 - left as i8) as f32);

        if keyboard.just_pressed(KeyCode::Space) {
            input.request_jump();
        }
    }
}
