use bevy::prelude::*;

use crate::motor::components::PlayerMotor;

const GROUNDED_COLOR: Color = Color::srgb(0.2, 0.85, 0.2);
const AIRBORNE_COLOR: Color = Color::srgb(0.85, 0.2, 0.2);

/// Debug overlay: a speedometer reading the motor's observed velocity and an
/// indicator square recolored by grounded state.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(Update, (update_speedometer, update_grounded_indicator));
    }
}

#[derive(Component)]
struct Speedometer;

#[derive(Component)]
struct GroundedIndicator;

fn setup_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            bottom: Val::Px(12.0),
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            column_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                GroundedIndicator,
                Node {
                    width: Val::Px(16.0),
                    height: Val::Px(16.0),
                    ..default()
                },
                BackgroundColor(AIRBORNE_COLOR),
            ));
            parent.spawn((
                Speedometer,
                Text::new("0.00"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
            ));
        });
}

fn update_speedometer(
    motors: Query<&PlayerMotor>,
    mut texts: Query<&mut Text, With<Speedometer>>,
) {
    let (Ok(motor), Ok(mut text)) = (motors.single(), texts.single_mut()) else {
        return;
    };
    text.0 = format!("{:.2}", motor.actual_velocity.length());
}

fn update_grounded_indicator(
    motors: Query<&PlayerMotor>,
    mut indicators: Query<&mut BackgroundColor, With<GroundedIndicator>>,
) {
    let (Ok(motor), Ok(mut color)) = (motors.single(), indicators.single_mut()) else {
        return;
    };
    color.0 = if motor.is_grounded {
        GROUNDED_COLOR
    } else {
        AIRBORNE_COLOR
    };
}
