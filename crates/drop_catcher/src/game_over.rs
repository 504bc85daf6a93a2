use bevy::prelude::*;
use game_helpers::input::just_pressed_screen_position;

use crate::core::config::{PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH};
use crate::core::{GameState, RoundStats};

/// Component marker for failure screen entities
#[derive(Component)]
pub struct FailScreen;

/// Spawns the failure screen with the final score
pub fn spawn_fail_screen(mut commands: Commands, stats: Res<RoundStats>) {
    // Semi-transparent overlay
    commands.spawn((
        FailScreen,
        Sprite {
            color: Color::srgba(0.0, 0.0, 0.0, 0.8),
            custom_size: Some(Vec2::new(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    commands.spawn((
        FailScreen,
        Text2d::new("Out of Time!"),
        TextFont {
            font_size: 44.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, PLAY_AREA_HEIGHT / 4.0, 1.0),
    ));

    commands.spawn((
        FailScreen,
        Text2d::new(format!("Final Score: {}", stats.score)),
        TextFont {
            font_size: 32.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, 0.0, 1.0),
    ));

    commands.spawn((
        FailScreen,
        Text2d::new("Tap to Try Again"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, -PLAY_AREA_HEIGHT / 4.0, 1.0),
    ));
}

/// Restart action back to the welcome screen
pub fn handle_fail_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let key_pressed =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::Enter);
    if key_pressed || just_pressed_screen_position(&mouse_input, &touch_input, &windows).is_some() {
        next_state.set(GameState::Welcome);
    }
}

/// Cleans up the failure screen
pub fn cleanup_fail_screen(mut commands: Commands, query: Query<Entity, With<FailScreen>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
