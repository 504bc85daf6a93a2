use bevy::prelude::*;
use game_helpers::input::just_pressed_screen_position;
use strum::IntoEnumIterator;

use crate::core::config::{PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH};
use crate::core::{GameState, SelectedDifficulty};
use crate::difficulty::Difficulty;
use crate::geometry;

/// Component marker for welcome screen entities
#[derive(Component)]
pub struct WelcomeScreen;

/// One selectable difficulty row on the welcome screen
#[derive(Component)]
pub struct DifficultyOption(pub Difficulty);

/// Play area y of the first difficulty row's center
const OPTIONS_TOP: f32 = 280.0;
const OPTION_ROW_HEIGHT: f32 = 40.0;

const SELECTED_COLOR: Color = Color::srgb(1.0, 0.84, 0.0);

/// Spawns the title, instructions and difficulty rows
pub fn spawn_welcome_screen(mut commands: Commands, selected: Res<SelectedDifficulty>) {
    let welcome_entity = commands
        .spawn((WelcomeScreen, Transform::default(), Visibility::Visible))
        .id();

    commands.entity(welcome_entity).with_children(|parent| {
        parent.spawn((
            Text2d::new("Drop Catcher"),
            TextFont {
                font_size: 40.0,
                ..default()
            },
            TextLayout::new_with_justify(JustifyText::Center),
            TextColor(Color::WHITE),
            Transform::from_translation(Vec3::new(0.0, PLAY_AREA_HEIGHT / 4.0, 0.0)),
        ));

        parent.spawn((
            Text2d::new("Catch the clean drops,\ndodge the dirty ones.\nFill the meter before time runs out!"),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextLayout::new_with_justify(JustifyText::Center),
            TextColor(Color::srgb(0.8, 0.8, 0.8)),
            Transform::from_translation(Vec3::new(0.0, 90.0, 0.0)),
        ));

        for (index, difficulty) in Difficulty::iter().enumerate() {
            let row_y = option_row_center(index);
            let color = if difficulty == selected.0 {
                SELECTED_COLOR
            } else {
                Color::WHITE
            };
            parent.spawn((
                Text2d::new(format!("{}. {difficulty}", index + 1)),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextLayout::new_with_justify(JustifyText::Center),
                TextColor(color),
                Transform::from_translation(
                    geometry::world_point(Vec2::new(PLAY_AREA_WIDTH / 2.0, row_y)).extend(0.0),
                ),
                DifficultyOption(difficulty),
            ));
        }

        parent.spawn((
            Text2d::new("Tap or press Space to start"),
            TextFont {
                font_size: 24.0,
                ..default()
            },
            TextLayout::new_with_justify(JustifyText::Center),
            TextColor(Color::WHITE),
            Transform::from_translation(Vec3::new(0.0, -PLAY_AREA_HEIGHT / 4.0, 0.0)),
        ));
    });
}

/// Keeps the selected row highlighted
pub fn update_difficulty_highlight(
    selected: Res<SelectedDifficulty>,
    mut options: Query<(&DifficultyOption, &mut TextColor)>,
) {
    for (option, mut color) in &mut options {
        color.0 = if option.0 == selected.0 {
            SELECTED_COLOR
        } else {
            Color::WHITE
        };
    }
}

/// Handles difficulty selection and the start action. Arrow keys or the
/// digit keys pick a preset; tapping a row picks it too. Space, Enter or
/// a tap anywhere else starts the round.
pub fn handle_welcome_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    mut selected: ResMut<SelectedDifficulty>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        selected.0 = cycle_up(selected.0);
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        selected.0 = cycle_down(selected.0);
    }
    for (key, difficulty) in [
        (KeyCode::Digit1, Difficulty::Easy),
        (KeyCode::Digit2, Difficulty::Medium),
        (KeyCode::Digit3, Difficulty::Hard),
    ] {
        if keyboard.just_pressed(key) {
            selected.0 = difficulty;
        }
    }

    if keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::Enter) {
        next_state.set(GameState::Playing);
        return;
    }

    if let Some(screen_pos) = just_pressed_screen_position(&mouse_input, &touch_input, &windows) {
        let Ok(window) = windows.get_single() else {
            return;
        };
        let play = geometry::screen_to_play(screen_pos, Vec2::new(window.width(), window.height()));
        if let Some(difficulty) = option_at(play.y) {
            selected.0 = difficulty;
        } else {
            next_state.set(GameState::Playing);
        }
    }
}

/// Cleans up the welcome screen by despawning its entities
pub fn despawn_welcome_screen(mut commands: Commands, query: Query<Entity, With<WelcomeScreen>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

fn option_row_center(index: usize) -> f32 {
    OPTIONS_TOP + index as f32 * OPTION_ROW_HEIGHT
}

/// Maps a play area y to the difficulty row it lands on, if any
fn option_at(y: f32) -> Option<Difficulty> {
    Difficulty::iter()
        .enumerate()
        .find(|(index, _)| (y - option_row_center(*index)).abs() <= OPTION_ROW_HEIGHT / 2.0)
        .map(|(_, difficulty)| difficulty)
}

const fn cycle_up(difficulty: Difficulty) -> Difficulty {
    match difficulty {
        Difficulty::Easy => Difficulty::Hard,
        Difficulty::Medium => Difficulty::Easy,
        Difficulty::Hard => Difficulty::Medium,
    }
}

const fn cycle_down(difficulty: Difficulty) -> Difficulty {
    match difficulty {
        Difficulty::Easy => Difficulty::Medium,
        Difficulty::Medium => Difficulty::Hard,
        Difficulty::Hard => Difficulty::Easy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_map_back_to_their_difficulty() {
        assert_eq!(option_at(OPTIONS_TOP), Some(Difficulty::Easy));
        assert_eq!(
            option_at(OPTIONS_TOP + OPTION_ROW_HEIGHT),
            Some(Difficulty::Medium)
        );
        assert_eq!(
            option_at(OPTIONS_TOP + 2.0 * OPTION_ROW_HEIGHT + 5.0),
            Some(Difficulty::Hard)
        );
    }

    #[test]
    fn positions_outside_the_rows_start_the_round() {
        assert_eq!(option_at(0.0), None);
        assert_eq!(option_at(OPTIONS_TOP + 10.0 * OPTION_ROW_HEIGHT), None);
    }

    #[test]
    fn cycling_wraps_both_ways() {
        assert_eq!(cycle_down(Difficulty::Hard), Difficulty::Easy);
        assert_eq!(cycle_up(Difficulty::Easy), Difficulty::Hard);
        assert_eq!(cycle_up(cycle_down(Difficulty::Medium)), Difficulty::Medium);
    }
}
