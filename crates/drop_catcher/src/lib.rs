use bevy::prelude::*;
use game_helpers::floating_score::animate_floating_scores;

pub mod audio;
pub mod celebration;
pub mod core;
pub mod difficulty;
pub mod game_over;
pub mod gameplay;
pub mod geometry;
pub mod welcome;

use crate::celebration::BurstStarted;
use crate::core::{CatchEvent, GameState, RoundStats, SelectedDifficulty};
use crate::difficulty::Difficulty;

/// Entry point for the game
pub fn run(difficulty: Difficulty) {
    let mut app =
        game_helpers::get_default_app(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    app.init_state::<GameState>()
        .init_resource::<RoundStats>()
        .insert_resource(SelectedDifficulty(difficulty))
        .add_event::<CatchEvent>()
        .add_event::<BurstStarted>()
        .add_plugins(audio::GameAudioPlugin)
        .add_systems(Startup, setup_camera)
        // Welcome state
        .add_systems(OnEnter(GameState::Welcome), welcome::spawn_welcome_screen)
        .add_systems(
            Update,
            (
                welcome::handle_welcome_input,
                welcome::update_difficulty_highlight,
            )
                .run_if(in_state(GameState::Welcome)),
        )
        .add_systems(OnExit(GameState::Welcome), welcome::despawn_welcome_screen)
        // Playing state. The countdown goes first so the win/lose check
        // never sees a catch from the same tick.
        .add_systems(OnEnter(GameState::Playing), gameplay::spawn_game_elements)
        .add_systems(
            Update,
            (
                gameplay::update_countdown,
                gameplay::handle_input,
                gameplay::spawn_drops,
                gameplay::move_drops,
                gameplay::update_hud,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(
            Update,
            (
                gameplay::sync_bucket_transform,
                gameplay::sync_drop_transforms,
                animate_floating_scores,
            )
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(OnExit(GameState::Playing), gameplay::cleanup_game)
        // Won state
        .add_systems(OnEnter(GameState::Won), celebration::setup_celebration)
        .add_systems(
            Update,
            (
                celebration::advance_stage,
                celebration::walk_actor,
                celebration::update_particles,
                celebration::render_particles,
                celebration::handle_reveal_input,
            )
                .chain()
                .run_if(in_state(GameState::Won)),
        )
        .add_systems(OnExit(GameState::Won), celebration::cleanup_celebration)
        // Lost state
        .add_systems(OnEnter(GameState::Lost), game_over::spawn_fail_screen)
        .add_systems(
            Update,
            game_over::handle_fail_input.run_if(in_state(GameState::Lost)),
        )
        .add_systems(OnExit(GameState::Lost), game_over::cleanup_fail_screen);

    app.run();
}

/// Sets up the main 2D camera
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
