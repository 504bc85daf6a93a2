//! The win celebration timeline: walk, burst, reveal, and the return to
//! the welcome screen, all on a headless app with manual time.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use drop_catcher::celebration::{
    self, Actor, BurstStarted, Celebration, CelebrationScene, CelebrationStage, FinalScoreScreen,
    PARTICLE_COUNT, WaterParticle,
};
use drop_catcher::core::{GameState, RoundStats};

fn celebration_app(score: u32) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app.insert_resource(RoundStats { score, water: 20 });
    app.add_event::<BurstStarted>();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<ButtonInput<MouseButton>>();
    app.init_resource::<Touches>();
    app.add_systems(OnEnter(GameState::Won), celebration::setup_celebration);
    app.add_systems(
        Update,
        (
            celebration::advance_stage,
            celebration::walk_actor,
            celebration::update_particles,
            celebration::handle_reveal_input,
        )
            .chain()
            .run_if(in_state(GameState::Won)),
    );
    app.add_systems(OnExit(GameState::Won), celebration::cleanup_celebration);
    // ~60 ticks per second, the cadence the per-tick decay is tuned for
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        16,
    )));
    app
}

fn enter_won(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Won);
    app.update();
}

fn stage(app: &App) -> CelebrationStage {
    app.world().resource::<Celebration>().stage
}

fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<C>>()
        .iter(app.world())
        .count()
}

/// Updates until the celebration reaches `target`, with a safety cap.
/// Both scripted stages last 5 s, ~313 ticks each at the manual cadence.
fn run_until_stage(app: &mut App, target: CelebrationStage) {
    for _ in 0..1000 {
        if stage(app) == target {
            return;
        }
        app.update();
    }
    panic!("celebration never reached {target:?}");
}

#[test]
fn walk_stage_shows_the_scene_and_actor() {
    let mut app = celebration_app(25);
    enter_won(&mut app);

    assert_eq!(stage(&app), CelebrationStage::Walk);
    assert_eq!(count::<Actor>(&mut app), 1);
    assert!(count::<CelebrationScene>(&mut app) > 0);
    assert_eq!(count::<WaterParticle>(&mut app), 0);
    assert_eq!(count::<FinalScoreScreen>(&mut app), 0);
}

#[test]
fn actor_walks_toward_the_village() {
    let mut app = celebration_app(25);
    enter_won(&mut app);

    let before = actor_x(&mut app);
    for _ in 0..100 {
        app.update();
    }
    let after = actor_x(&mut app);
    assert!(after > before, "actor must move right during the walk");
}

#[test]
fn burst_spawns_the_full_batch_and_plays_the_splash() {
    let mut app = celebration_app(25);
    enter_won(&mut app);

    run_until_stage(&mut app, CelebrationStage::Burst);

    assert_eq!(count::<WaterParticle>(&mut app), PARTICLE_COUNT);
    assert!(
        !app.world().resource::<Events<BurstStarted>>().is_empty(),
        "burst must request the splash sound"
    );
    // The actor popped: hidden, not despawned
    let hidden = app
        .world_mut()
        .query_filtered::<&Visibility, With<Actor>>()
        .iter(app.world())
        .all(|visibility| *visibility == Visibility::Hidden);
    assert!(hidden, "actor must be hidden once the burst starts");
}

#[test]
fn particles_fully_decay_before_the_reveal() {
    let mut app = celebration_app(25);
    enter_won(&mut app);
    run_until_stage(&mut app, CelebrationStage::Burst);

    // Alpha fades 0.01 per tick from 1.0, so ~100 ticks drain the batch,
    // well inside the five second burst window
    for _ in 0..105 {
        app.update();
    }

    assert_eq!(count::<WaterParticle>(&mut app), 0);
    assert_eq!(stage(&app), CelebrationStage::Burst, "reveal not due yet");
}

#[test]
fn particles_rise_then_gravity_wins() {
    let mut app = celebration_app(25);
    enter_won(&mut app);
    run_until_stage(&mut app, CelebrationStage::Burst);

    let start_y = lowest_particle_y(&mut app);
    app.update();
    let after_one = lowest_particle_y(&mut app);
    assert!(
        after_one < start_y,
        "all particles launch upward (y shrinks downward)"
    );

    // Velocity starts in [-22, -4] and gains 0.2 per tick, so within 110
    // ticks even the fastest particle is falling again, if still alive
    for _ in 0..110 {
        app.update();
    }
    assert_eq!(count::<WaterParticle>(&mut app), 0);
}

#[test]
fn reveal_shows_the_final_score_screen() {
    let mut app = celebration_app(25);
    enter_won(&mut app);

    run_until_stage(&mut app, CelebrationStage::Reveal);

    assert!(count::<FinalScoreScreen>(&mut app) > 0);
    assert_eq!(count::<WaterParticle>(&mut app), 0);
    assert_eq!(count::<CelebrationScene>(&mut app), 0, "scene is hidden");
    assert_eq!(count::<Actor>(&mut app), 0);
}

#[test]
fn return_action_goes_back_to_welcome_and_cleans_up() {
    let mut app = celebration_app(25);
    enter_won(&mut app);
    run_until_stage(&mut app, CelebrationStage::Reveal);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Space);
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>().get().clone();
    assert_eq!(state, GameState::Welcome);
    assert!(app.world().get_resource::<Celebration>().is_none());
    assert_eq!(count::<FinalScoreScreen>(&mut app), 0);
    assert_eq!(count::<CelebrationScene>(&mut app), 0);
    assert_eq!(count::<WaterParticle>(&mut app), 0);

    // Stray updates after the return must stay inert
    for _ in 0..10 {
        app.update();
    }
    assert!(app.world().get_resource::<Celebration>().is_none());
}

fn actor_x(app: &mut App) -> f32 {
    app.world_mut()
        .query_filtered::<&Transform, With<Actor>>()
        .iter(app.world())
        .map(|transform| transform.translation.x)
        .next()
        .unwrap_or_default()
}

fn lowest_particle_y(app: &mut App) -> f32 {
    app.world_mut()
        .query::<&WaterParticle>()
        .iter(app.world())
        .map(|particle| particle.pos.y)
        .fold(f32::INFINITY, f32::min)
}
