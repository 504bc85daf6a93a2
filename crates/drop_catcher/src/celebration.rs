//! The win-only celebration: an actor walks to the village, pops into a
//! water burst, then the final score is revealed. Three stages on fixed
//! timers; every system here is gated on the Won state, so anything that
//! fires after the player returns to the welcome screen is a no-op.

use bevy::prelude::*;
use game_helpers::input::just_pressed_screen_position;
use tracing::info;

use crate::core::config::{PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH};
use crate::core::{GameState, RoundStats};
use crate::geometry;

const WALK_SECS: f32 = 5.0;
const BURST_SECS: f32 = 5.0;

pub const PARTICLE_COUNT: usize = 500;
/// Burst origin as a fraction of the play area
const BURST_ORIGIN: Vec2 = Vec2::new(0.65, 0.75);
/// Vertical velocity gained per tick
const PARTICLE_GRAVITY: f32 = 0.2;
/// Opacity lost per tick
const PARTICLE_FADE: f32 = 0.01;

const ACTOR_SIZE: Vec2 = Vec2::new(36.0, 46.0);

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum CelebrationStage {
    /// Actor crosses the scene toward the village
    Walk,
    /// Particle fountain at the spot where the actor popped
    Burst,
    /// Final score screen, waiting for the return action
    Reveal,
}

/// Drives the scripted timeline
#[derive(Resource)]
pub struct Celebration {
    pub stage: CelebrationStage,
    pub timer: Timer,
}

/// Component marker for the village scene backdrop entities
#[derive(Component)]
pub struct CelebrationScene;

/// The walking actor
#[derive(Component)]
pub struct Actor {
    /// World x where the walk ends
    pub target_x: f32,
    /// World pixels per second
    pub speed: f32,
}

/// One drop of the water burst. Positions and velocities live in play
/// area coordinates and advance by whole ticks, not elapsed time.
#[derive(Component)]
pub struct WaterParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
}

/// Component marker for the final score screen
#[derive(Component)]
pub struct FinalScoreScreen;

/// Sent once when the burst stage begins; the audio module plays the
/// splash from it.
#[derive(Event)]
pub struct BurstStarted;

/// Builds the village scene and starts the walk stage
pub fn setup_celebration(mut commands: Commands) {
    info!("round won, starting celebration");

    commands.insert_resource(Celebration {
        stage: CelebrationStage::Walk,
        timer: Timer::from_seconds(WALK_SECS, TimerMode::Once),
    });

    // Sky backdrop
    commands.spawn((
        Sprite {
            color: Color::srgb(0.5, 0.72, 0.9),
            custom_size: Some(Vec2::new(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -2.0),
        CelebrationScene,
    ));
    // Ground strip under the walk line
    commands.spawn((
        Sprite {
            color: Color::srgb(0.8, 0.7, 0.45),
            custom_size: Some(Vec2::new(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT * 0.25)),
            ..default()
        },
        Transform::from_xyz(0.0, -PLAY_AREA_HEIGHT * 0.375, -1.0),
        CelebrationScene,
    ));
    // A couple of village huts on the right
    for (x, size) in [(70.0, 70.0), (130.0, 54.0)] {
        commands.spawn((
            Sprite {
                color: Color::srgb(0.55, 0.4, 0.25),
                custom_size: Some(Vec2::new(size, size)),
                ..default()
            },
            Transform::from_xyz(x, -PLAY_AREA_HEIGHT * 0.25 + size / 2.0, -1.0),
            CelebrationScene,
        ));
    }

    // The actor pops exactly at the burst origin
    let start = geometry::world_point(Vec2::new(
        ACTOR_SIZE.x / 2.0,
        PLAY_AREA_HEIGHT * BURST_ORIGIN.y,
    ));
    let target_x = geometry::world_point(Vec2::new(
        PLAY_AREA_WIDTH * BURST_ORIGIN.x,
        PLAY_AREA_HEIGHT * BURST_ORIGIN.y,
    ))
    .x;
    commands.spawn((
        Sprite {
            color: Color::srgb(0.85, 0.65, 0.4),
            custom_size: Some(ACTOR_SIZE),
            ..default()
        },
        Transform::from_translation(start.extend(0.0)),
        Actor {
            target_x,
            speed: (target_x - start.x) / WALK_SECS,
        },
    ));
}

/// Ticks the stage timer and performs the two scripted transitions
pub fn advance_stage(
    mut commands: Commands,
    time: Res<Time>,
    mut celebration: ResMut<Celebration>,
    stats: Res<RoundStats>,
    mut burst_events: EventWriter<BurstStarted>,
    mut actors: Query<(Entity, &mut Visibility), With<Actor>>,
    scene: Query<Entity, With<CelebrationScene>>,
    particles: Query<Entity, With<WaterParticle>>,
) {
    celebration.timer.tick(time.delta());
    if !celebration.timer.just_finished() {
        return;
    }

    match celebration.stage {
        CelebrationStage::Walk => {
            // The actor pops: hide it, splash, burst
            for (_, mut visibility) in &mut actors {
                *visibility = Visibility::Hidden;
            }
            spawn_burst(&mut commands);
            burst_events.send(BurstStarted);
            celebration.stage = CelebrationStage::Burst;
            celebration.timer = Timer::from_seconds(BURST_SECS, TimerMode::Once);
        }
        CelebrationStage::Burst => {
            for entity in &particles {
                commands.entity(entity).despawn();
            }
            for (entity, _) in &actors {
                commands.entity(entity).despawn();
            }
            for entity in &scene {
                commands.entity(entity).despawn();
            }
            spawn_final_score_screen(&mut commands, stats.score);
            celebration.stage = CelebrationStage::Reveal;
        }
        CelebrationStage::Reveal => {}
    }
}

/// Walks the actor toward the village at a pace that lands it there
/// right when the walk stage ends
pub fn walk_actor(time: Res<Time>, mut actors: Query<(&Actor, &mut Transform)>) {
    for (actor, mut transform) in &mut actors {
        transform.translation.x =
            (transform.translation.x + actor.speed * time.delta_secs()).min(actor.target_x);
    }
}

/// One burst tick: integrate velocity, pull down, fade out
pub fn update_particles(
    mut commands: Commands,
    mut particles: Query<(Entity, &mut WaterParticle)>,
) {
    for (entity, mut particle) in &mut particles {
        let vel = particle.vel;
        particle.pos += vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.alpha -= PARTICLE_FADE;
        if particle.alpha <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Draws the particles as alpha blended circles
pub fn render_particles(particles: Query<&WaterParticle>, mut gizmos: Gizmos) {
    for particle in &particles {
        gizmos.circle_2d(
            geometry::world_point(particle.pos),
            particle.size,
            Color::srgba(0.18, 0.66, 1.0, particle.alpha),
        );
    }
}

/// Return action on the final score screen
pub fn handle_reveal_input(
    celebration: Res<Celebration>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if celebration.stage != CelebrationStage::Reveal {
        return;
    }
    let key_pressed =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::Enter);
    if key_pressed || just_pressed_screen_position(&mouse_input, &touch_input, &windows).is_some() {
        next_state.set(GameState::Welcome);
    }
}

/// Clears everything the celebration created
pub fn cleanup_celebration(
    mut commands: Commands,
    query: Query<
        Entity,
        Or<(
            With<CelebrationScene>,
            With<Actor>,
            With<WaterParticle>,
            With<FinalScoreScreen>,
        )>,
    >,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<Celebration>();
}

/// Spawns the full batch of burst particles at the pop position
fn spawn_burst(commands: &mut Commands) {
    let origin = Vec2::new(
        PLAY_AREA_WIDTH * BURST_ORIGIN.x,
        PLAY_AREA_HEIGHT * BURST_ORIGIN.y,
    );
    for _ in 0..PARTICLE_COUNT {
        commands.spawn(WaterParticle {
            pos: origin,
            vel: Vec2::new(
                (fastrand::f32() - 0.5) * 18.0,
                -(fastrand::f32() * 18.0 + 4.0),
            ),
            size: fastrand::f32() * 7.0 + 3.0,
            alpha: 1.0,
        });
    }
}

fn spawn_final_score_screen(commands: &mut Commands, score: u32) {
    commands.spawn((
        FinalScoreScreen,
        Sprite {
            color: Color::srgba(0.0, 0.0, 0.0, 0.8),
            custom_size: Some(Vec2::new(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
    commands.spawn((
        FinalScoreScreen,
        Text2d::new("The village has water!"),
        TextFont {
            font_size: 36.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, PLAY_AREA_HEIGHT / 4.0, 1.0),
    ));
    commands.spawn((
        FinalScoreScreen,
        Text2d::new(format!("Final Score: {score}")),
        TextFont {
            font_size: 32.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, 0.0, 1.0),
    ));
    commands.spawn((
        FinalScoreScreen,
        Text2d::new("Tap to return"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, -PLAY_AREA_HEIGHT / 4.0, 1.0),
    ));
}
