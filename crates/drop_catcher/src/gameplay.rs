use bevy::prelude::*;
use game_helpers::floating_score::{FloatingScore, spawn_floating_score};
use game_helpers::input::pressed_screen_position;
use tracing::info;

use crate::core::config::{
    BAD_DROP_CHANCE, BUCKET_SIZE, DROP_SIZE, PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH,
};
use crate::core::{
    Bucket, CatchEvent, DropKind, FallingDrop, GameState, RoundCountdown, RoundSettings,
    RoundStats, SelectedDifficulty, SpawnTimer, resolve_outcome,
};
use crate::geometry;

/// Component tag for the score display
#[derive(Component)]
pub struct ScoreDisplay;

/// Component tag for the countdown display
#[derive(Component)]
pub struct TimerDisplay;

/// Component tag for the water meter background bar
#[derive(Component)]
pub struct WaterMeter;

/// Component tag for the water meter fill bar
#[derive(Component)]
pub struct WaterMeterFill;

/// Component tag for the compact "caught / goal" readout
#[derive(Component)]
pub struct WaterReadout;

const BUCKET_COLOR: Color = Color::srgb(0.76, 0.6, 0.32);
const GOOD_DROP_COLOR: Color = Color::srgb(0.18, 0.66, 1.0);
const BAD_DROP_COLOR: Color = Color::srgb(0.45, 0.3, 0.14);
const METER_SIZE: Vec2 = Vec2::new(200.0, 14.0);

/// Sets up a fresh round: resets the counters, clears anything left over
/// from a previous round and spawns the bucket and HUD.
pub fn spawn_game_elements(
    mut commands: Commands,
    selected: Res<SelectedDifficulty>,
    mut stats: ResMut<RoundStats>,
    drops: Query<Entity, With<FallingDrop>>,
) {
    let settings = selected.0.settings();
    info!("starting {} round", selected.0);

    // A round always begins with zero drops in flight
    for entity in &drops {
        commands.entity(entity).despawn();
    }

    *stats = RoundStats::default();
    commands.insert_resource(RoundSettings(settings));
    commands.insert_resource(RoundCountdown::new(settings.round_secs));
    commands.insert_resource(SpawnTimer(Timer::from_seconds(
        settings.spawn_interval_secs,
        TimerMode::Repeating,
    )));

    // Bucket starts centered near the bottom of the play area
    let bucket_x = (PLAY_AREA_WIDTH - BUCKET_SIZE.x) / 2.0;
    commands.spawn((
        Sprite {
            color: BUCKET_COLOR,
            custom_size: Some(BUCKET_SIZE),
            ..default()
        },
        Transform::from_translation(
            geometry::play_to_world(geometry::bucket_rect(bucket_x).min, BUCKET_SIZE).extend(0.0),
        ),
        Bucket { x: bucket_x },
    ));

    // Score readout, top left
    commands.spawn((
        Text2d::new("Score: 0"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Left),
        Transform::from_xyz(-PLAY_AREA_WIDTH / 2.0 + 50.0, PLAY_AREA_HEIGHT / 2.0 - 24.0, 1.0),
        ScoreDisplay,
    ));

    // Countdown readout, top right
    commands.spawn((
        Text2d::new(format!("Time: {}", settings.round_secs)),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Right),
        Transform::from_xyz(PLAY_AREA_WIDTH / 2.0 - 50.0, PLAY_AREA_HEIGHT / 2.0 - 24.0, 1.0),
        TimerDisplay,
    ));

    // Water meter: background bar plus a left anchored fill bar
    commands.spawn((
        Sprite {
            color: Color::srgb(0.12, 0.14, 0.2),
            custom_size: Some(METER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, PLAY_AREA_HEIGHT / 2.0 - 54.0, 0.0),
        WaterMeter,
    ));
    commands.spawn((
        Sprite {
            color: GOOD_DROP_COLOR,
            custom_size: Some(Vec2::new(0.0, METER_SIZE.y - 4.0)),
            ..default()
        },
        Transform::from_xyz(0.0, PLAY_AREA_HEIGHT / 2.0 - 54.0, 1.0),
        WaterMeterFill,
    ));
    commands.spawn((
        Text2d::new(stats.water_readout(settings.water_goal)),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        Transform::from_xyz(0.0, PLAY_AREA_HEIGHT / 2.0 - 78.0, 1.0),
        WaterReadout,
    ));
}

/// Moves the bucket from key presses and pointer drags, clamped to the
/// play area. Only runs while the round is in progress.
pub fn handle_input(
    settings: Res<RoundSettings>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    mut bucket_query: Query<&mut Bucket>,
) {
    let Ok(mut bucket) = bucket_query.get_single_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        bucket.x = geometry::clamp_bucket_x(bucket.x - settings.0.bucket_step);
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        bucket.x = geometry::clamp_bucket_x(bucket.x + settings.0.bucket_step);
    }

    if let Some(screen_pos) = pressed_screen_position(&mouse_input, &touch_input, &windows) {
        let Ok(window) = windows.get_single() else {
            return;
        };
        let play = geometry::screen_to_play(screen_pos, Vec2::new(window.width(), window.height()));
        bucket.x = geometry::clamp_bucket_x(play.x - BUCKET_SIZE.x / 2.0);
    }
}

/// Spawns a new drop at the configured cadence: uniform random x, one in
/// four drops is bad.
pub fn spawn_drops(
    mut commands: Commands,
    time: Res<Time>,
    mut spawn_timer: ResMut<SpawnTimer>,
) {
    spawn_timer.0.tick(time.delta());
    if !spawn_timer.0.just_finished() {
        return;
    }

    let x = fastrand::f32() * (PLAY_AREA_WIDTH - DROP_SIZE.x);
    let kind = if fastrand::f32() < BAD_DROP_CHANCE {
        DropKind::Bad
    } else {
        DropKind::Good
    };
    let pos = Vec2::new(x, 0.0);

    commands.spawn((
        Sprite {
            color: match kind {
                DropKind::Good => GOOD_DROP_COLOR,
                DropKind::Bad => BAD_DROP_COLOR,
            },
            custom_size: Some(DROP_SIZE),
            ..default()
        },
        Transform::from_translation(geometry::play_to_world(pos, DROP_SIZE).extend(0.0)),
        FallingDrop { pos, kind },
    ));
}

/// Advances every drop one tick and resolves catches against the swept
/// region of the move, so fast drops cannot tunnel through the bucket.
pub fn move_drops(
    mut commands: Commands,
    settings: Res<RoundSettings>,
    mut stats: ResMut<RoundStats>,
    mut catch_events: EventWriter<CatchEvent>,
    mut drops: Query<(Entity, &mut FallingDrop)>,
    bucket_query: Query<&Bucket>,
) {
    let Ok(bucket) = bucket_query.get_single() else {
        return;
    };
    let bucket_box = geometry::bucket_rect(bucket.x);

    for (entity, mut drop) in &mut drops {
        let before = geometry::drop_rect(drop.pos);
        drop.pos.y += settings.0.fall_speed;
        let after = geometry::drop_rect(drop.pos);

        if geometry::overlaps(geometry::swept(before, after), bucket_box) {
            commands.entity(entity).despawn();
            stats.apply_catch(drop.kind, settings.0.water_goal);
            catch_events.send(CatchEvent {
                kind: drop.kind,
                position: drop.pos,
            });
        } else if drop.pos.y > PLAY_AREA_HEIGHT {
            // A full drop height below the bottom edge; gone without scoring
            commands.entity(entity).despawn();
        }
    }
}

/// Ticks the once-per-second countdown and resolves the round the
/// instant it reaches zero. The decision happens here, synchronously
/// after the decrement, before any catch of the same tick is processed;
/// the `remaining > 0` guard makes a second evaluation impossible.
pub fn update_countdown(
    time: Res<Time>,
    mut countdown: ResMut<RoundCountdown>,
    stats: Res<RoundStats>,
    settings: Res<RoundSettings>,
    mut timer_display: Query<&mut Text2d, With<TimerDisplay>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    countdown.timer.tick(time.delta());
    if !countdown.timer.just_finished() || countdown.remaining == 0 {
        return;
    }

    countdown.remaining -= 1;
    if let Some(mut text) = timer_display.iter_mut().next() {
        *text = Text2d::new(format!("Time: {}", countdown.remaining));
    }

    if countdown.remaining == 0 {
        let outcome = resolve_outcome(stats.water, settings.0.water_goal);
        info!(
            "round resolved: score {} water {}/{} -> {outcome:?}",
            stats.score, stats.water, settings.0.water_goal
        );
        next_state.set(outcome);
    }
}

/// Refreshes the score text, meter fill and readout, and pops a floating
/// score at every catch position.
pub fn update_hud(
    mut commands: Commands,
    stats: Res<RoundStats>,
    settings: Res<RoundSettings>,
    mut catch_events: EventReader<CatchEvent>,
    mut score_display: Query<&mut Text2d, (With<ScoreDisplay>, Without<WaterReadout>)>,
    mut readout_display: Query<&mut Text2d, (With<WaterReadout>, Without<ScoreDisplay>)>,
    mut meter_fill: Query<(&mut Sprite, &mut Transform), With<WaterMeterFill>>,
) {
    for event in catch_events.read() {
        let (text, color) = match event.kind {
            DropKind::Good => ("+1", bevy::color::palettes::css::GREEN),
            DropKind::Bad => ("-1", bevy::color::palettes::css::RED),
        };
        spawn_floating_score(
            &mut commands,
            geometry::play_to_world(event.position, DROP_SIZE),
            text,
            color,
        );
    }

    if let Some(mut text) = score_display.iter_mut().next() {
        *text = Text2d::new(format!("Score: {}", stats.score));
    }
    // The compact readout is optional; skip silently when absent
    if let Some(mut text) = readout_display.iter_mut().next() {
        *text = Text2d::new(stats.water_readout(settings.0.water_goal));
    }
    if let Some((mut sprite, mut transform)) = meter_fill.iter_mut().next() {
        let full_width = METER_SIZE.x - 4.0;
        let width = stats.water_fill_fraction(settings.0.water_goal) * full_width;
        sprite.custom_size = Some(Vec2::new(width, METER_SIZE.y - 4.0));
        transform.translation.x = (width - full_width) / 2.0;
    }
}

/// Writes the bucket's logical position into its world transform
pub fn sync_bucket_transform(mut bucket_query: Query<(&Bucket, &mut Transform)>) {
    for (bucket, mut transform) in &mut bucket_query {
        transform.translation =
            geometry::play_to_world(geometry::bucket_rect(bucket.x).min, BUCKET_SIZE).extend(0.0);
    }
}

/// Writes every drop's logical position into its world transform
pub fn sync_drop_transforms(mut drops: Query<(&FallingDrop, &mut Transform)>) {
    for (drop, mut transform) in &mut drops {
        transform.translation = geometry::play_to_world(drop.pos, DROP_SIZE).extend(0.0);
    }
}

/// Clears every gameplay entity when leaving the Playing state
pub fn cleanup_game(
    mut commands: Commands,
    query: Query<
        Entity,
        Or<(
            With<FallingDrop>,
            With<Bucket>,
            With<ScoreDisplay>,
            With<TimerDisplay>,
            With<WaterMeter>,
            With<WaterMeterFill>,
            With<WaterReadout>,
            With<FloatingScore>,
        )>,
    >,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
