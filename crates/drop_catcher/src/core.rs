use bevy::prelude::*;

use crate::difficulty::DifficultySettings;

/// Game states that control the flow of the application
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum GameState {
    /// Pre-round screen, also reached again from both end screens
    #[default]
    Welcome,
    Playing,
    Won,
    Lost,
}

/// Whether a drop fills or spoils the bucket
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum DropKind {
    Good,
    Bad,
}

/// Component for falling water drop entities
#[derive(Component)]
pub struct FallingDrop {
    /// Top left corner in play area coordinates (y grows downward)
    pub pos: Vec2,
    /// Fixed at spawn time
    pub kind: DropKind,
}

/// Component for the player's bucket
#[derive(Component)]
pub struct Bucket {
    /// Left edge in play area coordinates
    pub x: f32,
}

/// Score and water meter bookkeeping for the current round
#[derive(Resource, Default)]
pub struct RoundStats {
    pub score: u32,
    pub water: u32,
}

impl RoundStats {
    /// Single mutation point for catches. Clamps happen here, never after
    /// the fact: score floors at zero, water saturates in `[0, goal]`.
    pub fn apply_catch(&mut self, kind: DropKind, goal: u32) {
        match kind {
            DropKind::Good => {
                self.score += 1;
                self.water = (self.water + 1).min(goal);
            }
            DropKind::Bad => {
                self.score = self.score.saturating_sub(1);
                self.water = self.water.saturating_sub(1);
            }
        }
    }

    /// Proportional fill of the water meter, 0.0 to 1.0
    pub fn water_fill_fraction(&self, goal: u32) -> f32 {
        if goal == 0 {
            1.0
        } else {
            self.water as f32 / goal as f32
        }
    }

    /// Compact readout for the secondary display
    pub fn water_readout(&self, goal: u32) -> String {
        format!("{} / {goal}", self.water)
    }
}

/// The difficulty preset values fixed for the current round
#[derive(Resource, Clone, Copy)]
pub struct RoundSettings(pub DifficultySettings);

/// Once-per-second countdown for the current round
#[derive(Resource)]
pub struct RoundCountdown {
    pub timer: Timer,
    /// Whole seconds left; the round resolves the instant this reaches zero
    pub remaining: u32,
}

impl RoundCountdown {
    pub fn new(round_secs: u32) -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
            remaining: round_secs,
        }
    }
}

/// Controls drop spawning cadence
#[derive(Resource)]
pub struct SpawnTimer(pub Timer);

/// Difficulty picked on the welcome screen, persists across rounds
#[derive(Resource, Default)]
pub struct SelectedDifficulty(pub crate::difficulty::Difficulty);

/// Sent for every drop the bucket catches
#[derive(Event)]
pub struct CatchEvent {
    pub kind: DropKind,
    /// Top left corner of the drop at catch time, play area coordinates
    pub position: Vec2,
}

/// The win/lose decision, evaluated exactly once when the countdown hits
/// zero. Meeting the goal exactly counts as a win.
pub const fn resolve_outcome(water: u32, goal: u32) -> GameState {
    if water >= goal {
        GameState::Won
    } else {
        GameState::Lost
    }
}

/// Game configuration constants
pub mod config {
    use bevy::prelude::Vec2;

    // Play area, origin at the top left corner, y growing downward. The
    // display surface translates these into world pixels.
    pub const PLAY_AREA_WIDTH: f32 = game_helpers::WINDOW_WIDTH;
    pub const PLAY_AREA_HEIGHT: f32 = game_helpers::WINDOW_HEIGHT;

    // Bucket configuration
    pub const BUCKET_SIZE: Vec2 = Vec2::new(80.0, 40.0);
    pub const BUCKET_BOTTOM_OFFSET: f32 = 10.0;
    /// Bucket keeps this distance from both side walls
    pub const EDGE_MARGIN: f32 = 10.0;

    // Drop configuration
    pub const DROP_SIZE: Vec2 = Vec2::new(40.0, 48.0);
    pub const BAD_DROP_CHANCE: f32 = 0.25;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_catches_saturate_at_goal() {
        let mut stats = RoundStats::default();
        for _ in 0..25 {
            stats.apply_catch(DropKind::Good, 20);
        }
        assert_eq!(stats.water, 20, "water must cap at the goal");
        assert_eq!(stats.score, 25, "score keeps counting past the cap");
    }

    #[test]
    fn bad_catches_floor_at_zero() {
        let mut stats = RoundStats::default();
        stats.apply_catch(DropKind::Bad, 20);
        stats.apply_catch(DropKind::Bad, 20);
        assert_eq!(stats.score, 0, "score must not go negative");
        assert_eq!(stats.water, 0, "water must not go negative");
    }

    #[test]
    fn mixed_sequence_stays_in_range() {
        let mut stats = RoundStats::default();
        let goal = 5;
        let sequence = [
            DropKind::Bad,
            DropKind::Good,
            DropKind::Good,
            DropKind::Bad,
            DropKind::Bad,
            DropKind::Good,
            DropKind::Good,
            DropKind::Good,
            DropKind::Good,
            DropKind::Good,
            DropKind::Good,
        ];
        for kind in sequence {
            stats.apply_catch(kind, goal);
            assert!(stats.water <= goal, "water exceeded the goal");
        }
        assert_eq!(stats.water, 5);
        // 8 good, 3 bad, one of which hit an already-zero score
        assert_eq!(stats.score, 6);
    }

    #[test]
    fn fill_fraction_and_readout() {
        let stats = RoundStats { score: 7, water: 5 };
        assert!((stats.water_fill_fraction(20) - 0.25).abs() < f32::EPSILON);
        assert_eq!(stats.water_readout(20), "5 / 20");
    }

    #[test]
    fn outcome_is_boundary_inclusive() {
        assert_eq!(resolve_outcome(20, 20), GameState::Won);
        assert_eq!(resolve_outcome(19, 20), GameState::Lost);
        assert_eq!(resolve_outcome(25, 20), GameState::Won);
    }

    #[test]
    fn outcome_is_idempotent() {
        let first = resolve_outcome(7, 15);
        let second = resolve_outcome(7, 15);
        assert_eq!(first, second);
        assert_eq!(first, GameState::Lost);
    }
}
