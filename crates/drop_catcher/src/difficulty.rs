use strum::{Display, EnumIter};

/// Named difficulty presets selectable on the welcome screen
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, Default, Display, EnumIter)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Fixed constants for one preset; no runtime mutation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultySettings {
    /// Seconds between drop spawns
    pub spawn_interval_secs: f32,
    /// Pixels a drop falls per motion tick (frame locked, not time corrected)
    pub fall_speed: f32,
    /// Pixels the bucket moves per key press
    pub bucket_step: f32,
    /// Drops needed in the meter to win the round
    pub water_goal: u32,
    /// Round length in seconds
    pub round_secs: u32,
}

impl Difficulty {
    /// Looks up a preset by name, case insensitively. Anything unknown
    /// degrades to Medium instead of failing.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::Medium,
        }
    }

    pub const fn settings(self) -> DifficultySettings {
        match self {
            Self::Easy => DifficultySettings {
                spawn_interval_secs: 1.5,
                fall_speed: 1.5,
                bucket_step: 40.0,
                water_goal: 15,
                round_secs: 70,
            },
            Self::Medium => DifficultySettings {
                spawn_interval_secs: 1.2,
                fall_speed: 2.0,
                bucket_step: 40.0,
                water_goal: 20,
                round_secs: 60,
            },
            Self::Hard => DifficultySettings {
                spawn_interval_secs: 0.9,
                fall_speed: 3.0,
                bucket_step: 50.0,
                water_goal: 25,
                round_secs: 50,
            },
        }
    }
}
