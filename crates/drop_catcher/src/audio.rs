use bevy::prelude::*;
use bevy_asset_loader::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::celebration::BurstStarted;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
enum AssetState {
    #[default]
    Loading,
    Loaded,
}

#[derive(AssetCollection, Resource)]
struct AudioAssets {
    #[asset(path = "audio/splash.wav")]
    splash: Handle<bevy_kira_audio::prelude::AudioSource>,
}

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .init_state::<AssetState>()
            .add_loading_state(
                LoadingState::new(AssetState::Loading)
                    .continue_to_state(AssetState::Loaded)
                    .load_collection::<AudioAssets>(),
            )
            .add_systems(Update, splash_audio.run_if(in_state(AssetState::Loaded)));
    }
}

// Playback is best effort: if the asset never loads we simply stay in
// the Loading state and no sound plays.
fn splash_audio(
    audio_assets: Res<AudioAssets>,
    audio: Res<Audio>,
    mut burst_events: EventReader<BurstStarted>,
) {
    for _ in burst_events.read() {
        audio.play(audio_assets.splash.clone_weak());
    }
}
