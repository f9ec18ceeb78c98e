//! Sound and haptic pulse that acknowledge a qualifying tap.
//!
//! Send a [`FeedbackEvent`] and both happen exactly once.
//! The haptic device is injected as the [`HapticsDevice`] resource so that
//! the game runs the same with or without a device that can vibrate.

use bevy::asset::LoadState;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};
use common_assets::paths;
use thiserror::Error;

use crate::prelude::*;

/// Every qualifying tap is acknowledged with this strength.
pub const TAP_IMPACT: ImpactStrength = ImpactStrength::Heavy;

/// One sound playback and one haptic pulse.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct FeedbackEvent;

/// How strong a haptic pulse is.
/// Taps only ever use the heavy one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ImpactStrength {
    /// Clearly felt.
    Heavy,
}

/// Anything that can produce a discrete haptic pulse.
pub trait Haptics: Send + Sync + 'static {
    /// Fire one pulse.
    fn impact(&self, strength: ImpactStrength);
}

/// The haptics the game talks to.
#[derive(Resource, Deref)]
pub struct HapticsDevice(pub Box<dyn Haptics>);

/// Used where no device can vibrate, e.g. desktop.
pub struct LoggedHaptics;

/// The sound that's played on every feedback.
#[derive(Resource, Clone)]
pub struct FeedbackSound(pub Handle<AudioSource>);

/// Why the feedback sound is not played.
/// None of these is fatal, the haptic pulse fires regardless.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Nothing began loading the sound.
    #[error("No feedback sound was set up")]
    Missing,
    /// The sound is not ready yet.
    #[error("Sound {path} is not loaded yet")]
    NotLoaded {
        /// Asset path of the sound.
        path: &'static str,
    },
    /// The file is missing or cannot be decoded.
    #[error("Sound {path} failed to load: {reason}")]
    Failed {
        /// Asset path of the sound.
        path: &'static str,
        /// What the asset server reported.
        reason: String,
    },
}

pub(crate) struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FeedbackEvent>()
            .add_systems(Startup, begin_loading_sound)
            .add_systems(
                Update,
                (play_sound, haptic_pulse).run_if(on_event::<FeedbackEvent>()),
            );

        if !app.world().contains_resource::<HapticsDevice>() {
            app.insert_resource(HapticsDevice(Box::new(LoggedHaptics)));
        }
    }
}

impl Haptics for LoggedHaptics {
    fn impact(&self, strength: ImpactStrength) {
        debug!("Haptic impact {strength:?}");
    }
}

fn begin_loading_sound(mut cmd: Commands, asset_server: Res<AssetServer>) {
    cmd.insert_resource(FeedbackSound(
        asset_server.load(paths::audio::TAP_FEEDBACK),
    ));
}

fn play_sound(
    mut events: EventReader<FeedbackEvent>,
    audio: Res<Audio>,
    asset_server: Res<AssetServer>,
    sound: Option<Res<FeedbackSound>>,
) {
    for _ in events.read() {
        let load_state = sound
            .as_deref()
            .map(|FeedbackSound(h)| asset_server.get_load_state(h));

        match ensure_playable(load_state) {
            Ok(()) => {
                if let Some(FeedbackSound(handle)) = sound.as_deref() {
                    trace!("Playing feedback sound");
                    audio.play(handle.clone());
                }
            }
            Err(err) => error!("Cannot play feedback sound: {err}"),
        }
    }
}

/// Fires one pulse per event.
pub fn haptic_pulse(
    mut events: EventReader<FeedbackEvent>,
    haptics: Res<HapticsDevice>,
) {
    for _ in events.read() {
        haptics.impact(TAP_IMPACT);
    }
}

/// The outer option is [`None`] when no sound was set up.
/// The inner one is what the asset server knows about the sound.
fn ensure_playable(
    load_state: Option<Option<LoadState>>,
) -> Result<(), PlaybackError> {
    let path = paths::audio::TAP_FEEDBACK;

    match load_state {
        None => Err(PlaybackError::Missing),
        Some(Some(LoadState::Loaded)) => Ok(()),
        Some(Some(LoadState::Failed(err))) => Err(PlaybackError::Failed {
            path,
            reason: err.to_string(),
        }),
        Some(_) => Err(PlaybackError::NotLoaded { path }),
    }
}
