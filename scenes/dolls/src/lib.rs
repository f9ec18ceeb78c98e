#![doc = include_str!("../README.md")]
#![allow(clippy::type_complexity)]

mod cameras;
mod clouds;
mod prelude;
mod sequence;
mod stages;
mod ui;
mod zindex;

use common_assets::{store::AssetList, AssetStore};
use main_game_lib::settings;
use prelude::*;
use sequence::RevealSequence;

/// Important scene struct.
/// Identifies anything that's related to the dolls screen.
#[derive(TypePath, Debug, Default)]
struct Dolls;

impl AssetList for Dolls {
    fn files() -> &'static [&'static str] {
        stages::ALL_IMAGES
    }
}

pub fn add(app: &mut App) {
    info!("Adding dolls to app");

    debug!("Adding plugins");

    app.add_plugins((cameras::Plugin, clouds::Plugin, ui::Plugin));

    debug!("Adding assets");

    app.add_systems(
        OnEnter(GlobalGameState::LoadingDolls),
        common_assets::store::insert_as_resource::<Dolls>,
    );
    app.add_systems(
        OnEnter(GlobalGameState::QuittingDolls),
        common_assets::store::remove_as_resource::<Dolls>,
    );

    debug!("Adding game loop");

    // 1. the images begin loading on entering the loading state
    // 2. when everything is settled, the sequence starts over
    app.add_systems(
        Last,
        finish_when_everything_loaded
            .run_if(in_state(GlobalGameState::LoadingDolls))
            .run_if(settings::are_settled)
            .run_if(resource_exists::<AssetStore<Dolls>>),
    );

    app.add_systems(OnEnter(GlobalGameState::QuittingDolls), despawn);
    app.add_systems(
        Last,
        main_game_lib::leave_quitting_state
            .run_if(in_state(GlobalGameState::QuittingDolls)),
    );

    info!("Added dolls to app");
}

fn finish_when_everything_loaded(
    mut cmd: Commands,
    mut next_state: ResMut<NextState<GlobalGameState>>,
    asset_store: Res<AssetStore<Dolls>>,
    asset_server: Res<AssetServer>,
    settings: Res<Settings>,
) {
    if !asset_store.are_all_settled(&asset_server) {
        return;
    }

    debug!("All assets loaded");

    cmd.insert_resource(RevealSequence::new(stages::stages(
        settings.taps_to_advance,
    )));

    next_state.set(GlobalGameState::AtDolls);
}

fn despawn(mut cmd: Commands) {
    debug!("Despawning resources");

    cmd.remove_resource::<RevealSequence>();
}
