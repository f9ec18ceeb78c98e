#![doc = include_str!("../README.md")]
#![allow(clippy::type_complexity)]

mod cameras;
mod prelude;
mod stars;
mod ui;
mod zindex;

use main_game_lib::settings;
use prelude::*;

pub fn add(app: &mut App) {
    info!("Adding end game to app");

    debug!("Adding plugins");

    app.add_plugins((cameras::Plugin, stars::Plugin, ui::Plugin));

    debug!("Adding game loop");

    // stars and text are drawn without any files, only settings are needed
    app.add_systems(
        Last,
        finish_when_settings_loaded
            .run_if(in_state(GlobalGameState::LoadingEndGame))
            .run_if(settings::are_settled),
    );

    app.add_systems(
        Last,
        main_game_lib::leave_quitting_state
            .run_if(in_state(GlobalGameState::QuittingEndGame)),
    );

    info!("Added end game to app");
}

fn finish_when_settings_loaded(
    mut next_state: ResMut<NextState<GlobalGameState>>,
) {
    debug!("End game ready");

    next_state.set(GlobalGameState::AtEndGame);
}
