#![doc = include_str!("../../README.md")]
#![deny(missing_docs)]

pub mod feedback;
pub mod prelude;
pub mod settings;
pub mod state;

use bevy::{app::AppExit, prelude::*, window::WindowResolution};
use bevy_kira_audio::AudioPlugin;
use common_visuals::{
    camera::{VISIBLE_HEIGHT, VISIBLE_WIDTH},
    SKY_COLOR,
};
pub use state::GlobalGameState;

/// Constructs a new app with all the necessary plugins and systems.
///
/// Main game bin then adds screens and runs it.
pub fn windowed_app() -> App {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::WARN,
                filter: "\
                warn,\
                common_action=trace,\
                common_assets=trace,\
                common_visuals=trace,\
                main_game_lib=trace,\
                scene_dolls=trace,\
                scene_end_game=trace,\
                wellness=trace,\
                "
                .to_string(),
                ..default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Emotional Wellness".into(),
                    resolution: WindowResolution::new(
                        VISIBLE_WIDTH,
                        VISIBLE_HEIGHT,
                    ),
                    ..default()
                }),
                ..default()
            }),
    );

    info!("Initializing Emotional Wellness");

    app.init_state::<GlobalGameState>()
        .insert_resource(ClearColor(SKY_COLOR));

    #[cfg(feature = "devtools")]
    {
        app.register_type::<GlobalGameState>()
            .register_type::<feedback::ImpactStrength>();

        use bevy_inspector_egui::quick::{
            StateInspectorPlugin, WorldInspectorPlugin,
        };
        app.add_plugins((
            bevy_egui::EguiPlugin,
            WorldInspectorPlugin::new(),
            StateInspectorPlugin::<GlobalGameState>::default(),
        ));
    }

    app.add_plugins((
        AudioPlugin,
        common_action::Plugin,
        common_visuals::Plugin,
        feedback::Plugin,
        settings::Plugin,
    ));

    info!("Plugins added");

    app.add_systems(OnEnter(GlobalGameState::Exit), exit);

    app
}

/// Screens call this once they are done cleaning up.
/// Moves on to whatever follows the quitting state.
pub fn leave_quitting_state(
    state: Res<State<GlobalGameState>>,
    mut next_state: ResMut<NextState<GlobalGameState>>,
) {
    match state.get().next_after_quitting() {
        Some(next) => {
            info!("Leaving {:?} for {next:?}", state.get());
            next_state.set(next);
        }
        None => {
            unreachable!(
                "There's nowhere to transition from {:?}",
                state.get()
            );
        }
    }
}

fn exit(mut exit: EventWriter<AppExit>) {
    exit.send(AppExit::Success);
}
