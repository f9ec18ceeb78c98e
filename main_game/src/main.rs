use bevy::prelude::*;
use main_game_lib::prelude::*;

fn main() {
    let mut app = main_game_lib::windowed_app();
    info!("Windowed app from main_game_lib created");

    fn start(
        mut cmd: Commands,
        mut next_state: ResMut<NextState<GlobalGameState>>,
    ) {
        // Bevy requires that there's always a camera spawned while each
        // screen takes care of its own camera.
        // An inactive camera bridges the frames between the screens.
        cmd.spawn(Name::new("Inactive camera")).insert(Camera2dBundle {
            camera: Camera {
                is_active: false,
                ..default()
            },
            ..default()
        });

        next_state.set(GlobalGameState::LoadingDolls);
    }
    app.add_systems(Update, start.run_if(in_state(GlobalGameState::Blank)));

    info!("Adding screens");

    scene_dolls::add(&mut app);
    scene_end_game::add(&mut app);

    info!("Starting Emotional Wellness");
    app.run();
}
