use common_visuals::camera::order;

use crate::prelude::*;

pub(crate) struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GlobalGameState::LoadingDolls), spawn);
        app.add_systems(OnEnter(GlobalGameState::QuittingDolls), despawn);
    }
}

/// Renders both the clouds and the UI.
#[derive(Component)]
pub(crate) struct DollsCamera;

fn spawn(mut cmd: Commands) {
    debug!("Spawning cameras");

    cmd.spawn((
        Name::new("DollsCamera"),
        DollsCamera,
        Camera2dBundle {
            camera: Camera {
                order: order::DEFAULT,
                ..default()
            },
            ..default()
        },
    ));
}

fn despawn(mut cmd: Commands, camera: Query<Entity, With<DollsCamera>>) {
    for entity in camera.iter() {
        cmd.entity(entity).despawn_recursive();
    }
}
