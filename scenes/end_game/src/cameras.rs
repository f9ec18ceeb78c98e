use common_visuals::camera::order;

use crate::prelude::*;

pub(crate) struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GlobalGameState::LoadingEndGame), spawn);
        app.add_systems(OnEnter(GlobalGameState::QuittingEndGame), despawn);
    }
}

#[derive(Component)]
pub(crate) struct EndGameCamera;

fn spawn(mut cmd: Commands) {
    debug!("Spawning cameras");

    cmd.spawn((
        Name::new("EndGameCamera"),
        EndGameCamera,
        Camera2dBundle {
            camera: Camera {
                order: order::DEFAULT,
                ..default()
            },
            ..default()
        },
    ));
}

fn despawn(mut cmd: Commands, camera: Query<Entity, With<EndGameCamera>>) {
    for entity in camera.iter() {
        cmd.entity(entity).despawn_recursive();
    }
}
