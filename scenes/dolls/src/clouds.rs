//! Clouds rise behind the dolls in staggered waves.
//!
//! Their starting points are placed in the background and the clouds are
//! spawned once the placement is done.

use bevy::sprite::Mesh2dHandle;
use common_visuals::{
    shapes::cloud_puffs, RisingLoop, ScatterError, ScatterTask, CLOUD_COLOR,
};
use main_game_lib::settings::CloudSettings;

use crate::prelude::*;

pub(crate) struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GlobalGameState::AtDolls), start_placing)
            .add_systems(
                Update,
                spawn_when_placed.run_if(in_state(GlobalGameState::AtDolls)),
            )
            .add_systems(OnEnter(GlobalGameState::QuittingDolls), despawn);
    }
}

/// Marks the placement task and every cloud.
#[derive(Component, Default)]
pub(crate) struct Clouds;

/// One cloud made of puffs.
#[derive(Component)]
pub(crate) struct Cloud;

fn start_placing(mut cmd: Commands, settings: Res<Settings>) {
    let params = settings.clouds.scatter_params();
    debug!("Placing {} clouds", params.count);

    cmd.spawn((
        Name::new("CloudsPlacement"),
        Clouds,
        ScatterTask::<Clouds>::spawn(params),
    ));
}

fn spawn_when_placed(
    mut cmd: Commands,
    settings: Res<Settings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,

    mut tasks: Query<(Entity, &mut ScatterTask<Clouds>)>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = task.poll() else {
            continue;
        };
        cmd.entity(entity).despawn();

        let origins = match result {
            Ok(origins) => origins,
            Err(ScatterError::Infeasible { placed, .. }) => {
                warn!("Showing {} clouds only", placed.len());
                placed
            }
            Err(err @ ScatterError::Cancelled) => {
                debug!("{err}");
                continue;
            }
            Err(err @ ScatterError::InvalidArea { .. }) => {
                error!("No clouds: {err}");
                continue;
            }
        };

        let circle = Mesh2dHandle(meshes.add(Circle::new(1.0)));
        let material = materials.add(ColorMaterial::from(CLOUD_COLOR));

        for (index, rising) in
            rising_loops(&settings.clouds, origins).into_iter().enumerate()
        {
            let position = rising.position();

            cmd.spawn((
                Name::new(format!("Cloud{index}")),
                Clouds,
                Cloud,
                rising,
                SpatialBundle::from_transform(Transform::from_xyz(
                    position.x,
                    position.y,
                    zindex::CLOUDS,
                )),
            ))
            .with_children(|parent| {
                for puff in cloud_puffs(settings.clouds.size()) {
                    parent.spawn(ColorMesh2dBundle {
                        mesh: circle.clone(),
                        material: material.clone(),
                        transform: Transform::from_xyz(
                            puff.center.x,
                            puff.center.y,
                            zindex::CLOUD_PUFF,
                        )
                        .with_scale(Vec3::new(puff.radius, puff.radius, 1.0)),
                        ..default()
                    });
                }
            });
        }
    }
}

fn despawn(mut cmd: Commands, clouds: Query<Entity, With<Clouds>>) {
    debug!("Despawning clouds");

    for entity in clouds.iter() {
        cmd.entity(entity).despawn_recursive();
    }
}

/// The further the cloud is in the list, the further it rises.
fn rising_loops(
    settings: &CloudSettings,
    origins: Vec<Vec2>,
) -> Vec<RisingLoop> {
    origins
        .into_iter()
        .enumerate()
        .map(|(index, origin)| {
            RisingLoop::new(
                origin,
                settings.rise(index),
                settings.rise_duration,
                settings.start_delay(index),
            )
        })
        .collect()
}
