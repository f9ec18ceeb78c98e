//! Stars float around the center.
//!
//! On every clear of the [`RegenerationCycle`] the shown stars fade out and
//! despawn.
//! After the post-clear delay a new set is placed in the background and fades
//! in once the placement is done.
//! No star survives a regeneration.

use bevy::sprite::Mesh2dHandle;
use common_visuals::{
    shapes::star_mesh, ColorFade, CycleStep, RegenerationCycle, ScatterError,
    ScatterTask, STAR_COLOR,
};

use crate::prelude::*;

pub(crate) struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GlobalGameState::AtEndGame), start)
            .add_systems(
                Update,
                (advance_cycle, spawn_when_placed)
                    .chain()
                    .run_if(in_state(GlobalGameState::AtEndGame)),
            )
            .add_systems(OnEnter(GlobalGameState::QuittingEndGame), despawn);
    }
}

/// Marks the placement task and every star, including those fading out.
#[derive(Component, Default)]
pub(crate) struct Stars;

/// A star that's part of the current set.
#[derive(Component)]
pub(crate) struct Star;

/// Times the clear and regenerate steps of the stars.
#[derive(Resource, Deref, DerefMut)]
pub(crate) struct StarCycle(RegenerationCycle);

/// All stars share the mesh, each owns its material.
#[derive(Resource)]
pub(crate) struct StarMesh(Mesh2dHandle);

fn start(
    mut cmd: Commands,
    settings: Res<Settings>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let stars = &settings.stars;
    debug!(
        "Regenerating {} stars every {:?}",
        stars.count, stars.regeneration_interval
    );

    cmd.insert_resource(StarCycle(RegenerationCycle::new(
        stars.regeneration_interval,
        stars.fade_out,
    )));
    cmd.insert_resource(StarMesh(Mesh2dHandle(
        meshes.add(star_mesh(Vec2::splat(stars.size))),
    )));

    // the first set is shown right away
    start_placing(&mut cmd, &settings);
}

fn despawn(mut cmd: Commands, stars: Query<Entity, With<Stars>>) {
    debug!("Despawning stars");

    for entity in stars.iter() {
        cmd.entity(entity).despawn_recursive();
    }

    cmd.remove_resource::<StarCycle>();
    cmd.remove_resource::<StarMesh>();
}

fn start_placing(cmd: &mut Commands, settings: &Settings) {
    cmd.spawn((
        Name::new("StarsPlacement"),
        Stars,
        ScatterTask::<Stars>::spawn(settings.stars.scatter_params()),
    ));
}

fn advance_cycle(
    mut cmd: Commands,
    time: Res<Time>,
    settings: Res<Settings>,
    mut cycle: ResMut<StarCycle>,
    materials: Res<Assets<ColorMaterial>>,

    shown: Query<(Entity, &Handle<ColorMaterial>), With<Star>>,
    placing: Query<Entity, With<ScatterTask<Stars>>>,
) {
    for step in cycle.tick(time.delta()) {
        match step {
            CycleStep::Clear => {
                trace!("Clearing stars");

                for (entity, material) in shown.iter() {
                    let alpha = materials
                        .get(material)
                        .map(|m| m.color.alpha())
                        .unwrap_or_else(|| STAR_COLOR.alpha());

                    cmd.entity(entity).remove::<Star>().insert(
                        ColorFade::fade_out_and_despawn(
                            alpha,
                            settings.stars.fade_out,
                        ),
                    );
                }
            }
            CycleStep::Regenerate => {
                trace!("Regenerating stars");

                // a placement that's still running is outdated
                for entity in placing.iter() {
                    cmd.entity(entity).despawn();
                }

                start_placing(&mut cmd, &settings);
            }
        }
    }
}

fn spawn_when_placed(
    mut cmd: Commands,
    settings: Res<Settings>,
    mesh: Res<StarMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,

    mut tasks: Query<(Entity, &mut ScatterTask<Stars>)>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = task.poll() else {
            continue;
        };
        cmd.entity(entity).despawn();

        let positions = match result {
            Ok(positions) => positions,
            Err(ScatterError::Infeasible {
                placed,
                requested,
                attempts,
            }) => {
                warn!(
                    "Showing {} of {requested} stars after {attempts} attempts",
                    placed.len()
                );
                placed
            }
            Err(err @ ScatterError::Cancelled) => {
                debug!("{err}");
                continue;
            }
            Err(err @ ScatterError::InvalidArea { .. }) => {
                error!("No stars: {err}");
                continue;
            }
        };

        for (index, position) in positions.into_iter().enumerate() {
            let material =
                materials.add(ColorMaterial::from(STAR_COLOR.with_alpha(0.0)));

            cmd.spawn((
                Name::new(format!("Star{index}")),
                Stars,
                Star,
                ColorFade::fade_in(settings.stars.fade_in)
                    .to(STAR_COLOR.alpha()),
                ColorMesh2dBundle {
                    mesh: mesh.0.clone(),
                    material,
                    transform: Transform::from_xyz(
                        position.x,
                        position.y,
                        zindex::STARS,
                    ),
                    ..default()
                },
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::{
        ecs::system::RunSystemOnce, state::app::StatesPlugin,
        time::TimeUpdateStrategy,
    };
    use common_visuals::systems::fade_color_materials;
    use main_game_lib::settings::StarSettings;

    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<ColorMaterial>>()
            .init_resource::<Settings>()
            .insert_resource(TimeUpdateStrategy::ManualDuration(
                Duration::ZERO,
            ))
            .add_systems(
                Update,
                (fade_color_materials, advance_cycle, spawn_when_placed)
                    .chain(),
            );
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .set_max_delta(Duration::from_secs(10));

        app.world_mut().run_system_once(start);
        app
    }

    /// Updates until the running placement is done.
    fn wait_for_placement(app: &mut App) {
        for _ in 0..1_000 {
            app.update();

            let mut tasks =
                app.world_mut().query::<&ScatterTask<Stars>>();
            if tasks.iter(app.world()).next().is_none() {
                return;
            }

            std::thread::sleep(Duration::from_millis(1));
        }

        panic!("Stars were never placed");
    }

    fn star_positions(app: &mut App) -> Vec<Vec2> {
        let mut stars = app
            .world_mut()
            .query_filtered::<&Transform, With<Star>>();
        stars
            .iter(app.world())
            .map(|t| t.translation.truncate())
            .collect()
    }

    fn advance(app: &mut App, by: Duration) {
        app.insert_resource(TimeUpdateStrategy::ManualDuration(by));
        app.update();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    }

    #[test]
    fn it_shows_spaced_stars_on_start() {
        let mut app = app();
        wait_for_placement(&mut app);

        let settings = StarSettings::default();
        let positions = star_positions(&mut app);

        assert_eq!(settings.count, positions.len());
        for (i, a) in positions.iter().enumerate() {
            assert!(a.x.abs() <= settings.placement_range);
            assert!(a.y.abs() <= settings.placement_range);
            for b in &positions[i + 1..] {
                assert!(a.distance(*b) >= settings.min_distance);
            }
        }
    }

    #[test]
    fn it_replaces_every_star_on_regeneration() {
        let mut app = app();
        wait_for_placement(&mut app);
        let mut before = app.world_mut().query_filtered::<Entity, With<Star>>();
        let before: Vec<_> = before.iter(app.world()).collect();
        assert!(!before.is_empty());

        // clear
        advance(&mut app, from_millis(2_000));
        assert!(star_positions(&mut app).is_empty());
        for entity in &before {
            assert!(app.world().get::<ColorFade>(*entity).is_some());
        }

        // regenerate once the cleared stars faded out
        advance(&mut app, from_millis(500));
        for entity in &before {
            assert!(app.world().get_entity(*entity).is_none());
        }
        wait_for_placement(&mut app);

        let mut after = app.world_mut().query_filtered::<Entity, With<Star>>();
        let after: Vec<_> = after.iter(app.world()).collect();
        assert_eq!(StarSettings::default().count, after.len());
        assert!(after.iter().all(|e| !before.contains(e)));
    }

    fn go_to(app: &mut App, state: GlobalGameState) {
        app.world_mut()
            .resource_mut::<NextState<GlobalGameState>>()
            .set(state);
        app.update();
    }

    #[test]
    fn it_cancels_the_placement_on_quitting() {
        // only one star ever fits and the attempts never run out
        let settings = Settings {
            stars: StarSettings {
                min_distance: 1e6,
                max_attempts: usize::MAX,
                ..default()
            },
            ..default()
        };

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, Plugin))
            .init_state::<GlobalGameState>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<ColorMaterial>>()
            .insert_resource(settings);

        go_to(&mut app, GlobalGameState::AtEndGame);
        let mut tasks = app
            .world_mut()
            .query_filtered::<(Entity, &ScatterTask<Stars>), With<Stars>>();
        let (task, token) = tasks
            .get_single(app.world())
            .map(|(entity, task)| (entity, task.cancel_token()))
            .expect("Placement runs");
        assert!(!token.is_cancelled());

        go_to(&mut app, GlobalGameState::QuittingEndGame);

        assert!(app.world().get_entity(task).is_none());
        assert!(token.is_cancelled());
        assert!(!app.world().contains_resource::<StarCycle>());
        assert!(!app.world().contains_resource::<StarMesh>());
    }

    #[test]
    fn it_shows_no_stars_for_an_area_that_is_not_finite() {
        let settings = Settings {
            stars: StarSettings {
                placement_range: f32::INFINITY,
                ..default()
            },
            ..default()
        };
        let mut app = app();
        app.insert_resource(settings);
        // the first placement used the defaults, let it finish
        wait_for_placement(&mut app);
        let shown = star_positions(&mut app).len();

        // regenerate with the broken settings
        advance(&mut app, from_millis(2_000));
        advance(&mut app, from_millis(500));
        wait_for_placement(&mut app);

        assert_eq!(StarSettings::default().count, shown);
        assert!(star_positions(&mut app).is_empty());
    }
}
