//! The visible stage is a column with the angry face above the doll.
//! Tapping the doll, or pressing interact, taps the stage.
//! A tap on the doll counts when it's released, not when it's pressed.

use common_action::{cancel_just_pressed, interaction_just_pressed};

use crate::{
    prelude::*,
    sequence::{RevealSequence, TapOutcome},
    stages::{Stage, STAGE_COUNT},
};

const ANGRY_WIDTH: f32 = 180.0;
const DOLL_SIZE: f32 = 250.0;
const COLUMN_GAP: f32 = 16.0;

pub(crate) struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GlobalGameState::AtDolls), spawn)
            .add_systems(
                Update,
                (
                    tap_released_doll,
                    tap_visible_stage.run_if(interaction_just_pressed()),
                    sync_visible_stage
                        .run_if(resource_exists_and_changed::<RevealSequence>),
                )
                    .chain()
                    .run_if(in_state(GlobalGameState::AtDolls)),
            )
            .add_systems(
                Update,
                leave_when_complete
                    .run_if(in_state(GlobalGameState::AtDolls))
                    .run_if(cancel_just_pressed()),
            )
            .add_systems(OnEnter(GlobalGameState::QuittingDolls), despawn);
    }
}

/// Root node of the screen.
#[derive(Component)]
pub(crate) struct DollsUi;

/// Holds the angry face and the doll of one stage.
#[derive(Component)]
pub(crate) struct StageColumn(usize);

/// The doll that counts taps.
#[derive(Component)]
pub(crate) struct StageButton(usize);

/// Whether the doll was pressed and not released yet.
#[derive(Component, Default)]
pub(crate) struct Held(bool);

fn spawn(
    mut cmd: Commands,
    asset_server: Res<AssetServer>,
    sequence: Res<RevealSequence>,
) {
    debug!("Spawning dolls UI");

    let root = cmd
        .spawn((
            Name::new("DollsUi"),
            DollsUi,
            NodeBundle {
                style: Style {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                ..default()
            },
        ))
        .id();

    let stage = sequence.visible_stage();
    spawn_column(&mut cmd, &asset_server, root, stage, sequence.visible());
}

fn despawn(mut cmd: Commands, root: Query<Entity, With<DollsUi>>) {
    for entity in root.iter() {
        cmd.entity(entity).despawn_recursive();
    }
}

fn spawn_column(
    cmd: &mut Commands,
    asset_server: &AssetServer,
    root: Entity,
    index: usize,
    stage: &Stage,
) {
    trace!("Showing stage {}", index + 1);

    let column = cmd
        .spawn((
            Name::new(format!("Stage{}", index + 1)),
            StageColumn(index),
            NodeBundle {
                style: Style {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(COLUMN_GAP),
                    ..default()
                },
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn(ImageBundle {
                style: Style {
                    width: Val::Px(ANGRY_WIDTH),
                    ..default()
                },
                image: UiImage::new(asset_server.load(stage.angry)),
                ..default()
            });

            parent.spawn((
                StageButton(index),
                Held::default(),
                ButtonBundle {
                    style: Style {
                        width: Val::Px(DOLL_SIZE),
                        height: Val::Px(DOLL_SIZE),
                        ..default()
                    },
                    image: UiImage::new(asset_server.load(stage.doll)),
                    background_color: Color::NONE.into(),
                    ..default()
                },
            ));
        })
        .id();

    cmd.entity(root).add_child(column);
}

/// Swaps the column once the sequence moved on.
fn sync_visible_stage(
    mut cmd: Commands,
    asset_server: Res<AssetServer>,
    sequence: Res<RevealSequence>,

    root: Query<Entity, With<DollsUi>>,
    columns: Query<(Entity, &StageColumn)>,
) {
    let visible = sequence.visible_stage();

    let mut shown = false;
    for (entity, StageColumn(index)) in columns.iter() {
        if *index == visible {
            shown = true;
        } else {
            cmd.entity(entity).despawn_recursive();
        }
    }

    if shown {
        return;
    }

    let Ok(root) = root.get_single() else {
        warn!("No dolls UI to show stage {} in", visible + 1);
        return;
    };

    spawn_column(&mut cmd, &asset_server, root, visible, sequence.visible());
}

/// Releasing a touch leaves the button with [`Interaction::None`], releasing
/// the mouse over it with [`Interaction::Hovered`].
/// Both count.
fn tap_released_doll(
    mut sequence: ResMut<RevealSequence>,
    mut feedback: EventWriter<FeedbackEvent>,

    mut buttons: Query<
        (&Interaction, &StageButton, &mut Held),
        Changed<Interaction>,
    >,
) {
    for (interaction, StageButton(stage), mut held) in buttons.iter_mut() {
        match interaction {
            Interaction::Pressed => held.0 = true,
            Interaction::Hovered | Interaction::None if held.0 => {
                held.0 = false;
                tap(&mut sequence, &mut feedback, *stage);
            }
            Interaction::Hovered | Interaction::None => {}
        }
    }
}

fn tap_visible_stage(
    mut sequence: ResMut<RevealSequence>,
    mut feedback: EventWriter<FeedbackEvent>,
) {
    let stage = sequence.visible_stage();
    tap(&mut sequence, &mut feedback, stage);
}

fn tap(
    sequence: &mut RevealSequence,
    feedback: &mut EventWriter<FeedbackEvent>,
    stage: usize,
) {
    let outcome = sequence.tap(stage);

    match outcome {
        TapOutcome::Ignored => {
            trace!("Stage {} is not visible", stage + 1);
        }
        TapOutcome::Counted { taps, of } => {
            trace!("Stage {} tapped {taps}/{of}", stage + 1);
        }
        TapOutcome::Advanced { stage } => {
            info!("Stage {} revealed", stage + 1);
            if sequence.is_complete() {
                info!("All stages revealed");
            }
        }
        TapOutcome::Replayed => {
            trace!("Final stage tapped again");
        }
    }

    if outcome.fires_feedback() {
        feedback.send(FeedbackEvent);
    }
}

fn leave_when_complete(
    sequence: Res<RevealSequence>,
    mut next_state: ResMut<NextState<GlobalGameState>>,
) {
    if sequence.is_complete() {
        info!("Leaving dolls");
        next_state.set(GlobalGameState::QuittingDolls);
    } else {
        trace!(
            "Cannot leave yet, {} of {STAGE_COUNT} stages revealed",
            sequence.completed()
        );
    }
}
