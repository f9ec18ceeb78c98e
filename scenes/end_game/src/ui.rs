//! Caption under the stars.

use common_action::cancel_just_pressed;
use common_visuals::TEXT_COLOR;

use crate::prelude::*;

const TITLE: &str = "END GAME";
const TITLE_FONT_SIZE: f32 = 70.0;
const SUBTITLE: &str =
    "Doll name has fulfilled its duty. Hope it made you feel better.";
const SUBTITLE_FONT_SIZE: f32 = 16.0;
/// From the top of the screen.
const CAPTION_TOP: Val = Val::Percent(100.0 / 3.0);

pub(crate) struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GlobalGameState::AtEndGame), spawn)
            .add_systems(
                Update,
                exit.run_if(in_state(GlobalGameState::AtEndGame))
                    .run_if(cancel_just_pressed()),
            )
            .add_systems(OnEnter(GlobalGameState::QuittingEndGame), despawn);
    }
}

#[derive(Component)]
pub(crate) struct EndGameUi;

fn spawn(mut cmd: Commands) {
    debug!("Spawning end game UI");

    cmd.spawn((
        Name::new("EndGameUi"),
        EndGameUi,
        NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                top: CAPTION_TOP,
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            ..default()
        },
    ))
    .with_children(|parent| {
        parent.spawn(
            TextBundle::from_section(
                TITLE,
                TextStyle {
                    font_size: TITLE_FONT_SIZE,
                    color: TEXT_COLOR,
                    ..default()
                },
            )
            .with_text_justify(JustifyText::Center),
        );

        parent.spawn(
            TextBundle::from_section(
                SUBTITLE,
                TextStyle {
                    font_size: SUBTITLE_FONT_SIZE,
                    color: TEXT_COLOR,
                    ..default()
                },
            )
            .with_text_justify(JustifyText::Center),
        );
    });
}

fn despawn(mut cmd: Commands, ui: Query<Entity, With<EndGameUi>>) {
    for entity in ui.iter() {
        cmd.entity(entity).despawn_recursive();
    }
}

fn exit(mut next_state: ResMut<NextState<GlobalGameState>>) {
    info!("Leaving end game");
    next_state.set(GlobalGameState::QuittingEndGame);
}
