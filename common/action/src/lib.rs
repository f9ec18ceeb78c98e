//! Global actions are accessible as a resource.
//!
//! Touch and mouse input go through bevy UI interactions.
//! These actions are the keyboard side of the same screens.

#![deny(missing_docs)]

use bevy::prelude::*;
pub use leafwing_input_manager::{self, action_state::ActionState};
use leafwing_input_manager::{
    input_map::InputMap, plugin::InputManagerPlugin, Actionlike,
};
use strum::{EnumIter, IntoEnumIterator};

/// Registers necessary types, inserts resources and adds the dependent
/// [`InputManagerPlugin`].
pub struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionState<GlobalAction>>()
            .insert_resource(GlobalAction::input_map())
            .add_plugins(InputManagerPlugin::<GlobalAction>::default())
            .register_type::<GlobalAction>();
    }
}

/// These actions are used on both screens.
#[derive(
    Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect, EnumIter,
)]
#[non_exhaustive]
pub enum GlobalAction {
    /// Same as tapping whatever is tappable on the screen.
    Interact,
    /// Leave the current screen.
    Cancel,
}

/// Runs a system if interaction was just pressed.
pub fn interaction_just_pressed(
) -> impl FnMut(Res<ActionState<GlobalAction>>) -> bool {
    move |action_state: Res<ActionState<GlobalAction>>| {
        action_state.just_pressed(&GlobalAction::Interact)
    }
}

/// Runs a system if cancel was just pressed.
pub fn cancel_just_pressed(
) -> impl FnMut(Res<ActionState<GlobalAction>>) -> bool {
    move |action_state: Res<ActionState<GlobalAction>>| {
        action_state.just_pressed(&GlobalAction::Cancel)
    }
}

impl GlobalAction {
    fn input_map() -> InputMap<Self> {
        let mut input_map = InputMap::default();

        for action in GlobalAction::iter() {
            for key in GlobalAction::default_keyboard_input(action) {
                input_map.insert(action, key);
            }
        }

        input_map
    }

    fn default_keyboard_input(action: GlobalAction) -> Vec<KeyCode> {
        use KeyCode::*;

        match action {
            Self::Interact => vec![Space, Enter],
            Self::Cancel => vec![Escape, Backspace],
        }
    }
}
