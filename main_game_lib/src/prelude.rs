//! Commonly used imports of the game crates.

pub use bevy::math::vec2;
pub use bevy::prelude::*;
pub use common_action::{ActionState, GlobalAction};
pub use std::time::Duration;

pub use crate::{
    feedback::FeedbackEvent, settings::Settings, GlobalGameState,
};

/// Shorthand for [`Duration::from_millis`] usable in consts.
pub const fn from_millis(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
