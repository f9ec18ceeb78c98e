//! Shared visuals for both screens.
//!
//! - [`scatter`] places decorative shapes so that no two are too close
//! - [`ScatterTask`] runs the placement off the frame that handles input
//! - [`RegenerationCycle`] times the clear and regenerate steps
//! - [`RisingLoop`] and [`ColorFade`] animate what was placed
//! - [`shapes`] draws the star and the cloud without any texture

#![deny(missing_docs)]

pub mod camera;
mod cycle;
pub mod scatter;
pub mod shapes;
pub mod systems;
mod task;
mod types;

use bevy::{
    app::{App, Update},
    color::Color,
};
pub use cycle::{CycleStep, RegenerationCycle};
pub use scatter::{CancelToken, ScatterError, ScatterParams};
pub use task::ScatterTask;
pub use types::*;

/// Light cyan sky.
/// Matches a 20% cyan wash over white.
pub const SKY_COLOR: Color = Color::srgb(0.8, 1.0, 1.0);

/// Stars are slightly see-through.
pub const STAR_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);

/// Clouds are opaque white.
pub const CLOUD_COLOR: Color = Color::WHITE;

/// All text is black on the light sky.
pub const TEXT_COLOR: Color = Color::BLACK;

/// Registers the animation systems.
pub struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (systems::rise, systems::fade_color_materials),
        );

        #[cfg(feature = "devtools")]
        {
            app.register_type::<RisingLoop>()
                .register_type::<ColorFade>()
                .register_type::<FadeEnd>();
        }
    }
}
