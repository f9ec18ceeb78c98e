//! Both screens are laid out for a phone held upright.
//! All sizes here are logical pixels.

/// What's shown on screen.
pub const VISIBLE_WIDTH: f32 = 390.0;
/// What's shown on screen.
pub const VISIBLE_HEIGHT: f32 = 844.0;

pub mod order {
    //! The higher the order, the later the camera is rendered into the
    //! viewport.

    /// The main camera in each screen
    pub const DEFAULT: isize = 1;
}
