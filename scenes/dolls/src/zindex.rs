//! Zindex is a magical number determines stacking of elements.
//! Let's keep all that magic to this module otherwise we'll need a wizard to
//! maintain it.
//!
//! The dolls are UI and always on top of these.

pub(crate) const CLOUDS: f32 = 0.0;
/// Puffs are children of the cloud.
pub(crate) const CLOUD_PUFF: f32 = 0.1;
